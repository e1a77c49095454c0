#![deny(unsafe_code)]

//! INI parsing and harness settings for inifuzz.
//!
//! The [`IniConfig`] parser is the code under test: the fuzz harness feeds it
//! arbitrary bytes through a candidate file and watches for failures that are
//! neither syntax nor decoding errors.
//!
//! [`HarnessConfig`] holds the settings of the harness itself, loaded from an
//! optional TOML file.

/// The INI document model and loaders.
pub mod ini;
mod parse;

pub use ini::{Entry, IniConfig, IniError, ParseError, Section};

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Errors that can occur while loading the harness settings.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    Validation(String),
}

/// Top-level harness configuration.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// Where candidate input files are written.
    #[serde(default)]
    pub candidate: CandidateConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Location and naming of the per-trial candidate file.
///
/// ## TOML Example
///
/// ```toml
/// [candidate]
/// dir = "/dev/shm/inifuzz"
/// stem = "example"
/// extension = "ini"
/// per_process = true
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateConfig {
    /// Directory the candidate file is created in.
    #[serde(default = "default_candidate_dir")]
    pub dir: String,

    /// File name stem.
    #[serde(default = "default_candidate_stem")]
    pub stem: String,

    /// File extension, without the leading dot.
    #[serde(default = "default_candidate_extension")]
    pub extension: String,

    /// Append the process id to the stem so parallel fuzz workers
    /// never share a candidate file.
    #[serde(default = "default_per_process")]
    pub per_process: bool,
}

impl Default for CandidateConfig {
    fn default() -> Self {
        Self {
            dir: default_candidate_dir(),
            stem: default_candidate_stem(),
            extension: default_candidate_extension(),
            per_process: default_per_process(),
        }
    }
}

fn default_candidate_dir() -> String {
    ".".to_string()
}

fn default_candidate_stem() -> String {
    "example".to_string()
}

fn default_candidate_extension() -> String {
    "ini".to_string()
}

fn default_per_process() -> bool {
    true
}

impl CandidateConfig {
    /// File name for the current process, e.g. `example-4242.ini`.
    pub fn file_name(&self) -> String {
        self.file_name_for(std::process::id())
    }

    /// File name for the process `pid`.
    pub fn file_name_for(&self, pid: u32) -> String {
        if self.per_process {
            format!("{}-{pid}.{}", self.stem, self.extension)
        } else {
            format!("{}.{}", self.stem, self.extension)
        }
    }

    /// Full candidate path for the current process.
    pub fn path(&self) -> PathBuf {
        Path::new(&self.dir).join(self.file_name())
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g. "warn", "info", "debug"). `RUST_LOG` overrides it.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl HarnessConfig {
    /// Load configuration from a TOML file at the given path.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let config: HarnessConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let candidate = &self.candidate;
        if candidate.dir.is_empty() {
            return Err(ConfigError::Validation(
                "candidate.dir must not be empty".to_string(),
            ));
        }
        if candidate.stem.is_empty() {
            return Err(ConfigError::Validation(
                "candidate.stem must not be empty".to_string(),
            ));
        }
        if candidate.extension.is_empty() {
            return Err(ConfigError::Validation(
                "candidate.extension must not be empty".to_string(),
            ));
        }
        for (field, value) in [
            ("stem", &candidate.stem),
            ("extension", &candidate.extension),
        ] {
            if value.contains(['/', '\\']) {
                return Err(ConfigError::Validation(format!(
                    "candidate.{field} must not contain path separators, got {value:?}"
                )));
            }
        }
        if candidate.extension.starts_with('.') {
            return Err(ConfigError::Validation(format!(
                "candidate.extension must not start with '.', got {:?}",
                candidate.extension
            )));
        }

        let valid_levels = ["error", "warn", "info", "debug", "trace", "off"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "logging.level must be one of {:?}, got {:?}",
                valid_levels, self.logging.level
            )));
        }

        Ok(())
    }
}
