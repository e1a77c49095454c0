//! One-time setup for fuzz targets.
//!
//! Fuzz targets call [`init`] exactly once, before the first trial, from
//! libFuzzer's `init:` hook. It loads the harness settings, installs logging,
//! and returns the driver that every subsequent trial runs through.

use std::path::Path;

use inifuzz_config::{ConfigError, HarnessConfig};
use tracing::info;

use crate::driver::FuzzDriver;
use crate::logging;
use crate::parser::IniParser;

/// Environment variable naming an optional TOML settings file.
pub const CONFIG_ENV: &str = "INIFUZZ_CONFIG";

/// Load settings from the file named by [`CONFIG_ENV`], or defaults when the
/// variable is unset.
pub fn config_from_env() -> Result<HarnessConfig, ConfigError> {
    let path = std::env::var_os(CONFIG_ENV);
    config_from_path(path.as_deref().map(Path::new))
}

/// Load settings from `path`, or defaults when there is none.
pub fn config_from_path(path: Option<&Path>) -> Result<HarnessConfig, ConfigError> {
    match path {
        Some(path) => HarnessConfig::load(path),
        None => Ok(HarnessConfig::default()),
    }
}

/// Install logging and build the INI fuzz driver.
pub fn init(config: &HarnessConfig) -> FuzzDriver<IniParser> {
    logging::init(&config.logging.level);
    let driver = FuzzDriver::from_config(IniParser, &config.candidate);
    info!(
        candidate = %driver.candidate_path().display(),
        "fuzz harness initialised"
    );
    driver
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_defaults_without_path() {
        let config = config_from_path(None).unwrap();
        assert_eq!(config.candidate.stem, "example");
    }

    #[test]
    fn test_config_from_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("inifuzz.toml");
        std::fs::write(&path, "[candidate]\nstem = \"harness\"\n").unwrap();

        let config = config_from_path(Some(&path)).unwrap();
        assert_eq!(config.candidate.stem, "harness");
    }

    #[test]
    fn test_config_from_missing_file_is_error() {
        assert!(config_from_path(Some(Path::new("/nonexistent/inifuzz.toml"))).is_err());
    }

    #[test]
    fn test_init_builds_driver_for_config() {
        let tmp = TempDir::new().unwrap();
        let mut config = HarnessConfig::default();
        config.candidate.dir = tmp.path().display().to_string();

        let driver = init(&config);
        assert_eq!(
            driver.candidate_path(),
            tmp.path().join(config.candidate.file_name())
        );
        assert!(driver.run_trial(b"[section]\nkey=value\n").is_ok());
        assert!(!driver.candidate_path().exists());
    }
}
