//! Configuration builders for tests.
//!
//! Use [`TestConfigBuilder`] to create customised [`HarnessConfig`] values
//! without repeating boilerplate across crate boundaries.

use std::path::Path;

use inifuzz_config::HarnessConfig;

/// Fluent builder for [`HarnessConfig`] in tests.
///
/// # Example
///
/// ```ignore
/// let config = TestConfigBuilder::new()
///     .candidate_dir(workdir.path())
///     .per_process(false)
///     .build();
/// ```
pub struct TestConfigBuilder {
    config: HarnessConfig,
}

impl TestConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: HarnessConfig::default(),
        }
    }

    pub fn candidate_dir(mut self, dir: &Path) -> Self {
        self.config.candidate.dir = dir.display().to_string();
        self
    }

    pub fn stem(mut self, stem: &str) -> Self {
        self.config.candidate.stem = stem.to_string();
        self
    }

    pub fn per_process(mut self, per_process: bool) -> Self {
        self.config.candidate.per_process = per_process;
        self
    }

    pub fn log_level(mut self, level: &str) -> Self {
        self.config.logging.level = level.to_string();
        self
    }

    pub fn build(self) -> HarnessConfig {
        self.config
    }
}

impl Default for TestConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
