//! A scoped working directory for driver tests.

use std::path::{Path, PathBuf};

use inifuzz_core::{ConfigParser, FuzzDriver};
use tempfile::TempDir;

/// Temp directory holding the candidate file of one test.
///
/// The directory is deleted when this value is dropped, guaranteeing cleanup
/// even on panic.
pub struct TestWorkdir {
    dir: TempDir,
}

impl TestWorkdir {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Candidate path used by [`TestWorkdir::driver`].
    pub fn candidate_path(&self) -> PathBuf {
        self.dir.path().join("example.ini")
    }

    /// Build a driver writing its candidate into this directory.
    pub fn driver<P: ConfigParser>(&self, parser: P) -> FuzzDriver<P> {
        FuzzDriver::new(parser, self.candidate_path())
    }

    /// Whether the directory holds no files at all.
    pub fn is_clean(&self) -> bool {
        std::fs::read_dir(self.dir.path())
            .map(|mut entries| entries.next().is_none())
            .unwrap_or(false)
    }
}

impl Default for TestWorkdir {
    fn default() -> Self {
        Self::new()
    }
}
