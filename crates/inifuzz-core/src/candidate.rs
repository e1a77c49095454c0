//! The candidate input file.
//!
//! A [`CandidateFile`] owns the on-disk copy of one trial's input. The file is
//! removed when the guard is dropped, so it disappears on every exit path of a
//! trial, including a parser panic that unwinds through the driver.

use std::io;
use std::path::{Path, PathBuf};

use tracing::warn;

/// Scoped candidate file, deleted on drop.
#[derive(Debug)]
pub struct CandidateFile {
    path: PathBuf,
}

impl CandidateFile {
    /// Write `data` verbatim to `path`, truncating any previous content.
    ///
    /// The guard exists before the write starts, so a partially written file
    /// is removed as well when the write fails.
    pub fn write(path: impl Into<PathBuf>, data: &[u8]) -> io::Result<Self> {
        let candidate = Self { path: path.into() };
        std::fs::write(&candidate.path, data)?;
        Ok(candidate)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for CandidateFile {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path)
            && e.kind() != io::ErrorKind::NotFound
        {
            warn!(path = %self.path.display(), error = %e, "failed to remove candidate file");
        }
    }
}
