//! Fuzzing engines.
//!
//! An [`Engine`] owns the loop: it produces input buffers and calls the trial
//! function once per buffer, sequentially. libFuzzer plays this role in the
//! fuzz targets. [`ReplayEngine`] plays it everywhere else, feeding saved
//! corpus entries and crash reproducers back through the same trial function.

use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::outcome::{Classification, TrialError};
use crate::stats::TrialStats;

/// The per-input callback an engine drives.
pub type TrialFn<'a> = dyn FnMut(&[u8]) -> Result<Classification, TrialError> + 'a;

/// A driver loop that invokes a trial callback once per generated input.
pub trait Engine {
    /// Run until the engine's own stop condition. A trial error either stops
    /// the loop or is recorded, depending on the engine.
    fn run_loop(&mut self, trial: &mut TrialFn<'_>) -> Result<RunReport, EngineError>;
}

/// Errors from an engine run.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to read input {}: {source}", .path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unexpected failure on input {}: {source}", .input.display())]
    Crash {
        input: PathBuf,
        #[source]
        source: TrialError,
    },
}

/// An input that produced an unexpected failure.
#[derive(Debug, Clone, Serialize)]
pub struct CrashRecord {
    pub input: PathBuf,
    pub error: String,
}

/// Summary of an engine run.
#[derive(Debug, Default, Clone, Serialize)]
pub struct RunReport {
    pub stats: TrialStats,
    pub crashes: Vec<CrashRecord>,
}

/// Replays files from disk through the trial function.
///
/// Directory inputs expand to the regular files directly inside them, in
/// name order, the way libFuzzer reads a corpus directory.
#[derive(Debug, Clone)]
pub struct ReplayEngine {
    inputs: Vec<PathBuf>,
    max_runs: Option<usize>,
    keep_going: bool,
}

impl ReplayEngine {
    pub fn new(inputs: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            inputs: inputs.into_iter().collect(),
            max_runs: None,
            keep_going: false,
        }
    }

    /// Stop after `runs` trials.
    pub fn with_max_runs(mut self, runs: usize) -> Self {
        self.max_runs = Some(runs);
        self
    }

    /// Record crashes and continue instead of stopping at the first one.
    pub fn with_keep_going(mut self, keep_going: bool) -> Self {
        self.keep_going = keep_going;
        self
    }

    /// Expand the configured inputs into the list of files to replay.
    pub fn collect_inputs(&self) -> Result<Vec<PathBuf>, EngineError> {
        let mut files = Vec::new();
        for input in &self.inputs {
            if input.is_dir() {
                files.extend(read_corpus_dir(input)?);
            } else {
                files.push(input.clone());
            }
        }
        Ok(files)
    }
}

impl Engine for ReplayEngine {
    fn run_loop(&mut self, trial: &mut TrialFn<'_>) -> Result<RunReport, EngineError> {
        let inputs = self.collect_inputs()?;
        let limit = self.max_runs.unwrap_or(usize::MAX);
        info!(inputs = inputs.len(), "replaying inputs");

        let mut report = RunReport::default();
        for input in inputs.into_iter().take(limit) {
            let data = std::fs::read(&input).map_err(|source| EngineError::Input {
                path: input.clone(),
                source,
            })?;

            match trial(&data) {
                Ok(classification) => {
                    debug!(input = %input.display(), %classification, "trial finished");
                    report.stats.record(classification);
                }
                Err(source) => {
                    report.stats.record(Classification::Unexpected);
                    if !self.keep_going {
                        return Err(EngineError::Crash { input, source });
                    }
                    warn!(input = %input.display(), error = %source, "unexpected failure");
                    report.crashes.push(CrashRecord {
                        input,
                        error: source.to_string(),
                    });
                }
            }
        }

        info!(
            total = report.stats.total,
            crashes = report.crashes.len(),
            "replay finished"
        );
        Ok(report)
    }
}

fn read_corpus_dir(dir: &Path) -> Result<Vec<PathBuf>, EngineError> {
    let io_err = |source| EngineError::Input {
        path: dir.to_path_buf(),
        source,
    };
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
