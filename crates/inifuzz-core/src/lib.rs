#![deny(unsafe_code)]

//! inifuzz core: the fuzz driver and everything around it.
//!
//! A trial writes one candidate input to disk, runs the parser over it, and
//! classifies the result. Syntax and decoding errors are expected rejections
//! and are swallowed; any other failure is handed back to the caller so the
//! fuzzing engine can record it as a crash.

/// RAII guard for the per-trial candidate file.
pub mod candidate;
/// Fuzz driver: one trial per input buffer.
pub mod driver;
/// Engine abstraction and the corpus replay engine.
pub mod engine;
/// One-time harness setup for fuzz targets.
pub mod harness;
/// Subscriber setup for `tracing`.
pub mod logging;
/// Trial outcomes and their classification.
pub mod outcome;
/// The parser seam and the INI parser adapter.
pub mod parser;
/// Outcome counters.
pub mod stats;

pub use candidate::CandidateFile;
pub use driver::FuzzDriver;
pub use engine::{Engine, EngineError, ReplayEngine, RunReport};
pub use outcome::{Classification, FailureKind, Outcome, TrialError};
pub use parser::{ConfigParser, IniParser};
pub use stats::TrialStats;
