//! The fuzz driver.
//!
//! [`FuzzDriver::run_trial`] is the function handed to the fuzzing engine. It
//! runs strictly one trial at a time and keeps no state between trials; the
//! only thing it owns is the candidate path.

use std::path::{Path, PathBuf};

use inifuzz_config::CandidateConfig;
use tracing::{debug, error, trace};

use crate::candidate::CandidateFile;
use crate::outcome::{Classification, Outcome, TrialError};
use crate::parser::ConfigParser;

/// Runs trials of a [`ConfigParser`] against candidate files.
#[derive(Debug)]
pub struct FuzzDriver<P> {
    parser: P,
    candidate_path: PathBuf,
}

impl<P: ConfigParser> FuzzDriver<P> {
    pub fn new(parser: P, candidate_path: impl Into<PathBuf>) -> Self {
        Self {
            parser,
            candidate_path: candidate_path.into(),
        }
    }

    /// Build a driver whose candidate path follows `config`.
    pub fn from_config(parser: P, config: &CandidateConfig) -> Self {
        Self::new(parser, config.path())
    }

    pub fn parser(&self) -> &P {
        &self.parser
    }

    pub fn candidate_path(&self) -> &Path {
        &self.candidate_path
    }

    /// Run one trial and return its full outcome.
    ///
    /// The candidate file is gone when this returns, and also when the parser
    /// panics and the panic unwinds through here.
    pub fn execute(&self, data: &[u8]) -> Outcome {
        trace!(len = data.len(), "running trial");
        let candidate = match CandidateFile::write(self.candidate_path.clone(), data) {
            Ok(candidate) => candidate,
            Err(source) => {
                error!(
                    path = %self.candidate_path.display(),
                    error = %source,
                    "failed to write candidate file"
                );
                return Outcome::UnexpectedFailure(TrialError::Candidate {
                    path: self.candidate_path.clone(),
                    source,
                });
            }
        };

        let result = self.parser.parse_file(candidate.path());
        drop(candidate);
        classify(&self.parser, result)
    }

    /// Run one trial. Expected failures are swallowed; anything else is
    /// returned as an error for the engine to report.
    pub fn run_trial(&self, data: &[u8]) -> Result<Classification, TrialError> {
        self.execute(data).into_result()
    }
}

/// Classify a parse result according to `parser`'s error taxonomy.
pub fn classify<P: ConfigParser>(parser: &P, result: Result<P::Parsed, P::Error>) -> Outcome {
    let err = match result {
        Ok(_) => return Outcome::Success,
        Err(err) => err,
    };
    match parser.expected_failure(&err) {
        Some(kind) => {
            debug!(?kind, error = %err, "expected failure suppressed");
            Outcome::ExpectedFailure {
                kind,
                message: err.to_string(),
            }
        }
        None => {
            error!(error = %err, "unexpected parser failure");
            Outcome::UnexpectedFailure(TrialError::Parser {
                source: Box::new(err),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::FailureKind;
    use crate::parser::IniParser;
    use tempfile::TempDir;

    #[derive(Debug, thiserror::Error)]
    #[error("internal parser defect")]
    struct Defect;

    /// Parser whose every failure is a defect.
    struct BrokenParser;

    impl ConfigParser for BrokenParser {
        type Parsed = ();
        type Error = Defect;

        fn parse_file(&self, path: &Path) -> Result<(), Defect> {
            assert!(path.exists(), "candidate must exist while parsing");
            Err(Defect)
        }

        fn expected_failure(&self, _error: &Defect) -> Option<FailureKind> {
            None
        }
    }

    fn driver_in(tmp: &TempDir) -> FuzzDriver<IniParser> {
        FuzzDriver::new(IniParser, tmp.path().join("example.ini"))
    }

    #[test_log::test]
    fn test_valid_input_succeeds() {
        let tmp = TempDir::new().unwrap();
        let driver = driver_in(&tmp);

        let outcome = driver.execute(b"[section]\nkey=value\n");
        assert!(matches!(outcome, Outcome::Success));
        assert!(!driver.candidate_path().exists());
    }

    #[test]
    fn test_syntax_error_is_expected() {
        let tmp = TempDir::new().unwrap();
        let driver = driver_in(&tmp);

        match driver.execute(b"[section\n") {
            Outcome::ExpectedFailure { kind, message } => {
                assert_eq!(kind, FailureKind::Syntax);
                assert!(message.ends_with("unexpected value continuation"));
            }
            other => panic!("expected syntax failure, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_error_is_expected() {
        let tmp = TempDir::new().unwrap();
        let driver = driver_in(&tmp);

        assert_eq!(
            driver.run_trial(b"\xff\xfe\x00\x01").unwrap(),
            Classification::DecodeError
        );
        assert!(!driver.candidate_path().exists());
    }

    #[test]
    fn test_defect_propagates_and_cleans_up() {
        let tmp = TempDir::new().unwrap();
        let driver = FuzzDriver::new(BrokenParser, tmp.path().join("example.ini"));

        let err = driver.run_trial(b"[a]\n").unwrap_err();
        assert!(matches!(err, TrialError::Parser { .. }));
        assert!(!driver.candidate_path().exists());
    }

    #[test]
    fn test_unwritable_candidate_is_unexpected() {
        let tmp = TempDir::new().unwrap();
        let driver = FuzzDriver::new(IniParser, tmp.path().join("missing").join("example.ini"));

        let err = driver.run_trial(b"[a]\n").unwrap_err();
        assert!(matches!(err, TrialError::Candidate { .. }));
    }

    #[test]
    fn test_from_config_uses_candidate_path() {
        let tmp = TempDir::new().unwrap();
        let config = CandidateConfig {
            dir: tmp.path().display().to_string(),
            per_process: false,
            ..CandidateConfig::default()
        };
        let driver = FuzzDriver::from_config(IniParser, &config);
        assert_eq!(driver.candidate_path(), tmp.path().join("example.ini"));
    }
}
