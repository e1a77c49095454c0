//! Trial outcomes.
//!
//! [`Outcome`] is the full result of one trial. Only
//! [`Outcome::UnexpectedFailure`] turns into an `Err` in
//! [`Outcome::into_result`]; the two expected failure kinds are benign
//! rejections of malformed input.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// Benign parser rejections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Malformed structure.
    Syntax,
    /// The bytes are not valid text in the expected encoding.
    Decode,
}

/// Flat summary of an [`Outcome`], used for counters and reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Success,
    SyntaxError,
    DecodeError,
    Unexpected,
}

impl From<FailureKind> for Classification {
    fn from(kind: FailureKind) -> Self {
        match kind {
            FailureKind::Syntax => Self::SyntaxError,
            FailureKind::Decode => Self::DecodeError,
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Success => "success",
            Self::SyntaxError => "syntax error",
            Self::DecodeError => "decode error",
            Self::Unexpected => "unexpected failure",
        };
        f.write_str(s)
    }
}

/// A failure that must reach the fuzzing engine.
#[derive(Debug, thiserror::Error)]
pub enum TrialError {
    #[error("failed to write candidate file {}: {source}", .path.display())]
    Candidate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parser failed unexpectedly: {source}")]
    Parser {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result of a single trial.
#[derive(Debug)]
pub enum Outcome {
    Success,
    ExpectedFailure { kind: FailureKind, message: String },
    UnexpectedFailure(TrialError),
}

impl Outcome {
    pub fn classification(&self) -> Classification {
        match self {
            Self::Success => Classification::Success,
            Self::ExpectedFailure { kind, .. } => (*kind).into(),
            Self::UnexpectedFailure(_) => Classification::Unexpected,
        }
    }

    /// Keep the expected outcomes, surface the unexpected one as an error.
    pub fn into_result(self) -> Result<Classification, TrialError> {
        match self {
            Self::UnexpectedFailure(err) => Err(err),
            other => Ok(other.classification()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_failures_are_ok() {
        let outcome = Outcome::ExpectedFailure {
            kind: FailureKind::Decode,
            message: "invalid UTF-8".to_string(),
        };
        assert_eq!(outcome.into_result().unwrap(), Classification::DecodeError);
        assert_eq!(
            Outcome::Success.into_result().unwrap(),
            Classification::Success
        );
    }

    #[test]
    fn test_unexpected_failure_is_err() {
        let outcome = Outcome::UnexpectedFailure(TrialError::Parser {
            source: "stack overflow".into(),
        });
        assert_eq!(outcome.classification(), Classification::Unexpected);
        let err = outcome.into_result().unwrap_err();
        assert_eq!(err.to_string(), "parser failed unexpectedly: stack overflow");
    }

    #[test]
    fn test_classification_display() {
        assert_eq!(Classification::SyntaxError.to_string(), "syntax error");
        assert_eq!(
            Classification::from(FailureKind::Syntax),
            Classification::SyntaxError
        );
        assert_eq!(
            Classification::from(FailureKind::Decode),
            Classification::DecodeError
        );
    }
}
