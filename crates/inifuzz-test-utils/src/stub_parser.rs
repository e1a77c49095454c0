//! Parsers with scripted behavior, for exercising the driver's taxonomy
//! without depending on what the INI parser happens to do.

use std::path::Path;
use std::sync::Mutex;

use inifuzz_core::{ConfigParser, FailureKind};

/// Errors a [`StubParser`] can produce.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StubError {
    #[error("stub syntax error")]
    Syntax,
    #[error("stub decode error")]
    Decode,
    #[error("stub internal error: {0}")]
    Internal(String),
}

/// What a [`StubParser`] does with every file it is given.
#[derive(Debug, Clone)]
pub enum StubBehavior {
    Succeed,
    Fail(StubError),
    Panic(&'static str),
}

/// A parser that reads the candidate file, records its bytes, and then acts
/// according to its [`StubBehavior`].
#[derive(Debug)]
pub struct StubParser {
    behavior: StubBehavior,
    seen: Mutex<Vec<Vec<u8>>>,
}

impl StubParser {
    pub fn new(behavior: StubBehavior) -> Self {
        Self {
            behavior,
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn succeeding() -> Self {
        Self::new(StubBehavior::Succeed)
    }

    pub fn failing(error: StubError) -> Self {
        Self::new(StubBehavior::Fail(error))
    }

    pub fn panicking(message: &'static str) -> Self {
        Self::new(StubBehavior::Panic(message))
    }

    /// Contents of every candidate file this parser has read.
    pub fn seen(&self) -> Vec<Vec<u8>> {
        self.seen.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

impl ConfigParser for StubParser {
    type Parsed = ();
    type Error = StubError;

    fn parse_file(&self, path: &Path) -> Result<(), StubError> {
        let data = std::fs::read(path).expect("candidate file must exist while parsing");
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(data);
        }
        match &self.behavior {
            StubBehavior::Succeed => Ok(()),
            StubBehavior::Fail(error) => Err(error.clone()),
            StubBehavior::Panic(message) => panic!("{message}"),
        }
    }

    fn expected_failure(&self, error: &StubError) -> Option<FailureKind> {
        match error {
            StubError::Syntax => Some(FailureKind::Syntax),
            StubError::Decode => Some(FailureKind::Decode),
            StubError::Internal(_) => None,
        }
    }
}
