//! The parser seam.
//!
//! The driver never looks inside the parser. It only needs to run it on a
//! file and ask which of its errors are benign.

use std::path::Path;

use inifuzz_config::{IniConfig, IniError};

use crate::outcome::FailureKind;

/// A configuration parser that can be fuzzed through a candidate file.
pub trait ConfigParser {
    /// The parsed document. The driver drops it unread.
    type Parsed;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load and parse the file at `path`.
    fn parse_file(&self, path: &Path) -> Result<Self::Parsed, Self::Error>;

    /// Map an error onto an expected failure kind, or `None` when the error
    /// is a defect that must reach the fuzzing engine.
    fn expected_failure(&self, error: &Self::Error) -> Option<FailureKind>;
}

/// [`ConfigParser`] backed by [`IniConfig`].
#[derive(Debug, Clone, Copy, Default)]
pub struct IniParser;

impl ConfigParser for IniParser {
    type Parsed = IniConfig;
    type Error = IniError;

    fn parse_file(&self, path: &Path) -> Result<IniConfig, IniError> {
        IniConfig::load(path)
    }

    fn expected_failure(&self, error: &IniError) -> Option<FailureKind> {
        match error {
            IniError::Parse(_) => Some(FailureKind::Syntax),
            IniError::Decode { .. } => Some(FailureKind::Decode),
            IniError::Io { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ini_parser_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("example.ini");
        std::fs::write(&path, b"[section]\nkey=value\n").unwrap();

        let parsed = IniParser.parse_file(&path).unwrap();
        assert_eq!(parsed.get("section", "key"), Some("value"));
    }

    #[test]
    fn test_ini_parser_error_mapping() {
        let syntax = IniConfig::from_bytes("x.ini", b"[section\n").unwrap_err();
        assert_eq!(IniParser.expected_failure(&syntax), Some(FailureKind::Syntax));

        let decode = IniConfig::from_bytes("x.ini", b"\xff\xfe\x00\x01").unwrap_err();
        assert_eq!(IniParser.expected_failure(&decode), Some(FailureKind::Decode));

        let io = IniParser
            .parse_file(Path::new("/nonexistent/example.ini"))
            .unwrap_err();
        assert_eq!(IniParser.expected_failure(&io), None);
    }
}
