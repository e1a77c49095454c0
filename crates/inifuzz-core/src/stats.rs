use serde::Serialize;

use crate::outcome::Classification;

/// Running totals of trial classifications.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrialStats {
    pub total: u64,
    pub success: u64,
    pub syntax_errors: u64,
    pub decode_errors: u64,
    pub unexpected: u64,
}

impl TrialStats {
    pub fn record(&mut self, classification: Classification) {
        self.total += 1;
        match classification {
            Classification::Success => self.success += 1,
            Classification::SyntaxError => self.syntax_errors += 1,
            Classification::DecodeError => self.decode_errors += 1,
            Classification::Unexpected => self.unexpected += 1,
        }
    }

    /// Trials rejected with a benign syntax or decode error.
    pub fn expected_failures(&self) -> u64 {
        self.syntax_errors + self.decode_errors
    }
}
