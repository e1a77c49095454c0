//! Named candidate inputs with the classification the INI parser gives them.

use inifuzz_core::Classification;

/// A candidate input and its expected classification.
#[derive(Debug, Clone, Copy)]
pub struct Scenario {
    pub name: &'static str,
    pub input: &'static [u8],
    pub expected: Classification,
}

pub const EMPTY: Scenario = Scenario {
    name: "empty",
    input: b"",
    expected: Classification::Success,
};

pub const MINIMAL: Scenario = Scenario {
    name: "minimal",
    input: b"[section]\nkey=value\n",
    expected: Classification::Success,
};

pub const UNTERMINATED_SECTION: Scenario = Scenario {
    name: "unterminated_section",
    input: b"[section\n",
    expected: Classification::SyntaxError,
};

pub const INVALID_UTF8: Scenario = Scenario {
    name: "invalid_utf8",
    input: b"\xff\xfe\x00\x01",
    expected: Classification::DecodeError,
};

pub const DUPLICATE_SECTION: Scenario = Scenario {
    name: "duplicate_section",
    input: b"[a]\nk = 1\n[a]\n",
    expected: Classification::SyntaxError,
};

pub const CONTINUATION: Scenario = Scenario {
    name: "continuation",
    input: b"[paths]\nsearch =\n    /usr/lib\n    /opt/lib\n",
    expected: Classification::Success,
};

/// Every scenario above.
pub const ALL: &[Scenario] = &[
    EMPTY,
    MINIMAL,
    UNTERMINATED_SECTION,
    INVALID_UTF8,
    DUPLICATE_SECTION,
    CONTINUATION,
];

/// Write each scenario into `dir` as a corpus file named after it.
pub fn write_corpus(dir: &std::path::Path, scenarios: &[Scenario]) {
    for scenario in scenarios {
        std::fs::write(dir.join(scenario.name), scenario.input)
            .expect("failed to write corpus entry");
    }
}
