//! The INI document model and its loaders.

use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use serde::Serialize;
use tracing::trace;

use crate::parse::parse_lines;

/// A syntax error at a specific line of an INI source.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{path}:{line}: {message}")]
pub struct ParseError {
    /// Label of the source (usually the file path).
    pub path: String,
    /// One-based line number.
    pub line: usize,
    pub message: String,
}

impl ParseError {
    pub(crate) fn new(path: &str, lineno: usize, message: impl Into<String>) -> Self {
        Self {
            path: path.to_string(),
            line: lineno + 1,
            message: message.into(),
        }
    }
}

/// Errors returned when loading an INI document.
#[derive(Debug, thiserror::Error)]
pub enum IniError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}: invalid UTF-8: {source}")]
    Decode {
        path: String,
        #[source]
        source: std::str::Utf8Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// A single `name = value` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub name: String,
    pub value: String,
    /// One-based line of the entry's first line.
    pub line: usize,
}

/// A named section and its entries, in file order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    name: String,
    line: usize,
    entries: Vec<Entry>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl Section {
    fn new(name: String, line: usize) -> Self {
        Self {
            name,
            line,
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// One-based line of the section header.
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entry(key).map(|e| e.value.as_str())
    }

    /// Look up `key` and convert it with [`FromStr`].
    pub fn get_as<T: FromStr>(&self, key: &str) -> Option<Result<T, T::Err>> {
        self.get(key).map(str::parse)
    }

    /// One-based line on which `key` was defined.
    pub fn lineof(&self, key: &str) -> Option<usize> {
        self.entry(key).map(|e| e.line)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Iterate over `(name, value)` pairs in file order.
    pub fn items(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|e| (e.name.as_str(), e.value.as_str()))
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry(&self, key: &str) -> Option<&Entry> {
        self.index.get(key).map(|&i| &self.entries[i])
    }
}

/// A parsed INI document.
///
/// Sections and their keys keep file order. Every key must live under a
/// section header, and neither sections nor keys within a section may repeat.
///
/// ```
/// use inifuzz_config::IniConfig;
///
/// let ini = IniConfig::parse("demo.ini", "[server]\nport = 8080\n").unwrap();
/// assert_eq!(ini.get("server", "port"), Some("8080"));
/// assert_eq!(ini.lineof("server", Some("port")), Some(2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IniConfig {
    path: String,
    sections: Vec<Section>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl IniConfig {
    /// Read, decode and parse the file at `path`.
    pub fn load(path: &Path) -> Result<Self, IniError> {
        let label = path.display().to_string();
        let bytes = std::fs::read(path).map_err(|source| IniError::Io {
            path: label.clone(),
            source,
        })?;
        Self::from_bytes(&label, &bytes)
    }

    /// Decode `bytes` as strict UTF-8 and parse them.
    pub fn from_bytes(path: &str, bytes: &[u8]) -> Result<Self, IniError> {
        let text = std::str::from_utf8(bytes).map_err(|source| IniError::Decode {
            path: path.to_string(),
            source,
        })?;
        Ok(Self::parse(path, text)?)
    }

    /// Parse already-decoded text. `path` is only used in error messages.
    pub fn parse(path: &str, text: &str) -> Result<Self, ParseError> {
        let tokens = parse_lines(path, text)?;
        let mut config = Self {
            path: path.to_string(),
            sections: Vec::new(),
            index: HashMap::new(),
        };

        for token in tokens {
            let Some(section_name) = token.section else {
                return Err(ParseError::new(
                    path,
                    token.lineno,
                    "no section header defined",
                ));
            };
            match (token.name, token.value) {
                (Some(name), Some(value)) => {
                    // Tokens only carry a section after its header was seen.
                    let Some(&idx) = config.index.get(&section_name) else {
                        return Err(ParseError::new(
                            path,
                            token.lineno,
                            "no section header defined",
                        ));
                    };
                    let section = &mut config.sections[idx];
                    if section.index.contains_key(&name) {
                        return Err(ParseError::new(
                            path,
                            token.lineno,
                            format!("duplicate name {name:?}"),
                        ));
                    }
                    section.index.insert(name.clone(), section.entries.len());
                    section.entries.push(Entry {
                        name,
                        value,
                        line: token.lineno + 1,
                    });
                }
                _ => {
                    if config.index.contains_key(&section_name) {
                        return Err(ParseError::new(
                            path,
                            token.lineno,
                            format!("duplicate section {section_name:?}"),
                        ));
                    }
                    config
                        .index
                        .insert(section_name.clone(), config.sections.len());
                    config
                        .sections
                        .push(Section::new(section_name, token.lineno + 1));
                }
            }
        }

        trace!(path, sections = config.sections.len(), "parsed INI document");
        Ok(config)
    }

    /// The label this document was parsed from.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Sections in file order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.index.get(name).map(|&i| &self.sections[i])
    }

    pub fn contains(&self, section: &str) -> bool {
        self.index.contains_key(section)
    }

    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.section(section)?.get(key)
    }

    /// Look up a value and convert it with [`FromStr`].
    pub fn get_as<T: FromStr>(&self, section: &str, key: &str) -> Option<Result<T, T::Err>> {
        self.section(section)?.get_as(key)
    }

    /// One-based line of a section header (`key == None`) or of a key.
    pub fn lineof(&self, section: &str, key: Option<&str>) -> Option<usize> {
        let section = self.section(section)?;
        match key {
            Some(key) => section.lineof(key),
            None => Some(section.line()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
