//! Line tokenizer for the INI dialect.
//!
//! Turns source text into a flat list of [`ParsedLine`] tokens. Each token is
//! either a section header (`name == None`) or a key/value pair tagged with
//! the section it appeared under. Continuation lines are folded into the value
//! they continue, so the token keeps the line number of its first line.
//!
//! Section membership and duplicate checks happen later, in
//! [`IniConfig::parse`](crate::IniConfig::parse).

use crate::ini::ParseError;

const COMMENT_CHARS: [char; 2] = ['#', ';'];

/// A tokenized logical line. Line numbers are zero-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParsedLine {
    pub lineno: usize,
    pub section: Option<String>,
    pub name: Option<String>,
    pub value: Option<String>,
}

/// Classification of a single physical line.
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Blank,
    Section(&'a str),
    Value(&'a str, &'a str),
    Continuation(&'a str),
}

/// Tokenize `text`, reporting errors against `path`.
pub(crate) fn parse_lines(path: &str, text: &str) -> Result<Vec<ParsedLine>, ParseError> {
    let mut result: Vec<ParsedLine> = Vec::new();
    let mut section: Option<String> = None;

    let normalized = text.replace("\r\n", "\n");
    for (lineno, raw) in normalized.split(is_line_boundary).enumerate() {
        match classify_line(path, raw, lineno)? {
            Line::Blank => {}
            Line::Section(name) => {
                if name.is_empty() {
                    return Err(ParseError::new(path, lineno, "empty section name"));
                }
                section = Some(name.to_string());
                result.push(ParsedLine {
                    lineno,
                    section: section.clone(),
                    name: None,
                    value: None,
                });
            }
            Line::Value(name, value) => {
                result.push(ParsedLine {
                    lineno,
                    section: section.clone(),
                    name: Some(name.to_string()),
                    value: Some(value.to_string()),
                });
            }
            Line::Continuation(data) => match result.last_mut() {
                Some(ParsedLine {
                    name: Some(_),
                    value: Some(value),
                    ..
                }) => {
                    if !value.is_empty() {
                        value.push('\n');
                    }
                    value.push_str(data);
                }
                _ => {
                    return Err(ParseError::new(
                        path,
                        lineno,
                        "unexpected value continuation",
                    ));
                }
            },
        }
    }

    Ok(result)
}

/// Characters that end a line. `\r\n` is collapsed before splitting.
fn is_line_boundary(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r'
            | '\x0b'
            | '\x0c'
            | '\x1c'
            | '\x1d'
            | '\x1e'
            | '\u{85}'
            | '\u{2028}'
            | '\u{2029}'
    )
}

fn is_comment_line(line: &str) -> bool {
    line.trim_start()
        .chars()
        .next()
        .is_none_or(|c| COMMENT_CHARS.contains(&c))
}

fn classify_line<'a>(path: &str, raw: &'a str, lineno: usize) -> Result<Line<'a>, ParseError> {
    if is_comment_line(raw) {
        return Ok(Line::Blank);
    }
    let line = raw.trim_end();
    let Some(first) = line.chars().next() else {
        return Ok(Line::Blank);
    };

    if first == '[' {
        let mut header = line;
        for c in COMMENT_CHARS {
            if let Some((before, _)) = header.split_once(c) {
                header = before;
            }
            header = header.trim_end();
        }
        // An unterminated header is handed on as a continuation.
        return Ok(match header.strip_suffix(']') {
            Some(inner) => Line::Section(&inner[1..]),
            None => Line::Continuation(line.trim()),
        });
    }

    if first.is_whitespace() {
        return Ok(Line::Continuation(line.trim()));
    }

    let split = match line.split_once('=') {
        Some((name, _)) if name.contains(':') => line.split_once(':'),
        Some(pair) => Some(pair),
        None => line.split_once(':'),
    };
    match split {
        Some((name, value)) => Ok(Line::Value(name.trim(), value.trim())),
        None => Err(ParseError::new(
            path,
            lineno,
            format!("unexpected line: {line:?}"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tokens(text: &str) -> Vec<(usize, Option<String>, Option<String>, Option<String>)> {
        parse_lines("sample.ini", text)
            .unwrap()
            .into_iter()
            .map(|t| (t.lineno, t.section, t.name, t.value))
            .collect()
    }

    fn s(v: &str) -> Option<String> {
        Some(v.to_string())
    }

    #[test]
    fn test_classify_section_header() {
        assert_eq!(
            classify_line("x", "[server]", 0).unwrap(),
            Line::Section("server")
        );
        assert_eq!(
            classify_line("x", "[server] # trailing", 0).unwrap(),
            Line::Section("server")
        );
        assert_eq!(
            classify_line("x", "[a;b]", 0).unwrap(),
            Line::Continuation("[a;b]")
        );
    }

    #[test]
    fn test_classify_key_value_separators() {
        assert_eq!(
            classify_line("x", "key = value", 0).unwrap(),
            Line::Value("key", "value")
        );
        assert_eq!(
            classify_line("x", "key: value", 0).unwrap(),
            Line::Value("key", "value")
        );
        // A colon before the first '=' wins.
        assert_eq!(
            classify_line("x", "a:b=c", 0).unwrap(),
            Line::Value("a", "b=c")
        );
        assert_eq!(
            classify_line("x", "url = http://host", 0).unwrap(),
            Line::Value("url", "http://host")
        );
    }

    #[test]
    fn test_classify_comments_and_blanks() {
        assert_eq!(classify_line("x", "   # note", 0).unwrap(), Line::Blank);
        assert_eq!(classify_line("x", "; note", 0).unwrap(), Line::Blank);
        assert_eq!(classify_line("x", "   ", 0).unwrap(), Line::Blank);
        assert_eq!(classify_line("x", "", 0).unwrap(), Line::Blank);
    }

    #[test]
    fn test_classify_unexpected_line() {
        let err = classify_line("x.ini", "garbage", 4).unwrap_err();
        assert_eq!(err.line, 5);
        assert_eq!(err.message, "unexpected line: \"garbage\"");
    }

    #[test]
    fn test_continuation_joins_values() {
        let text = "[s]\nkey = first\n  second\n\tthird\n";
        assert_eq!(
            tokens(text),
            vec![
                (0, s("s"), None, None),
                (1, s("s"), s("key"), s("first\nsecond\nthird")),
            ]
        );
    }

    #[test]
    fn test_continuation_replaces_empty_value() {
        let text = "[s]\nkey =\n  value\n";
        assert_eq!(tokens(text)[1].3, s("value"));
    }

    #[test]
    fn test_continuation_without_value_is_error() {
        let err = parse_lines("x.ini", "  orphan\n").unwrap_err();
        assert_eq!(err.message, "unexpected value continuation");
        assert_eq!(err.line, 1);

        let err = parse_lines("x.ini", "[s]\n  orphan\n").unwrap_err();
        assert_eq!(err.message, "unexpected value continuation");
        assert_eq!(err.line, 2);
    }

    #[test]
    fn test_unterminated_header_first_line_is_error() {
        let err = parse_lines("x.ini", "[section\n").unwrap_err();
        assert_eq!(err.message, "unexpected value continuation");
    }

    #[test]
    fn test_unterminated_header_after_value_continues_it() {
        let text = "[s]\nk = v\n[broken\n";
        assert_eq!(tokens(text)[1].3, s("v\n[broken"));
    }

    #[test]
    fn test_empty_section_name() {
        let err = parse_lines("x.ini", "[]\n").unwrap_err();
        assert_eq!(err.message, "empty section name");
    }

    #[test]
    fn test_crlf_and_cr_line_endings() {
        let text = "[s]\r\na = 1\rb = 2\r\n";
        assert_eq!(
            tokens(text),
            vec![
                (0, s("s"), None, None),
                (1, s("s"), s("a"), s("1")),
                (2, s("s"), s("b"), s("2")),
            ]
        );
    }

    #[test]
    fn test_keys_before_section_are_tokenized() {
        // Rejected later, during assembly.
        assert_eq!(tokens("a = 1\n"), vec![(0, None, s("a"), s("1"))]);
    }
}
