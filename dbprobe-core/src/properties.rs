//! Parser for `.properties` style key-value files.
//!
//! The accepted syntax is the classic one used by JDBC tooling:
//!
//! ```text
//! # comment
//! ! also a comment
//! db.server.name = db1.example.com
//! db.port: 1521
//! test.query select 1 \
//!            from dual
//! ```

use std::collections::HashMap;

use thiserror::Error;

/// Errors that can occur while parsing a properties document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PropertiesError {
    /// A `\uXXXX` escape without four hex digits, or naming an invalid char.
    #[error("malformed \\uXXXX escape on line {line}")]
    MalformedEscape { line: usize },
}

/// Result type for properties parsing.
pub type PropertiesResult<T> = Result<T, PropertiesError>;

/// A parsed set of properties.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    entries: HashMap<String, String>,
}

impl Properties {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a properties document. Later keys override earlier ones.
    pub fn parse(input: &str) -> PropertiesResult<Self> {
        let mut entries = HashMap::new();

        for (line_no, logical) in logical_lines(input) {
            let (key, value) = split_entry(&logical);
            let key = unescape(key, line_no)?;
            let value = unescape(value, line_no)?;
            entries.insert(key, value);
        }

        Ok(Self { entries })
    }

    /// Parse raw file contents.
    ///
    /// UTF-8 is tried first; anything else is read as ISO-8859-1, the
    /// traditional encoding of properties files.
    pub fn from_bytes(bytes: &[u8]) -> PropertiesResult<Self> {
        match std::str::from_utf8(bytes) {
            Ok(text) => Self::parse(text),
            Err(_) => Self::parse(&decode_latin1(bytes)),
        }
    }

    /// Get the raw value for a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Set a value, replacing any previous one.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all entries in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Properties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Join continuation lines and drop blanks and comments.
///
/// Yields the 1-based number of the line each entry starts on.
fn logical_lines(input: &str) -> Vec<(usize, String)> {
    let mut result = Vec::new();
    let mut pending: Option<(usize, String)> = None;

    for (idx, raw) in input.lines().enumerate() {
        let line = raw.trim_start();

        let (start, mut buffer) = match pending.take() {
            Some(open) => open,
            None => {
                if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                    continue;
                }
                (idx + 1, String::new())
            }
        };

        if ends_with_continuation(line) {
            buffer.push_str(&line[..line.len() - 1]);
            pending = Some((start, buffer));
        } else {
            buffer.push_str(line);
            result.push((start, buffer));
        }
    }

    if let Some(open) = pending {
        result.push(open);
    }

    result
}

fn ends_with_continuation(line: &str) -> bool {
    let trailing = line.chars().rev().take_while(|&c| c == '\\').count();
    trailing % 2 == 1
}

/// Split at the first unescaped `=`, `:` or whitespace.
fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();

    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                return (&line[..i], line[i + 1..].trim_start());
            }
            c if c.is_whitespace() => {
                key_end = i;
                break;
            }
            _ => {}
        }
    }

    let rest = line[key_end..].trim_start();
    let rest = rest
        .strip_prefix('=')
        .or_else(|| rest.strip_prefix(':'))
        .map_or(rest, str::trim_start);
    (&line[..key_end], rest)
}

fn unescape(raw: &str, line: usize) -> PropertiesResult<String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{000C}'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                let decoded = (hex.len() == 4)
                    .then(|| u32::from_str_radix(&hex, 16).ok())
                    .flatten()
                    .and_then(char::from_u32)
                    .ok_or(PropertiesError::MalformedEscape { line })?;
                out.push(decoded);
            }
            Some(other) => out.push(other),
            None => {}
        }
    }

    Ok(out)
}
