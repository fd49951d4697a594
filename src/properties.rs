//! Flat key/value properties maps
//!
//! This module implements the textual `key=value` properties format the
//! configuration sources are written in, and the [`Properties`] map with its
//! optional defaults layer. A [`Snapshot`] is the immutable merged view of
//! one file-plus-defaults read; primary values shadow defaults for the same
//! key.

use std::collections::{BTreeMap, BTreeSet};
use std::io::{self, Read};
use std::sync::Arc;

use thiserror::Error;

/// The immutable merged key/value view of configuration at one point in time.
///
/// Once returned from a read it is never mutated; a new snapshot replaces it
/// only on an explicit re-read.
pub type Snapshot = Arc<Properties>;

/// Errors raised while parsing properties text.
#[derive(Error, Debug)]
pub enum PropertiesError {
    #[error("I/O error reading properties text")]
    Io(#[from] io::Error),

    #[error("malformed \\u escape on line {line}")]
    BadUnicodeEscape { line: usize },
}

/// A string-to-string map with an optional defaults layer.
///
/// Lookups that miss the primary entries fall through to the defaults
/// snapshot, mirroring the chained-properties semantics of conventional
/// properties files.
#[derive(Debug, Default)]
pub struct Properties {
    entries: BTreeMap<String, String>,
    defaults: Option<Snapshot>,
}

impl Properties {
    /// Create an empty map with no defaults layer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty map backed by a defaults layer.
    pub fn with_defaults(defaults: Snapshot) -> Self {
        Self {
            entries: BTreeMap::new(),
            defaults: Some(defaults),
        }
    }

    /// Look up a key, falling back to the defaults layer when absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        match self.entries.get(key) {
            Some(value) => Some(value.as_str()),
            None => self.defaults.as_deref().and_then(|d| d.get(key)),
        }
    }

    /// Insert or replace a key in the primary layer.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// All keys visible through this map, defaults included.
    pub fn keys(&self) -> BTreeSet<&str> {
        let mut keys: BTreeSet<&str> = match &self.defaults {
            Some(defaults) => defaults.keys(),
            None => BTreeSet::new(),
        };
        keys.extend(self.entries.keys().map(String::as_str));
        keys
    }

    /// Number of entries in the primary layer only.
    pub fn local_len(&self) -> usize {
        self.entries.len()
    }

    /// Parse properties text from a reader into the primary layer.
    ///
    /// Recognizes `#` and `!` comment lines, `=`, `:`, or whitespace key
    /// separators, backslash escapes including `\uXXXX`, and trailing
    /// backslash line continuations.
    pub fn load<R: Read>(&mut self, mut reader: R) -> Result<(), PropertiesError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        self.load_str(&text)
    }

    /// Parse properties text from a string into the primary layer.
    pub fn load_str(&mut self, text: &str) -> Result<(), PropertiesError> {
        let mut lines = text.lines().enumerate().peekable();
        while let Some((line_no, line)) = lines.next() {
            let trimmed = line.trim_start();
            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                continue;
            }
            // Fold continuation lines into one logical line.
            let mut logical = trimmed.to_string();
            while ends_with_odd_backslashes(&logical) {
                logical.pop();
                match lines.next() {
                    Some((_, next)) => logical.push_str(next.trim_start()),
                    None => break,
                }
            }
            let (key, value) = split_key_value(&logical);
            let key = unescape(key, line_no + 1)?;
            let value = unescape(value, line_no + 1)?;
            self.entries.insert(key, value);
        }
        Ok(())
    }
}

fn ends_with_odd_backslashes(s: &str) -> bool {
    s.bytes().rev().take_while(|&b| b == b'\\').count() % 2 == 1
}

/// Split a logical line at the first unescaped `=`, `:`, or whitespace.
fn split_key_value(line: &str) -> (&str, &str) {
    let bytes = line.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'=' | b':' | b' ' | b'\t' | b'\x0c' => break,
            _ => i += 1,
        }
    }
    let key = &line[..i.min(line.len())];
    let mut rest = line[i.min(line.len())..].trim_start();
    if rest.starts_with('=') || rest.starts_with(':') {
        rest = rest[1..].trim_start();
    }
    (key, rest)
}

fn unescape(s: &str, line: usize) -> Result<String, PropertiesError> {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                if hex.len() != 4 {
                    return Err(PropertiesError::BadUnicodeEscape { line });
                }
                let code = u32::from_str_radix(&hex, 16)
                    .map_err(|_| PropertiesError::BadUnicodeEscape { line })?;
                let decoded = char::from_u32(code)
                    .ok_or(PropertiesError::BadUnicodeEscape { line })?;
                out.push(decoded);
            }
            Some(other) => out.push(other),
            None => break,
        }
    }
    Ok(out)
}
