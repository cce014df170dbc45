// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Field tag parsing.
//!
//! Fields carry a composite tag string in which the `repogen` entry holds
//! a small key/value language:
//!
//! ```text
//! `json:"id" repogen:"pk set:'Identifier' search:'range From Until'"`
//!                     └──────────────────┬──────────────────────┘
//!                                   FieldTag::parse
//! ```
//!
//! # Grammar
//!
//! ```text
//! tag   = entry { " " entry }
//! entry = key | key ":'" value "'"
//! ```
//!
//! Values may contain spaces and colons but no `'`. A key without a value
//! maps to the empty string, so presence can be told apart from absence.
//!
//! # Validity
//!
//! | Input | Result |
//! |-------|--------|
//! | `` (empty) | `Some` empty mapping |
//! | `pk search:'range'` | `Some {pk: "", search: "range"}` |
//! | `set:Name` | `None`: colon not followed by a quote |
//! | `set:'Name'x` | `None`: closing quote not followed by a space |
//! | `set:'Name` | `None`: unterminated value |
//!
//! A malformed tag never yields a partial mapping.

use std::collections::HashMap;

/// Namespace of the composite tag holding repogen keys.
pub const NAMESPACE: &str = "repogen";

/// Parsed `repogen` tag of one field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldTag {
    entries: HashMap<String, String>
}

impl FieldTag {
    /// Parse the `repogen` entry of a raw composite tag string.
    ///
    /// A missing entry yields an empty tag; `None` means the entry, or the
    /// composite string around it, is malformed.
    #[must_use]
    pub fn from_struct_tag(raw: &str) -> Option<Self> {
        match lookup_namespace(raw, NAMESPACE) {
            Lookup::Found(value) => Self::parse(&value),
            Lookup::Absent => Some(Self::default()),
            Lookup::Malformed => None
        }
    }

    /// Parse an already isolated tag value.
    ///
    /// # Examples
    ///
    /// ```
    /// use repogen_core::FieldTag;
    ///
    /// let tag = FieldTag::parse("key1 key2:'v a l' key3").unwrap();
    /// assert_eq!(tag.get("key1"), Some(""));
    /// assert_eq!(tag.get("key2"), Some("v a l"));
    /// assert_eq!(tag.get("key3"), Some(""));
    ///
    /// assert!(FieldTag::parse("key:'unterminated").is_none());
    /// ```
    #[must_use]
    pub fn parse(tag: &str) -> Option<Self> {
        let mut entries = HashMap::new();
        if tag.is_empty() {
            return Some(Self {
                entries
            });
        }

        let bytes = tag.as_bytes();
        let mut key_start = 0;
        let mut key = "";
        let mut value_start: Option<usize> = None;
        let mut i = 0;

        while i < bytes.len() {
            match bytes[i] {
                b' ' if value_start.is_none() => {
                    insert(&mut entries, &tag[key_start..i], "");
                    key_start = i + 1;
                }
                b':' if value_start.is_none() => {
                    key = &tag[key_start..i];
                    if bytes.get(i + 1) != Some(&b'\'') {
                        return None;
                    }
                    value_start = Some(i + 2);
                    i += 1;
                }
                b'\'' => {
                    let start = value_start.take()?;
                    insert(&mut entries, key, &tag[start..i]);

                    match bytes.get(i + 1) {
                        None => {}
                        Some(b' ') => i += 1,
                        Some(_) => return None
                    }
                    key_start = i + 1;
                }
                _ => {}
            }
            i += 1;
        }

        if value_start.is_some() {
            return None;
        }
        if bytes[bytes.len() - 1] != b'\'' {
            insert(&mut entries, &tag[key_start..], "");
        }

        Some(Self {
            entries
        })
    }

    /// Value of `key`, `None` when the key is absent.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Value of `key`, empty when the key is absent or has no value.
    #[must_use]
    pub fn value(&self, key: &str) -> &str {
        self.get(key).unwrap_or_default()
    }

    /// Check if `key` is present, with or without a value.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no key is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Later duplicates overwrite earlier ones; empty keys carry nothing.
fn insert(entries: &mut HashMap<String, String>, key: &str, value: &str) {
    if !key.is_empty() {
        entries.insert(key.to_owned(), value.to_owned());
    }
}

/// Outcome of looking a namespace up in a composite tag string.
#[derive(Debug, PartialEq, Eq)]
enum Lookup {
    Found(String),
    Absent,
    Malformed
}

/// Find `name:"value"` in a composite tag string and unquote the value.
///
/// Entries are separated by spaces. Keys are runs of printable characters
/// other than space, quote and colon. Scanning stops at the first entry
/// that does not fit that shape.
fn lookup_namespace(raw: &str, name: &str) -> Lookup {
    let mut rest = raw;

    loop {
        rest = rest.trim_start_matches(' ');
        if rest.is_empty() {
            return Lookup::Absent;
        }

        let bytes = rest.as_bytes();
        let key_len = bytes
            .iter()
            .take_while(|&&b| b > b' ' && b != b':' && b != b'"' && b != 0x7f)
            .count();
        if key_len == 0
            || key_len + 1 >= bytes.len()
            || bytes[key_len] != b':'
            || bytes[key_len + 1] != b'"'
        {
            return Lookup::Absent;
        }
        let key = &rest[..key_len];
        rest = &rest[key_len + 1..];

        let bytes = rest.as_bytes();
        let mut i = 1;
        while i < bytes.len() && bytes[i] != b'"' {
            if bytes[i] == b'\\' {
                i += 1;
            }
            i += 1;
        }
        if i >= bytes.len() {
            return Lookup::Absent;
        }
        let quoted = &rest[..=i];
        rest = &rest[i + 1..];

        if key == name {
            return match unquote(quoted) {
                Some(value) => Lookup::Found(value),
                None => Lookup::Malformed
            };
        }
    }
}

/// Unquote a double-quoted string literal with backslash escapes.
fn unquote(quoted: &str) -> Option<String> {
    let inner = quoted.strip_prefix('"')?.strip_suffix('"')?;
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let escaped = match chars.next()? {
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            'a' => '\u{07}',
            'b' => '\u{08}',
            'f' => '\u{0c}',
            'v' => '\u{0b}',
            '\\' => '\\',
            '"' => '"',
            'x' => hex_escape(&mut chars, 2)?,
            'u' => hex_escape(&mut chars, 4)?,
            'U' => hex_escape(&mut chars, 8)?,
            _ => return None
        };
        out.push(escaped);
    }

    Some(out)
}

fn hex_escape(chars: &mut std::str::Chars<'_>, digits: usize) -> Option<char> {
    let mut code = 0u32;
    for _ in 0..digits {
        code = code * 16 + chars.next()?.to_digit(16)?;
    }
    char::from_u32(code)
}
