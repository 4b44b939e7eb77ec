//! Card name normalization
//!
//! Deck files write the same card in several ways: different casing, stray
//! spacing, or a trailing set code such as `(2ED)` or `[M10]`. Two raw names
//! denote the same card iff their [`CardName`] values are equal.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

/// Canonical, comparable form of a card name
///
/// Lowercase, trimmed, without trailing `(...)` / `[...]` annotations and with
/// internal whitespace collapsed to single spaces.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardName(String);

impl CardName {
    /// Normalizes a raw card name
    ///
    /// Trailing annotations are stripped until none remain, which keeps the
    /// operation idempotent for names such as `Bolt [M10] (foil)`.
    pub fn normalize(raw: &str) -> Self {
        let mut name = raw.trim();

        loop {
            let stripped = strip_trailing_group(name, '(', ')');
            let stripped = strip_trailing_group(stripped, '[', ']');
            if stripped.len() == name.len() {
                break;
            }
            name = stripped;
        }

        let collapsed = name.split_whitespace().collect::<Vec<_>>().join(" ");
        Self(collapsed.to_lowercase())
    }

    /// Returns the normalized name
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if normalization left nothing behind
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Removes a group opened by the first `open` when the name ends with `close`
fn strip_trailing_group(name: &str, open: char, close: char) -> &str {
    if !name.ends_with(close) {
        return name;
    }

    match name.find(open) {
        Some(start) => name[..start].trim_end(),
        None => name,
    }
}

impl fmt::Display for CardName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Deref for CardName {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for CardName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
