//! Basic land classification
//!
//! Two policies share the classifier but disagree on what counts as a land:
//!
//! | Mode | Used by | Rule |
//! |------|---------|------|
//! | [`ClassifierMode::Exact`] | lands-only removal | name is in the basic land set |
//! | [`ClassifierMode::WordAware`] | duplicate removal | exact match, or any word of the name is a basic land word |
//!
//! `WordAware` also matches non-basic lands such as `Tropical Island`, and
//! non-lands whose names contain a basic land word. Duplicate comparison
//! relies on that; lands-only removal must not.

use std::collections::BTreeSet;

use super::CardName;

/// Basic and snow-covered basic land names, normalized
pub const BASIC_LAND_NAMES: [&str; 11] = [
    "plains",
    "island",
    "swamp",
    "mountain",
    "forest",
    "wastes",
    "snow-covered plains",
    "snow-covered island",
    "snow-covered swamp",
    "snow-covered mountain",
    "snow-covered forest",
];

/// Words that mark a card as a land in [`ClassifierMode::WordAware`]
pub const BASIC_LAND_WORDS: [&str; 6] = ["plains", "island", "swamp", "mountain", "forest", "wastes"];

/// How aggressively names are classified as lands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierMode {
    /// Only exact basic land names
    Exact,
    /// Exact names plus any name containing a basic land word
    WordAware,
}

/// Decides whether a normalized card name is a land to ignore
#[derive(Debug, Clone)]
pub struct LandClassifier {
    names: BTreeSet<CardName>,
    words: BTreeSet<String>,
    mode: ClassifierMode,
}

impl LandClassifier {
    /// Creates a classifier from explicit name and word sets
    ///
    /// Names are normalized and words lowercased so configuration is
    /// case-insensitive.
    pub fn new<N, W>(names: N, words: W, mode: ClassifierMode) -> Self
    where
        N: IntoIterator,
        N::Item: AsRef<str>,
        W: IntoIterator,
        W::Item: AsRef<str>,
    {
        Self {
            names: names
                .into_iter()
                .map(|n| CardName::normalize(n.as_ref()))
                .filter(|n| !n.is_empty())
                .collect(),
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
            mode,
        }
    }

    /// Creates a classifier over the built-in basic land sets
    pub fn basic(mode: ClassifierMode) -> Self {
        Self::new(BASIC_LAND_NAMES, BASIC_LAND_WORDS, mode)
    }

    pub fn mode(&self) -> ClassifierMode {
        self.mode
    }

    /// Returns true if the name is an exact basic land name
    pub fn is_basic(&self, name: &CardName) -> bool {
        self.names.contains(name)
    }

    /// Returns true if the name should be treated as a land under this mode
    pub fn is_land(&self, name: &CardName) -> bool {
        if self.is_basic(name) {
            return true;
        }

        match self.mode {
            ClassifierMode::Exact => false,
            ClassifierMode::WordAware => words(name).any(|w| self.words.contains(w)),
        }
    }
}

/// Splits a normalized name into runs of ASCII letters
fn words(name: &str) -> impl Iterator<Item = &str> {
    name.split(|c: char| !c.is_ascii_lowercase())
        .filter(|w| !w.is_empty())
}
