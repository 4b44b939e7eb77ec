//! Domain models for deck curation
//!
//! Contains the deck parsing, name normalization, land classification and
//! similarity scoring logic without any I/O concerns.

mod name;
mod deck;
mod land;
mod similarity;

pub use name::CardName;
pub use deck::{parse_counts, parse_entries, parse_main_total, CardEntry, CardMultiset};
pub use land::{ClassifierMode, LandClassifier, BASIC_LAND_NAMES, BASIC_LAND_WORDS};
pub use similarity::{best_match, similarity, Match, DEFAULT_THRESHOLD};
