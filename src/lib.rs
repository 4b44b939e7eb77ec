//! Deck Curator - batch curation of deck list collections
//!
//! Finds near-duplicate decks, decks made only of basic lands, and decks
//! below a minimum card count in a tree of `.dck` files, then removes them.
//! Decisions come from the `[Main]` section of each deck.

pub mod domain;
pub mod storage;
pub mod curate;
pub mod cli;

pub use curate::{Curator, Policy, RunReport};
pub use domain::{CardMultiset, CardName};
