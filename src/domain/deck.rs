//! Deck list parsing
//!
//! Deck files are split into bracketed sections:
//!
//! ```text
//! [metadata]
//! Name=Elves
//! [Main]
//! 4 Llanowar Elves
//! 56 Forest
//! [Sideboard]
//! 2 Naturalize
//! ```
//!
//! Only `[Main]` is read. Section names are case-insensitive, and a file may
//! open `[Main]` more than once; every span contributes to the same result.
//! Inside `[Main]` a line is `<quantity> <card name>`. Lines whose quantity
//! does not parse, or is zero or negative, are discarded. Counts too large
//! for a `u64` clamp to `u64::MAX`.

use std::collections::btree_map::{self, BTreeMap};
use std::num::IntErrorKind;

use serde::Serialize;

use super::{CardName, LandClassifier};

/// One parsed `[Main]` line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardEntry {
    /// Always at least 1
    pub quantity: u64,
    /// Card name as written, before normalization
    pub name: String,
}

/// Card name to total quantity
///
/// Every stored quantity is at least 1.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CardMultiset {
    cards: BTreeMap<CardName, u64>,
}

impl CardMultiset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds copies of a card; zero quantities are ignored
    pub fn add(&mut self, name: CardName, quantity: u64) {
        if quantity == 0 {
            return;
        }
        let count = self.cards.entry(name).or_insert(0);
        *count = count.saturating_add(quantity);
    }

    /// Quantity of a card, 0 when absent
    pub fn get(&self, name: &CardName) -> u64 {
        self.cards.get(name).copied().unwrap_or(0)
    }

    pub fn contains(&self, name: &CardName) -> bool {
        self.cards.contains_key(name)
    }

    /// Number of distinct cards
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Sum of all quantities
    pub fn total(&self) -> u64 {
        self.cards.values().fold(0u64, |acc, q| acc.saturating_add(*q))
    }

    pub fn iter(&self) -> btree_map::Iter<'_, CardName, u64> {
        self.cards.iter()
    }

    /// Returns a copy without the cards the classifier treats as lands
    pub fn strip_lands(&self, classifier: &LandClassifier) -> Self {
        self.iter()
            .filter(|(name, _)| !classifier.is_land(name))
            .map(|(name, quantity)| (name.clone(), *quantity))
            .collect()
    }
}

impl FromIterator<(CardName, u64)> for CardMultiset {
    fn from_iter<I: IntoIterator<Item = (CardName, u64)>>(iter: I) -> Self {
        let mut multiset = Self::new();
        for (name, quantity) in iter {
            multiset.add(name, quantity);
        }
        multiset
    }
}

impl<'a> IntoIterator for &'a CardMultiset {
    type Item = (&'a CardName, &'a u64);
    type IntoIter = btree_map::Iter<'a, CardName, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Walks the `[Main]` lines of a deck, calling `visit` with each valid
/// quantity and raw name
///
/// Returns true if a `[Main]` header was seen at all.
fn scan_main(text: &str, mut visit: impl FnMut(u64, &str)) -> bool {
    let mut in_main = false;
    let mut saw_main = false;

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(section) = section_name(line) {
            in_main = section.eq_ignore_ascii_case("main");
            saw_main |= in_main;
            continue;
        }

        if !in_main {
            continue;
        }

        let Some((quantity, name)) = line.split_once(char::is_whitespace) else {
            continue;
        };

        if let Some(q) = parse_quantity(quantity) {
            visit(q, name.trim_start());
        }
    }

    saw_main
}

/// Parses a positive quantity, clamping oversized counts to `u64::MAX`
fn parse_quantity(token: &str) -> Option<u64> {
    match token.parse::<u64>() {
        Ok(0) => None,
        Ok(q) => Some(q),
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => Some(u64::MAX),
        Err(_) => None,
    }
}

/// Returns the text between the brackets of a `[Section]` header line
fn section_name(line: &str) -> Option<&str> {
    line.strip_prefix('[')?.strip_suffix(']')
}

/// Parses `[Main]` into ordered entries with raw names
///
/// Empty when the deck has no `[Main]` section or no valid lines in it.
pub fn parse_entries(text: &str) -> Vec<CardEntry> {
    let mut entries = Vec::new();
    scan_main(text, |quantity, name| {
        entries.push(CardEntry {
            quantity,
            name: name.to_string(),
        });
    });
    entries
}

/// Parses `[Main]` into a multiset keyed by normalized name
///
/// Returns `None` when there is no `[Main]` section or nothing in it could be
/// aggregated. Names that normalize to nothing are dropped.
pub fn parse_counts(text: &str) -> Option<CardMultiset> {
    let mut counts = CardMultiset::new();
    let saw_main = scan_main(text, |quantity, name| {
        let name = CardName::normalize(name);
        if !name.is_empty() {
            counts.add(name, quantity);
        }
    });

    (saw_main && !counts.is_empty()).then_some(counts)
}

/// Sums every valid `[Main]` quantity, lands included
///
/// Returns `None` only when no `[Main]` header was seen, so an empty main
/// section yields `Some(0)`.
pub fn parse_main_total(text: &str) -> Option<u64> {
    let mut total = 0u64;
    let saw_main = scan_main(text, |quantity, _| total = total.saturating_add(quantity));
    saw_main.then_some(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ClassifierMode;

    fn name(raw: &str) -> CardName {
        CardName::normalize(raw)
    }

    const ELVES: &str = "[metadata]\nName=Elves\n[Main]\n4 Llanowar Elves\n56 Forest\n[Sideboard]\n2 Naturalize\n";

    #[test]
    fn reads_only_main_section() {
        let counts = parse_counts(ELVES).unwrap();

        assert_eq!(counts.len(), 2);
        assert_eq!(counts.get(&name("Llanowar Elves")), 4);
        assert_eq!(counts.get(&name("Forest")), 56);
        assert!(!counts.contains(&name("Naturalize")));
    }

    #[test]
    fn no_main_section_yields_none() {
        let text = "[metadata]\nName=Empty\n[Sideboard]\n4 Naturalize\n";

        assert_eq!(parse_counts(text), None);
        assert_eq!(parse_main_total(text), None);
        assert!(parse_entries(text).is_empty());
    }

    #[test]
    fn malformed_lines_are_discarded() {
        let text = "[Main]\nfour Llanowar Elves\n0 Forest\n-2 Island\nGiant Growth\n7\n";

        assert_eq!(parse_counts(text), None);
        assert!(parse_entries(text).is_empty());
        assert_eq!(parse_main_total(text), Some(0));
    }

    #[test]
    fn header_is_case_insensitive() {
        let counts = parse_counts("[MAIN]\n1 Sol Ring\n").unwrap();
        assert_eq!(counts.get(&name("Sol Ring")), 1);
    }

    #[test]
    fn multiple_main_spans_accumulate() {
        let text = "[Main]\n2 Shock\n[Sideboard]\n3 Shock\n[main]\n1 Shock\n";

        let counts = parse_counts(text).unwrap();
        assert_eq!(counts.get(&name("Shock")), 3);
        assert_eq!(parse_main_total(text), Some(3));
    }

    #[test]
    fn annotated_names_aggregate() {
        let text = "[Main]\n4 Lightning Bolt (2ED)\n2 lightning  bolt [M10]\n";

        let counts = parse_counts(text).unwrap();
        assert_eq!(counts.len(), 1);
        assert_eq!(counts.get(&name("Lightning Bolt")), 6);
    }

    #[test]
    fn entries_keep_order_and_raw_names() {
        let entries = parse_entries("[Main]\n20 Plains\n\n  20   Snow-Covered Island  \n");

        assert_eq!(
            entries,
            vec![
                CardEntry { quantity: 20, name: "Plains".to_string() },
                CardEntry { quantity: 20, name: "Snow-Covered Island".to_string() },
            ]
        );
    }

    #[test]
    fn total_counts_lands() {
        assert_eq!(parse_main_total(ELVES), Some(60));
    }

    #[test]
    fn total_of_empty_main_is_zero() {
        assert_eq!(parse_main_total("[Main]\n[Sideboard]\n15 Island\n"), Some(0));
    }

    #[test]
    fn oversized_quantities_clamp() {
        let text = "[Main]\n99999999999999999999 Forest\n4 Shock\n";

        assert_eq!(parse_main_total(text), Some(u64::MAX));
        let counts = parse_counts(text).unwrap();
        assert_eq!(counts.get(&name("Forest")), u64::MAX);
        assert_eq!(parse_entries(text)[0].quantity, u64::MAX);
        assert!(parse_entries("[Main]\n-99999999999999999999 Forest\n").is_empty());
    }

    #[test]
    fn annotation_only_names_are_dropped() {
        assert_eq!(parse_counts("[Main]\n4 (PROMO)\n"), None);
    }

    #[test]
    fn handles_crlf_line_endings() {
        let counts = parse_counts("[Main]\r\n4 Llanowar Elves\r\n").unwrap();
        assert_eq!(counts.get(&name("Llanowar Elves")), 4);
    }

    #[test]
    fn strip_lands_uses_classifier_mode() {
        let counts = parse_counts("[Main]\n4 Llanowar Elves\n4 Tropical Island\n52 Forest\n").unwrap();

        let word_aware = counts.strip_lands(&LandClassifier::basic(ClassifierMode::WordAware));
        assert_eq!(word_aware.len(), 1);
        assert_eq!(word_aware.total(), 4);

        let exact = counts.strip_lands(&LandClassifier::basic(ClassifierMode::Exact));
        assert_eq!(exact.len(), 2);
        assert!(exact.contains(&name("Tropical Island")));
    }

    #[test]
    fn multiset_ignores_zero_quantities() {
        let multiset: CardMultiset = [(name("Shock"), 0), (name("Opt"), 2)].into_iter().collect();

        assert_eq!(multiset.len(), 1);
        assert!(!multiset.contains(&name("Shock")));
    }
}
