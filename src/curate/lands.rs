//! Removal of decks made only of basic lands
//!
//! Uses the exact basic land set only. `Tropical Island` is not a basic land
//! here, even though duplicate comparison ignores it.

use std::collections::BTreeSet;
use std::path::Path;

use crate::domain::{parse_entries, CardEntry, CardName, LandClassifier};
use crate::storage::{DeckStore, TreeError};

use super::{Action, Curator, DeleteReason, Policy, RunReport};

/// Returns true if there is at least one entry and every entry is a land
/// under `classifier`
pub fn is_only_basic_lands(entries: &[CardEntry], classifier: &LandClassifier) -> bool {
    !entries.is_empty()
        && entries
            .iter()
            .all(|entry| classifier.is_land(&CardName::normalize(&entry.name)))
}

impl<S: DeckStore> Curator<S> {
    /// Removes decks whose main section holds nothing but basic lands
    pub fn remove_lands_only(&self, root: &Path) -> Result<RunReport, TreeError> {
        let mut report = RunReport::new(Policy::LandsOnly, root, self.apply);

        for directory in self.store.directories(root)? {
            for path in directory.files {
                report.note_scanned();

                let Some(text) = self.read(&path, &mut report) else {
                    continue;
                };

                let entries = parse_entries(&text);
                if entries.is_empty() {
                    report.record(path, Action::Skipped);
                    continue;
                }

                report.note_checked();

                if is_only_basic_lands(&entries, &self.basic_lands) {
                    let cards: BTreeSet<CardName> = entries
                        .iter()
                        .map(|entry| CardName::normalize(&entry.name))
                        .collect();
                    let reason = DeleteReason::OnlyBasicLands {
                        cards: cards.into_iter().collect(),
                    };
                    self.remove(path, reason, &mut report);
                } else {
                    report.record(path, Action::Kept { main_total: None });
                }
            }
        }

        Ok(report)
    }
}
