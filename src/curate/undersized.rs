//! Removal of decks with too few main-deck cards

use std::path::Path;

use crate::domain::parse_main_total;
use crate::storage::{DeckStore, TreeError};

use super::{Action, Curator, DeleteReason, Policy, RunReport};

impl<S: DeckStore> Curator<S> {
    /// Removes decks whose `[Main]` total is below the configured minimum
    ///
    /// Every valid quantity counts, lands included. A deck with a `[Main]`
    /// header but no valid lines totals zero.
    pub fn remove_undersized(&self, root: &Path) -> Result<RunReport, TreeError> {
        let mut report = RunReport::new(Policy::Undersized, root, self.apply);

        for directory in self.store.directories(root)? {
            for path in directory.files {
                report.note_scanned();

                let Some(text) = self.read(&path, &mut report) else {
                    continue;
                };

                let Some(total) = parse_main_total(&text) else {
                    report.record(path, Action::Skipped);
                    continue;
                };

                report.note_checked();

                if total < self.min_main_cards {
                    let reason = DeleteReason::Undersized {
                        total,
                        minimum: self.min_main_cards,
                    };
                    self.remove(path, reason, &mut report);
                } else {
                    report.record(path, Action::Kept { main_total: Some(total) });
                }
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curate::test_support::MemoryStore;
    use crate::storage::Config;

    fn curator(store: MemoryStore, min: u64) -> Curator<MemoryStore> {
        let mut config = Config::default();
        config.undersized.min_main_cards = min;
        Curator::new(store, &config).apply(true)
    }

    #[test]
    fn fifty_nine_is_removed_sixty_is_kept() {
        let store = MemoryStore::default()
            .with("decks/short.dck", "[Main]\n4 Shock\n55 Mountain\n")
            .with("decks/full.dck", "[Main]\n4 Shock\n56 Mountain\n");

        let curator = curator(store, 60);
        let report = curator.remove_undersized(Path::new("decks")).unwrap();

        assert_eq!(report.summary.checked, 2);
        assert_eq!(report.summary.kept, 1);
        assert_eq!(report.summary.deleted, 1);
        assert!(!curator.store().exists("decks/short.dck"));
        assert_eq!(
            report.action_for(Path::new("decks/full.dck")),
            Some(&Action::Kept { main_total: Some(60) })
        );
        assert_eq!(
            report.action_for(Path::new("decks/short.dck")),
            Some(&Action::Deleted {
                reason: DeleteReason::Undersized { total: 59, minimum: 60 }
            })
        );
    }

    #[test]
    fn sideboard_is_not_counted() {
        let store = MemoryStore::default()
            .with("decks/a.dck", "[Main]\n50 Mountain\n[Sideboard]\n15 Shock\n");

        let report = curator(store, 60).remove_undersized(Path::new("decks")).unwrap();
        assert_eq!(report.summary.deleted, 1);
    }

    #[test]
    fn empty_main_counts_as_zero() {
        let store = MemoryStore::default().with("decks/a.dck", "[Main]\nnot a card\n");

        let report = curator(store, 60).remove_undersized(Path::new("decks")).unwrap();
        assert_eq!(report.summary.checked, 1);
        assert_eq!(report.summary.deleted, 1);
    }

    #[test]
    fn missing_main_is_skipped() {
        let store = MemoryStore::default().with("decks/a.dck", "[Sideboard]\n4 Shock\n");

        let curator = curator(store, 60);
        let report = curator.remove_undersized(Path::new("decks")).unwrap();
        assert_eq!(report.summary.checked, 0);
        assert!(curator.store().exists("decks/a.dck"));
    }

    #[test]
    fn minimum_is_configurable() {
        let store = MemoryStore::default().with("decks/a.dck", "[Main]\n40 Mountain\n");

        let report = curator(store, 40).remove_undersized(Path::new("decks")).unwrap();
        assert_eq!(report.summary.kept, 1);
    }
}
