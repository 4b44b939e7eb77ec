//! Near-duplicate removal
//!
//! Decks are only compared with siblings in the same directory. Within a
//! directory, files are visited in lowercase name order and the first deck
//! seen wins: each later deck is compared, lands stripped, against the decks
//! kept so far and removed if it is similar enough to one of them.

use std::path::{Path, PathBuf};

use crate::domain::{best_match, parse_counts, CardMultiset, Match};
use crate::storage::{DeckStore, TreeError};

use super::{Action, Curator, DeleteReason, Policy, RunReport};

/// A kept deck and its land-stripped cards
#[derive(Debug, Clone, PartialEq)]
pub struct DeckRecord {
    pub path: PathBuf,
    pub cards: CardMultiset,
}

/// Decks kept so far in one directory
///
/// Created fresh for every directory and dropped when it is done.
#[derive(Debug)]
pub struct DirectoryScan {
    directory: PathBuf,
    kept: Vec<DeckRecord>,
}

impl DirectoryScan {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            kept: Vec::new(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn len(&self) -> usize {
        self.kept.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kept.is_empty()
    }

    /// Compares against kept decks in insertion order
    ///
    /// Stops at the first deck scoring at least `threshold`.
    pub fn best_match(&self, cards: &CardMultiset, threshold: f64) -> Option<Match<'_, PathBuf>> {
        best_match(
            cards,
            self.kept.iter().map(|record| (&record.path, &record.cards)),
            threshold,
        )
    }

    pub fn keep(&mut self, record: DeckRecord) {
        self.kept.push(record);
    }
}

impl<S: DeckStore> Curator<S> {
    /// Removes decks that duplicate an earlier deck in the same directory
    pub fn remove_duplicates(&self, root: &Path) -> Result<RunReport, TreeError> {
        let mut report = RunReport::new(Policy::Duplicates, root, self.apply);
        report.threshold = Some(self.threshold);

        for directory in self.store.directories(root)? {
            let mut scan = DirectoryScan::new(directory.path);

            for path in directory.files {
                report.note_scanned();

                let Some(text) = self.read(&path, &mut report) else {
                    continue;
                };

                let Some(counts) = parse_counts(&text) else {
                    report.record(path, Action::Skipped);
                    continue;
                };

                report.note_checked();
                let cards = counts.strip_lands(&self.comparison_lands);

                let best = scan
                    .best_match(&cards, self.threshold)
                    .map(|m| (m.candidate.clone(), m.similarity));

                match best {
                    Some((matched, similarity)) if similarity >= self.threshold => {
                        let reason = DeleteReason::Duplicate {
                            similarity,
                            threshold: self.threshold,
                            matched,
                        };
                        self.remove(path, reason, &mut report);
                    }
                    best => {
                        tracing::debug!(
                            path = %path.display(),
                            best = best.map_or(0.0, |(_, similarity)| similarity),
                            "kept"
                        );
                        report.record(path.clone(), Action::Kept { main_total: None });
                        scan.keep(DeckRecord { path, cards });
                    }
                }
            }

            tracing::debug!(
                directory = %scan.directory().display(),
                kept = scan.len(),
                "directory done"
            );
        }

        Ok(report)
    }
}
