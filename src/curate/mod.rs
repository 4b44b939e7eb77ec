//! # Curation Drivers
//!
//! Batch policies that walk a deck tree and remove offending files.
//!
//! | Policy | Method | Removes |
//! |--------|--------|---------|
//! | Duplicates | [`Curator::remove_duplicates`] | decks too similar to an earlier deck in the same directory |
//! | Lands only | [`Curator::remove_lands_only`] | decks whose main section is only basic lands |
//! | Undersized | [`Curator::remove_undersized`] | decks whose main section totals fewer than the minimum |
//!
//! Nothing is deleted unless the curator was built with [`Curator::apply`];
//! otherwise removals are reported as [`Action::WouldDelete`].
//!
//! A file that cannot be read or deleted is logged, recorded as
//! [`Action::Failed`], and the run moves on. Only an unusable root aborts a
//! run.

mod duplicates;
mod lands;
mod report;
mod undersized;

#[cfg(test)]
pub(crate) mod test_support;

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::{ClassifierMode, LandClassifier};
use crate::storage::{Config, DeckStore, TreeError};

pub use duplicates::{DeckRecord, DirectoryScan};
pub use lands::is_only_basic_lands;
pub use report::{Action, DeleteReason, FileReport, Policy, RunReport, Summary};

/// Per-file failures; never fatal to a run
#[derive(Debug, Error)]
pub enum FileError {
    #[error("Can't read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not delete {}: {source}", .path.display())]
    Delete {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Runs the curation policies against a [`DeckStore`]
pub struct Curator<S> {
    store: S,
    threshold: f64,
    min_main_cards: u64,
    comparison_lands: LandClassifier,
    basic_lands: LandClassifier,
    apply: bool,
}

impl<S: DeckStore> Curator<S> {
    /// Creates a curator that only reports what it would delete
    pub fn new(store: S, config: &Config) -> Self {
        Self {
            store,
            threshold: config.duplicates.similarity_threshold,
            min_main_cards: config.undersized.min_main_cards,
            comparison_lands: config.lands.classifier(ClassifierMode::WordAware),
            basic_lands: config.lands.classifier(ClassifierMode::Exact),
            apply: false,
        }
    }

    /// Sets whether removals actually delete files
    pub fn apply(mut self, apply: bool) -> Self {
        self.apply = apply;
        self
    }

    pub fn is_applying(&self) -> bool {
        self.apply
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn min_main_cards(&self) -> u64 {
        self.min_main_cards
    }

    /// Runs one policy over `root`
    pub fn run(&self, policy: Policy, root: &Path) -> Result<RunReport, TreeError> {
        let report = match policy {
            Policy::Duplicates => self.remove_duplicates(root)?,
            Policy::LandsOnly => self.remove_lands_only(root)?,
            Policy::Undersized => self.remove_undersized(root)?,
        };

        let summary = &report.summary;
        tracing::info!(
            policy = policy.as_str(),
            applied = self.apply,
            scanned = summary.scanned,
            checked = summary.checked,
            kept = summary.kept,
            deleted = summary.deleted,
            failed = summary.failed,
            "curation finished"
        );

        Ok(report)
    }

    /// Reads a deck, recording a failure instead of returning an error
    fn read(&self, path: &Path, report: &mut RunReport) -> Option<String> {
        match self.store.read_text(path) {
            Ok(text) => Some(text),
            Err(source) => {
                self.fail(
                    FileError::Read {
                        path: path.to_path_buf(),
                        source,
                    },
                    report,
                );
                None
            }
        }
    }

    /// Removes a deck, or records that it would be removed
    ///
    /// Returns false if deletion failed; the file then counts as neither kept
    /// nor deleted.
    fn remove(&self, path: PathBuf, reason: DeleteReason, report: &mut RunReport) -> bool {
        if !self.apply {
            tracing::debug!(path = %path.display(), ?reason, "would delete");
            report.record(path, Action::WouldDelete { reason });
            return true;
        }

        match self.store.delete(&path) {
            Ok(()) => {
                tracing::debug!(path = %path.display(), ?reason, "deleted");
                report.record(path, Action::Deleted { reason });
                true
            }
            Err(source) => {
                self.fail(FileError::Delete { path, source }, report);
                false
            }
        }
    }

    fn fail(&self, error: FileError, report: &mut RunReport) {
        tracing::warn!("{}", error);
        let path = match &error {
            FileError::Read { path, .. } | FileError::Delete { path, .. } => path.clone(),
        };
        report.record(
            path,
            Action::Failed {
                error: error.to_string(),
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::MemoryStore;
    use super::*;

    #[test]
    fn unreadable_file_does_not_stop_the_run() {
        let store = MemoryStore::default()
            .unreadable("decks/a.dck")
            .with("decks/b.dck", "[Main]\n40 Shock\n");

        let curator = Curator::new(store, &Config::default()).apply(true);
        let report = curator.run(Policy::Undersized, Path::new("decks")).unwrap();

        assert_eq!(report.summary.scanned, 2);
        assert_eq!(report.summary.checked, 1);
        assert_eq!(report.summary.failed, 1);
        assert_eq!(report.summary.deleted, 1);
        assert!(matches!(
            report.action_for(Path::new("decks/a.dck")),
            Some(Action::Failed { error }) if error.starts_with("Can't read decks/a.dck")
        ));
        assert!(!curator.store().exists("decks/b.dck"));
    }

    #[test]
    fn failed_delete_is_neither_kept_nor_deleted() {
        let store = MemoryStore::default()
            .undeletable("decks/a.dck", "[Main]\n20 Plains\n")
            .with("decks/b.dck", "[Main]\n20 Island\n");

        let curator = Curator::new(store, &Config::default()).apply(true);
        let report = curator.run(Policy::LandsOnly, Path::new("decks")).unwrap();

        assert_eq!(report.summary.checked, 2);
        assert_eq!(report.summary.kept, 0);
        assert_eq!(report.summary.deleted, 1);
        assert_eq!(report.summary.failed, 1);
        assert!(curator.store().exists("decks/a.dck"));
        assert!(!curator.store().exists("decks/b.dck"));
    }

    #[test]
    fn report_only_mode_leaves_files() {
        let store = MemoryStore::default().with("decks/a.dck", "[Main]\n10 Shock\n");

        let curator = Curator::new(store, &Config::default());
        assert!(!curator.is_applying());

        let report = curator.run(Policy::Undersized, Path::new("decks")).unwrap();
        assert!(!report.applied);
        assert_eq!(report.summary.deleted, 1);
        assert!(matches!(
            report.action_for(Path::new("decks/a.dck")),
            Some(Action::WouldDelete { .. })
        ));
        assert!(curator.store().exists("decks/a.dck"));
    }

    #[test]
    fn curator_takes_policy_from_config() {
        let mut config = Config::default();
        config.duplicates.similarity_threshold = 0.5;
        config.undersized.min_main_cards = 40;

        let curator = Curator::new(MemoryStore::default(), &config);
        assert_eq!(curator.threshold(), 0.5);
        assert_eq!(curator.min_main_cards(), 40);
    }
}
