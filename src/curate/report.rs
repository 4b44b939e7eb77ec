//! Run reports for the curation drivers

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::CardName;

/// Which curation policy produced a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    Duplicates,
    LandsOnly,
    Undersized,
}

impl Policy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Policy::Duplicates => "duplicates",
            Policy::LandsOnly => "lands_only",
            Policy::Undersized => "undersized",
        }
    }
}

/// Why a deck was (or would be) removed
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeleteReason {
    /// Too similar to a deck kept earlier in the same directory
    Duplicate {
        similarity: f64,
        threshold: f64,
        matched: PathBuf,
    },
    /// Main section holds nothing but basic lands
    OnlyBasicLands { cards: Vec<CardName> },
    /// Main section total below the minimum
    Undersized { total: u64, minimum: u64 },
}

/// What happened to one deck file
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    Kept {
        #[serde(skip_serializing_if = "Option::is_none")]
        main_total: Option<u64>,
    },
    Deleted { reason: DeleteReason },
    /// Deletion suppressed because changes were not applied
    WouldDelete { reason: DeleteReason },
    /// No usable `[Main]` section
    Skipped,
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    #[serde(flatten)]
    pub action: Action,
}

/// Run totals
///
/// `deleted` also counts would-be deletions when changes are not applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub scanned: usize,
    pub checked: usize,
    pub kept: usize,
    pub deleted: usize,
    pub failed: usize,
}

/// Everything one driver run decided
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub policy: Policy,
    pub root: PathBuf,
    pub applied: bool,
    /// Duplicate threshold, for duplicate runs only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
    pub files: Vec<FileReport>,
    pub summary: Summary,
}

impl RunReport {
    pub(crate) fn new(policy: Policy, root: &Path, applied: bool) -> Self {
        Self {
            policy,
            root: root.to_path_buf(),
            applied,
            threshold: None,
            files: Vec::new(),
            summary: Summary::default(),
        }
    }

    pub(crate) fn note_scanned(&mut self) {
        self.summary.scanned += 1;
    }

    pub(crate) fn note_checked(&mut self) {
        self.summary.checked += 1;
    }

    pub(crate) fn record(&mut self, path: PathBuf, action: Action) {
        match &action {
            Action::Kept { .. } => self.summary.kept += 1,
            Action::Deleted { .. } | Action::WouldDelete { .. } => self.summary.deleted += 1,
            Action::Failed { .. } => self.summary.failed += 1,
            Action::Skipped => {}
        }
        self.files.push(FileReport { path, action });
    }

    /// Returns the recorded action for a path
    pub fn action_for(&self, path: &Path) -> Option<&Action> {
        self.files.iter().find(|f| f.path == path).map(|f| &f.action)
    }

    /// Paths removed, or that would be removed
    pub fn removed(&self) -> impl Iterator<Item = &Path> {
        self.files.iter().filter_map(|f| match &f.action {
            Action::Deleted { .. } | Action::WouldDelete { .. } => Some(f.path.as_path()),
            _ => None,
        })
    }
}
