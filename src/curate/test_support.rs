//! In-memory deck store for driver tests

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};

use crate::storage::{DeckDirectory, DeckStore, TreeError};

#[derive(Debug, Default)]
pub(crate) struct MemoryStore {
    files: RefCell<BTreeMap<PathBuf, String>>,
    unreadable: BTreeSet<PathBuf>,
    undeletable: BTreeSet<PathBuf>,
}

impl MemoryStore {
    pub(crate) fn with(self, path: &str, text: &str) -> Self {
        self.files.borrow_mut().insert(PathBuf::from(path), text.to_string());
        self
    }

    /// Adds a file that is listed but fails to read
    pub(crate) fn unreadable(mut self, path: &str) -> Self {
        self.unreadable.insert(PathBuf::from(path));
        self.with(path, "")
    }

    /// Adds a readable file that fails to delete
    pub(crate) fn undeletable(mut self, path: &str, text: &str) -> Self {
        self.undeletable.insert(PathBuf::from(path));
        self.with(path, text)
    }

    pub(crate) fn exists(&self, path: &str) -> bool {
        self.files.borrow().contains_key(Path::new(path))
    }
}

impl DeckStore for MemoryStore {
    fn directories(&self, root: &Path) -> Result<Vec<DeckDirectory>, TreeError> {
        let mut grouped: BTreeMap<PathBuf, Vec<PathBuf>> = BTreeMap::new();
        for path in self.files.borrow().keys().filter(|p| p.starts_with(root)) {
            let parent = path.parent().unwrap_or(root).to_path_buf();
            grouped.entry(parent).or_default().push(path.clone());
        }

        Ok(grouped
            .into_iter()
            .map(|(path, mut files)| {
                files.sort_by_key(|f| f.to_string_lossy().to_lowercase());
                DeckDirectory { path, files }
            })
            .collect())
    }

    fn read_text(&self, path: &Path) -> io::Result<String> {
        if self.unreadable.contains(path) {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        }
        self.files
            .borrow()
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "missing"))
    }

    fn delete(&self, path: &Path) -> io::Result<()> {
        if self.undeletable.contains(path) {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        }
        self.files
            .borrow_mut()
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "missing"))
    }
}
