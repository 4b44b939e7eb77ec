//! Deck file discovery and file operations
//!
//! The drivers only see a [`DeckStore`]: list the directories holding deck
//! files, read a deck as text, delete a deck. [`FsDeckStore`] is the real
//! filesystem implementation.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

#[derive(Debug, Error)]
pub enum TreeError {
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// A directory and the deck files directly inside it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckDirectory {
    pub path: PathBuf,
    /// Sorted by lowercase file name
    pub files: Vec<PathBuf>,
}

/// Filesystem capability used by the curation drivers
pub trait DeckStore {
    /// Lists every directory under `root` (inclusive) that holds deck files
    ///
    /// Directories come back in a stable order; files within a directory are
    /// sorted by lowercase file name.
    fn directories(&self, root: &Path) -> Result<Vec<DeckDirectory>, TreeError>;

    /// Reads a deck, replacing undecodable bytes
    fn read_text(&self, path: &Path) -> io::Result<String>;

    /// Permanently removes a deck
    fn delete(&self, path: &Path) -> io::Result<()>;
}

/// [`DeckStore`] backed by the local filesystem
#[derive(Debug, Clone)]
pub struct FsDeckStore {
    extensions: Vec<String>,
}

impl FsDeckStore {
    /// Creates a store matching the given extensions (with or without a dot)
    pub fn new<I>(extensions: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Self {
            extensions: extensions
                .into_iter()
                .map(|e| e.as_ref().trim().trim_start_matches('.').to_lowercase())
                .filter(|e| !e.is_empty())
                .collect(),
        }
    }

    /// Returns true if the path has one of the deck extensions
    pub fn is_deck_file(&self, path: &Path) -> bool {
        path.extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .is_some_and(|ext| self.extensions.iter().any(|e| *e == ext))
    }

    fn is_file(entry: &DirEntry) -> bool {
        entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
    }
}

impl Default for FsDeckStore {
    fn default() -> Self {
        Self::new(["dck"])
    }
}

impl DeckStore for FsDeckStore {
    fn directories(&self, root: &Path) -> Result<Vec<DeckDirectory>, TreeError> {
        if !root.exists() {
            return Err(TreeError::NotFound(root.to_path_buf()));
        }

        if !root.is_dir() {
            return Err(TreeError::NotADirectory(root.to_path_buf()));
        }

        let mut grouped: BTreeMap<PathBuf, Vec<PathBuf>> = BTreeMap::new();

        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name();

        for entry in walker {
            match entry {
                Ok(entry) => {
                    if !Self::is_file(&entry) || !self.is_deck_file(entry.path()) {
                        continue;
                    }
                    let parent = entry.path().parent().unwrap_or(root).to_path_buf();
                    grouped.entry(parent).or_default().push(entry.into_path());
                }
                Err(e) => {
                    tracing::warn!("Error accessing entry: {}", e);
                }
            }
        }

        Ok(grouped
            .into_iter()
            .map(|(path, mut files)| {
                files.sort_by_cached_key(|f| {
                    let name = f.file_name().unwrap_or_default().to_string_lossy().into_owned();
                    (name.to_lowercase(), name)
                });
                DeckDirectory { path, files }
            })
            .collect())
    }

    fn read_text(&self, path: &Path) -> io::Result<String> {
        let bytes = fs::read(path)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn delete(&self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }
}
