//! Configuration handling for deck curation
//!
//! Configuration is read from, in order of precedence:
//! 1. an explicit `--config` path
//! 2. `deck-curator.toml` in the scanned root
//! 3. `~/.config/deck-curator/config.toml` (platform config dir)
//!
//! Missing files and missing keys fall back to the built-in policy.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{ClassifierMode, LandClassifier, BASIC_LAND_NAMES, BASIC_LAND_WORDS, DEFAULT_THRESHOLD};

/// File name looked up in the scanned root
pub const ROOT_CONFIG_FILE: &str = "deck-curator.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Which files count as decks
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScanConfig {
    /// File extensions without the dot, matched case-insensitively
    pub extensions: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["dck".to_string()],
        }
    }
}

/// Duplicate detection settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DuplicateConfig {
    /// Minimum similarity for a deck to count as a duplicate
    pub similarity_threshold: f64,
}

impl Default for DuplicateConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// Land names and words ignored or disqualified by the policies
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LandConfig {
    /// Exact basic land names
    pub basic_names: Vec<String>,

    /// Whole words that mark a card as a land during duplicate comparison
    pub basic_words: Vec<String>,
}

impl Default for LandConfig {
    fn default() -> Self {
        Self {
            basic_names: BASIC_LAND_NAMES.iter().map(|s| s.to_string()).collect(),
            basic_words: BASIC_LAND_WORDS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl LandConfig {
    /// Builds a classifier over these sets in the given mode
    pub fn classifier(&self, mode: ClassifierMode) -> LandClassifier {
        LandClassifier::new(&self.basic_names, &self.basic_words, mode)
    }
}

/// Undersized deck settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UndersizedConfig {
    /// Decks whose `[Main]` total is below this are removed
    pub min_main_cards: u64,
}

impl Default for UndersizedConfig {
    fn default() -> Self {
        Self { min_main_cards: 60 }
    }
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format (text or json)
    pub default_format: OutputFormat,
}

/// Output format for commands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Combined curation configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub scan: ScanConfig,
    pub duplicates: DuplicateConfig,
    pub lands: LandConfig,
    pub undersized: UndersizedConfig,
    pub output: OutputConfig,
}

impl Config {
    /// Loads configuration for a scan of `root`
    ///
    /// An explicit path must exist; the fallback locations are optional.
    pub fn load(root: &Path, explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.is_file() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            return Self::load_file(path);
        }

        match Self::locate(root) {
            Some(path) => Self::load_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Finds the first existing fallback config file for `root`
    pub fn locate(root: &Path) -> Option<PathBuf> {
        let in_root = root.join(ROOT_CONFIG_FILE);
        if in_root.is_file() {
            return Some(in_root);
        }

        let global = Self::global_config_dir()?.join("config.toml");
        global.is_file().then_some(global)
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "deck-curator", "deck-curator").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Loads and validates a config file
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        let config = Self::parse(&content)
            .with_context(|| format!("Failed to load config: {}", path.display()))?;

        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Parses and validates TOML configuration
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        let threshold = self.duplicates.similarity_threshold;
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "similarity_threshold must be in (0, 1], got {}",
                threshold
            )));
        }

        if self.undersized.min_main_cards == 0 {
            return Err(ConfigError::Invalid(
                "min_main_cards must be at least 1".to_string(),
            ));
        }

        if self.scan.extensions.iter().all(|e| e.trim().trim_start_matches('.').is_empty()) {
            return Err(ConfigError::Invalid(
                "at least one deck extension is required".to_string(),
            ));
        }

        Ok(())
    }

    /// Serializes the effective configuration
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }
}
