//! # Storage Layer
//!
//! Configuration and filesystem access for deck curation.
//!
//! | Concern | Type | Source |
//! |---------|------|--------|
//! | Policy settings | [`Config`] | `deck-curator.toml` (TOML) |
//! | Deck discovery | [`DeckStore::directories`] | recursive walk of the root |
//! | Deck content | [`DeckStore::read_text`] | lossy UTF-8 read |
//! | Removal | [`DeckStore::delete`] | permanent, no trash |

mod config;
mod tree;

pub use config::{
    Config, ConfigError, DuplicateConfig, LandConfig, OutputConfig, OutputFormat, ScanConfig,
    UndersizedConfig, ROOT_CONFIG_FILE,
};
pub use tree::{DeckDirectory, DeckStore, FsDeckStore, TreeError};
