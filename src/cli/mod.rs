//! # Command-Line Interface
//!
//! User-facing commands and report rendering.
//!
//! | Command | Removes |
//! |---------|---------|
//! | `duplicates` | near-duplicate decks within a directory |
//! | `lands-only` | decks whose main section is only basic lands |
//! | `undersized` | decks with fewer main-deck cards than the minimum |
//! | `config` | nothing; prints the effective configuration |
//!
//! ## Applying Changes
//!
//! Curation commands only report by default. Pass `--apply` to delete:
//! ```bash
//! deck-curator duplicates decks/ --apply
//! ```
//!
//! ## Output Formats
//!
//! All commands support the `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug logs on stderr, or set `RUST_LOG`.
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod report;

pub use app::{run, Cli, Commands, Target};
pub use output::{Output, OutputFormat};
