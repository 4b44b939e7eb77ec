//! Deck Curator - batch curation of deck list collections

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = deck_curator::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
