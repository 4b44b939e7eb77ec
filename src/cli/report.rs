//! Text rendering of curation reports

use super::output::Output;
use crate::curate::{Action, DeleteReason, FileReport, Policy, RunReport};

/// Prints a run report in the selected format
pub fn render(output: &Output, report: &RunReport) {
    if output.is_json() {
        output.data(report);
        return;
    }

    for file in &report.files {
        if let Some(line) = file_line(file) {
            output.line(&line);
        }
        if let Some(line) = detail_line(file) {
            output.line(&line);
        }
    }

    output.blank();
    for line in summary_lines(report) {
        output.line(&line);
    }
}

fn percent(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

fn reason_label(reason: &DeleteReason) -> String {
    match reason {
        DeleteReason::Duplicate {
            similarity,
            threshold,
            ..
        } => format!("SIM {} >= {}", percent(*similarity), percent(*threshold)),
        DeleteReason::OnlyBasicLands { .. } => "ONLY BASIC LANDS".to_string(),
        DeleteReason::Undersized { minimum, .. } => format!("BELOW {}", minimum),
    }
}

fn reason_suffix(reason: &DeleteReason) -> String {
    match reason {
        DeleteReason::Duplicate { .. } => String::new(),
        DeleteReason::OnlyBasicLands { cards } => {
            let names: Vec<&str> = cards.iter().map(|c| c.as_str()).collect();
            format!("  (cards: {})", names.join(", "))
        }
        DeleteReason::Undersized { total, .. } => format!("  (Main = {})", total),
    }
}

/// One line per removed deck, plus kept decks that carry a total
fn file_line(file: &FileReport) -> Option<String> {
    let path = file.path.display();
    match &file.action {
        Action::Deleted { reason } => Some(format!(
            "DELETED ({}): {}{}",
            reason_label(reason),
            path,
            reason_suffix(reason)
        )),
        Action::WouldDelete { reason } => Some(format!(
            "WOULD DELETE ({}): {}{}",
            reason_label(reason),
            path,
            reason_suffix(reason)
        )),
        Action::Kept {
            main_total: Some(total),
        } => Some(format!("OK: {}  (Main = {})", path, total)),
        Action::Kept { main_total: None } | Action::Skipped | Action::Failed { .. } => None,
    }
}

fn detail_line(file: &FileReport) -> Option<String> {
    match &file.action {
        Action::Deleted {
            reason: DeleteReason::Duplicate { matched, .. },
        }
        | Action::WouldDelete {
            reason: DeleteReason::Duplicate { matched, .. },
        } => Some(format!("  ↳ too similar to: {}", matched.display())),
        _ => None,
    }
}

fn summary_lines(report: &RunReport) -> Vec<String> {
    let summary = &report.summary;
    let checked_label = match report.policy {
        Policy::Duplicates => "Parsed decks (had [Main])",
        Policy::LandsOnly | Policy::Undersized => "Checked deck files",
    };
    let deleted_label = match (report.policy, report.applied) {
        (Policy::Duplicates, true) => "Deleted (duplicates)",
        (Policy::Duplicates, false) => "Would delete (duplicates)",
        (_, true) => "Deleted",
        (_, false) => "Would delete",
    };

    let mut lines = vec![
        "--- SUMMARY ---".to_string(),
        format!("Root: {}", report.root.display()),
        format!("Deck files scanned: {}", summary.scanned),
        format!("{}: {}", checked_label, summary.checked),
        format!("Kept: {}", summary.kept),
        format!("{}: {}", deleted_label, summary.deleted),
    ];

    if summary.failed > 0 {
        lines.push(format!("Failed: {}", summary.failed));
    }

    if let Some(threshold) = report.threshold {
        lines.push(format!("Threshold: {:.2}% (lands ignored)", threshold * 100.0));
    }

    if !report.applied {
        lines.push("Dry run: nothing was deleted. Re-run with --apply to delete files.".to_string());
    }

    lines
}
