//! Run summary printing.
//!
//! Kept apart from the engine so uigraph can be used as a library.

use std::io::{self, Write};

use colored::Colorize;

use super::commands::{AnalyzeSummary, CommandResult, CommandSummary, InitSummary};
use crate::config::CONFIG_FILE_NAME;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

pub fn print(result: &CommandResult) {
    let mut stdout = io::stdout().lock();
    match &result.summary {
        CommandSummary::Analyze(summary) => print_analyze_to(summary, &mut stdout),
        CommandSummary::Init(summary) => print_init_to(summary, &mut stdout),
    }
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{} {}", count, word)
    } else {
        format!("{} {}s", count, word)
    }
}

pub fn print_analyze_to<W: Write>(summary: &AnalyzeSummary, writer: &mut W) {
    let headline = format!(
        "Analyzed {} - {}, {}, {}",
        plural(summary.analyzed, "file"),
        plural(summary.components, "component"),
        plural(summary.hooks, "hook"),
        plural(summary.edges, "edge"),
    );
    let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), headline.green());

    if summary.unresolved > 0 {
        let _ = writeln!(
            writer,
            "  {} {} left unresolved",
            "note:".bold().cyan(),
            plural(summary.unresolved, "reference"),
        );
    }

    let skipped = summary.parse_failures.len() + summary.inaccessible;
    if skipped > 0 {
        let _ = writeln!(
            writer,
            "{} {} skipped",
            FAILURE_MARK.red(),
            plural(skipped, "file"),
        );
        for failure in &summary.parse_failures {
            let _ = writeln!(writer, "  {} {}", "-->".blue(), failure.file);
        }
    }

    for output in &summary.outputs {
        let _ = writeln!(writer, "  {} {}", "wrote".dimmed(), output.display());
    }
}

fn print_init_to<W: Write>(summary: &InitSummary, writer: &mut W) {
    if summary.created {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    }
}
