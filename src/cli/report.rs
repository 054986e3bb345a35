//! Report formatting and printing utilities.
//!
//! Issues are displayed cargo-style; command summaries follow them. Kept apart
//! from the engine so `ngmig::core` can be used as a library.

use std::io::{self, Write};

use colored::Colorize;

use super::commands::{CommandResult, CommandSummary, InitSummary, MigrateSummary, ScanSummary};
use crate::config::CONFIG_FILE_NAME;
use crate::issues::{Issue, Report, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print issues in cargo-style format to a custom writer.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let mut sorted = issues.to_vec();
    sorted.sort();

    for issue in &sorted {
        print_issue(issue, writer);
    }

    print_summary(&sorted, writer);
}

pub fn print(result: &CommandResult, verbose: bool) {
    let mut stdout = io::stdout().lock();
    print_to(result, verbose, &mut stdout);
}

/// Print a command result to a custom writer.
pub fn print_to<W: Write>(result: &CommandResult, verbose: bool, writer: &mut W) {
    report_to(&result.issues, writer);

    match &result.summary {
        CommandSummary::Migrate(summary) => print_migrate(summary, result, writer),
        CommandSummary::Scan(summary) => print_scan(summary, result, verbose, writer),
        CommandSummary::Init(summary) => print_init(summary, writer),
    }
}

// ============================================================
// Internal Functions
// ============================================================

fn print_issue<W: Write>(issue: &Issue, writer: &mut W) {
    let severity_str = match issue.report_severity() {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: \"{}\"  {}",
        severity_str,
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );
    let _ = writeln!(writer, "  {} {}", "-->".blue(), issue.file_path());

    if let Some(details) = issue.details() {
        let _ = writeln!(writer, "   {} {} {}", "=".blue(), "note:".bold(), details);
    }

    let _ = writeln!(writer);
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Error)
        .count();
    let total_warnings = issues.len() - total_errors;

    let _ = writeln!(
        writer,
        "{} {} problems ({} {}, {} {})\n",
        FAILURE_MARK.red(),
        issues.len(),
        total_errors,
        if total_errors == 1 { "error" } else { "errors" }.red(),
        total_warnings,
        if total_warnings == 1 {
            "warning"
        } else {
            "warnings"
        }
        .yellow()
    );
}

fn print_migrate<W: Write>(summary: &MigrateSummary, result: &CommandResult, writer: &mut W) {
    let mark = if result.error_count == 0 {
        SUCCESS_MARK.green()
    } else {
        FAILURE_MARK.red()
    };

    if summary.is_dry_run {
        let _ = writeln!(
            writer,
            "{} {} {} key(s) in {} module(s) from {} of {} template(s) (templates not modified)",
            mark,
            "Extracted".bold(),
            summary.key_count,
            summary.module_count,
            summary.files_with_text,
            result.files_checked
        );
    } else {
        let _ = writeln!(
            writer,
            "{} {} {} of {} template(s), {} key(s) in {} module(s)",
            mark,
            "Rewrote".bold(),
            summary.rewritten_count,
            result.files_checked,
            summary.key_count,
            summary.module_count
        );
    }

    if let Some(path) = &summary.manifest_path {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Wrote {}", path.display()).green()
        );
    }
}

fn print_scan<W: Write>(
    summary: &ScanSummary,
    result: &CommandResult,
    verbose: bool,
    writer: &mut W,
) {
    for outcome in &summary.outcomes {
        let module = if outcome.module.is_empty() {
            "(no module)".dimmed().to_string()
        } else {
            outcome.module.cyan().to_string()
        };
        let _ = writeln!(writer, "{} [{}]", outcome.display_path().bold(), module);
        for (key, text) in outcome.keys.iter() {
            let _ = writeln!(writer, "  {}  \"{}\"", key, text);
        }
        let _ = writeln!(writer);
    }

    if verbose {
        let _ = writeln!(
            writer,
            "{} template(s) without text",
            result.files_checked - summary.outcomes.len()
        );
    }

    if summary.outcomes.is_empty() {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Scanned {} template(s) - no translatable text found",
                result.files_checked
            )
            .green()
        );
    } else {
        let _ = writeln!(
            writer,
            "{} {} key(s) in {} module(s) from {} template(s)",
            "Would extract".yellow().bold(),
            summary.index.key_count(),
            summary.index.module_count(),
            summary.outcomes.len()
        );
        let _ = writeln!(writer, "Run {} to apply.", "ngmig migrate".cyan());
    }
}

fn print_init<W: Write>(summary: &InitSummary, writer: &mut W) {
    if summary.created {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    }
}

// ============================================================
// Tests
// ============================================================
