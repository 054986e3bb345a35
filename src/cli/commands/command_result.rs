use std::path::PathBuf;

use crate::core::{FileOutcome, translations::TranslationIndex};
use crate::issues::Issue;

#[derive(Debug)]
pub enum CommandSummary {
    Migrate(MigrateSummary),
    Scan(ScanSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct MigrateSummary {
    pub rewritten_count: usize,
    pub files_with_text: usize,
    pub key_count: usize,
    pub module_count: usize,
    /// `None` when the manifest could not be written.
    pub manifest_path: Option<PathBuf>,
    pub is_dry_run: bool,
}

#[derive(Debug)]
pub struct ScanSummary {
    /// Files that yielded at least one text, in path order.
    pub outcomes: Vec<FileOutcome>,
    pub index: TranslationIndex,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}

/// Result of running ngmig commands
pub struct CommandResult {
    pub summary: CommandSummary,
    pub error_count: usize,
    pub warning_count: usize,
    /// All issues raised while processing templates, sorted.
    pub issues: Vec<Issue>,
    /// Number of templates that were scanned.
    pub files_checked: usize,
}
