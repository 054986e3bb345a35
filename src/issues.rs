//! Issue types for migration results.
//!
//! A migration run never aborts because a single file failed. Every per-file
//! failure is recorded as an issue and printed once the run has finished.

use enum_dispatch::enum_dispatch;

use crate::core::rewrite::ReplacementError;
use crate::core::translations::KeyCollision;

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    ReadError,
    WriteError,
    ReplacementError,
    UnreplacedText,
    KeyOverwritten,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::ReadError => write!(f, "read-error"),
            Rule::WriteError => write!(f, "write-error"),
            Rule::ReplacementError => write!(f, "replacement-error"),
            Rule::UnreplacedText => write!(f, "unreplaced-text"),
            Rule::KeyOverwritten => write!(f, "key-overwritten"),
        }
    }
}

// ============================================================
// Issue Types
// ============================================================

/// Template could not be read; it contributes no keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadErrorIssue {
    pub file_path: String,
    pub error: String,
}

impl ReadErrorIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::ReadError
    }
}

/// A rewritten template or the manifest could not be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteErrorIssue {
    pub file_path: String,
    pub error: String,
}

impl WriteErrorIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::WriteError
    }
}

/// Texts were found but could not be substituted; the file is left as is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplacementErrorIssue {
    pub file_path: String,
    pub error: ReplacementError,
    /// Number of texts that were extracted from the file.
    pub text_count: usize,
}

impl ReplacementErrorIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::ReplacementError
    }
}

/// Texts that got a key but are split over several text nodes, so the
/// template still contains them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnreplacedTextIssue {
    pub file_path: String,
    /// `(key, text)` pairs, in key order.
    pub texts: Vec<(String, String)>,
}

impl UnreplacedTextIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::UnreplacedText
    }
}

/// A key from this file replaced a different text already in the module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyOverwrittenIssue {
    pub file_path: String,
    pub collision: KeyCollision,
}

impl KeyOverwrittenIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::KeyOverwritten
    }
}

// ============================================================
// Issue Enum
// ============================================================

/// A problem found during a migration run.
#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    ReadError(ReadErrorIssue),
    WriteError(WriteErrorIssue),
    ReplacementError(ReplacementErrorIssue),
    UnreplacedText(UnreplacedTextIssue),
    KeyOverwritten(KeyOverwrittenIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        match self {
            Issue::ReadError(_) => ReadErrorIssue::severity(),
            Issue::WriteError(_) => WriteErrorIssue::severity(),
            Issue::ReplacementError(_) => ReplacementErrorIssue::severity(),
            Issue::UnreplacedText(_) => UnreplacedTextIssue::severity(),
            Issue::KeyOverwritten(_) => KeyOverwrittenIssue::severity(),
        }
    }

    pub fn rule(&self) -> Rule {
        match self {
            Issue::ReadError(_) => ReadErrorIssue::rule(),
            Issue::WriteError(_) => WriteErrorIssue::rule(),
            Issue::ReplacementError(_) => ReplacementErrorIssue::rule(),
            Issue::UnreplacedText(_) => UnreplacedTextIssue::rule(),
            Issue::KeyOverwritten(_) => KeyOverwrittenIssue::rule(),
        }
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Trait for types that can be reported to CLI.
///
/// Uses `enum_dispatch` for zero-cost dispatch on the `Issue` enum.
#[enum_dispatch]
pub trait Report {
    /// File the issue belongs to.
    fn file_path(&self) -> &str;

    /// Primary message to display.
    fn message(&self) -> String;

    /// Severity level.
    fn report_severity(&self) -> Severity;

    /// Rule identifier.
    fn report_rule(&self) -> Rule;

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }
}

// ============================================================
// Report Implementations
// ============================================================

impl Report for ReadErrorIssue {
    fn file_path(&self) -> &str {
        &self.file_path
    }

    fn message(&self) -> String {
        format!("could not read template: {}", self.error)
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

impl Report for WriteErrorIssue {
    fn file_path(&self) -> &str {
        &self.file_path
    }

    fn message(&self) -> String {
        format!("could not write file: {}", self.error)
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

impl Report for ReplacementErrorIssue {
    fn file_path(&self) -> &str {
        &self.file_path
    }

    fn message(&self) -> String {
        self.error.to_string()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!(
            "{} text(s) extracted, file left unchanged",
            self.text_count
        ))
    }
}

impl Report for UnreplacedTextIssue {
    fn file_path(&self) -> &str {
        &self.file_path
    }

    fn message(&self) -> String {
        format!(
            "{} text(s) span several nodes and were left in the template",
            self.texts.len()
        )
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        let listed: Vec<String> = self
            .texts
            .iter()
            .map(|(key, text)| format!("{} (\"{}\")", key, text))
            .collect();
        Some(listed.join(", "))
    }
}

impl Report for KeyOverwrittenIssue {
    fn file_path(&self) -> &str {
        &self.file_path
    }

    fn message(&self) -> String {
        if self.collision.module.is_empty() {
            self.collision.key.clone()
        } else {
            format!("{}.{}", self.collision.module, self.collision.key)
        }
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!(
            "(\"{}\") replaced (\"{}\")",
            self.collision.current, self.collision.previous
        ))
    }
}

// ============================================================
// Ordering for Issue (for sorting in reports)
// ============================================================

impl Ord for Issue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.file_path()
            .cmp(other.file_path())
            .then_with(|| self.rule().cmp(&other.rule()))
            .then_with(|| self.message().cmp(&other.message()))
    }
}

impl PartialOrd for Issue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ============================================================
// Tests
// ============================================================
