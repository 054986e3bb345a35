use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Result, bail};
use rayon::prelude::*;

use crate::{
    cli::args::CommonArgs,
    config::{CONFIG_FILE_NAME, Config, load_config},
    core::{
        extract::extract_fragments,
        file_scanner::scan_templates,
        keys::{FileKeys, KeyOptions, file_id, key_prefix, module_id},
        parsers::html::Document,
        rewrite::{ReplacementError, rewrite_document},
        translations::TranslationIndex,
    },
    issues::{
        Issue, KeyOverwrittenIssue, ReadErrorIssue, ReplacementErrorIssue, UnreplacedTextIssue,
        WriteErrorIssue,
    },
};

/// Settings that apply to every file of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationOptions {
    /// Write the substituted markup back to each template.
    pub replace: bool,
    pub module_marker: String,
    pub keys: KeyOptions,
}

impl Default for MigrationOptions {
    fn default() -> Self {
        Self {
            replace: true,
            module_marker: "app".to_string(),
            keys: KeyOptions::default(),
        }
    }
}

/// What happened to a single template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    /// Texts were replaced and the file was written back. `unreplaced` holds
    /// the keys whose text is still in the template.
    Rewritten {
        replaced: usize,
        unreplaced: Vec<String>,
    },
    /// Texts were found but rewriting is disabled.
    Unchanged,
    /// Nothing translatable in the file.
    NoText,
    ReadFailed(String),
    WriteFailed(String),
    ReplacementFailed(ReplacementError),
}

/// Result of processing one template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub module: String,
    pub keys: FileKeys,
    pub status: FileStatus,
}

impl FileOutcome {
    pub fn display_path(&self) -> String {
        self.path.display().to_string()
    }

    /// Whether the file's keys belong in the manifest.
    pub fn contributes_keys(&self) -> bool {
        !matches!(self.status, FileStatus::ReadFailed(_))
    }

    /// Issue raised by this file's status, if any.
    pub fn issue(&self) -> Option<Issue> {
        let file_path = self.display_path();
        match &self.status {
            FileStatus::ReadFailed(error) => Some(Issue::ReadError(ReadErrorIssue {
                file_path,
                error: error.clone(),
            })),
            FileStatus::WriteFailed(error) => Some(Issue::WriteError(WriteErrorIssue {
                file_path,
                error: error.clone(),
            })),
            FileStatus::ReplacementFailed(error) => {
                Some(Issue::ReplacementError(ReplacementErrorIssue {
                    file_path,
                    error: error.clone(),
                    text_count: self.keys.len(),
                }))
            }
            FileStatus::Rewritten { unreplaced, .. } if !unreplaced.is_empty() => {
                let texts = unreplaced
                    .iter()
                    .map(|key| {
                        let text = self.keys.get(key).unwrap_or_default();
                        (key.clone(), text.to_string())
                    })
                    .collect();
                Some(Issue::UnreplacedText(UnreplacedTextIssue { file_path, texts }))
            }
            FileStatus::Rewritten { .. } | FileStatus::Unchanged | FileStatus::NoText => None,
        }
    }
}

/// Read, extract, key and (optionally) rewrite one template.
///
/// Failures are captured in the returned status; nothing is propagated.
pub fn process_file(path: &Path, options: &MigrationOptions) -> FileOutcome {
    let module = module_id(path, &options.module_marker);
    let outcome = |keys: FileKeys, status: FileStatus| FileOutcome {
        path: path.to_path_buf(),
        module: module.clone(),
        keys,
        status,
    };

    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => return outcome(FileKeys::default(), FileStatus::ReadFailed(e.to_string())),
    };

    let doc = Document::parse(source);
    let fragments = extract_fragments(&doc);
    if fragments.is_empty() {
        return outcome(FileKeys::default(), FileStatus::NoText);
    }

    let prefix = key_prefix(&file_id(path), &module, &options.keys);
    let keys = FileKeys::generate(&fragments, &prefix, options.keys.padding);

    if !options.replace {
        return outcome(keys, FileStatus::Unchanged);
    }

    let status = match rewrite_document(&doc, &keys, &module) {
        Ok(rewrite) => match fs::write(path, &rewrite.content) {
            Ok(()) => FileStatus::Rewritten {
                replaced: rewrite.replaced,
                unreplaced: rewrite.unreplaced,
            },
            Err(e) => FileStatus::WriteFailed(e.to_string()),
        },
        Err(e) => FileStatus::ReplacementFailed(e),
    };
    outcome(keys, status)
}

/// Everything a finished run produced.
#[derive(Debug, Default)]
pub struct MigrationReport {
    pub index: TranslationIndex,
    /// One entry per scanned template, in path order.
    pub outcomes: Vec<FileOutcome>,
    pub issues: Vec<Issue>,
}

impl MigrationReport {
    /// Merge per-file outcomes into a fresh index, in the order given.
    pub fn from_outcomes(outcomes: Vec<FileOutcome>) -> Self {
        let mut index = TranslationIndex::new();
        let mut issues = Vec::new();

        for outcome in &outcomes {
            if outcome.contributes_keys() {
                let collisions = index.merge(&outcome.module, &outcome.keys);
                issues.extend(collisions.into_iter().map(|collision| {
                    Issue::KeyOverwritten(KeyOverwrittenIssue {
                        file_path: outcome.display_path(),
                        collision,
                    })
                }));
            }
            issues.extend(outcome.issue());
        }

        Self {
            index,
            outcomes,
            issues,
        }
    }

    pub fn rewritten_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, FileStatus::Rewritten { .. }))
            .count()
    }

    /// Files that yielded at least one text.
    pub fn files_with_text(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.keys.is_empty()).count()
    }
}

/// A configured migration over one source root.
///
/// Configuration priority (highest to lowest):
/// 1. CLI arguments (`--source-root`, `--output`, `--dry-run`)
/// 2. `.ngmigrc.json`
/// 3. Built-in defaults
pub struct MigrationContext {
    /// Merged configuration (CLI args > config file > defaults).
    pub config: Config,

    /// Directory that is scanned for templates.
    pub root_dir: PathBuf,

    /// Templates to process, sorted.
    pub files: Vec<PathBuf>,

    pub verbose: bool,
}

impl MigrationContext {
    /// Load configuration, resolve the source root and scan it for templates.
    ///
    /// # Errors
    ///
    /// Returns error if the config file is invalid or the source root is not
    /// an existing directory.
    pub fn new(common_args: &CommonArgs) -> Result<Self> {
        let verbose = common_args.verbose;

        // Config is searched from --source-root when given, else the working dir.
        let search_dir = common_args
            .source_root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));

        let config_result = load_config(&search_dir)?;
        if verbose && !config_result.from_file {
            eprintln!(
                "Note: No {} found, using default configuration",
                CONFIG_FILE_NAME
            );
        }
        let mut config = config_result.config;

        if let Some(ref source_root) = common_args.source_root {
            config.source_root = source_root.to_string_lossy().to_string();
        }

        let root_dir = PathBuf::from(&config.source_root);
        if !root_dir.is_dir() {
            bail!("Source root '{}' is not a directory", root_dir.display());
        }

        let scan_result = scan_templates(&root_dir, &config.ignores, verbose);
        if scan_result.skipped_count > 0 {
            eprintln!(
                "Warning: {} path(s) skipped due to access errors{}",
                scan_result.skipped_count,
                if verbose { "" } else { " (use -v for details)" }
            );
        }

        Ok(Self {
            config,
            root_dir,
            files: scan_result.files,
            verbose,
        })
    }

    /// Extract only; templates are left untouched.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        if dry_run {
            self.config.replace_html_texts = false;
        }
        self
    }

    pub fn with_output(mut self, output: Option<&Path>) -> Self {
        if let Some(output) = output {
            self.config.output_file = output.to_string_lossy().to_string();
        }
        self
    }

    pub fn options(&self) -> MigrationOptions {
        MigrationOptions {
            replace: self.config.replace_html_texts,
            module_marker: self.config.module_marker.clone(),
            keys: self.config.key_options(),
        }
    }

    /// Manifest location: `outputFile` joined onto the source root unless absolute.
    pub fn output_path(&self) -> PathBuf {
        let output = Path::new(&self.config.output_file);
        if output.is_absolute() {
            output.to_path_buf()
        } else {
            self.root_dir.join(output)
        }
    }

    /// Process every template in parallel, then merge the results in path order.
    pub fn run(&self) -> MigrationReport {
        let options = self.options();

        let outcomes: Vec<FileOutcome> = self
            .files
            .par_iter()
            .map(|path| process_file(path, &options))
            .collect();

        if self.verbose {
            for outcome in &outcomes {
                eprintln!("{}", describe_outcome(outcome));
            }
        }

        MigrationReport::from_outcomes(outcomes)
    }
}

fn describe_outcome(outcome: &FileOutcome) -> String {
    let status = match &outcome.status {
        FileStatus::Rewritten { replaced, .. } => {
            format!("rewritten ({} replacement(s))", replaced)
        }
        FileStatus::Unchanged => format!("{} text(s), not rewritten", outcome.keys.len()),
        FileStatus::NoText => "no text".to_string(),
        FileStatus::ReadFailed(_) => "read failed".to_string(),
        FileStatus::WriteFailed(_) => "write failed".to_string(),
        FileStatus::ReplacementFailed(_) => "replacement failed".to_string(),
    };
    format!("  {}: {}", outcome.display_path(), status)
}
