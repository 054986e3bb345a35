use anyhow::Result;

use super::super::args::MigrateCommand;
use super::{CommandResult, CommandSummary, MigrateSummary, helper::finish};
use crate::{
    core::{MigrationContext, manifest::write_manifest},
    issues::{Issue, WriteErrorIssue},
};

pub fn migrate(cmd: MigrateCommand) -> Result<CommandResult> {
    let args = &cmd.args;
    let ctx = MigrationContext::new(&args.common)?
        .with_dry_run(args.dry_run)
        .with_output(args.output.as_deref());

    // Every file unit has completed once `run` returns.
    let report = ctx.run();

    let output_path = ctx.output_path();
    let mut issues = report.issues.clone();
    let manifest_path = match write_manifest(&output_path, &report.index) {
        Ok(()) => Some(output_path),
        Err(e) => {
            issues.push(Issue::WriteError(WriteErrorIssue {
                file_path: output_path.display().to_string(),
                error: format!("{:#}", e),
            }));
            None
        }
    };

    let summary = MigrateSummary {
        rewritten_count: report.rewritten_count(),
        files_with_text: report.files_with_text(),
        key_count: report.index.key_count(),
        module_count: report.index.module_count(),
        manifest_path,
        is_dry_run: !ctx.config.replace_html_texts,
    };

    Ok(finish(CommandSummary::Migrate(summary), issues, ctx.files.len()))
}
