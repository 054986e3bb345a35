use anyhow::Result;

use super::super::args::ScanCommand;
use super::{CommandResult, CommandSummary, ScanSummary, helper::finish};
use crate::core::MigrationContext;

/// Run the extraction without touching any file.
pub fn scan(cmd: ScanCommand) -> Result<CommandResult> {
    let ctx = MigrationContext::new(&cmd.common)?.with_dry_run(true);
    let report = ctx.run();

    let outcomes = report
        .outcomes
        .into_iter()
        .filter(|o| !o.keys.is_empty())
        .collect();

    let summary = ScanSummary {
        outcomes,
        index: report.index,
    };

    Ok(finish(
        CommandSummary::Scan(summary),
        report.issues,
        ctx.files.len(),
    ))
}
