use std::process::ExitCode;

use super::commands::CommandResult;

/// Process exit status of a run.
///
/// - `Success` (0): the run finished with warnings at most
/// - `Failure` (1): the run finished, but some files or the manifest failed
/// - `Error` (2): the run could not start (invalid config, missing source root)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl From<&CommandResult> for ExitStatus {
    /// Warnings never fail a run; any error-level issue does.
    fn from(result: &CommandResult) -> Self {
        if result.error_count > 0 {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
