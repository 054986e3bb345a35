//! Dispatches to the appropriate command handler based on the parsed arguments.
//!
//! Returns `Err` only for fatal failures (invalid config, missing source root,
//! existing config on `init`); per-file problems are carried as issues.

use anyhow::{Result, bail};

use super::{
    args::{Arguments, Command},
    commands::{CommandResult, init::init, migrate::migrate, scan::scan},
};

pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Migrate(cmd)) => migrate(cmd),
        Some(Command::Scan(cmd)) => scan(cmd),
        Some(Command::Init) => init(),
        None => bail!("No command provided. Use --help to see available commands."),
    }
}
