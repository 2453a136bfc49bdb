/// Dispatch a parsed command line to its handler.
///
/// # Returns
/// - `Ok(ExitStatus)`: `Failure` if any file failed during extraction
/// - `Err` if the command could not start (missing input, bad pattern)
use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{extract::extract, init::init},
    exit_status::ExitStatus,
};

pub fn run(Arguments { command }: Arguments) -> Result<ExitStatus> {
    match command {
        Some(Command::Extract(cmd)) => extract(cmd),
        Some(Command::Init) => init(),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
