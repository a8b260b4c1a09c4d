//! Command handlers for the `cepre` CLI.

pub mod ficha;
pub mod stats;
pub mod status;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a parsed command to its handler.
pub async fn dispatch(command: Command, global: &GlobalOpts) -> Result<(), CliError> {
    match command {
        Command::Stats(args) => stats::handle(args, global).await,
        Command::Ficha(args) => ficha::handle(args, global).await,
        Command::Status => status::handle(global).await,
        // Completions are handled in main before dispatch
        Command::Completions(_) => Ok(()),
    }
}
