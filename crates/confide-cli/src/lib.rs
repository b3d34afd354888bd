//! confide-cli library
//!
//! Command parsing, the command runner and logger setup behind the `confide`
//! binary.

pub mod app;
pub mod cli;
pub mod commands;
pub mod diary_commands;
pub mod error;
pub mod logger;
pub mod output;

#[cfg(test)]
mod tests;

pub use app::{App, Report};
pub use cli::Cli;
pub use commands::Commands;
pub use diary_commands::DiaryCommands;
pub use error::{CliError, Result as CliResult};
