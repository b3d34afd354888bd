use crate::commands::Commands;

use confide_config::LogLevel;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "confide")]
#[command(about = "Private diary with registered and anonymous sessions")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Overrides the configured log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<LogLevel>,
}
