//! confide - private diary CLI
//!
//! # Examples
//!
//! ```bash
//! # Sign in and list your entries
//! confide login --email me@example.com --password secret
//! confide diary list
//!
//! # Write an entry with a mood
//! confide diary new --title "Today" --content "..." --mood calm
//! ```

use confide_cli::{App, Cli, logger};
use confide_config::Config;

use std::error::Error;
use std::process::ExitCode;

use clap::Parser;
use log::info;

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn Error>> {
    let cli = Cli::parse();

    // Load and validate configuration
    let config = Config::load()?;
    config.validate()?;

    // Initialize logger (before any other logging)
    let level = cli.log_level.unwrap_or(config.logging.level);
    logger::initialize(level, config.log_file_path()?, config.logging.colored)?;

    info!("Starting confide v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let mut app = App::from_config(&config)?.with_listener();
    let report = app.run(cli.command).await;

    for line in &report.lines {
        println!("{line}");
    }
    for notification in &report.notifications {
        if notification.is_destructive() {
            eprintln!("{notification}");
        } else {
            println!("{notification}");
        }
    }

    Ok(if report.is_failure() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
