//! grab CLI entry point
//!
//! Parses arguments, runs the command and turns any error into a coloured
//! message with a suggestion and exit code 1.

use anyhow::Result;
use clap::Parser;
use grab_cli::cli;
use grab_cli::core::user_friendly_error;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            user_friendly_error(e).display();
            std::process::exit(1);
        }
    }
}
