//! buildorder CLI - Build order for interdependent Maven repositories
//!
//! Entry point for the buildorder command-line application.

use anyhow::Result;
use clap::Parser;

use buildorder::cli::output::{display_error, init_tracing};
use buildorder::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    match cli.run().await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            display_error(&e);
            std::process::exit(1);
        }
    }
}
