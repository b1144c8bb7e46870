//! Command-line interface module
//!
//! This module handles argument parsing and output formatting.
//! It contains no business logic - that belongs in the [`crate::core`] module.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use commands::Commands;
use output::OutputConfig;

/// buildorder - Build order for interdependent Maven repositories
///
/// Reads the dependency tree of every repository under a root directory and
/// groups the repositories into levels that can be built one after another.
#[derive(Parser, Debug)]
#[command(name = "buildorder")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors and the result
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output in JSON format for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Directory containing the checked-out repositories
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Settings file (defaults to <root>/buildorder.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Options shared by every command
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Root directory holding the repositories
    pub root: PathBuf,
    /// Explicit settings file
    pub config: Option<PathBuf>,
    /// Output preferences
    pub output: OutputConfig,
}

impl Cli {
    /// Execute the CLI command, returning the process exit code
    pub async fn run(self) -> Result<i32> {
        let context = RunContext {
            root: self.root,
            config: self.config,
            output: OutputConfig::new(self.quiet, self.json),
        };

        if let Some(cmd) = self.command {
            cmd.run(&context).await
        } else {
            // No subcommand provided, show help
            use clap::CommandFactory;
            let mut cmd = Self::command();
            cmd.print_help()?;
            Ok(0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_order_with_overrides() {
        let cli = Cli::try_parse_from([
            "buildorder",
            "-vv",
            "--root",
            "/work",
            "order",
            "--group-id",
            "org.example",
            "--strict",
            "--offline",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.root, PathBuf::from("/work"));
        match cli.command {
            Some(Commands::Order {
                settings, offline, ..
            }) => {
                assert!(offline);
                assert!(settings.strict);
                assert_eq!(settings.group_id.as_deref(), Some("org.example"));
            }
            other => panic!("Expected order command, got: {other:?}"),
        }
    }

    #[test]
    fn test_parse_deps_requires_repository() {
        assert!(Cli::try_parse_from(["buildorder", "deps"]).is_err());
        assert!(Cli::try_parse_from(["buildorder", "deps", "svc"]).is_ok());
    }
}
