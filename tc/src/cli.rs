//! CLI argument parsing for taskcheck

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tc")]
#[command(author, version, about = "Check that every task in a pull request body is done", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(short = 'l', long = "log-level", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check the pull request in the Actions event and create a check run
    Run {
        /// GitHub token (falls back to GITHUB_TOKEN)
        #[arg(long, env = "INPUT_REPO-TOKEN", hide_env_values = true)]
        token: Option<String>,

        /// Path to the webhook event payload
        #[arg(long, env = "GITHUB_EVENT_PATH")]
        event_path: PathBuf,

        /// Repository as OWNER/REPO (defaults to the payload's repository)
        #[arg(long, env = "GITHUB_REPOSITORY")]
        repository: Option<String>,

        /// REST API base URL
        #[arg(long, env = "GITHUB_API_URL")]
        api_url: Option<String>,

        /// Print the check run instead of creating it
        #[arg(long)]
        dry_run: bool,
    },

    /// Analyze a file (or stdin) and print the task report
    Check {
        /// File to read; stdin when omitted or '-'
        file: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Print a file (or stdin) with ignore regions removed
    Strip {
        /// File to read; stdin when omitted or '-'
        file: Option<PathBuf>,
    },
}

/// Output format for the check command
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
