//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod job;
mod validate;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Check whether a repository URL would be accepted
    Validate {
        /// Repository URL (e.g. https://github.com/octocat/Hello-World)
        url: String,
    },
    /// Submit a repository and follow the job until it finishes
    Submit {
        /// Repository URL (e.g. https://github.com/octocat/Hello-World)
        url: String,

        /// Return right after the job is created
        #[arg(long)]
        no_follow: bool,
    },
    /// Show the current state of a job
    Status {
        /// Job ID returned at submission
        id: String,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Validate { url } => validate::handle_validate(&url, config),
        Commands::Submit { url, no_follow } => job::submit(&url, !no_follow, config).await,
        Commands::Status { id } => job::status(&id, config).await,
    }
}
