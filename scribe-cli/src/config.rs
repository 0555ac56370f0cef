//! Configuration module
//!
//! Merges command-line flags over the tracker's environment configuration.

use anyhow::Result;
use clap::Args;
use scribe_tracker::{PollErrorPolicy, TrackerConfig};
use std::time::Duration;
use tracing::debug;

/// Flags shared by every command
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Documentation backend URL
    #[arg(long, global = true, env = "SCRIBE_API_URL")]
    pub api_url: Option<String>,

    /// Delay between status polls, in milliseconds
    #[arg(long, global = true)]
    pub interval_ms: Option<u64>,

    /// Consecutive failed polls tolerated before giving up (0 = stop on first)
    #[arg(long, global = true)]
    pub max_poll_failures: Option<u32>,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,
}

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub tracker: TrackerConfig,
    pub json: bool,
}

impl GlobalArgs {
    /// Builds the configuration: environment first, then flags on top
    pub fn into_config(self) -> Result<Config> {
        let mut tracker = TrackerConfig::from_env()?;

        if let Some(url) = self.api_url {
            tracker.api_url = url;
        }
        if let Some(ms) = self.interval_ms {
            tracker.poll_interval = Duration::from_millis(ms);
        }
        if let Some(max) = self.max_poll_failures {
            tracker.poll_error_policy = PollErrorPolicy::from_max_failures(max);
        }

        tracker.validate()?;
        debug!(
            "Using backend {} (poll every {:?}, {:?})",
            tracker.api_url, tracker.poll_interval, tracker.poll_error_policy
        );

        Ok(Config {
            tracker,
            json: self.json,
        })
    }
}
