//! Tracker configuration
//!
//! Defines the backend address, polling cadence and the policy applied when
//! a status fetch fails.

use std::time::Duration;

/// What the polling loop does when a status fetch fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollErrorPolicy {
    /// End tracking on the first failed fetch
    StopOnError,

    /// Keep polling through transient failures (transport errors, timeouts,
    /// 5xx, 429). Tracking ends on a non-transient failure or once
    /// `max_consecutive_failures` fetches in a row have failed.
    Tolerate { max_consecutive_failures: u32 },
}

impl PollErrorPolicy {
    /// Maps a failure budget to a policy; `0` means stop on first error
    pub fn from_max_failures(max: u32) -> Self {
        if max == 0 {
            PollErrorPolicy::StopOnError
        } else {
            PollErrorPolicy::Tolerate {
                max_consecutive_failures: max,
            }
        }
    }
}

impl Default for PollErrorPolicy {
    fn default() -> Self {
        PollErrorPolicy::Tolerate {
            max_consecutive_failures: 5,
        }
    }
}

/// Tracker configuration
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Backend base URL (e.g., "http://localhost:8000")
    pub api_url: String,

    /// Delay between two status fetches of the tracked job
    pub poll_interval: Duration,

    /// Per-request HTTP timeout
    pub request_timeout: Duration,

    /// Behaviour when a status fetch fails
    pub poll_error_policy: PollErrorPolicy,
}

impl TrackerConfig {
    /// Creates a new configuration with defaults
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            poll_interval: Duration::from_millis(2000),
            request_timeout: Duration::from_secs(30),
            poll_error_policy: PollErrorPolicy::default(),
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - SCRIBE_API_URL (optional, default: http://localhost:8000)
    /// - SCRIBE_POLL_INTERVAL_MS (optional, default: 2000)
    /// - SCRIBE_REQUEST_TIMEOUT_SECS (optional, default: 30)
    /// - SCRIBE_MAX_POLL_FAILURES (optional, default: 5, 0 stops on first error)
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("SCRIBE_API_URL") {
            config.api_url = url;
        }

        if let Some(ms) = parse_var::<u64>("SCRIBE_POLL_INTERVAL_MS")? {
            config.poll_interval = Duration::from_millis(ms);
        }

        if let Some(secs) = parse_var::<u64>("SCRIBE_REQUEST_TIMEOUT_SECS")? {
            config.request_timeout = Duration::from_secs(secs);
        }

        if let Some(max) = parse_var::<u32>("SCRIBE_MAX_POLL_FAILURES")? {
            config.poll_error_policy = PollErrorPolicy::from_max_failures(max);
        }

        Ok(config)
    }

    /// Overrides the poll interval
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Overrides the polling error policy
    pub fn with_poll_error_policy(mut self, policy: PollErrorPolicy) -> Self {
        self.poll_error_policy = policy;
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_url.is_empty() {
            anyhow::bail!("api_url cannot be empty");
        }

        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            anyhow::bail!("api_url must start with http:// or https://");
        }

        if self.poll_interval.is_zero() {
            anyhow::bail!("poll_interval must be greater than 0");
        }

        if self.request_timeout.is_zero() {
            anyhow::bail!("request_timeout must be greater than 0");
        }

        Ok(())
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self::new("http://localhost:8000")
    }
}

/// Reads and parses an optional environment variable
fn parse_var<T>(name: &str) -> anyhow::Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| anyhow::anyhow!("{} has an invalid value '{}': {}", name, raw, e)),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TrackerConfig::default();
        assert_eq!(config.api_url, "http://localhost:8000");
        assert_eq!(config.poll_interval, Duration::from_secs(2));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(
            config.poll_error_policy,
            PollErrorPolicy::Tolerate {
                max_consecutive_failures: 5
            }
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = TrackerConfig::default();

        config.api_url = String::new();
        assert!(config.validate().is_err());

        config.api_url = "localhost:8000".to_string();
        assert!(config.validate().is_err());

        config.api_url = "https://docs.example".to_string();
        assert!(config.validate().is_ok());

        config.poll_interval = Duration::ZERO;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_policy_from_max_failures() {
        assert_eq!(
            PollErrorPolicy::from_max_failures(0),
            PollErrorPolicy::StopOnError
        );
        assert_eq!(
            PollErrorPolicy::from_max_failures(3),
            PollErrorPolicy::Tolerate {
                max_consecutive_failures: 3
            }
        );
    }

    #[test]
    fn test_builders() {
        let config = TrackerConfig::new("http://backend")
            .with_poll_interval(Duration::from_millis(250))
            .with_poll_error_policy(PollErrorPolicy::StopOnError);

        assert_eq!(config.poll_interval, Duration::from_millis(250));
        assert_eq!(config.poll_error_policy, PollErrorPolicy::StopOnError);
    }
}
