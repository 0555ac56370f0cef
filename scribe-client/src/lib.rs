//! Scribe HTTP Client
//!
//! A small, type-safe HTTP client for the documentation backend.
//!
//! The backend exposes two endpoints: `POST /jobs` to create a documentation
//! job and `GET /jobs/{id}` to read its current state. The [`JobApi`] trait
//! abstracts both so the tracker can be driven by an in-memory fake in tests.
//!
//! # Example
//!
//! ```no_run
//! use scribe_client::ScribeClient;
//! use scribe_core::dto::job::JobRequest;
//!
//! #[tokio::main]
//! async fn main() -> scribe_client::Result<()> {
//!     let client = ScribeClient::new("http://localhost:8000");
//!
//!     let job = client
//!         .create_job(&JobRequest::new("https://github.com/octocat/Hello-World"))
//!         .await?;
//!
//!     println!("Created job: {} ({})", job.id, job.status);
//!     Ok(())
//! }
//! ```

mod api;
pub mod error;
mod jobs;

pub use api::JobApi;
pub use error::{ClientError, Result};

use reqwest::{Client, Url};
use scribe_core::domain::job::Job;
use scribe_core::dto::job::ErrorBody;
use std::time::Duration;

/// HTTP client for the Scribe documentation backend
#[derive(Debug, Clone)]
pub struct ScribeClient {
    /// Base URL of the backend (e.g., "http://localhost:8000")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl ScribeClient {
    /// Create a new backend client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the backend API (e.g., "http://localhost:8000")
    ///
    /// # Example
    /// ```
    /// use scribe_client::ScribeClient;
    ///
    /// let client = ScribeClient::new("http://localhost:8000");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new backend client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Create a client whose requests give up after `timeout`
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(base_url, client))
    }

    /// Get the base URL of the backend
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds `{base_url}/{segments...}`, percent-encoding each segment
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ClientError::InvalidRequest(format!("bad base URL '{}': {}", self.base_url, e)))?;

        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidRequest(format!("base URL '{}' cannot have a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle a job response: check the status, decode, then check invariants
    async fn handle_job_response(&self, response: reqwest::Response) -> Result<Job> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            let detail = serde_json::from_str::<ErrorBody>(&error_text)
                .ok()
                .and_then(|body| body.message());
            return Err(ClientError::api_error(status.as_u16(), error_text, detail));
        }

        let job: Job = response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))?;

        job.check_consistency().map_err(ClientError::InvalidResponse)?;

        Ok(job)
    }
}
