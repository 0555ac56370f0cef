//! Controller error types

use scribe_client::ClientError;
use scribe_core::validation::ValidationError;
use thiserror::Error;

/// Outcome of a submission that did not produce a tracked job
#[derive(Debug, Error)]
pub enum ControllerError {
    /// The URL was rejected locally; no request was made
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The creation request failed
    #[error("Submission failed: {0}")]
    Submission(#[from] ClientError),

    /// A newer submission or an explicit cancel superseded this one
    #[error("Submission was cancelled")]
    Cancelled,
}

impl ControllerError {
    /// Cancellations are not failures and are never shown as errors
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ControllerError::Cancelled)
    }
}
