//! Scribe Tracker
//!
//! Client-side lifecycle controller for documentation jobs.
//!
//! Architecture:
//! - Configuration: backend address, poll interval and error policy
//! - Controller: validation, submission, polling and cancellation
//! - State: the observable snapshot consumers subscribe to
//!
//! A [`JobController`] tracks at most one job. Submitting again supersedes
//! the previous session: its in-flight requests are dropped and any late
//! response is discarded.

pub mod config;
pub mod controller;
pub mod error;
pub mod state;

pub use config::{PollErrorPolicy, TrackerConfig};
pub use controller::JobController;
pub use error::ControllerError;
pub use state::{ControllerState, Phase, StateListener};
