//! Observable controller state

use scribe_core::domain::job::{Job, JobId};
use serde::Serialize;

/// Lifecycle phase of the current tracking session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Idle,
    Submitting,
    Tracking,
    Terminal,
}

/// Snapshot of what the controller knows
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ControllerState {
    pub phase: Phase,
    pub current_job_id: Option<JobId>,
    pub last_known_job: Option<Job>,
    pub submission_in_flight: bool,
    pub last_error: Option<String>,
}

impl ControllerState {
    /// The result link, once the job finished successfully
    pub fn result_url(&self) -> Option<&str> {
        self.last_known_job.as_ref()?.result_url.as_deref()
    }

    /// Whether a poll timer may currently be running
    pub fn is_tracking(&self) -> bool {
        self.phase == Phase::Tracking
    }

    /// Whether the controller has nothing left to do for this session
    pub fn is_settled(&self) -> bool {
        matches!(self.phase, Phase::Idle | Phase::Terminal)
    }
}

/// Receives every state transition synchronously, in order
///
/// Called while the controller's state lock is held: implementations must
/// not call back into the controller.
pub trait StateListener: Send + Sync {
    fn on_state(&self, state: &ControllerState);
}

impl<F> StateListener for F
where
    F: Fn(&ControllerState) + Send + Sync,
{
    fn on_state(&self, state: &ControllerState) {
        self(state)
    }
}
