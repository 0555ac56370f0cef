//! Job domain types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-assigned job identifier
///
/// Opaque to the client: it is only echoed back in status requests.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for JobId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for JobId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Documentation job record
///
/// Owned by the backend and mirrored read-only on the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub repo_url: String,
    pub status: JobStatus,
    #[serde(default)]
    pub result_url: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
}

impl Job {
    /// Whether no further transition can occur for this job
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Checks that the outcome fields agree with the status
    ///
    /// `result_url` may only be set once the job is `done`, and
    /// `error_message` only once it is `error`.
    pub fn check_consistency(&self) -> Result<(), String> {
        if self.result_url.is_some() && self.status != JobStatus::Done {
            return Err(format!(
                "job {} has a result_url while {}",
                self.id, self.status
            ));
        }

        if self.error_message.is_some() && self.status != JobStatus::Error {
            return Err(format!(
                "job {} has an error_message while {}",
                self.id, self.status
            ));
        }

        Ok(())
    }
}

/// Job processing status
///
/// Progresses linearly: `pending` → `running` → `done` | `error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Running,
    Done,
    #[serde(alias = "failed")]
    Error,
}

impl JobStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Done | JobStatus::Error)
    }

    /// Position in the lifecycle; both terminal statuses share the last rank
    pub fn rank(self) -> u8 {
        match self {
            JobStatus::Pending => 0,
            JobStatus::Running => 1,
            JobStatus::Done | JobStatus::Error => 2,
        }
    }

    /// Whether moving from `self` to `next` would go backwards
    pub fn regresses_to(self, next: JobStatus) -> bool {
        next.rank() < self.rank() || (self.is_terminal() && next != self)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Running => "running",
            JobStatus::Done => "done",
            JobStatus::Error => "error",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
