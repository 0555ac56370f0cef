//! Job status poller
//!
//! Fetches the tracked job on a fixed interval until it reaches a terminal
//! status, the session is cancelled, or the error policy gives up.

use std::sync::Arc;

use scribe_client::{ClientError, JobApi};
use scribe_core::domain::job::{Job, JobId};
use tokio::task::JoinHandle;
use tokio::time::{self, Duration, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use super::{POLL_FALLBACK_MESSAGE, Shared};
use crate::config::PollErrorPolicy;
use crate::state::Phase;

pub(super) struct Poller {
    pub(super) api: Arc<dyn JobApi>,
    pub(super) shared: Arc<Shared>,
    pub(super) job_id: JobId,
    pub(super) generation: u64,
    pub(super) cancel: CancellationToken,
    pub(super) interval: Duration,
    pub(super) policy: PollErrorPolicy,
}

/// What the loop does after handling one fetch
enum Next {
    Continue,
    Stop,
}

impl Poller {
    pub(super) fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    async fn run(self) {
        debug!(
            "Tracking job {} every {:?} (session {})",
            self.job_id, self.interval, self.generation
        );

        // First fetch one interval after creation; the created record is already known.
        let mut ticker = time::interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut failures: u32 = 0;

        loop {
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => break,
                _ = ticker.tick() => {}
            }

            debug!("Polling job {}", self.job_id);

            let result = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => break,
                result = self.api.get_job(&self.job_id) => result,
            };

            let next = match result.and_then(|job| self.check_identity(job)) {
                Ok(job) => {
                    let recovered = failures > 0;
                    failures = 0;
                    self.apply_job(job, recovered)
                }
                Err(e) => {
                    failures += 1;
                    self.apply_failure(e, failures)
                }
            };

            if let Next::Stop = next {
                return;
            }
        }

        debug!("Tracking of job {} cancelled", self.job_id);
    }

    fn check_identity(&self, job: Job) -> Result<Job, ClientError> {
        if job.id != self.job_id {
            return Err(ClientError::InvalidResponse(format!(
                "requested job {} but received {}",
                self.job_id, job.id
            )));
        }
        Ok(job)
    }

    fn apply_job(&self, job: Job, recovered: bool) -> Next {
        let mut stale = false;
        let status = job.status;

        let applied = self.shared.apply(self.generation, |state| {
            if let Some(previous) = &state.last_known_job {
                if previous.status.regresses_to(status) {
                    stale = true;
                    return false;
                }
            }

            let mut changed = state.last_known_job.as_ref() != Some(&job);
            state.last_known_job = Some(job);

            if recovered && state.last_error.take().is_some() {
                changed = true;
            }

            if status.is_terminal() {
                state.phase = Phase::Terminal;
                changed = true;
            }

            changed
        });

        match applied {
            None => Next::Stop,
            Some(_) if stale => {
                warn!(
                    "Ignoring stale record for job {} (status {})",
                    self.job_id, status
                );
                Next::Continue
            }
            Some(_) if status.is_terminal() => {
                info!("Job {} finished with status {}", self.job_id, status);
                Next::Stop
            }
            Some(changed) => {
                if changed {
                    info!("Job {} is {}", self.job_id, status);
                }
                Next::Continue
            }
        }
    }

    fn apply_failure(&self, err: ClientError, failures: u32) -> Next {
        let keep_polling = match self.policy {
            PollErrorPolicy::StopOnError => false,
            PollErrorPolicy::Tolerate {
                max_consecutive_failures,
            } => err.is_transient() && failures < max_consecutive_failures,
        };

        let message = err.user_message(POLL_FALLBACK_MESSAGE);
        let applied = self.shared.apply(self.generation, |state| {
            state.last_error = Some(message);
            if !keep_polling {
                state.phase = Phase::Idle;
            }
            true
        });

        if applied.is_none() {
            return Next::Stop;
        }

        if keep_polling {
            warn!(
                "Failed to poll job {} (attempt {}): {}",
                self.job_id, failures, err
            );
            Next::Continue
        } else {
            error!(
                "Stopped tracking job {} after {} failed poll(s): {}",
                self.job_id, failures, err
            );
            Next::Stop
        }
    }
}
