//! Job controller
//!
//! Owns the lifecycle of one documentation job at a time: validates the
//! repository URL, submits it, then tracks the created job until it reaches
//! a terminal status or the session is abandoned.
//!
//! Every submission opens a new session with its own generation number and
//! cancellation token. Results are applied only while their generation is
//! still current, so a late response from a superseded session can never
//! overwrite newer state.

mod poller;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use scribe_client::{JobApi, ScribeClient};
use scribe_core::domain::job::Job;
use scribe_core::dto::job::JobRequest;
use scribe_core::validation;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::TrackerConfig;
use crate::error::ControllerError;
use crate::state::{ControllerState, Phase, StateListener};

use poller::Poller;

/// Message shown when the backend rejects a submission without detail
pub const SUBMIT_FALLBACK_MESSAGE: &str = "Failed to submit job";

/// Message shown when a status fetch fails without detail
pub const POLL_FALLBACK_MESSAGE: &str = "Failed to fetch job status";

/// Submits documentation jobs and tracks them to completion
pub struct JobController {
    api: Arc<dyn JobApi>,
    config: TrackerConfig,
    shared: Arc<Shared>,
}

impl JobController {
    /// Creates a controller backed by `api`
    pub fn new(api: Arc<dyn JobApi>, config: TrackerConfig) -> Self {
        Self {
            api,
            config,
            shared: Arc::new(Shared::new()),
        }
    }

    /// Creates a controller talking HTTP to `config.api_url`
    pub fn from_config(config: TrackerConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let client = ScribeClient::with_timeout(config.api_url.clone(), config.request_timeout)?;
        Ok(Self::new(Arc::new(client), config))
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Current state snapshot
    pub fn state(&self) -> ControllerState {
        self.shared.lock().state.clone()
    }

    /// Receiver that always holds the latest state
    pub fn subscribe(&self) -> watch::Receiver<ControllerState> {
        self.shared.watch_tx.subscribe()
    }

    /// Registers a listener notified synchronously on every transition
    pub fn add_listener(&self, listener: Arc<dyn StateListener>) {
        self.shared.lock().listeners.push(listener);
    }

    /// Waits until the current session is idle or terminal
    pub async fn settled(&self) -> ControllerState {
        let mut rx = self.subscribe();
        match rx
            .wait_for(|s| s.is_settled() && !s.submission_in_flight)
            .await
        {
            Ok(state) => state.clone(),
            Err(_) => self.state(),
        }
    }

    /// Submits `repo_url` and starts tracking the created job
    ///
    /// Supersedes any previous session. Returns the job as created by the
    /// backend; its later updates arrive through the observable state.
    pub async fn submit(&self, repo_url: &str) -> Result<Job, ControllerError> {
        let repo_url = repo_url.trim();

        if let Err(e) = validation::check(repo_url) {
            warn!("Rejected repository URL '{}': {}", repo_url, e);
            self.shared.record_rejection(e.to_string());
            return Err(e.into());
        }

        let (generation, cancel) = self.shared.begin_session();
        let mut guard = SubmitGuard {
            shared: &self.shared,
            generation,
            armed: true,
        };
        info!("Submitting {} (session {})", repo_url, generation);

        let request = JobRequest::new(repo_url);
        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("Submission for session {} cancelled in flight", generation);
                return Err(ControllerError::Cancelled);
            }
            result = self.api.create_job(&request) => result,
        };

        let job = match result {
            Ok(job) => job,
            Err(e) => {
                let message = e.user_message(SUBMIT_FALLBACK_MESSAGE);
                let applied = self.shared.apply(generation, |s| {
                    s.submission_in_flight = false;
                    s.phase = Phase::Idle;
                    s.last_error = Some(message);
                    true
                });
                if applied.is_none() {
                    return Err(ControllerError::Cancelled);
                }
                guard.disarm();
                warn!("Submission for {} failed: {}", repo_url, e);
                return Err(ControllerError::Submission(e));
            }
        };

        let terminal = job.is_terminal();
        let applied = self.shared.apply(generation, |s| {
            s.submission_in_flight = false;
            s.current_job_id = Some(job.id.clone());
            s.last_known_job = Some(job.clone());
            s.phase = if terminal {
                Phase::Terminal
            } else {
                Phase::Tracking
            };
            true
        });
        if applied.is_none() {
            debug!("Discarding creation response for superseded session {}", generation);
            return Err(ControllerError::Cancelled);
        }
        guard.disarm();

        info!("Created job {} ({})", job.id, job.status);

        if !terminal {
            let handle = Poller {
                api: Arc::clone(&self.api),
                shared: Arc::clone(&self.shared),
                job_id: job.id.clone(),
                generation,
                cancel,
                interval: self.config.poll_interval,
                policy: self.config.poll_error_policy,
            }
            .spawn();
            self.shared.attach_poller(generation, handle);
        }

        Ok(job)
    }

    /// Abandons the current session without recording an error
    ///
    /// Idempotent. An in-flight request is dropped and its result, should it
    /// still arrive, is ignored.
    pub fn cancel(&self) {
        if let Some(handle) = self.shared.cancel_session() {
            handle.abort();
        }
    }

    /// Cancels tracking and waits for the polling task to finish
    pub async fn shutdown(&self) {
        if let Some(handle) = self.shared.cancel_session() {
            handle.abort();
            let _ = handle.await;
        }
        debug!("Controller shut down");
    }
}

impl Drop for JobController {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// State shared between the controller and its polling task
pub(crate) struct Shared {
    inner: Mutex<Inner>,
    watch_tx: watch::Sender<ControllerState>,
}

struct Inner {
    state: ControllerState,
    generation: u64,
    session: Option<Session>,
    listeners: Vec<Arc<dyn StateListener>>,
}

struct Session {
    generation: u64,
    cancel: CancellationToken,
    poller: Option<JoinHandle<()>>,
}

impl Shared {
    fn new() -> Self {
        let (watch_tx, _) = watch::channel(ControllerState::default());
        Self {
            inner: Mutex::new(Inner {
                state: ControllerState::default(),
                generation: 0,
                session: None,
                listeners: Vec::new(),
            }),
            watch_tx,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, inner: &Inner) {
        self.watch_tx.send_replace(inner.state.clone());
        for listener in &inner.listeners {
            listener.on_state(&inner.state);
        }
    }

    /// Cancels the previous session and resets state for a new submission
    fn begin_session(&self) -> (u64, CancellationToken) {
        let mut inner = self.lock();

        if let Some(old) = inner.session.take() {
            debug!("Superseding session {}", old.generation);
            old.stop();
        }

        inner.generation += 1;
        let generation = inner.generation;
        let cancel = CancellationToken::new();
        inner.session = Some(Session {
            generation,
            cancel: cancel.clone(),
            poller: None,
        });

        inner.state = ControllerState {
            phase: Phase::Submitting,
            submission_in_flight: true,
            ..ControllerState::default()
        };
        self.publish(&inner);

        (generation, cancel)
    }

    /// Applies `update` if `generation` is still the live session
    ///
    /// Returns `None` for stale sessions, otherwise whether `update` reported
    /// a change. Subscribers are notified only on change.
    pub(crate) fn apply<F>(&self, generation: u64, update: F) -> Option<bool>
    where
        F: FnOnce(&mut ControllerState) -> bool,
    {
        let mut inner = self.lock();

        let live = inner
            .session
            .as_ref()
            .is_some_and(|s| s.generation == generation && !s.cancel.is_cancelled());
        if inner.generation != generation || !live {
            return None;
        }

        let changed = update(&mut inner.state);
        if changed {
            self.publish(&inner);
        }
        Some(changed)
    }

    /// Records a rejected submission attempt
    ///
    /// A session still submitting or tracking keeps its state untouched; the
    /// caller gets the error back either way. Otherwise the rejection becomes
    /// the new, otherwise empty, state.
    fn record_rejection(&self, message: String) {
        let mut inner = self.lock();
        if matches!(inner.state.phase, Phase::Submitting | Phase::Tracking) {
            return;
        }
        inner.state = ControllerState {
            last_error: Some(message),
            ..ControllerState::default()
        };
        self.publish(&inner);
    }

    fn attach_poller(&self, generation: u64, handle: JoinHandle<()>) {
        let mut inner = self.lock();
        match inner.session.as_mut() {
            Some(session) if session.generation == generation => session.poller = Some(handle),
            _ => handle.abort(),
        }
    }

    /// Ends the current session; returns its polling task, if any
    fn cancel_session(&self) -> Option<JoinHandle<()>> {
        self.end_session(None)
    }

    /// Ends the session only if `generation` is still the current one
    fn cancel_generation(&self, generation: u64) -> Option<JoinHandle<()>> {
        self.end_session(Some(generation))
    }

    fn end_session(&self, generation: Option<u64>) -> Option<JoinHandle<()>> {
        let mut inner = self.lock();
        if let Some(generation) = generation {
            if inner.session.as_ref().map(|s| s.generation) != Some(generation) {
                return None;
            }
        }
        let session = inner.session.take()?;

        session.cancel.cancel();
        inner.generation += 1;

        if matches!(inner.state.phase, Phase::Submitting | Phase::Tracking) {
            info!("Tracking abandoned (session {})", session.generation);
            inner.state.phase = Phase::Idle;
            inner.state.submission_in_flight = false;
            self.publish(&inner);
        }

        session.poller
    }
}

/// Ends the session if a `submit` future is dropped before it settles
struct SubmitGuard<'a> {
    shared: &'a Shared,
    generation: u64,
    armed: bool,
}

impl SubmitGuard<'_> {
    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        debug!("Submission for session {} dropped in flight", self.generation);
        if let Some(handle) = self.shared.cancel_generation(self.generation) {
            handle.abort();
        }
    }
}

impl Session {
    fn stop(self) {
        self.cancel.cancel();
        if let Some(handle) = self.poller {
            handle.abort();
        }
    }
}
