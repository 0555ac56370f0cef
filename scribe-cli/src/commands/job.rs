//! Job command handlers
//!
//! Handles submitting a repository, following the job through its
//! lifecycle, and one-shot status lookups.

use anyhow::{Context, Result};
use colored::*;
use scribe_client::ScribeClient;
use scribe_core::domain::job::{Job, JobId, JobStatus};
use scribe_tracker::{ControllerError, ControllerState, JobController, Phase};
use tracing::{debug, info};

use crate::config::Config;

/// Submit a repository and optionally follow the job
pub async fn submit(url: &str, follow: bool, config: &Config) -> Result<()> {
    let controller = JobController::from_config(config.tracker.clone())?;
    let mut rx = controller.subscribe();

    let job = match controller.submit(url).await {
        Ok(job) => job,
        Err(ControllerError::Validation(e)) => anyhow::bail!("Invalid repository URL: {}", e),
        Err(e) => {
            let message = controller
                .state()
                .last_error
                .unwrap_or_else(|| e.to_string());
            anyhow::bail!("{}", message);
        }
    };

    if !config.json {
        println!(
            "{} Submitted {} as job {}",
            "▸".cyan(),
            job.repo_url,
            job.id.to_string().bold()
        );
    }

    if !follow {
        debug!("Not following job {}", job.id);
        if config.json {
            println!("{}", serde_json::to_string_pretty(&job)?);
        }
        return Ok(());
    }

    let mut printed = PrintedState::default();
    let mut state = rx.borrow_and_update().clone();
    printed.update(&state, config.json);

    while !state.is_settled() {
        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                state = rx.borrow_and_update().clone();
                printed.update(&state, config.json);
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, cancelling job {}", job.id);
                controller.shutdown().await;
                if !config.json {
                    println!("{}", "Tracking cancelled.".yellow());
                }
                return Ok(());
            }
        }
    }

    finish(&state, config.json)
}

/// Fetch and display a single job
pub async fn status(id: &str, config: &Config) -> Result<()> {
    let client = ScribeClient::with_timeout(
        config.tracker.api_url.clone(),
        config.tracker.request_timeout,
    )?;

    debug!("Fetching job {} from {}", id, client.base_url());
    let job = client
        .get_job(&JobId::from(id))
        .await
        .with_context(|| format!("Failed to fetch job {}", id))?;

    if config.json {
        println!("{}", serde_json::to_string_pretty(&job)?);
    } else {
        print_job_details(&job);
    }

    Ok(())
}

/// Reports the settled state and maps failures to an error exit
fn finish(state: &ControllerState, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(state)?);
    }

    match (state.phase, state.last_known_job.as_ref()) {
        (Phase::Terminal, Some(job)) if job.status == JobStatus::Done => {
            if !json {
                println!();
                print_job_details(job);
            }
            Ok(())
        }
        (Phase::Terminal, Some(job)) => {
            if !json {
                println!();
                print_job_details(job);
            }
            anyhow::bail!("Job {} failed", job.id)
        }
        _ => {
            let reason = state
                .last_error
                .clone()
                .unwrap_or_else(|| "tracking stopped".to_string());
            anyhow::bail!("Stopped tracking: {}", reason)
        }
    }
}

/// Remembers what was last printed so only transitions are shown
#[derive(Default)]
struct PrintedState {
    status: Option<JobStatus>,
    error: Option<String>,
}

impl PrintedState {
    fn update(&mut self, state: &ControllerState, json: bool) {
        let status = state.last_known_job.as_ref().map(|j| j.status);

        if status != self.status {
            if let Some(status) = status {
                if json {
                    println!("{}", serde_json::json!({ "status": status }));
                } else {
                    println!("  status: {}", colorize_status(status));
                }
            }
            self.status = status;
        }

        if state.last_error != self.error {
            if let Some(error) = &state.last_error {
                if json {
                    println!("{}", serde_json::json!({ "error": error }));
                } else {
                    println!("  {} {}", "!".yellow(), error.yellow());
                }
            }
            self.error = state.last_error.clone();
        }
    }
}

/// Print detailed job information
fn print_job_details(job: &Job) {
    println!("{}", "Job Details:".bold());
    println!("  ID:         {}", job.id.to_string().cyan());
    println!("  Repository: {}", job.repo_url);
    println!("  Status:     {}", colorize_status(job.status));

    if let Some(url) = &job.result_url {
        println!("  Docs:       {}", url.green().underline());
    }

    if let Some(error) = &job.error_message {
        println!("\n{}", "Error:".bold());
        println!("{}", error.red());
    }
}

/// Colorize job status for display
fn colorize_status(status: JobStatus) -> ColoredString {
    match status {
        JobStatus::Pending => status.as_str().yellow(),
        JobStatus::Running => status.as_str().cyan(),
        JobStatus::Done => status.as_str().green(),
        JobStatus::Error => status.as_str().red(),
    }
}
