//! Backend seam
//!
//! The tracker talks to the backend only through [`JobApi`], so tests can
//! replace HTTP with scripted responses.

use async_trait::async_trait;
use scribe_core::domain::job::{Job, JobId};
use scribe_core::dto::job::JobRequest;

use crate::ScribeClient;
use crate::error::Result;

/// Operations the job tracker needs from the documentation backend
#[async_trait]
pub trait JobApi: Send + Sync {
    /// Creates a job for the requested repository
    async fn create_job(&self, req: &JobRequest) -> Result<Job>;

    /// Fetches the current record of a job
    async fn get_job(&self, job_id: &JobId) -> Result<Job>;
}

#[async_trait]
impl JobApi for ScribeClient {
    async fn create_job(&self, req: &JobRequest) -> Result<Job> {
        ScribeClient::create_job(self, req).await
    }

    async fn get_job(&self, job_id: &JobId) -> Result<Job> {
        ScribeClient::get_job(self, job_id).await
    }
}
