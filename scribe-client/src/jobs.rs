//! Job-related API endpoints

use crate::ScribeClient;
use crate::error::Result;
use scribe_core::domain::job::{Job, JobId};
use scribe_core::dto::job::JobRequest;
use tracing::debug;

impl ScribeClient {
    // =============================================================================
    // Job Lifecycle
    // =============================================================================

    /// Create a new documentation job
    ///
    /// # Arguments
    /// * `req` - The job creation request
    ///
    /// # Returns
    /// The created job, as assigned by the backend
    pub async fn create_job(&self, req: &JobRequest) -> Result<Job> {
        let url = self.endpoint(&["jobs"])?;
        debug!("POST {} repo_url={}", url, req.repo_url);
        let response = self.client.post(url).json(req).send().await?;

        self.handle_job_response(response).await
    }

    /// Get a job by ID
    ///
    /// # Arguments
    /// * `job_id` - The identifier returned at creation
    ///
    /// # Returns
    /// The job's current record
    pub async fn get_job(&self, job_id: &JobId) -> Result<Job> {
        let url = self.endpoint(&["jobs", job_id.as_str()])?;
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;

        self.handle_job_response(response).await
    }
}
