//! Pipeline jobs and their artifacts

use crate::core::error::{ApiError, ReleaserResult};
use crate::gitlab::client::GitLabClient;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Job {
  id: u64,
  name: String,
}

/// Id of the job named `job_name` in pipeline `pipeline_id`
pub async fn find_job_id(client: &GitLabClient, pipeline_id: &str, job_name: &str) -> ReleaserResult<u64> {
  let jobs: Vec<Job> = client
    .get_json(&["pipelines", pipeline_id, "jobs"], &[("per_page", "100")])
    .await?;

  jobs
    .into_iter()
    .find(|job| job.name == job_name)
    .map(|job| job.id)
    .ok_or_else(|| {
      ApiError::JobNotFound {
        name: job_name.to_string(),
      }
      .into()
    })
}

/// Keep the artifacts of a job forever
pub async fn keep_artifacts(client: &GitLabClient, job_id: u64) -> ReleaserResult<()> {
  let job_id = job_id.to_string();
  client.post(&["jobs", job_id.as_str(), "artifacts", "keep"]).await
}
