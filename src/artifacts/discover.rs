//! Artifact discovery from description files

use crate::artifacts::artifact::Artifact;
use crate::core::error::{ArtifactError, ReleaserResult};
use crate::utils::path_to_url_format;
use std::path::Path;

/// Binary artifacts of `bin_dir` released for `tag`
///
/// Every `*{desc_ext}` file of the directory is loaded. Artifacts built for another tag
/// are skipped. The result is sorted by category, architecture and delivery type.
pub fn discover_binaries(bin_dir: &Path, desc_ext: &str, tag: &str) -> ReleaserResult<Vec<Artifact>> {
  let dir = path_to_url_format(bin_dir);
  let dir = dir.trim_end_matches('/');
  let pattern = if dir.is_empty() {
    format!("*{}", glob::Pattern::escape(desc_ext))
  } else {
    format!("{}/*{}", glob::Pattern::escape(dir), glob::Pattern::escape(desc_ext))
  };
  tracing::debug!(%pattern, "looking for artifact descriptions");

  let paths = glob::glob(&pattern).map_err(|e| ArtifactError::Pattern {
    pattern: pattern.clone(),
    reason: e.to_string(),
  })?;

  let mut artifacts = Vec::new();
  for entry in paths {
    let desc_file = entry.map_err(|e| ArtifactError::Unreadable {
      path: e.path().to_path_buf(),
      reason: e.error().to_string(),
    })?;
    let artifact = Artifact::from_description(&desc_file, desc_ext)?;
    if artifact.tag() == Some(tag) {
      tracing::debug!(file = %artifact.file_name, "found artifact");
      artifacts.push(artifact);
    } else {
      tracing::debug!(file = %artifact.file_name, tag = ?artifact.tag(), "skipping artifact of another release");
    }
  }

  artifacts.sort_by(|a, b| a.ordering_key().cmp(&b.ordering_key()));
  tracing::info!(count = artifacts.len(), "binary artifacts found for {}", tag);
  Ok(artifacts)
}

/// Source archives, in the configured order
pub fn source_artifacts(extensions: &[String]) -> Vec<Artifact> {
  extensions.iter().map(|ext| Artifact::source(ext)).collect()
}

/// Jobs which produced the given artifacts, each listed once in order of appearance
pub fn distinct_jobs(artifacts: &[Artifact]) -> Vec<String> {
  let mut jobs: Vec<String> = Vec::new();
  for job in artifacts.iter().filter_map(Artifact::job) {
    if !jobs.iter().any(|j| j == job) {
      jobs.push(job.to_string());
    }
  }
  jobs
}
