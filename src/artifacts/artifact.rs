//! Downloadable release artifacts
//!
//! Binary artifacts are produced by CI jobs and published through the job artifacts
//! API. Source artifacts are the archives GitLab builds on demand for the tag.

use crate::artifacts::size::FileSize;
use crate::core::error::{ArtifactError, ReleaserResult, ResultExt};
use crate::utils::{base_name, path_to_url_format};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Where an artifact comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactKind {
  /// File built by `job` for release `tag`
  Binary { tag: String, job: String },
  /// Archive of the repository at the released tag
  Source,
}

/// An artifact listed in the release note
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
  /// File path as discovered, may contain directories
  pub file_name: String,
  /// OS or distribution
  pub category: String,
  pub arch: String,
  /// Delivery type (server, desktop)
  pub dtype: String,
  /// Emoji name used to represent the artifact
  pub icon: String,
  pub kind: ArtifactKind,
}

/// Content of an artifact description file
#[derive(Debug, Deserialize)]
struct Description {
  version: String,
  job: String,
  category: String,
  arch: String,
  #[serde(rename = "type")]
  dtype: String,
}

/// Artifact as exposed to the release template
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactView {
  pub name: String,
  pub category: String,
  pub arch: String,
  #[serde(rename = "type")]
  pub dtype: String,
  pub url: String,
  pub size: String,
  pub icon: String,
}

impl Artifact {
  /// Load a binary artifact from its description file
  ///
  /// The artifact file is the description file without its extension.
  pub fn from_description(desc_file: &Path, desc_ext: &str) -> Result<Self, ArtifactError> {
    let unreadable = |reason: String| ArtifactError::Unreadable {
      path: desc_file.to_path_buf(),
      reason,
    };

    let content = fs::read_to_string(desc_file).map_err(|e| unreadable(e.to_string()))?;
    let description: Description = serde_json::from_str(&content).map_err(|e| unreadable(e.to_string()))?;

    let desc_path = path_to_url_format(desc_file);
    let file_name = desc_path.strip_suffix(desc_ext).unwrap_or(&desc_path).to_string();

    Ok(Self {
      file_name,
      category: description.category,
      arch: description.arch,
      dtype: description.dtype,
      icon: "package".to_string(),
      kind: ArtifactKind::Binary {
        tag: description.version,
        job: description.job,
      },
    })
  }

  /// Source archive with the given extension (`zip`, `tar.gz`)
  pub fn source(extension: &str) -> Self {
    Self {
      file_name: format!("archive.{}", extension),
      category: format!("Source code ({})", extension),
      arch: String::new(),
      dtype: String::new(),
      icon: "compression".to_string(),
      kind: ArtifactKind::Source,
    }
  }

  /// Release tag of a binary artifact
  pub fn tag(&self) -> Option<&str> {
    match &self.kind {
      ArtifactKind::Binary { tag, .. } => Some(tag),
      ArtifactKind::Source => None,
    }
  }

  /// Job which produced a binary artifact
  pub fn job(&self) -> Option<&str> {
    match &self.kind {
      ArtifactKind::Binary { job, .. } => Some(job),
      ArtifactKind::Source => None,
    }
  }

  /// File name without directories
  pub fn name(&self) -> &str {
    base_name(&self.file_name)
  }

  /// Artifacts are listed by category, then architecture, then delivery type
  pub fn ordering_key(&self) -> (&str, &str, &str) {
    (self.category.as_str(), self.arch.as_str(), self.dtype.as_str())
  }

  pub fn size(&self) -> ReleaserResult<FileSize> {
    match self.kind {
      ArtifactKind::Binary { .. } => {
        let metadata =
          fs::metadata(&self.file_name).with_context(|| format!("Failed to read size of {}", self.file_name))?;
        Ok(FileSize::bytes(metadata.len()))
      }
      ArtifactKind::Source => Ok(FileSize::unknown()),
    }
  }

  /// Download URL of the artifact
  ///
  /// `project_url` is the project web URL and `commit_tag` the tag being released.
  pub fn url(&self, project_url: &str, commit_tag: &str) -> String {
    match &self.kind {
      ArtifactKind::Binary { tag, job } => format!(
        "{}/-/jobs/artifacts/{}/raw/{}?job={}",
        project_url, tag, self.file_name, job
      ),
      ArtifactKind::Source => format!("{}/repository/{}/{}", project_url, commit_tag, self.file_name),
    }
  }

  /// Template view of the artifact
  pub fn view(&self, project_url: &str, commit_tag: &str) -> ReleaserResult<ArtifactView> {
    Ok(ArtifactView {
      name: self.name().to_string(),
      category: self.category.clone(),
      arch: self.arch.clone(),
      dtype: self.dtype.clone(),
      url: self.url(project_url, commit_tag),
      size: self.size()?.to_string(),
      icon: format!(":{}:", self.icon),
    })
  }
}
