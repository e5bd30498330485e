//! Release note attached to a tag

use crate::core::error::{ApiError, ReleaserResult};
use crate::gitlab::client::GitLabClient;
use crate::notes;
use reqwest::Method;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
struct Tag {
  release: Option<Release>,
}

#[derive(Debug, Deserialize)]
struct Release {
  #[serde(default)]
  description: Option<String>,
}

#[derive(Debug, Serialize)]
struct ReleasePayload<'a> {
  tag_name: &'a str,
  description: &'a str,
}

/// Release note of one tag
///
/// Sending creates the release unless an existing note was read before, in which case
/// it is updated.
pub struct TagRelease<'a> {
  client: &'a GitLabClient,
  tag: String,
  exists: bool,
}

impl<'a> TagRelease<'a> {
  pub fn new(client: &'a GitLabClient, tag: impl Into<String>) -> Self {
    Self {
      client,
      tag: tag.into(),
      exists: false,
    }
  }

  /// Whether a release note was found by a previous read
  pub fn exists(&self) -> bool {
    self.exists
  }

  /// Full release note, if the tag has one
  pub async fn note(&mut self) -> ReleaserResult<Option<String>> {
    let tag: Tag = self.client.get_json(&["repository", "tags", self.tag.as_str()], &[]).await?;
    match tag.release {
      Some(release) => {
        self.exists = true;
        Ok(Some(release.description.unwrap_or_default()))
      }
      None => Ok(None),
    }
  }

  /// Maintainer message of the note, empty without a note
  pub async fn message(&mut self) -> ReleaserResult<String> {
    Ok(
      self
        .note()
        .await?
        .map(|note| notes::note_message(&note).to_string())
        .unwrap_or_default(),
    )
  }

  /// Note without its title
  pub async fn body(&mut self) -> ReleaserResult<String> {
    let note = self.note().await?.ok_or_else(|| ApiError::NoRelease { tag: self.tag.clone() })?;
    Ok(notes::note_body(&note).to_string())
  }

  /// Create or update the release note
  pub async fn send(&self, note: &str) -> ReleaserResult<()> {
    let method = if self.exists { Method::PUT } else { Method::POST };
    let payload = ReleasePayload {
      tag_name: &self.tag,
      description: note,
    };
    tracing::info!(tag = %self.tag, %method, "sending release note");
    self
      .client
      .send_json(method, &["repository", "tags", self.tag.as_str(), "release"], &payload)
      .await
  }
}
