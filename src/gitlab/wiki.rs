//! Wiki pages

use crate::core::error::ReleaserResult;
use crate::gitlab::client::GitLabClient;
use reqwest::Method;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
struct WikiPage {
  content: String,
}

#[derive(Debug, Serialize)]
struct WikiPayload<'a> {
  content: &'a str,
  format: &'a str,
  slug: &'a str,
  title: &'a str,
}

/// Markdown content of the wiki page `slug`
pub async fn load_page(client: &GitLabClient, slug: &str) -> ReleaserResult<String> {
  let page: WikiPage = client.get_json(&["wikis", slug], &[]).await?;
  Ok(page.content)
}

/// Replace the content of the wiki page `slug`, titled after its slug
pub async fn save_page(client: &GitLabClient, slug: &str, content: &str) -> ReleaserResult<()> {
  let payload = WikiPayload {
    content,
    format: "markdown",
    slug,
    title: slug,
  };
  tracing::info!(%slug, "saving wiki page");
  client.send_json(Method::PUT, &["wikis", slug], &payload).await
}
