//! Tests for the release workflow

use crate::helpers::*;
use anyhow::{Context, Result};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TAG_PATH: &str = "/api/v4/projects/47/repository/tags/v1.8.0";
const RELEASE_PATH: &str = "/api/v4/projects/47/repository/tags/v1.8.0/release";
const WIKI_PATH: &str = "/api/v4/projects/47/wikis/Releases";

const PRERELEASE_NOTE: &str = "# :gift: Pre-release\n\n[Go to Pipeline page :arrow_forward:](https://example.com)\n\n<placeholder content=\"end-title\" />\n<placeholder content=\"note\">Faster sync.</placeholder>\n\n## Downloads";

const WIKI_PAGE: &str = "# Releases\n\n## <placeholder content=\"tag\">v1.7.0</placeholder>\n\n<placeholder content=\"note\">Previous note</placeholder>\n\n# History\n<placeholder content=\"previous-beg\" />";

async fn gitlab_with_prerelease() -> MockServer {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path(TAG_PATH))
    .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
      "name": "v1.8.0",
      "release": {"tag_name": "v1.8.0", "description": PRERELEASE_NOTE}
    })))
    .mount(&server)
    .await;
  Mock::given(method("GET"))
    .and(path(WIKI_PATH))
    .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
      "content": WIKI_PAGE,
      "format": "markdown",
      "slug": "Releases",
      "title": "Releases"
    })))
    .mount(&server)
    .await;
  Mock::given(method("GET"))
    .and(path("/api/v4/projects/47/pipelines/9001/jobs"))
    .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
      {"id": 501, "name": "releases:x64"}
    ])))
    .mount(&server)
    .await;
  server
}

#[tokio::test(flavor = "multi_thread")]
async fn test_auto_publishes_release() -> Result<()> {
  let server = gitlab_with_prerelease().await;
  Mock::given(method("PUT"))
    .and(path(RELEASE_PATH))
    .respond_with(ResponseTemplate::new(200))
    .expect(1)
    .mount(&server)
    .await;
  Mock::given(method("PUT"))
    .and(path(WIKI_PATH))
    .respond_with(ResponseTemplate::new(200))
    .expect(1)
    .mount(&server)
    .await;
  Mock::given(method("POST"))
    .and(path("/api/v4/projects/47/jobs/501/artifacts/keep"))
    .respond_with(ResponseTemplate::new(200))
    .expect(1)
    .mount(&server)
    .await;

  let mut project = TestProject::new(&format!("{}/api/v4", server.uri()))?;
  project
    .set_env("RELEASE_BIN_DIR", "work/bin/")
    .set_env("WIKI_RELEASE", "Releases");
  project.add_binary("work/bin", "duniter-v1.8.0-linux-x64.deb", "releases:x64", "Linux", "x64")?;

  let output = project.run(&[]).await?;
  assert!(output.status.success(), "stderr: {}", stderr(&output));
  assert!(stdout(&output).contains("Release published"));

  let requests = server.received_requests().await.context("request recording disabled")?;
  let release = requests
    .iter()
    .find(|r| r.method.as_str() == "PUT" && r.url.path() == RELEASE_PATH)
    .context("no release request")?;
  let note = description(release)?;
  assert!(note.starts_with("# :white_check_mark: Release\n\n<placeholder content=\"end-title\" />"));
  assert!(!note.contains("Pre-release"));

  let wiki = requests
    .iter()
    .find(|r| r.method.as_str() == "PUT" && r.url.path() == WIKI_PATH)
    .context("no wiki request")?;
  let page: serde_json::Value = serde_json::from_slice(&wiki.body)?;
  let content = page["content"].as_str().context("wiki payload has no content")?;
  assert!(content.contains("<placeholder content=\"tag\">v1.8.0</placeholder>"));
  assert!(content.contains("<placeholder content=\"note\">\nFaster sync.\n\n## Downloads</placeholder>"));
  assert!(content.ends_with("<placeholder content=\"previous-beg\" />\n\n## v1.7.0\n\nPrevious note"));
  Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_release_without_prerelease_fails() -> Result<()> {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path(TAG_PATH))
    .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"name": "v1.8.0", "release": null})))
    .mount(&server)
    .await;

  let mut project = TestProject::new(&format!("{}/api/v4", server.uri()))?;
  project.set_env("WIKI_RELEASE", "Releases");

  let output = project.run(&["release"]).await?;

  assert_eq!(output.status.code(), Some(3));
  assert!(stderr(&output).contains("No release information to publish for tag v1.8.0"));
  Ok(())
}
