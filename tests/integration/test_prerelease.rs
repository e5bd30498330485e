//! Tests for the pre-release workflow

use crate::helpers::*;
use anyhow::{Context, Result};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TAG_PATH: &str = "/api/v4/projects/47/repository/tags/v1.8.0";
const RELEASE_PATH: &str = "/api/v4/projects/47/repository/tags/v1.8.0/release";

async fn gitlab_without_release() -> MockServer {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .and(path(TAG_PATH))
    .and(header("Private-Token", "secret"))
    .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"name": "v1.8.0", "release": null})))
    .mount(&server)
    .await;
  server
}

fn prerelease_project(server: &MockServer) -> Result<TestProject> {
  let mut project = TestProject::new(&format!("{}/api/v4", server.uri()))?;
  project
    .set_env("RELEASE_BIN_DIR", "work/bin/")
    .set_env("SOURCE_EXT", r#"["zip","tar.gz"]"#)
    .set_env("RELEASE_JOB", "releases:x64");
  project.add_binary("work/bin", "duniter-v1.8.0-windows-x64.exe", "releases:win", "Windows", "x64")?;
  project.add_binary("work/bin", "duniter-v1.8.0-linux-x64.deb", "releases:x64", "Linux", "x64")?;
  Ok(project)
}

#[tokio::test(flavor = "multi_thread")]
async fn test_auto_publishes_prerelease() -> Result<()> {
  let server = gitlab_without_release().await;
  Mock::given(method("POST"))
    .and(path(RELEASE_PATH))
    .respond_with(ResponseTemplate::new(201))
    .expect(1)
    .mount(&server)
    .await;

  let project = prerelease_project(&server)?;
  let output = project.run(&[]).await?;

  assert!(output.status.success(), "stderr: {}", stderr(&output));
  assert!(stdout(&output).contains("Pre-release published"));

  let requests = server.received_requests().await.context("request recording disabled")?;
  let post = requests
    .iter()
    .find(|r| r.method.as_str() == "POST")
    .context("no release request")?;
  let note = description(post)?;

  assert!(note.starts_with("# :gift: Pre-release"));
  assert!(note.contains(&format!("({}/pipelines/9001)", PROJECT_URL)));
  assert!(note.contains(&format!(
    "[duniter-v1.8.0-linux-x64.deb]({}/-/jobs/artifacts/v1.8.0/raw/work/bin/duniter-v1.8.0-linux-x64.deb?job=releases:x64) 2.0 KiB",
    PROJECT_URL
  )));
  assert!(note.find("linux-x64.deb").unwrap_or(usize::MAX) < note.find("windows-x64.exe").unwrap_or(0));
  assert!(note.contains("archive.tar.gz"));
  Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_dry_run_prints_note() -> Result<()> {
  let server = gitlab_without_release().await;
  Mock::given(method("POST"))
    .respond_with(ResponseTemplate::new(201))
    .expect(0)
    .mount(&server)
    .await;

  let project = prerelease_project(&server)?;
  let output = project.run(&["--dry-run", "prerelease"]).await?;

  assert!(output.status.success(), "stderr: {}", stderr(&output));
  let out = stdout(&output);
  assert!(out.contains("Dry-run"));
  assert!(out.contains("# :gift: Pre-release"));
  assert!(!out.contains("Pre-release published"));
  Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rejected_token() -> Result<()> {
  let server = MockServer::start().await;
  Mock::given(method("GET"))
    .respond_with(ResponseTemplate::new(401).set_body_string(r#"{"message":"401 Unauthorized"}"#))
    .mount(&server)
    .await;

  let project = prerelease_project(&server)?;
  let output = project.run(&["prerelease"]).await?;

  assert_eq!(output.status.code(), Some(2));
  assert!(stderr(&output).contains("401"));
  Ok(())
}
