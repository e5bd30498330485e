//! Tests for the command line surface and configuration errors

use crate::helpers::*;
use anyhow::Result;

#[tokio::test]
async fn test_help_lists_workflows() -> Result<()> {
  let project = TestProject::new("https://git.duniter.org/api/v4")?;
  let output = project.run(&["--help"]).await?;

  assert!(output.status.success());
  let help = stdout(&output);
  assert!(help.contains("prerelease"));
  assert!(help.contains("release"));
  assert!(help.contains("--dry-run"));
  Ok(())
}

#[tokio::test]
async fn test_missing_variables_reported_at_once() -> Result<()> {
  let mut project = TestProject::new("https://git.duniter.org/api/v4")?;
  project.remove_env("CI_COMMIT_TAG").remove_env("RELEASER_TOKEN");

  let output = project.run(&[]).await?;

  assert_eq!(output.status.code(), Some(1));
  let err = stderr(&output);
  assert!(err.contains("CI_COMMIT_TAG"));
  assert!(err.contains("RELEASER_TOKEN"));
  assert!(err.contains("WIKI_RELEASE"));
  Ok(())
}

#[tokio::test]
async fn test_malformed_source_ext() -> Result<()> {
  let mut project = TestProject::new("https://git.duniter.org/api/v4")?;
  project
    .set_env("RELEASE_BIN_DIR", "work/bin/")
    .set_env("SOURCE_EXT", "zip");

  let output = project.run(&["prerelease"]).await?;

  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("SOURCE_EXT"));
  Ok(())
}

#[tokio::test]
async fn test_broken_config_file() -> Result<()> {
  let project = TestProject::new("https://git.duniter.org/api/v4")?;
  project.write_file(".gitlab/releaser.toml", "wiki_release = [\n")?;

  let output = project.run(&["release"]).await?;

  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("releaser.toml"));
  Ok(())
}

#[tokio::test]
async fn test_unreachable_gitlab_is_a_system_error() -> Result<()> {
  let mut project = TestProject::new("http://127.0.0.1:1/api/v4")?;
  project.set_env("WIKI_RELEASE", "Releases");

  let output = project.run(&["release"]).await?;

  assert_eq!(output.status.code(), Some(2));
  Ok(())
}
