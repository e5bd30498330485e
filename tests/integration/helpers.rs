//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Output;
use tempfile::TempDir;

pub const PROJECT_URL: &str = "https://git.duniter.org/nodes/typescript/duniter";

/// A project checkout as seen by a CI job
pub struct TestProject {
  _root: TempDir,
  pub path: PathBuf,
  env: HashMap<String, String>,
}

impl TestProject {
  /// Create an empty project with the variables GitLab always defines
  pub fn new(api_url: &str) -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();

    let env = [
      ("CI_API_V4_URL", api_url),
      ("CI_PROJECT_URL", PROJECT_URL),
      ("CI_PROJECT_ID", "47"),
      ("CI_COMMIT_TAG", "v1.8.0"),
      ("CI_PIPELINE_ID", "9001"),
      ("RELEASER_TOKEN", "secret"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    Ok(Self { _root: root, path, env })
  }

  pub fn set_env(&mut self, key: &str, value: &str) -> &mut Self {
    self.env.insert(key.to_string(), value.to_string());
    self
  }

  pub fn remove_env(&mut self, key: &str) -> &mut Self {
    self.env.remove(key);
    self
  }

  /// Add a binary artifact and its description file under `bin_dir`
  pub fn add_binary(&self, bin_dir: &str, file: &str, job: &str, category: &str, arch: &str) -> Result<()> {
    let dir = self.path.join(bin_dir);
    std::fs::create_dir_all(&dir)?;
    std::fs::write(dir.join(file), vec![0u8; 2048])?;
    std::fs::write(
      dir.join(format!("{}.desc", file)),
      format!(
        r#"{{"version":"v1.8.0","job":"{}","category":"{}","arch":"{}","type":"server"}}"#,
        job, category, arch
      ),
    )?;
    Ok(())
  }

  pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
    let path = self.path.join(path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
  }

  /// Run the releaser in the project directory, whatever its exit status
  pub async fn run(&self, args: &[&str]) -> Result<Output> {
    run_releaser(&self.path, &self.env, args).await
  }
}

/// Run the releaser binary with exactly the given environment
pub async fn run_releaser(cwd: &Path, env: &HashMap<String, String>, args: &[&str]) -> Result<Output> {
  let releaser_bin = env!("CARGO_BIN_EXE_releaser");

  tokio::process::Command::new(releaser_bin)
    .current_dir(cwd)
    .args(args)
    .env_clear()
    .envs(env)
    .output()
    .await
    .with_context(|| format!("Failed to run releaser {:?}", args))
}

pub fn stdout(output: &Output) -> String {
  String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
  String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Description sent in a release request
pub fn description(request: &wiremock::Request) -> Result<String> {
  let payload: serde_json::Value = serde_json::from_slice(&request.body)?;
  payload["description"]
    .as_str()
    .map(str::to_string)
    .context("release payload has no description")
}
