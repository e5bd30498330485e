//! Releaser configuration
//!
//! Settings come from the CI environment, over an optional TOML file for the non-secret
//! ones. Everything is validated once at startup and every problem is reported in a
//! single [`ConfigError`].
//!
//! # Example releaser.toml
//!
//! ```toml
//! api_url = "https://git.duniter.org/api/v4"
//! release_bin_dir = "work/bin"
//! source_ext = ["zip", "tar.gz"]
//! release_job = "releases:x64"
//! wiki_release = "Releases"
//! template = ".gitlab/release_template.md"
//! ```

use crate::core::error::{ConfigError, ConfigProblem, ReleaserError, ReleaserResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// GitLab instance used when `CI_API_V4_URL` is not set
pub const DEFAULT_API_URL: &str = "https://git.duniter.org/api/v4";

/// Extension of artifact description files
pub const DEFAULT_DESC_EXT: &str = ".desc";

/// Which workflow to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseMode {
  /// Publish the pre-release note listing downloadable artifacts
  Prerelease,
  /// Turn the pre-release into the final release
  Release,
}

impl std::fmt::Display for ReleaseMode {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      ReleaseMode::Prerelease => write!(f, "pre-release"),
      ReleaseMode::Release => write!(f, "release"),
    }
  }
}

/// Non-secret settings that can live in releaser.toml
///
/// Environment variables take precedence over every field.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
  /// GitLab API v4 root (`CI_API_V4_URL`)
  #[serde(default)]
  pub api_url: Option<String>,

  /// Directory holding binaries and their description files (`RELEASE_BIN_DIR`)
  #[serde(default)]
  pub release_bin_dir: Option<PathBuf>,

  /// Source archive extensions (`SOURCE_EXT`)
  #[serde(default)]
  pub source_ext: Option<Vec<String>>,

  /// Name of the release job (`RELEASE_JOB`)
  #[serde(default)]
  pub release_job: Option<String>,

  /// Wiki page slug listing releases (`WIKI_RELEASE`)
  #[serde(default)]
  pub wiki_release: Option<String>,

  /// Release note template (`RELEASE_TEMPLATE`)
  #[serde(default)]
  pub template: Option<PathBuf>,

  /// Extension of artifact description files
  #[serde(default)]
  pub desc_ext: Option<String>,
}

impl FileConfig {
  /// Find config file in search order: releaser.toml, .gitlab/releaser.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = [path.join("releaser.toml"), path.join(".gitlab").join("releaser.toml")];
    candidates.into_iter().find(|p| p.exists())
  }

  /// Load a config file
  pub fn load(path: &Path) -> ReleaserResult<Self> {
    let content = fs::read_to_string(path)?;
    let config: FileConfig = toml_edit::de::from_str(&content)?;
    Ok(config)
  }
}

/// Validated releaser configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaserConfig {
  /// GitLab API v4 root, without trailing slash
  pub api_url: String,
  /// Web URL of the project, without trailing slash
  pub project_url: String,
  pub project_id: String,
  pub commit_tag: String,
  pub pipeline_id: String,
  /// Private token of the technical user
  pub token: String,
  pub release_bin_dir: Option<PathBuf>,
  pub source_ext: Option<Vec<String>>,
  pub release_job: Option<String>,
  pub wiki_release: Option<String>,
  /// Custom release template, the built-in one is used otherwise
  pub template: Option<PathBuf>,
  pub desc_ext: String,
  /// Workflow selected for this run
  pub mode: ReleaseMode,
}

impl ReleaserConfig {
  /// Build the configuration from the process environment and an optional config file
  ///
  /// With `config_path` unset, releaser.toml is searched in `workdir`.
  pub fn from_env(workdir: &Path, config_path: Option<&Path>, requested: Option<ReleaseMode>) -> ReleaserResult<Self> {
    Self::resolve(|key| std::env::var(key).ok(), workdir, config_path, requested)
  }

  /// Build the configuration from any variable lookup
  pub fn resolve<F>(
    lookup: F,
    workdir: &Path,
    config_path: Option<&Path>,
    requested: Option<ReleaseMode>,
  ) -> ReleaserResult<Self>
  where
    F: Fn(&str) -> Option<String>,
  {
    let mut problems = Vec::new();

    let path = match config_path {
      Some(path) => Some(path.to_path_buf()),
      None => FileConfig::find_config_path(workdir),
    };
    let file = match path {
      Some(path) => match FileConfig::load(&path) {
        Ok(file) => {
          tracing::debug!(path = %path.display(), "loaded configuration file");
          file
        }
        Err(e) => {
          problems.push(ConfigProblem::File {
            path,
            reason: e.to_string(),
          });
          FileConfig::default()
        }
      },
      None => FileConfig::default(),
    };

    match Self::validate(&lookup, file, requested) {
      Ok(config) if problems.is_empty() => Ok(config),
      Ok(_) => Err(ConfigError { problems }.into()),
      Err(mut e) => {
        problems.append(&mut e.problems);
        Err(ConfigError { problems }.into())
      }
    }
  }

  fn validate<F>(lookup: &F, file: FileConfig, requested: Option<ReleaseMode>) -> Result<Self, ConfigError>
  where
    F: Fn(&str) -> Option<String>,
  {
    let mut problems = Vec::new();
    let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
    let mut required = |key: &str| {
      var(key).unwrap_or_else(|| {
        problems.push(ConfigProblem::Missing { var: key.to_string() });
        String::new()
      })
    };

    let project_url = required("CI_PROJECT_URL").trim_end_matches('/').to_string();
    let project_id = required("CI_PROJECT_ID");
    let commit_tag = required("CI_COMMIT_TAG");
    let pipeline_id = required("CI_PIPELINE_ID");
    let token = required("RELEASER_TOKEN");

    let api_url = var("CI_API_V4_URL")
      .or(file.api_url)
      .unwrap_or_else(|| DEFAULT_API_URL.to_string())
      .trim_end_matches('/')
      .to_string();
    if let Err(e) = reqwest::Url::parse(&api_url) {
      problems.push(ConfigProblem::Malformed {
        var: "CI_API_V4_URL".to_string(),
        reason: e.to_string(),
      });
    }

    let source_ext = match var("SOURCE_EXT") {
      Some(raw) => match serde_json::from_str::<Vec<String>>(&raw) {
        Ok(exts) => Some(exts),
        Err(e) => {
          problems.push(ConfigProblem::Malformed {
            var: "SOURCE_EXT".to_string(),
            reason: e.to_string(),
          });
          None
        }
      },
      None => file.source_ext,
    };

    let release_bin_dir = var("RELEASE_BIN_DIR").map(PathBuf::from).or(file.release_bin_dir);
    let release_job = var("RELEASE_JOB").or(file.release_job);
    let wiki_release = var("WIKI_RELEASE").or(file.wiki_release);
    let template = var("RELEASE_TEMPLATE").map(PathBuf::from).or(file.template);
    let desc_ext = file.desc_ext.unwrap_or_else(|| DEFAULT_DESC_EXT.to_string());

    let mode = requested.unwrap_or(
      if release_bin_dir.is_some() && source_ext.is_some() && release_job.is_some() {
        ReleaseMode::Prerelease
      } else {
        ReleaseMode::Release
      },
    );

    match mode {
      ReleaseMode::Prerelease => {
        if release_bin_dir.is_none() {
          problems.push(ConfigProblem::Missing {
            var: "RELEASE_BIN_DIR".to_string(),
          });
        }
        let malformed = problems
          .iter()
          .any(|p| matches!(p, ConfigProblem::Malformed { var: name, .. } if name == "SOURCE_EXT"));
        if source_ext.is_none() && !malformed {
          problems.push(ConfigProblem::Missing {
            var: "SOURCE_EXT".to_string(),
          });
        }
      }
      ReleaseMode::Release => {
        if wiki_release.is_none() {
          problems.push(ConfigProblem::Missing {
            var: "WIKI_RELEASE".to_string(),
          });
        }
      }
    }

    if !problems.is_empty() {
      return Err(ConfigError { problems });
    }

    Ok(Self {
      api_url,
      project_url,
      project_id,
      commit_tag,
      pipeline_id,
      token,
      release_bin_dir,
      source_ext,
      release_job,
      wiki_release,
      template,
      desc_ext,
      mode,
    })
  }

  /// Directory of binary artifacts, required by the pre-release
  pub fn require_bin_dir(&self) -> ReleaserResult<&Path> {
    self.release_bin_dir.as_deref().ok_or_else(|| Self::missing("RELEASE_BIN_DIR"))
  }

  /// Wiki page slug, required by the release
  pub fn require_wiki_release(&self) -> ReleaserResult<&str> {
    self.wiki_release.as_deref().ok_or_else(|| Self::missing("WIKI_RELEASE"))
  }

  fn missing(var: &str) -> ReleaserError {
    ConfigError {
      problems: vec![ConfigProblem::Missing { var: var.to_string() }],
    }
    .into()
  }

  /// Web page of the current pipeline
  pub fn pipeline_url(&self) -> String {
    format!("{}/pipelines/{}", self.project_url, self.pipeline_id)
  }
}
