//! Error types for the releaser with contextual messages and exit codes
//!
//! Every fallible operation returns a [`ReleaserResult`]. Errors travel up to `main`,
//! which is the only place allowed to print them and terminate the process.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for the releaser
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (configuration, template)
  User = 1,
  /// System error (network, GitLab API, I/O)
  System = 2,
  /// Release data is not what the workflow expects
  Validation = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for the releaser
#[derive(Debug)]
pub enum ReleaserError {
  /// Configuration errors, all reported at once
  Config(ConfigError),

  /// GitLab API errors
  Api(ApiError),

  /// Artifact description errors
  Artifact(ArtifactError),

  /// Release template could not be compiled or rendered
  Template(String),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl ReleaserError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    ReleaserError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    ReleaserError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      ReleaserError::Message { message, context, help } => ReleaserError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      ReleaserError::Io(err) => ReleaserError::Message {
        message: format!("I/O error: {}", err),
        context: Some(ctx_str),
        help: None,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      ReleaserError::Config(_) => ExitCode::User,
      ReleaserError::Api(e) => e.exit_code(),
      ReleaserError::Artifact(_) => ExitCode::Validation,
      ReleaserError::Template(_) => ExitCode::User,
      ReleaserError::Io(_) => ExitCode::System,
      ReleaserError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      ReleaserError::Config(e) => e.help_message(),
      ReleaserError::Api(e) => e.help_message(),
      ReleaserError::Artifact(e) => e.help_message(),
      ReleaserError::Template(_) => {
        Some("Check the handlebars syntax of the release template (RELEASE_TEMPLATE).".to_string())
      }
      ReleaserError::Message { help, .. } => help.clone(),
      ReleaserError::Io(_) => None,
    }
  }
}

impl fmt::Display for ReleaserError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ReleaserError::Config(e) => write!(f, "{}", e),
      ReleaserError::Api(e) => write!(f, "{}", e),
      ReleaserError::Artifact(e) => write!(f, "{}", e),
      ReleaserError::Template(msg) => write!(f, "Release template error: {}", msg),
      ReleaserError::Io(e) => write!(f, "I/O error: {}", e),
      ReleaserError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for ReleaserError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      ReleaserError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for ReleaserError {
  fn from(err: io::Error) -> Self {
    ReleaserError::Io(err)
  }
}

impl From<String> for ReleaserError {
  fn from(msg: String) -> Self {
    ReleaserError::message(msg)
  }
}

impl From<&str> for ReleaserError {
  fn from(msg: &str) -> Self {
    ReleaserError::message(msg)
  }
}

impl From<ConfigError> for ReleaserError {
  fn from(err: ConfigError) -> Self {
    ReleaserError::Config(err)
  }
}

impl From<ApiError> for ReleaserError {
  fn from(err: ApiError) -> Self {
    ReleaserError::Api(err)
  }
}

impl From<ArtifactError> for ReleaserError {
  fn from(err: ArtifactError) -> Self {
    ReleaserError::Artifact(err)
  }
}

impl From<serde_json::Error> for ReleaserError {
  fn from(err: serde_json::Error) -> Self {
    ReleaserError::message(format!("JSON error: {}", err))
  }
}

impl From<toml_edit::de::Error> for ReleaserError {
  fn from(err: toml_edit::de::Error) -> Self {
    ReleaserError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<handlebars::TemplateError> for ReleaserError {
  fn from(err: handlebars::TemplateError) -> Self {
    ReleaserError::Template(err.to_string())
  }
}

impl From<handlebars::RenderError> for ReleaserError {
  fn from(err: handlebars::RenderError) -> Self {
    ReleaserError::Template(err.to_string())
  }
}

impl From<reqwest::Error> for ReleaserError {
  fn from(err: reqwest::Error) -> Self {
    ReleaserError::Api(ApiError::from(err))
  }
}

/// A single configuration problem
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigProblem {
  /// Required variable is not defined
  Missing { var: String },

  /// Variable is defined but its value cannot be used
  Malformed { var: String, reason: String },

  /// Configuration file could not be loaded
  File { path: PathBuf, reason: String },
}

impl fmt::Display for ConfigProblem {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigProblem::Missing { var } => write!(f, "{} variable is not defined", var),
      ConfigProblem::Malformed { var, reason } => write!(f, "{} environment variable is malformed: {}", var, reason),
      ConfigProblem::File { path, reason } => {
        write!(f, "Configuration file {} could not be loaded: {}", path.display(), reason)
      }
    }
  }
}

/// Configuration errors, collected during a single validation pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
  pub problems: Vec<ConfigProblem>,
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    let source_ext = self
      .problems
      .iter()
      .any(|p| matches!(p, ConfigProblem::Malformed { var, .. } if var == "SOURCE_EXT"));
    if source_ext {
      return Some("SOURCE_EXT must be a JSON list of strings. Correct: '[\"zip\",\"tar.gz\"]' Not correct: \"['zip','tar.gz']\"".to_string());
    }

    let missing = self.problems.iter().any(|p| matches!(p, ConfigProblem::Missing { .. }));
    if missing {
      Some("CI_* variables are set by GitLab CI. Define the others in the project CI/CD settings or in releaser.toml.".to_string())
    } else {
      None
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Invalid releaser configuration:")?;
    for problem in &self.problems {
      write!(f, "\n  - {}", problem)?;
    }
    Ok(())
  }
}

/// GitLab API errors
#[derive(Debug)]
pub enum ApiError {
  /// GitLab answered with a non-success status
  Status {
    method: String,
    url: String,
    status: u16,
    body: String,
  },

  /// Request could not be sent or its response read
  Transport { url: String, message: String },

  /// Response body is not what was expected
  Decode { url: String, message: String },

  /// No job with the given name in the pipeline
  JobNotFound { name: String },

  /// The tag has no release note yet
  NoRelease { tag: String },
}

impl ApiError {
  fn exit_code(&self) -> ExitCode {
    match self {
      ApiError::JobNotFound { .. } | ApiError::NoRelease { .. } => ExitCode::Validation,
      _ => ExitCode::System,
    }
  }

  fn help_message(&self) -> Option<String> {
    match self {
      ApiError::Status { status: 401 | 403, .. } => {
        Some("Check that RELEASER_TOKEN holds a token with `api` scope on this project.".to_string())
      }
      ApiError::Status { status: 404, .. } => {
        Some("Check CI_PROJECT_ID, CI_COMMIT_TAG and WIKI_RELEASE point to existing resources.".to_string())
      }
      ApiError::NoRelease { .. } => {
        Some("Publish the pre-release first, the release reuses its note.".to_string())
      }
      ApiError::JobNotFound { .. } => {
        Some("The `job` field of artifact description files must name a job of this pipeline.".to_string())
      }
      _ => None,
    }
  }
}

impl fmt::Display for ApiError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ApiError::Status {
        method,
        url,
        status,
        body,
      } => {
        write!(f, "GitLab API request {} {} failed with status {}", method, url, status)?;
        if !body.is_empty() {
          write!(f, "\n{}", body)?;
        }
        Ok(())
      }
      ApiError::Transport { url, message } => write!(f, "GitLab API request to {} failed: {}", url, message),
      ApiError::Decode { url, message } => write!(f, "Unexpected GitLab API response from {}: {}", url, message),
      ApiError::JobNotFound { name } => write!(f, "No job with given name {} found", name),
      ApiError::NoRelease { tag } => write!(f, "No release information to publish for tag {}", tag),
    }
  }
}

impl From<reqwest::Error> for ApiError {
  fn from(err: reqwest::Error) -> Self {
    let url = err.url().map(|u| u.to_string()).unwrap_or_default();
    if err.is_decode() {
      ApiError::Decode {
        url,
        message: err.to_string(),
      }
    } else {
      ApiError::Transport {
        url,
        message: err.to_string(),
      }
    }
  }
}

/// Artifact description errors
#[derive(Debug)]
pub enum ArtifactError {
  /// Description file is unreadable or not valid JSON
  Unreadable { path: PathBuf, reason: String },

  /// Binary directory produced an invalid glob pattern
  Pattern { pattern: String, reason: String },
}

impl ArtifactError {
  fn help_message(&self) -> Option<String> {
    match self {
      ArtifactError::Unreadable { .. } => Some(
        "Description files are JSON objects with string fields: version, job, category, arch, type.".to_string(),
      ),
      ArtifactError::Pattern { .. } => Some("Check the RELEASE_BIN_DIR value.".to_string()),
    }
  }
}

impl fmt::Display for ArtifactError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ArtifactError::Unreadable { path, reason } => {
        write!(f, "Description file {} could not be read: {}", path.display(), reason)
      }
      ArtifactError::Pattern { pattern, reason } => {
        write!(f, "Invalid artifact pattern {}: {}", pattern, reason)
      }
    }
  }
}

/// Result type alias for the releaser
pub type ReleaserResult<T> = Result<T, ReleaserError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> ReleaserResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> ReleaserResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<ReleaserError>,
{
  fn context(self, ctx: impl Into<String>) -> ReleaserResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> ReleaserResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &ReleaserError) {
  eprintln!("\n❌ CRITICAL {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
