//! Utility functions for cross-platform path handling

use std::path::Path;

/// Convert a path to URL format (always forward slashes)
///
/// Artifact paths end up in GitLab download URLs, which expect forward slashes even
/// when the path was discovered on Windows.
pub fn path_to_url_format(path: &Path) -> String {
  #[cfg(target_os = "windows")]
  {
    path.to_string_lossy().replace('\\', "/")
  }
  #[cfg(not(target_os = "windows"))]
  {
    path.to_string_lossy().to_string()
  }
}

/// Last component of a `/`-separated path
pub fn base_name(path: &str) -> &str {
  path.rsplit('/').next().unwrap_or(path)
}
