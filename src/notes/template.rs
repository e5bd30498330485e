//! Release note template rendering
//!
//! Templates use handlebars syntax and receive:
//!
//! - `current_message`: message kept from the existing note
//! - `artifacts`: list of artifacts with `name`, `category`, `arch`, `type`, `url`,
//!   `size` and `icon`
//!
//! Output is Markdown, so values are inserted without HTML escaping.

use crate::artifacts::ArtifactView;
use crate::core::error::{ReleaserResult, ResultExt};
use handlebars::Handlebars;
use serde::Serialize;
use std::fs;
use std::path::Path;

const BUILTIN_TEMPLATE: &str = include_str!("../../templates/release_template.md");
const TEMPLATE_NAME: &str = "release_note";

#[derive(Serialize)]
struct NoteContext<'a> {
  current_message: &'a str,
  artifacts: &'a [ArtifactView],
}

/// Compiled release note template
pub struct ReleaseTemplate {
  registry: Handlebars<'static>,
}

impl ReleaseTemplate {
  /// Template shipped with the releaser
  pub fn builtin() -> ReleaserResult<Self> {
    Self::from_source(BUILTIN_TEMPLATE)
  }

  /// Compile a template from its source
  pub fn from_source(source: &str) -> ReleaserResult<Self> {
    let mut registry = Handlebars::new();
    registry.register_escape_fn(handlebars::no_escape);
    registry.register_template_string(TEMPLATE_NAME, source)?;
    Ok(Self { registry })
  }

  /// Load the template at `path`, or the built-in one
  pub fn load(path: Option<&Path>) -> ReleaserResult<Self> {
    match path {
      Some(path) => {
        tracing::debug!(path = %path.display(), "loading release template");
        let source =
          fs::read_to_string(path).with_context(|| format!("Failed to read release template {}", path.display()))?;
        Self::from_source(&source)
      }
      None => Self::builtin(),
    }
  }

  /// Render the note body
  pub fn render(&self, current_message: &str, artifacts: &[ArtifactView]) -> ReleaserResult<String> {
    let context = NoteContext {
      current_message,
      artifacts,
    };
    Ok(self.registry.render(TEMPLATE_NAME, &context)?)
  }
}
