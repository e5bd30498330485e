//! Pre-release workflow

use crate::artifacts::{discover_binaries, source_artifacts};
use crate::commands::print_dry_run;
use crate::core::config::ReleaserConfig;
use crate::core::error::ReleaserResult;
use crate::gitlab::{GitLabClient, TagRelease};
use crate::notes::{self, ReleaseTemplate};

/// Publish the pre-release note of the tag
///
/// The message already written by maintainers in the note is kept, the artifact list
/// is rebuilt from the binary directory and the source extensions.
pub async fn run_prerelease(config: &ReleaserConfig, dry_run: bool) -> ReleaserResult<()> {
  let client = GitLabClient::from_config(config)?;
  let mut release = TagRelease::new(&client, config.commit_tag.as_str());
  let current_message = release.message().await?;

  let bin_dir = config.require_bin_dir()?;
  let mut artifacts = discover_binaries(bin_dir, &config.desc_ext, &config.commit_tag)?;
  if artifacts.is_empty() {
    tracing::warn!(dir = %bin_dir.display(), tag = %config.commit_tag, "no binary artifact found");
  }
  artifacts.extend(source_artifacts(config.source_ext.as_deref().unwrap_or_default()));

  let views = artifacts
    .iter()
    .map(|artifact| artifact.view(&config.project_url, &config.commit_tag))
    .collect::<ReleaserResult<Vec<_>>>()?;

  let template = ReleaseTemplate::load(config.template.as_deref())?;
  let body = template.render(&current_message, &views)?;
  let note = format!("{}{}", notes::prerelease_title(&config.pipeline_url()), body);

  if dry_run {
    print_dry_run(&format!("release note of {}", config.commit_tag), &note);
    return Ok(());
  }

  release.send(&note).await?;
  println!("✅ Pre-release published");
  Ok(())
}
