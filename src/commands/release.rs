//! Release workflow

use crate::artifacts::{discover_binaries, distinct_jobs};
use crate::commands::print_dry_run;
use crate::core::config::ReleaserConfig;
use crate::core::error::ReleaserResult;
use crate::gitlab::{GitLabClient, TagRelease, pipeline, wiki};
use crate::notes::{self, Placeholder, ReleasePage};

/// Publish the final release of the tag
///
/// The pre-release title is swapped for the release one, the note is archived on the
/// wiki release page and the artifacts of every job listed in the note are kept.
pub async fn run_release(config: &ReleaserConfig, dry_run: bool) -> ReleaserResult<()> {
  let client = GitLabClient::from_config(config)?;
  let mut release = TagRelease::new(&client, config.commit_tag.as_str());
  let body = release.body().await?;
  let note = format!("{}{}", notes::RELEASE_TITLE, body);

  let slug = config.require_wiki_release()?;
  let mut page = ReleasePage::new(wiki::load_page(&client, slug).await?);
  let previous_tag = page.current_tag().to_string();
  page.add_release(&config.commit_tag, &Placeholder::clear_all(&body));
  tracing::debug!(%previous_tag, "rotating wiki release page");

  let jobs = match &config.release_bin_dir {
    Some(bin_dir) => distinct_jobs(&discover_binaries(bin_dir, &config.desc_ext, &config.commit_tag)?),
    None => {
      tracing::warn!("RELEASE_BIN_DIR is not set, artifacts will not be kept");
      Vec::new()
    }
  };
  let mut job_ids = Vec::with_capacity(jobs.len());
  for job in &jobs {
    job_ids.push((job, pipeline::find_job_id(&client, &config.pipeline_id, job).await?));
  }

  if dry_run {
    print_dry_run(&format!("release note of {}", config.commit_tag), &note);
    print_dry_run(&format!("wiki page {}", slug), page.content());
    for (job, id) in &job_ids {
      println!("Would keep artifacts of job {} ({})", job, id);
    }
    return Ok(());
  }

  release.send(&note).await?;
  wiki::save_page(&client, slug, page.content()).await?;
  for (job, id) in job_ids {
    tracing::info!(%job, id, "keeping job artifacts");
    pipeline::keep_artifacts(&client, id).await?;
  }

  println!("✅ Release published");
  Ok(())
}
