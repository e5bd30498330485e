//! Release workflows
//!
//! - **prerelease**: publish the note listing the artifacts built for the tag
//! - **release**: turn the pre-release into the final release and archive it in the wiki
//!
//! Every workflow performs its reads before its first write. With `dry_run` set, the
//! texts that would be written are printed and nothing is sent.

pub mod prerelease;
pub mod release;

pub use prerelease::run_prerelease;
pub use release::run_release;

use crate::core::config::{ReleaseMode, ReleaserConfig};
use crate::core::error::ReleaserResult;

/// Run the workflow selected by the configuration
pub async fn run(config: &ReleaserConfig, dry_run: bool) -> ReleaserResult<()> {
  tracing::info!(mode = %config.mode, tag = %config.commit_tag, "starting");
  match config.mode {
    ReleaseMode::Prerelease => run_prerelease(config, dry_run).await,
    ReleaseMode::Release => run_release(config, dry_run).await,
  }
}

fn print_dry_run(target: &str, content: &str) {
  println!("🔍 Dry-run mode (no changes applied)");
  println!();
  println!("── {} ──", target);
  println!("{}", content);
  println!();
}
