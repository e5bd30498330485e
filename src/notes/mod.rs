//! Release note and wiki page texts
//!
//! Notes are Markdown documents carrying placeholder markers, so that a later run can
//! find its way back into a text written by a previous one:
//!
//! - `end-title`: self-closing, ends the title line of a release note
//! - `note`: wraps the message written by maintainers
//! - `tag`: wraps the latest tag on the wiki release page
//! - `previous-beg`: self-closing, start of the wiki release history

pub mod placeholder;
pub mod template;
pub mod wiki;

pub use placeholder::Placeholder;
pub use template::ReleaseTemplate;
pub use wiki::ReleasePage;

pub const END_TITLE_ID: &str = "end-title";
pub const NOTE_ID: &str = "note";
pub const TAG_ID: &str = "tag";
pub const PREVIOUS_ID: &str = "previous-beg";

/// Title of a published release
pub const RELEASE_TITLE: &str = "# :white_check_mark: Release\n\n";

/// Title of a pre-release, linking to the pipeline which built it
pub fn prerelease_title(pipeline_url: &str) -> String {
  format!(
    "# :gift: Pre-release\n\n[Go to Pipeline page :arrow_forward:]({})\n\n",
    pipeline_url
  )
}

/// Maintainer message stored in a release note
pub fn note_message(note: &str) -> &str {
  Placeholder::new(NOTE_ID).content(note)
}

/// Release note without its title, starting at the `end-title` marker
pub fn note_body(note: &str) -> &str {
  Placeholder::new(END_TITLE_ID).after(note, true)
}
