//! Wiki page listing releases
//!
//! The page shows the latest release in a `tag` and a `note` placeholder pair. Older
//! releases are stacked right after the `previous-beg` marker, newest first.

use crate::notes::{NOTE_ID, PREVIOUS_ID, Placeholder, TAG_ID};

/// Content of the release wiki page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleasePage {
  content: String,
}

impl ReleasePage {
  pub fn new(content: impl Into<String>) -> Self {
    Self {
      content: content.into(),
    }
  }

  /// Tag of the latest release shown on the page
  pub fn current_tag(&self) -> &str {
    Placeholder::new(TAG_ID).content(&self.content)
  }

  /// Make `tag` the latest release and move the previous one into the history
  pub fn add_release(&mut self, tag: &str, note: &str) {
    let ph_tag = Placeholder::new(TAG_ID);
    let ph_note = Placeholder::new(NOTE_ID);
    let ph_previous = Placeholder::new(PREVIOUS_ID);

    let previous = format!(
      "\n\n## {}\n\n{}",
      ph_tag.content(&self.content),
      ph_note.content(&self.content)
    );

    let content = ph_tag.replace_content(&self.content, tag);
    let content = ph_note.replace_content(&content, note);
    self.content = ph_previous.insert_after(&content, &previous);
  }

  pub fn content(&self) -> &str {
    &self.content
  }
}
