//! Placeholder markers embedded in Markdown release notes
//!
//! A placeholder is either self-closing, marking a position in the text:
//!
//! ```text
//! <placeholder content="end-title" />
//! ```
//!
//! or a start/stop pair wrapping a region whose content can be read back and replaced:
//!
//! ```text
//! <placeholder content="note">Message written by a maintainer</placeholder>
//! ```
//!
//! Matching is plain substring search on the literal marker text. Nested or malformed
//! markers get first-match results. Callers must keep marker text out of regular content.

/// Opening of every placeholder marker, whatever its identifier
const PLACEHOLDER_PART: &str = "<placeholder";

/// Stop tag shared by all start/stop pairs
const PLACEHOLDER_STOP: &str = "</placeholder>";

/// Placeholder markers for one content identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
  start: String,
  full: String,
}

impl Placeholder {
  /// Build the markers for the given content identifier
  pub fn new(content_id: &str) -> Self {
    Self {
      start: format!("<placeholder content=\"{}\">", content_id),
      full: format!("<placeholder content=\"{}\" />", content_id),
    }
  }

  /// The start tag of the start/stop pair
  #[allow(dead_code)] // Used in tests
  pub fn start_tag(&self) -> &str {
    &self.start
  }

  /// The stop tag of the start/stop pair
  #[allow(dead_code)] // Used in tests
  pub fn stop_tag(&self) -> &str {
    PLACEHOLDER_STOP
  }

  /// The self-closing marker
  #[allow(dead_code)] // Used in tests
  pub fn marker(&self) -> &str {
    &self.full
  }

  /// Content between the start tag and the following stop tag
  ///
  /// Without a start tag the whole text is returned. Without a stop tag the content
  /// runs to the end of the text.
  pub fn content<'a>(&self, text: &'a str) -> &'a str {
    let Some(pos) = text.find(&self.start) else {
      return text;
    };
    let rest = &text[pos + self.start.len()..];
    match rest.find(PLACEHOLDER_STOP) {
      Some(end) => &rest[..end],
      None => rest,
    }
  }

  /// Text before the self-closing marker, the marker included if `keep_marker` is set
  ///
  /// Without a marker the whole text is returned.
  #[allow(dead_code)] // Counterpart of after(), used in tests
  pub fn before<'a>(&self, text: &'a str, keep_marker: bool) -> &'a str {
    match text.find(&self.full) {
      Some(pos) if keep_marker => &text[..pos + self.full.len()],
      Some(pos) => &text[..pos],
      None => text,
    }
  }

  /// Text after the self-closing marker, the marker included if `keep_marker` is set
  ///
  /// Without a marker the whole text is returned.
  pub fn after<'a>(&self, text: &'a str, keep_marker: bool) -> &'a str {
    match text.find(&self.full) {
      Some(pos) if keep_marker => &text[pos..],
      Some(pos) => &text[pos + self.full.len()..],
      None => text,
    }
  }

  /// Replace the content between the start tag and the following stop tag
  ///
  /// Without a start tag, the content is written at the very beginning and everything up
  /// to the first stop tag is dropped. Without a stop tag, everything after the start tag
  /// is dropped.
  pub fn replace_content(&self, text: &str, content: &str) -> String {
    let head_end = text.find(&self.start).map(|pos| pos + self.start.len()).unwrap_or(0);
    let tail = text[head_end..]
      .find(PLACEHOLDER_STOP)
      .map(|pos| &text[head_end + pos..])
      .unwrap_or("");

    let mut result = String::with_capacity(head_end + content.len() + tail.len());
    result.push_str(&text[..head_end]);
    result.push_str(content);
    result.push_str(tail);
    result
  }

  /// Insert content right after the self-closing marker, or at the beginning without one
  pub fn insert_after(&self, text: &str, content: &str) -> String {
    let pos = text.find(&self.full).map(|pos| pos + self.full.len()).unwrap_or(0);

    let mut result = String::with_capacity(text.len() + content.len());
    result.push_str(&text[..pos]);
    result.push_str(content);
    result.push_str(&text[pos..]);
    result
  }

  /// Strip every placeholder marker from the text, whatever its identifier
  ///
  /// Each `<placeholder` opening is removed up to the next `>` (or to the end of the text),
  /// then every stop tag is removed, until neither is left. Content is kept.
  pub fn clear_all(text: &str) -> String {
    let mut text = text.to_string();
    loop {
      if let Some(pos) = text.find(PLACEHOLDER_PART) {
        let end = text[pos..].find('>').map(|end| pos + end + 1).unwrap_or(text.len());
        text.replace_range(pos..end, "");
      } else if let Some(pos) = text.find(PLACEHOLDER_STOP) {
        text.replace_range(pos..pos + PLACEHOLDER_STOP.len(), "");
      } else {
        return text;
      }
    }
  }
}
