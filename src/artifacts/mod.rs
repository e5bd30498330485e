//! Release artifacts
//!
//! - **artifact**: binary and source artifacts, their URLs and template view
//! - **discover**: binary discovery from `*.desc` description files
//! - **size**: human-readable file sizes

pub mod artifact;
pub mod discover;
pub mod size;

pub use artifact::ArtifactView;
pub use discover::{discover_binaries, distinct_jobs, source_artifacts};
