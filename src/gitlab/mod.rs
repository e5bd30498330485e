//! GitLab API access
//!
//! - **client**: project-scoped HTTP client with token authentication
//! - **pipeline**: job lookup and artifact retention
//! - **release**: release note of a tag
//! - **wiki**: wiki page content

pub mod client;
pub mod pipeline;
pub mod release;
pub mod wiki;

pub use client::GitLabClient;
pub use release::TagRelease;
