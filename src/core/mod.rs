//! Configuration and error handling shared by every workflow
//!
//! - **config**: environment and releaser.toml settings, validated at startup
//! - **error**: error types with exit codes and contextual help messages

pub mod config;
pub mod error;
