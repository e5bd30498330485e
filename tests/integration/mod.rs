//! Integration tests running the releaser binary

mod helpers;
mod test_cli;
mod test_prerelease;
mod test_release;
