//! Convlog Git - Source-control adapter for changelog generation
//!
//! This crate lists commits and tags of a git repository and retrieves the
//! raw commit messages that are fed to the changelog generator.

mod commits;
mod repository;
mod tags;
pub mod types;

pub use repository::{GitRepo, Result};
pub use types::{CommitInfo, TagInfo};

#[cfg(test)]
pub(crate) mod testing;
