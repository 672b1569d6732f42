//! Convlog Core - Core library for conventional changelog generation
//!
//! This crate provides the foundational types, error handling and
//! configuration shared by the commit parser, the changelog generator and
//! the command-line interface.

pub mod config;
pub mod error;
pub mod types;

pub use error::{ChangelogError, ConfigError, ConvlogError, GitError, Result, SyntaxError};
pub use types::ReleaseType;
