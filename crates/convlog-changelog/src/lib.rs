//! Convlog Changelog - Conventional commit parsing and changelog generation
//!
//! This crate provides the conventional commit lexer and parser, the
//! changelog aggregator and the Markdown renderer.

pub mod formatter;
pub mod generator;
pub mod links;
pub mod parser;
pub mod types;

pub use formatter::{ChangelogFormatter, MarkdownFormatter};
pub use generator::{ChangelogGenerator, LogFn};
pub use links::LinkBuilder;
pub use parser::{parse, CommitParser, ConventionalParser};
pub use types::{ChangelogEntry, Commit, Footer, Header, ScopeGroup, Section};
