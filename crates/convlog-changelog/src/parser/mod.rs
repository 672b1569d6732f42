//! Commit parsing

mod conventional;
mod lexer;
mod token;

pub use conventional::{normalize_newlines, parse, ConventionalParser};
pub use lexer::tokenize;
pub use token::{Token, TokenKind};

use convlog_core::SyntaxError;

use crate::types::Commit;

/// Trait for commit message parsers
pub trait CommitParser: Send + Sync {
    /// Parse a raw commit message into a structured commit
    fn parse(&self, message: &str) -> Result<Commit, SyntaxError>;
}
