//! Conventional Commits parser
//!
//! Parses commits following the Conventional Commits specification:
//! https://www.conventionalcommits.org/

use convlog_core::SyntaxError;
use tracing::trace;

use super::lexer::tokenize;
use super::token::TokenKind;
use super::CommitParser;
use crate::types::{Commit, Footer};

/// Parser for Conventional Commits format
#[derive(Debug, Clone, Copy, Default)]
pub struct ConventionalParser;

impl ConventionalParser {
    /// Create a new parser
    pub fn new() -> Self {
        Self
    }
}

impl CommitParser for ConventionalParser {
    fn parse(&self, message: &str) -> Result<Commit, SyntaxError> {
        parse(message)
    }
}

/// Parse a conventional commit message.
///
/// The message is trimmed and its line endings unified before tokenizing.
/// Either the whole message parses or an error is returned.
pub fn parse(message: &str) -> Result<Commit, SyntaxError> {
    let normalized = normalize_newlines(message.trim());
    let tokens = tokenize(&normalized)?;

    let mut commit = Commit::default();

    for token in tokens {
        trace!(kind = %token.kind, position = token.position, "token");

        match token.kind {
            TokenKind::BreakingChange => commit.breaking_marker = true,
            TokenKind::HeaderType => commit.header.commit_type = token.value,
            TokenKind::HeaderScope => commit.header.scope = token.value,
            TokenKind::Description => commit.header.description = token.value.trim().to_string(),
            TokenKind::Body => commit.body = token.value.trim().to_string(),
            TokenKind::FooterToken => commit.footers.push(Footer::new(token.value, "")),
            TokenKind::FooterValue => {
                if let Some(footer) = commit.footers.last_mut() {
                    footer.value = token.value.trim().to_string();
                }
            }
            TokenKind::LeftScopeDelimiter
            | TokenKind::RightScopeDelimiter
            | TokenKind::DescriptionDelimiter
            | TokenKind::FooterDelimiter => {}
        }
    }

    Ok(commit)
}

/// Replace CRLF and lone CR line endings with LF
pub fn normalize_newlines(s: &str) -> String {
    s.replace("\r\n", "\n").replace('\r', "\n")
}
