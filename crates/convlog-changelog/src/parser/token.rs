//! Lexer tokens

use std::fmt;

/// Kind of a lexed commit message fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Commit type (`feat`)
    HeaderType,
    /// `(`
    LeftScopeDelimiter,
    /// Scope between the parentheses
    HeaderScope,
    /// `)`
    RightScopeDelimiter,
    /// `!` after type or scope
    BreakingChange,
    /// `: ` before the description
    DescriptionDelimiter,
    /// Header description
    Description,
    /// Free-form body
    Body,
    /// Footer token (`Reviewed-by`, `BREAKING CHANGE`)
    FooterToken,
    /// `: ` or ` ` after a footer token
    FooterDelimiter,
    /// Footer value, possibly spanning lines
    FooterValue,
}

impl TokenKind {
    /// Get the token kind name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HeaderType => "header-type",
            Self::LeftScopeDelimiter => "left-scope-delimiter",
            Self::HeaderScope => "header-scope",
            Self::RightScopeDelimiter => "right-scope-delimiter",
            Self::BreakingChange => "breaking-change",
            Self::DescriptionDelimiter => "description-delimiter",
            Self::Description => "description",
            Self::Body => "body",
            Self::FooterToken => "footer-token",
            Self::FooterDelimiter => "footer-delimiter",
            Self::FooterValue => "footer-value",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A classified slice of the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Token kind
    pub kind: TokenKind,
    /// Raw text of the token
    pub value: String,
    /// Offset of the first character, counted in characters
    pub position: usize,
}

impl Token {
    /// Create a new token
    pub fn new(kind: TokenKind, value: impl Into<String>, position: usize) -> Self {
        Self {
            kind,
            value: value.into(),
            position,
        }
    }
}
