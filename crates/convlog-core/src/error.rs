//! Error types for convlog

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using ConvlogError
pub type Result<T> = std::result::Result<T, ConvlogError>;

/// Main error type for convlog operations
#[derive(Debug, Error)]
pub enum ConvlogError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Git-related errors
    #[error(transparent)]
    Git(#[from] GitError),

    /// Changelog-related errors
    #[error(transparent)]
    Changelog(#[from] ChangelogError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found at {0}")]
    NotFound(PathBuf),

    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// IO error
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

/// Git-related errors
#[derive(Debug, Error)]
pub enum GitError {
    /// Repository not found
    #[error("Git repository not found at {0}")]
    RepositoryNotFound(PathBuf),

    /// Not a git repository
    #[error("Not a git repository: {0}")]
    NotARepository(PathBuf),

    /// Failed to open repository
    #[error("Failed to open repository: {0}")]
    OpenFailed(String),

    /// Revision could not be resolved
    #[error("Unknown revision: {0}")]
    UnknownRevision(String),

    /// Tag not found
    #[error("Tag not found: {0}")]
    TagNotFound(String),

    /// Invalid tag pattern
    #[error("Invalid tag pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// Commit message is not valid UTF-8
    #[error("Commit {0} has a message that is not valid UTF-8")]
    InvalidMessage(String),

    /// Git2 library error
    #[error("Git error: {0}")]
    Git2(#[from] git2::Error),
}

/// A violation of the conventional commit grammar.
///
/// `position` is the character offset in the normalized message at which
/// scanning stopped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason} (at offset {position})")]
pub struct SyntaxError {
    /// Human-readable reason
    pub reason: String,
    /// Character offset of the failure
    pub position: usize,
}

impl SyntaxError {
    /// Create a new syntax error
    pub fn new(reason: impl Into<String>, position: usize) -> Self {
        Self {
            reason: reason.into(),
            position,
        }
    }
}

/// Changelog-related errors
#[derive(Debug, Error)]
pub enum ChangelogError {
    /// Commit message does not follow the conventional commit grammar
    #[error("unconventional commit detected - failed to parse '{message}': {source}")]
    Unconventional {
        message: String,
        #[source]
        source: SyntaxError,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ChangelogError {
    /// The syntax error behind an unconventional commit, if any
    pub fn syntax_error(&self) -> Option<&SyntaxError> {
        match self {
            Self::Unconventional { source, .. } => Some(source),
            _ => None,
        }
    }
}
