//! Exit codes for the CLI

use convlog_core::{ChangelogError, ConfigError, ConvlogError, GitError, SyntaxError};

/// Success
pub const SUCCESS: u8 = 0;

/// General error
pub const ERROR: u8 = 1;

/// Configuration error
pub const CONFIG_ERROR: u8 = 2;

/// Git error
pub const GIT_ERROR: u8 = 3;

/// Commit message is not a conventional commit
pub const PARSE_ERROR: u8 = 4;

/// Exit code for the first recognized error in the chain
pub fn for_error(err: &anyhow::Error) -> u8 {
    for cause in err.chain() {
        if let Some(e) = cause.downcast_ref::<ConvlogError>() {
            match e {
                ConvlogError::Config(_) => return CONFIG_ERROR,
                ConvlogError::Git(_) => return GIT_ERROR,
                ConvlogError::Changelog(_) => return PARSE_ERROR,
                ConvlogError::Io(_) => return ERROR,
            }
        }
        if cause.is::<ConfigError>() {
            return CONFIG_ERROR;
        }
        if cause.is::<GitError>() {
            return GIT_ERROR;
        }
        if cause.is::<SyntaxError>() {
            return PARSE_ERROR;
        }
        if let Some(e) = cause.downcast_ref::<ChangelogError>() {
            if e.syntax_error().is_some() {
                return PARSE_ERROR;
            }
        }
    }

    ERROR
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_exit_code_mapping() {
        let err = anyhow::Error::from(GitError::UnknownRevision("v9".to_string()));
        assert_eq!(for_error(&err), GIT_ERROR);

        let err = anyhow::Error::from(ConvlogError::from(ConfigError::InvalidValue {
            field: "changelog.file".to_string(),
            message: "must not be empty".to_string(),
        }));
        assert_eq!(for_error(&err), CONFIG_ERROR);

        let err = anyhow::Error::from(ChangelogError::Unconventional {
            message: "oops".to_string(),
            source: SyntaxError::new("missing type", 0),
        });
        assert_eq!(for_error(&err), PARSE_ERROR);

        let err = anyhow::anyhow!("something else");
        assert_eq!(for_error(&err), ERROR);
    }

    #[test]
    fn test_exit_code_through_context() {
        let result: Result<(), SyntaxError> = Err(SyntaxError::new("empty scope", 5));
        let err = result.context("failed to parse message").unwrap_err();
        assert_eq!(for_error(&err), PARSE_ERROR);
    }
}
