//! Configuration validation

use regex::Regex;
use tracing::debug;

use crate::error::{ConfigError, Result};

use super::types::Config;

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_changelog(config)?;
    validate_git(config)?;
    debug!("configuration validation passed");
    Ok(())
}

fn validate_changelog(config: &Config) -> Result<()> {
    if config.changelog.file.as_os_str().is_empty() {
        return Err(invalid("changelog.file", "file cannot be empty"));
    }

    for (i, section) in config.changelog.sections.iter().enumerate() {
        if section.title.is_empty() {
            return Err(invalid(
                &format!("changelog.sections[{}].title", i),
                "title cannot be empty",
            ));
        }

        if section.commit_type.is_empty() {
            return Err(invalid(
                &format!("changelog.sections[{}].type", i),
                "type cannot be empty",
            ));
        }
    }

    if let Some(path) = &config.changelog.github_project_path {
        if path.trim_matches('/').is_empty() || path.chars().any(char::is_whitespace) {
            return Err(invalid(
                "changelog.github_project_path",
                "must be a project path like owner/repo",
            ));
        }
    }

    Ok(())
}

fn validate_git(config: &Config) -> Result<()> {
    if let Some(pattern) = &config.git.tag_pattern {
        if let Err(e) = Regex::new(pattern) {
            return Err(invalid("git.tag_pattern", &e.to_string()));
        }
    }

    Ok(())
}

fn invalid(field: &str, message: &str) -> crate::error::ConvlogError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        message: message.to_string(),
    }
    .into()
}
