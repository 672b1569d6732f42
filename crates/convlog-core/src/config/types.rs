//! Configuration types

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Title of the reserved section that collects every breaking change
pub const BREAKING_CHANGES_TITLE: &str = "Breaking Changes";

/// Scope used for commits that do not declare one
pub const DEFAULT_SCOPE: &str = "common";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Changelog configuration
    pub changelog: ChangelogConfig,

    /// Git configuration
    pub git: GitConfig,
}

/// Changelog configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangelogConfig {
    /// Changelog file path
    pub file: PathBuf,

    /// GitHub project path (`owner/repo`). Enables links for revisions and issues.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_project_path: Option<String>,

    /// Commit messages starting with one of these prefixes are left out
    pub skip_prefixes: Vec<String>,

    /// Mapping of commit types to section titles
    pub sections: Vec<SectionConfig>,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("CHANGELOG.md"),
            github_project_path: None,
            skip_prefixes: vec!["Merge ".to_string(), "Revert ".to_string()],
            sections: default_sections(),
        }
    }
}

impl ChangelogConfig {
    /// Title configured for a commit type
    pub fn title(&self, commit_type: &str) -> Option<&str> {
        self.sections
            .iter()
            .find(|s| s.commit_type == commit_type)
            .map(|s| s.title.as_str())
    }

    /// Whether the section of a commit type is hidden. Unknown types are hidden.
    pub fn is_hidden(&self, commit_type: &str) -> bool {
        self.sections
            .iter()
            .find(|s| s.commit_type == commit_type)
            .map_or(true, |s| s.hidden)
    }

    /// Titles in listing order: breaking changes first, then the visible
    /// section titles sorted lexicographically.
    pub fn visible_titles(&self) -> Vec<String> {
        let mut titles: Vec<String> = self
            .sections
            .iter()
            .filter(|s| !s.hidden && s.title != BREAKING_CHANGES_TITLE)
            .map(|s| s.title.clone())
            .collect();
        titles.sort();
        titles.dedup();

        let mut list = Vec::with_capacity(titles.len() + 1);
        list.push(BREAKING_CHANGES_TITLE.to_string());
        list.extend(titles);
        list
    }

    /// Whether a message should be left out of the changelog
    pub fn is_skipped(&self, message: &str) -> bool {
        self.skip_prefixes
            .iter()
            .any(|p| !p.is_empty() && message.starts_with(p.as_str()))
    }
}

/// A changelog section for one commit type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionConfig {
    /// Commit type (feat, fix, ...)
    #[serde(rename = "type")]
    pub commit_type: String,

    /// Section heading
    pub title: String,

    /// Whether the section is left out of the rendered changelog
    #[serde(default)]
    pub hidden: bool,
}

impl SectionConfig {
    /// Create a new section
    pub fn new(commit_type: impl Into<String>, title: impl Into<String>, hidden: bool) -> Self {
        Self {
            commit_type: commit_type.into(),
            title: title.into(),
            hidden,
        }
    }
}

/// Built-in sections used when none are configured
pub fn default_sections() -> Vec<SectionConfig> {
    vec![
        SectionConfig::new("build", "Build System", true),
        SectionConfig::new("docs", "Documentation", true),
        SectionConfig::new("feat", "New Features", false),
        SectionConfig::new("fix", "Bug Fixes", false),
        SectionConfig::new("refactor", "Code Refactoring", true),
        SectionConfig::new("test", "Test", true),
        SectionConfig::new("chore", "Tasks", true),
    ]
}

/// Git configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitConfig {
    /// Regex restricting which tags count as releases
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_pattern: Option<String>,
}
