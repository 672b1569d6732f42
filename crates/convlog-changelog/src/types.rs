//! Commit and changelog types

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Footer token declaring a breaking change
pub const BREAKING_CHANGE_TOKEN: &str = "BREAKING CHANGE";

static ISSUE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#(\d+)").expect("Invalid regex"));

/// A parsed conventional commit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Header line
    pub header: Header,
    /// Body text, trimmed. Empty if the commit has no body.
    pub body: String,
    /// Footers in message order
    pub footers: Vec<Footer>,
    /// Whether the header carries a `!` marker
    pub breaking_marker: bool,
}

impl Commit {
    /// The breaking change message, if the commit is breaking.
    ///
    /// The value of the first `BREAKING CHANGE` / `BREAKING-CHANGE` footer wins.
    /// Without such a footer a header `!` marker yields the description.
    pub fn breaking_message(&self) -> Option<&str> {
        let footer = self
            .footers
            .iter()
            .find(|f| f.is_breaking())
            .map(|f| f.value.as_str())
            .unwrap_or_default();

        if !footer.is_empty() {
            return Some(footer);
        }

        if self.breaking_marker && !self.header.description.is_empty() {
            return Some(&self.header.description);
        }

        None
    }

    /// Whether the commit introduces a breaking change
    pub fn is_breaking(&self) -> bool {
        self.breaking_message().is_some()
    }

    /// Issue number closed by this commit.
    ///
    /// Only the first footer whose token contains `close` or `fix` (case
    /// insensitive) is considered; its value must reference `#<number>`.
    pub fn closed_issue(&self) -> Option<u64> {
        let footer = self.footers.iter().find(|f| {
            let token = f.token.to_lowercase();
            token.contains("close") || token.contains("fix")
        })?;

        ISSUE_REGEX
            .captures(&footer.value)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
    }
}

/// The header line of a conventional commit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Commit type (feat, fix, ...)
    #[serde(rename = "type")]
    pub commit_type: String,
    /// Scope, empty if none was given
    pub scope: String,
    /// Description
    pub description: String,
}

/// A footer (trailer) of a conventional commit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Footer {
    /// Footer token (e.g., "BREAKING CHANGE", "Closes", "Reviewed-by")
    pub token: String,
    /// Footer value
    pub value: String,
}

impl Footer {
    /// Create a new footer
    pub fn new(token: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            value: value.into(),
        }
    }

    /// Whether the token is `BREAKING CHANGE` or `BREAKING-CHANGE`
    pub fn is_breaking(&self) -> bool {
        self.token.replacen('-', " ", 1) == BREAKING_CHANGE_TOKEN
    }
}

/// A commit filed in the changelog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangelogEntry {
    /// Revision identifier as given by the caller
    pub revision: String,
    /// Revision as rendered (plain or as a link)
    pub revision_label: String,
    /// Closed issue as rendered (plain or as a link)
    pub issue_label: Option<String>,
    /// The parsed commit
    pub commit: Commit,
}

impl ChangelogEntry {
    /// Scope of the entry
    pub fn scope(&self) -> &str {
        &self.commit.header.scope
    }

    /// Description of the entry
    pub fn description(&self) -> &str {
        &self.commit.header.description
    }

    /// Whether the entry is a breaking change
    pub fn is_breaking(&self) -> bool {
        self.commit.is_breaking()
    }
}

/// A rendered changelog section with its scope groups in output order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    /// Section heading
    pub title: String,
    /// Whether this is the breaking changes section
    pub breaking: bool,
    /// Scope groups sorted by name
    pub scopes: Vec<ScopeGroup>,
}

impl Section {
    /// Number of entries across all scopes
    pub fn len(&self) -> usize {
        self.scopes.iter().map(|s| s.entries.len()).sum()
    }

    /// Whether the section has no entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Entries of one scope within a section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScopeGroup {
    /// Scope name
    pub name: String,
    /// Entries in output order
    pub entries: Vec<ChangelogEntry>,
}
