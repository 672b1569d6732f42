//! CLI commands

mod changelog;
mod completions;
mod history;
mod init;
mod parse;

pub use changelog::ChangelogCommand;
pub use completions::CompletionsCommand;
pub use history::HistoryCommand;
pub use init::InitCommand;
pub use parse::ParseCommand;

use convlog_changelog::{ChangelogGenerator, Section};
use convlog_core::config::ChangelogConfig;
use convlog_core::{ChangelogError, ReleaseType};
use convlog_git::CommitInfo;
use serde::Serialize;
use tracing::{debug, warn};

use crate::cli::output;

/// A rendered changelog as printed in JSON mode
#[derive(Debug, Serialize)]
pub struct ChangelogReport {
    pub title: String,
    pub release_type: ReleaseType,
    pub commits: usize,
    pub sections: Vec<Section>,
    pub markdown: String,
}

impl ChangelogReport {
    /// Render a generator under a title
    pub fn new(title: &str, generator: &ChangelogGenerator) -> Self {
        Self {
            title: title.to_string(),
            release_type: generator.release_type(),
            commits: generator.len(),
            sections: generator.sections(),
            markdown: generator.render(title),
        }
    }
}

/// Feed commits into a new changelog generator.
///
/// Messages starting with a configured skip prefix are left out. An
/// unconventional message fails the run unless `ignore` is set, in which case
/// it is reported and skipped.
pub(crate) fn build_changelog(
    config: &ChangelogConfig,
    commits: &[CommitInfo],
    ignore: bool,
    quiet: bool,
) -> Result<ChangelogGenerator, ChangelogError> {
    let mut generator = ChangelogGenerator::new(config.clone()).with_log_fn(|message, fields| {
        let fields = fields
            .iter()
            .map(|(key, value)| format!("{}={:?}", key, value))
            .collect::<Vec<_>>()
            .join(" ");
        debug!(%fields, "{}", message);
    });

    for commit in commits {
        if config.is_skipped(&commit.message) {
            debug!(hash = %commit.short_hash, subject = commit.subject(), "skipping commit");
            continue;
        }

        match generator.add_message(&commit.hash, &commit.message) {
            Ok(()) => {}
            Err(err) if ignore => {
                warn!(hash = %commit.short_hash, error = %err, "ignoring unconventional commit");
                if !quiet {
                    output::warning(&format!(
                        "ignoring {} \"{}\"",
                        commit.short_hash,
                        commit.subject()
                    ));
                }
            }
            Err(err) => return Err(err),
        }
    }

    Ok(generator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn commit(hash: &str, message: &str) -> CommitInfo {
        CommitInfo::new(hash, message, "Test", "test@example.com", Utc::now())
    }

    #[test]
    fn test_build_changelog_skips_prefixes() {
        let commits = vec![
            commit("00000002", "Merge branch 'topic'"),
            commit("00000001", "feat: add parser"),
        ];

        let generator = build_changelog(&ChangelogConfig::default(), &commits, false, true).unwrap();
        assert_eq!(generator.len(), 1);
        assert_eq!(generator.release_type(), ReleaseType::Minor);
    }

    #[test]
    fn test_build_changelog_unconventional() {
        let commits = vec![commit("00000001", "update stuff")];

        let err = build_changelog(&ChangelogConfig::default(), &commits, false, true).unwrap_err();
        assert!(matches!(err, ChangelogError::Unconventional { .. }));

        let generator = build_changelog(&ChangelogConfig::default(), &commits, true, true).unwrap();
        assert!(generator.is_empty());
    }

    #[test]
    fn test_changelog_from_repository() {
        let temp = tempfile::TempDir::new().unwrap();
        let git = git2::Repository::init(temp.path()).unwrap();
        let sig = git2::Signature::now("Test", "test@example.com").unwrap();
        let tree_id = git.index().unwrap().write_tree().unwrap();
        let tree = git.find_tree(tree_id).unwrap();

        let mut parent: Option<git2::Oid> = None;
        for message in [
            "chore: init",
            "feat(cli): add history",
            "Merge branch 'topic'",
            "fix: edge case\n\nCloses #4",
        ] {
            let parents: Vec<git2::Commit<'_>> =
                parent.map(|p| git.find_commit(p).unwrap()).into_iter().collect();
            let refs: Vec<&git2::Commit<'_>> = parents.iter().collect();
            parent = Some(git.commit(Some("HEAD"), &sig, &sig, message, &tree, &refs).unwrap());
        }

        let repo = convlog_git::GitRepo::open(temp.path()).unwrap();
        let commits = repo.commits_between(None, "HEAD").unwrap();
        let generator = build_changelog(&ChangelogConfig::default(), &commits, false, true).unwrap();

        assert_eq!(generator.len(), 3);
        assert_eq!(generator.release_type(), ReleaseType::Minor);

        let markdown = generator.render("t");
        assert!(markdown.contains("### Bug Fixes\n\n* **common**: edge case (#4, "));
        assert!(markdown.contains("### New Features\n\n* **cli**: add history ("));
        assert!(!markdown.contains("init"));
    }

    #[test]
    fn test_report() {
        let commits = vec![commit("00000001", "fix(cli): exit code")];
        let generator = build_changelog(&ChangelogConfig::default(), &commits, false, true).unwrap();

        let report = ChangelogReport::new("1.0.1", &generator);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["title"], "1.0.1");
        assert_eq!(json["release_type"], "patch");
        assert_eq!(json["commits"], 1);
        assert_eq!(json["sections"][0]["title"], "Bug Fixes");
        assert_eq!(json["sections"][0]["scopes"][0]["name"], "cli");
        assert!(json["markdown"]
            .as_str()
            .unwrap()
            .contains("* **cli**: exit code (00000001)"));
    }
}
