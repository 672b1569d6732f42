//! Commit history operations

use chrono::{TimeZone, Utc};
use git2::Sort;
use tracing::{debug, instrument};

use convlog_core::error::GitError;

use crate::repository::{GitRepo, Result};
use crate::types::CommitInfo;

impl GitRepo {
    /// List commit hashes reachable from `to` but not from `from`, newest first.
    ///
    /// Without `from` every ancestor of `to` is listed.
    #[instrument(skip(self))]
    pub fn rev_list(&self, from: Option<&str>, to: &str) -> Result<Vec<String>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push(self.resolve(to)?)?;

        if let Some(from) = from {
            revwalk.hide(self.resolve(from)?)?;
        }

        let revs = revwalk
            .map(|oid| oid.map(|o| o.to_string()))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        debug!(count = revs.len(), "listed revisions");
        Ok(revs)
    }

    /// Retrieve a single commit with its raw message
    pub fn commit(&self, rev: &str) -> Result<CommitInfo> {
        let oid = self.resolve(rev)?;
        let commit = self.repo.find_commit(oid)?;
        commit_to_info(&commit)
    }

    /// Commits in `from..to`, newest first
    pub fn commits_between(&self, from: Option<&str>, to: &str) -> Result<Vec<CommitInfo>> {
        self.rev_list(from, to)?
            .iter()
            .map(|rev| self.commit(rev))
            .collect()
    }
}

/// Convert a git2 Commit to CommitInfo
fn commit_to_info(commit: &git2::Commit<'_>) -> Result<CommitInfo> {
    let hash = commit.id().to_string();
    let author = commit.author();

    let message = commit
        .message()
        .ok_or_else(|| GitError::InvalidMessage(hash.clone()))?
        .trim()
        .to_string();

    let timestamp = Utc
        .timestamp_opt(commit.time().seconds(), 0)
        .single()
        .unwrap_or_else(Utc::now);

    Ok(CommitInfo::new(
        hash,
        message,
        author.name().unwrap_or("Unknown"),
        author.email().unwrap_or("unknown@example.com"),
        timestamp,
    ))
}
