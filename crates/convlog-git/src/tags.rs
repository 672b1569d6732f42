//! Tag operations

use chrono::{FixedOffset, NaiveDate, Offset, TimeZone, Utc};
use regex::Regex;
use tracing::{debug, instrument};

use crate::repository::{GitRepo, Result};
use crate::types::TagInfo;
use convlog_core::error::GitError;

impl GitRepo {
    /// Get all tags that point (directly or through an annotated tag) at a commit
    #[instrument(skip(self))]
    pub fn tags(&self) -> Result<Vec<TagInfo>> {
        let mut tags = Vec::new();

        self.repo.tag_foreach(|oid, name| {
            let name = String::from_utf8_lossy(name)
                .trim_start_matches("refs/tags/")
                .to_string();

            let Ok(object) = self.repo.find_object(oid, None) else {
                return true;
            };
            let Ok(commit) = object.peel_to_commit() else {
                return true;
            };

            let when = commit.author().when();
            let mut tag_info = TagInfo::new(&name, commit.id().to_string());
            if let Some(timestamp) = Utc.timestamp_opt(when.seconds(), 0).single() {
                tag_info = tag_info.with_timestamp(timestamp);
            }

            if let Some(msg) = object.as_tag().and_then(|t| t.message()) {
                tag_info = tag_info.with_message(msg.trim());
            }

            tags.push(tag_info);
            true
        })?;

        debug!(count = tags.len(), "listed all tags");
        Ok(tags)
    }

    /// Get tags matching a pattern
    pub fn tags_matching(&self, pattern: &str) -> Result<Vec<TagInfo>> {
        let regex = Regex::new(pattern).map_err(|e| GitError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;

        let matching = self
            .tags()?
            .into_iter()
            .filter(|t| regex.is_match(&t.name))
            .collect();

        Ok(matching)
    }

    /// Tags carrying a semantic version, highest version first
    #[instrument(skip(self))]
    pub fn version_tags(&self, pattern: Option<&str>) -> Result<Vec<TagInfo>> {
        let tags = match pattern {
            Some(p) => self.tags_matching(p)?,
            None => self.tags()?,
        };

        let mut versioned: Vec<_> = tags
            .into_iter()
            .filter_map(|t| t.semver().map(|v| (t, v)))
            .collect();

        versioned.sort_by(|a, b| b.1.cmp(&a.1));

        Ok(versioned.into_iter().map(|(t, _)| t).collect())
    }

    /// Find the latest tag by semantic version
    pub fn find_latest_tag(&self, pattern: Option<&str>) -> Result<Option<TagInfo>> {
        let result = self.version_tags(pattern)?.into_iter().next();
        debug!(latest = ?result.as_ref().map(|t| &t.name), "found latest tag");
        Ok(result)
    }

    /// Find a specific tag by name
    pub fn find_tag(&self, name: &str) -> Result<Option<TagInfo>> {
        let tag_ref = format!("refs/tags/{}", name);

        match self.repo.find_reference(&tag_ref) {
            Ok(reference) => {
                let target = reference.peel_to_commit()?;
                Ok(Some(TagInfo::new(name, target.id().to_string())))
            }
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(None),
            Err(e) => Err(GitError::Git2(e)),
        }
    }

    /// Date of the tagged commit, in the author's own time zone
    pub fn tag_date(&self, name: &str) -> Result<NaiveDate> {
        if self.find_tag(name)?.is_none() {
            return Err(GitError::TagNotFound(name.to_string()));
        }

        let commit = self.repo.find_commit(self.resolve(name)?)?;
        let when = commit.author().when();

        let offset = FixedOffset::east_opt(when.offset_minutes() * 60).unwrap_or_else(|| Utc.fix());
        let date = offset
            .timestamp_opt(when.seconds(), 0)
            .single()
            .map(|dt| dt.date_naive())
            .ok_or_else(|| GitError::TagNotFound(name.to_string()))?;

        Ok(date)
    }
}
