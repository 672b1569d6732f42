//! Changelog generation
//!
//! Commits are added one at a time, grouped by section title and scope, and
//! rendered once all of them are in. A generator holds the state of a single
//! run and is not meant to be reused.

use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;

use convlog_core::config::{ChangelogConfig, BREAKING_CHANGES_TITLE, DEFAULT_SCOPE};
use convlog_core::{ChangelogError, ReleaseType};
use tracing::{debug, info, instrument};

use crate::formatter::{ChangelogFormatter, MarkdownFormatter};
use crate::links::LinkBuilder;
use crate::parser::{CommitParser, ConventionalParser};
use crate::types::{ChangelogEntry, ScopeGroup, Section};

/// Diagnostic callback receiving a message and key/value pairs
pub type LogFn = Box<dyn Fn(&str, &[(&str, &str)]) + Send + Sync>;

type ScopeMap = BTreeMap<String, Vec<ChangelogEntry>>;

/// Changelog generator
pub struct ChangelogGenerator {
    parser: Box<dyn CommitParser>,
    formatter: Box<dyn ChangelogFormatter>,
    config: ChangelogConfig,
    links: LinkBuilder,
    log_fn: Option<LogFn>,
    sections: BTreeMap<String, ScopeMap>,
    release_type: ReleaseType,
    count: usize,
}

impl fmt::Debug for ChangelogGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangelogGenerator")
            .field("config", &self.config)
            .field("links", &self.links)
            .field("sections", &self.sections.keys().collect::<Vec<_>>())
            .field("release_type", &self.release_type)
            .field("count", &self.count)
            .finish_non_exhaustive()
    }
}

impl ChangelogGenerator {
    /// Create a new generator with default parser and formatter.
    ///
    /// A configuration without sections falls back to the built-in ones.
    pub fn new(mut config: ChangelogConfig) -> Self {
        if config.sections.is_empty() {
            config.sections = ChangelogConfig::default().sections;
        }

        Self {
            parser: Box::new(ConventionalParser::new()),
            formatter: Box::new(MarkdownFormatter::new()),
            links: LinkBuilder::new(config.github_project_path.as_deref()),
            config,
            log_fn: None,
            sections: BTreeMap::new(),
            release_type: ReleaseType::Patch,
            count: 0,
        }
    }

    /// Use a custom parser
    pub fn with_parser<P: CommitParser + 'static>(mut self, parser: P) -> Self {
        self.parser = Box::new(parser);
        self
    }

    /// Use a custom formatter
    pub fn with_formatter<F: ChangelogFormatter + 'static>(mut self, formatter: F) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    /// Receive a trace of every parse and classification decision
    pub fn with_log_fn<F>(mut self, log_fn: F) -> Self
    where
        F: Fn(&str, &[(&str, &str)]) + Send + Sync + 'static,
    {
        self.log_fn = Some(Box::new(log_fn));
        self
    }

    /// Parse a commit message and file it under its section and scope.
    ///
    /// Breaking commits go to the breaking changes section only and force a
    /// major release. `feat` commits raise the release to at least minor.
    #[instrument(skip(self, message))]
    pub fn add_message(&mut self, revision: &str, message: &str) -> Result<(), ChangelogError> {
        self.log("parsing message", &[("ref", revision), ("msg", message)]);

        let mut commit =
            self.parser
                .parse(message)
                .map_err(|source| ChangelogError::Unconventional {
                    message: message.to_string(),
                    source,
                })?;

        if commit.header.scope.is_empty() {
            commit.header.scope = DEFAULT_SCOPE.to_string();
        }

        if commit.header.commit_type == "feat" {
            self.release_type.escalate(ReleaseType::Minor);
        }

        let mut title = self
            .config
            .title(&commit.header.commit_type)
            .unwrap_or(&commit.header.commit_type)
            .to_string();

        let issue_label = commit.closed_issue().map(|n| self.links.issue(n));
        let entry = ChangelogEntry {
            revision: revision.to_string(),
            revision_label: self.links.revision(revision),
            issue_label,
            commit,
        };

        if entry.is_breaking() {
            self.release_type = ReleaseType::Major;
            title = BREAKING_CHANGES_TITLE.to_string();
        }

        self.log(
            "adding commit",
            &[
                ("type", entry.commit.header.commit_type.as_str()),
                ("scope", entry.scope()),
                ("description", entry.description()),
                ("body", entry.commit.body.as_str()),
                ("title", title.as_str()),
                ("revision", entry.revision_label.as_str()),
                ("issue", entry.issue_label.as_deref().unwrap_or_default()),
            ],
        );
        debug!(
            commit_type = %entry.commit.header.commit_type,
            scope = entry.scope(),
            title = %title,
            breaking = entry.is_breaking(),
            "classified commit"
        );

        self.sections
            .entry(title)
            .or_default()
            .entry(entry.scope().to_string())
            .or_default()
            .push(entry);
        self.count += 1;

        Ok(())
    }

    /// Release type required by the commits added so far
    pub fn release_type(&self) -> ReleaseType {
        self.release_type
    }

    /// Number of commits added
    pub fn len(&self) -> usize {
        self.count
    }

    /// Whether no commits were added
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Sections in listing order.
    ///
    /// Breaking changes come first, then the visible configured sections by
    /// title. Hidden sections and sections without entries are left out.
    /// Scopes are sorted by name. Breaking entries keep their insertion
    /// order; all other entries are sorted by description.
    pub fn sections(&self) -> Vec<Section> {
        self.config
            .visible_titles()
            .into_iter()
            .filter_map(|title| {
                let scopes = self.sections.get(&title)?;
                let breaking = title == BREAKING_CHANGES_TITLE;

                let scopes: Vec<ScopeGroup> = scopes
                    .iter()
                    .filter(|(_, entries)| !entries.is_empty())
                    .map(|(name, entries)| {
                        let mut entries = entries.clone();
                        if !breaking {
                            entries.sort_by(|a, b| a.description().cmp(b.description()));
                        }
                        ScopeGroup {
                            name: name.clone(),
                            entries,
                        }
                    })
                    .collect();

                (!scopes.is_empty()).then(|| Section {
                    title,
                    breaking,
                    scopes,
                })
            })
            .collect()
    }

    /// Render the changelog under a heading
    #[instrument(skip(self))]
    pub fn render(&self, title: &str) -> String {
        info!(title, commit_count = self.count, "rendering changelog");
        self.formatter.format(title, &self.sections())
    }

    /// Render the changelog into a writer
    pub fn write<W: Write>(&self, title: &str, writer: &mut W) -> Result<(), ChangelogError> {
        writer.write_all(self.render(title).as_bytes())?;
        Ok(())
    }

    fn log(&self, message: &str, fields: &[(&str, &str)]) {
        if let Some(log_fn) = &self.log_fn {
            log_fn(message, fields);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use convlog_core::config::SectionConfig;

    fn generator() -> ChangelogGenerator {
        ChangelogGenerator::new(ChangelogConfig::default())
    }

    #[test]
    fn test_changelog_end_to_end() {
        let mut changelog = generator();
        changelog.add_message("00000001", "fix: a fix\n\nthis is the body")
            .unwrap();
        changelog.add_message("00000002", "fix: fixed this").unwrap();
        changelog.add_message("00000003", "fix(router): another fix\n\nCloses: #1")
            .unwrap();
        changelog.add_message("00000004", "feat: a feature").unwrap();

        assert_eq!(changelog.release_type(), ReleaseType::Minor);
        assert_eq!(changelog.len(), 4);

        let expected = "## title


### Bug Fixes

* **common**: a fix (00000001)
  > this is the body
* **common**: fixed this (00000002)
* **router**: another fix (#1, 00000003)


### New Features

* **common**: a feature (00000004)



";
        assert_eq!(changelog.render("title"), expected);
    }

    #[test]
    fn test_breaking_change_is_filed_once() {
        let mut changelog = generator();
        changelog.add_message("00000001", "fix: a fix").unwrap();
        changelog.add_message(
            "00000002",
            "feat(router): add a breaking change\n\nthis is the body\n\nBREAKING CHANGE: breaks all\nCloses: #12345",
        )
        .unwrap();

        assert_eq!(changelog.release_type(), ReleaseType::Major);

        let sections = changelog.sections();
        let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Breaking Changes", "Bug Fixes"]);

        let expected = "## 2.0.0


### Breaking Changes

* **router**
  * **00000002**:
    add a breaking change (#12345)
    > this is the body


### Bug Fixes

* **common**: a fix (00000001)



";
        assert_eq!(changelog.render("2.0.0"), expected);
    }

    #[test]
    fn test_breaking_entries_keep_insertion_order() {
        let mut changelog = generator();
        changelog.add_message("00000002", "feat!: zebra").unwrap();
        changelog.add_message("00000001", "fix!: aardvark").unwrap();

        let sections = changelog.sections();
        let descriptions: Vec<&str> = sections[0].scopes[0]
            .entries
            .iter()
            .map(|e| e.description())
            .collect();
        assert_eq!(descriptions, vec!["zebra", "aardvark"]);
    }

    #[test]
    fn test_standard_entries_sorted_by_description() {
        let mut changelog = generator();
        changelog.add_message("00000001", "fix(b): zebra").unwrap();
        changelog.add_message("00000002", "fix(b): aardvark").unwrap();
        changelog.add_message("00000003", "fix(a): middle").unwrap();

        let sections = changelog.sections();
        let scopes: Vec<&str> = sections[0].scopes.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(scopes, vec!["a", "b"]);
        assert_eq!(sections[0].scopes[1].entries[0].description(), "aardvark");
    }

    #[test]
    fn test_release_type_never_decreases() {
        let mut changelog = generator();
        assert_eq!(changelog.release_type(), ReleaseType::Patch);

        changelog.add_message("1", "fix: a").unwrap();
        assert_eq!(changelog.release_type(), ReleaseType::Patch);

        changelog.add_message("2", "feat: b").unwrap();
        assert_eq!(changelog.release_type(), ReleaseType::Minor);

        changelog.add_message("3", "refactor!: c").unwrap();
        assert_eq!(changelog.release_type(), ReleaseType::Major);

        changelog.add_message("4", "feat: d").unwrap();
        changelog.add_message("5", "fix: e").unwrap();
        assert_eq!(changelog.release_type(), ReleaseType::Major);
    }

    #[test]
    fn test_unconventional_commit() {
        let mut changelog = generator();
        let err = changelog.add_message("1", "not conventional").unwrap_err();

        assert!(matches!(err, ChangelogError::Unconventional { .. }));
        assert!(err.to_string().contains("'not conventional'"));
        assert_eq!(
            err.syntax_error().map(|e| e.reason.as_str()),
            Some("invalid character ' ' in type")
        );
        assert!(changelog.is_empty());
    }

    #[test]
    fn test_hidden_and_unknown_types_are_not_rendered() {
        let mut changelog = generator();
        changelog.add_message("1", "chore: tidy").unwrap();
        changelog.add_message("2", "perf: faster").unwrap();

        assert_eq!(changelog.len(), 2);
        assert!(changelog.sections().is_empty());
        assert_eq!(changelog.render("t"), "## t\n\n\n\n");
    }

    #[test]
    fn test_custom_sections() {
        let config = ChangelogConfig {
            sections: vec![
                SectionConfig::new("perf", "Performance", false),
                SectionConfig::new("fix", "Bug Fixes", true),
            ],
            ..ChangelogConfig::default()
        };
        let mut changelog = ChangelogGenerator::new(config);
        changelog.add_message("1", "perf: faster").unwrap();
        changelog.add_message("2", "fix: hidden").unwrap();

        let titles: Vec<String> = changelog.sections().into_iter().map(|s| s.title).collect();
        assert_eq!(titles, vec!["Performance"]);
    }

    #[test]
    fn test_empty_sections_fall_back_to_defaults() {
        let config = ChangelogConfig {
            sections: Vec::new(),
            ..ChangelogConfig::default()
        };
        let mut changelog = ChangelogGenerator::new(config);
        changelog.add_message("1", "feat: x").unwrap();
        assert_eq!(changelog.sections()[0].title, "New Features");
    }

    #[test]
    fn test_github_links() {
        let config = ChangelogConfig {
            github_project_path: Some("acme/widgets".to_string()),
            ..ChangelogConfig::default()
        };
        let mut changelog = ChangelogGenerator::new(config);
        changelog.add_message(
            "0123456789abcdef0123456789abcdef01234567",
            "fix: linked\n\nFixes #3",
        )
        .unwrap();

        let output = changelog.render("t");
        assert!(output.contains(
            "* **common**: linked ([#3](https://github.com/acme/widgets/issues/3), \
             [01234567](https://github.com/acme/widgets/commit/0123456789abcdef0123456789abcdef01234567))\n"
        ));
    }

    #[test]
    fn test_log_fn_receives_trace() {
        let messages = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&messages);

        let mut changelog = generator().with_log_fn(move |msg, fields| {
            let scope = fields
                .iter()
                .find(|(k, _)| *k == "scope")
                .map(|(_, v)| v.to_string());
            sink.lock().unwrap().push((msg.to_string(), scope));
        });
        changelog.add_message("1", "fix: a").unwrap();

        let messages = messages.lock().unwrap();
        assert_eq!(
            *messages,
            vec![
                ("parsing message".to_string(), None),
                ("adding commit".to_string(), Some("common".to_string())),
            ]
        );
    }

    #[test]
    fn test_debug_lists_titles() {
        let mut changelog = generator();
        changelog.add_message("1", "feat!: big").unwrap();

        let debug = format!("{:?}", changelog);
        assert!(debug.starts_with("ChangelogGenerator {"));
        assert!(debug.contains("\"Breaking Changes\""));
        assert!(debug.contains("release_type: Major"));
    }

    struct PlainFormatter;

    impl ChangelogFormatter for PlainFormatter {
        fn format(&self, title: &str, sections: &[Section]) -> String {
            let mut output = format!("{}\n", title);
            for section in sections {
                for group in &section.scopes {
                    for entry in &group.entries {
                        output.push_str(&format!("{} {}\n", section.title, entry.description()));
                    }
                }
            }
            output
        }
    }

    #[test]
    fn test_custom_formatter() {
        let mut changelog = generator().with_formatter(PlainFormatter);
        changelog.add_message("1", "fix(a): one").unwrap();
        changelog.add_message("2", "feat: two").unwrap();

        assert_eq!(
            changelog.render("1.1.0"),
            "1.1.0\nBug Fixes one\nNew Features two\n"
        );
    }

    struct ChoreParser;

    impl CommitParser for ChoreParser {
        fn parse(&self, message: &str) -> Result<crate::types::Commit, convlog_core::SyntaxError> {
            let mut commit = crate::parse(&format!("fix: {}", message))?;
            commit.header.scope = "legacy".to_string();
            Ok(commit)
        }
    }

    #[test]
    fn test_custom_parser() {
        let mut changelog = generator().with_parser(ChoreParser);
        changelog.add_message("1", "free-form message").unwrap();
        assert_eq!(
            changelog.render("t"),
            "## t\n\n\n### Bug Fixes\n\n* **legacy**: free-form message (1)\n\n\n\n"
        );
    }

    #[test]
    fn test_write_is_deterministic() {
        let mut changelog = generator();
        changelog.add_message("1", "fix(b): two").unwrap();
        changelog.add_message("2", "fix(a): one").unwrap();
        changelog.add_message("3", "feat!: three").unwrap();

        let mut first = Vec::new();
        let mut second = Vec::new();
        changelog.write("t", &mut first).unwrap();
        changelog.write("t", &mut second).unwrap();
        assert_eq!(first, second);
        assert_eq!(String::from_utf8(first).unwrap(), changelog.render("t"));
    }
}
