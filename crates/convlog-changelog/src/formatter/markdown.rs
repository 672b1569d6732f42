//! Markdown changelog formatter

use tracing::{debug, instrument};

use super::ChangelogFormatter;
use crate::types::{ChangelogEntry, ScopeGroup, Section};

const TAB_STOP: &str = "  ";

/// Markdown changelog formatter
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    /// Create a new markdown formatter
    pub fn new() -> Self {
        Self
    }

    fn write_section(&self, output: &mut String, section: &Section) {
        output.push_str("\n\n");
        output.push_str(&heading(3, &section.title));
        output.push('\n');

        for scope in &section.scopes {
            if section.breaking {
                self.write_breaking_scope(output, scope);
            } else {
                for entry in &scope.entries {
                    output.push_str(&standard_item(entry));
                }
            }
        }
    }

    fn write_breaking_scope(&self, output: &mut String, scope: &ScopeGroup) {
        if scope.entries.is_empty() {
            return;
        }

        output.push_str(&list_item(1, &bold(&scope.name)));
        for entry in &scope.entries {
            output.push_str(&breaking_item(entry));
        }
    }
}

impl ChangelogFormatter for MarkdownFormatter {
    #[instrument(skip(self, sections), fields(section_count = sections.len()))]
    fn format(&self, title: &str, sections: &[Section]) -> String {
        let mut output = heading(2, title);

        for section in sections.iter().filter(|s| !s.is_empty()) {
            self.write_section(&mut output, section);
        }

        output.push_str("\n\n\n");

        debug!(output_len = output.len(), "markdown changelog formatted");
        output
    }
}

/// `**rev**:` followed by the description, issue and quoted body, nested one level
fn breaking_item(entry: &ChangelogEntry) -> String {
    let mut item = format!("{}:\n{}", bold(&entry.revision_label), entry.description());

    if let Some(issue) = &entry.issue_label {
        item.push_str(&format!(" ({})", issue));
    }

    push_body(&mut item, &entry.commit.body);
    list_item(2, &item)
}

/// `**scope**: description (issue, rev)` with the body quoted below
fn standard_item(entry: &ChangelogEntry) -> String {
    let labels: Vec<&str> = entry
        .issue_label
        .iter()
        .map(String::as_str)
        .chain(std::iter::once(entry.revision_label.as_str()))
        .collect();

    let mut item = format!(
        "{}: {} ({})",
        bold(entry.scope()),
        entry.description(),
        labels.join(", ")
    );

    push_body(&mut item, &entry.commit.body);
    list_item(1, &item)
}

fn push_body(item: &mut String, body: &str) {
    if !body.is_empty() {
        item.push('\n');
        item.push_str(&block_quote(body));
    }
}

fn heading(level: usize, title: &str) -> String {
    format!("{} {}\n", "#".repeat(level), title)
}

fn bold(text: &str) -> String {
    format!("**{}**", text)
}

/// A bullet at `level`; continuation lines are indented under the bullet text
fn list_item(level: usize, text: &str) -> String {
    let indent = TAB_STOP.repeat(level.saturating_sub(1));
    let mut output = format!("{}* ", indent);

    for (i, line) in text.lines().enumerate() {
        if i > 0 {
            output.push_str(&indent);
            output.push_str(TAB_STOP);
        }
        output.push_str(line);
        output.push('\n');
    }

    output
}

fn block_quote(text: &str) -> String {
    text.lines().map(|line| format!("> {}\n", line)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Commit, Header};

    fn entry(scope: &str, description: &str, body: &str, issue: Option<&str>) -> ChangelogEntry {
        ChangelogEntry {
            revision: "00000001".to_string(),
            revision_label: "00000001".to_string(),
            issue_label: issue.map(String::from),
            commit: Commit {
                header: Header {
                    commit_type: "fix".to_string(),
                    scope: scope.to_string(),
                    description: description.to_string(),
                },
                body: body.to_string(),
                footers: Vec::new(),
                breaking_marker: false,
            },
        }
    }

    #[test]
    fn test_list_item_indents_continuation_lines() {
        assert_eq!(list_item(1, "a\nb"), "* a\n  b\n");
        assert_eq!(list_item(2, "a\nb"), "  * a\n    b\n");
    }

    #[test]
    fn test_block_quote() {
        assert_eq!(block_quote("one\n\ntwo"), "> one\n> \n> two\n");
    }

    #[test]
    fn test_standard_item() {
        let e = entry("router", "another fix", "", Some("#1"));
        assert_eq!(standard_item(&e), "* **router**: another fix (#1, 00000001)\n");

        let e = entry("common", "a fix", "this is the body", None);
        assert_eq!(
            standard_item(&e),
            "* **common**: a fix (00000001)\n  > this is the body\n"
        );
    }

    #[test]
    fn test_breaking_item() {
        let e = entry("router", "breaks all", "line one\nline two", Some("#12345"));
        assert_eq!(
            breaking_item(&e),
            "  * **00000001**:\n    breaks all (#12345)\n    > line one\n    > line two\n"
        );
    }

    #[test]
    fn test_empty_changelog() {
        let output = MarkdownFormatter::new().format("title", &[]);
        assert_eq!(output, "## title\n\n\n\n");
    }

    #[test]
    fn test_empty_sections_are_skipped() {
        let sections = vec![Section {
            title: "Bug Fixes".to_string(),
            breaking: false,
            scopes: Vec::new(),
        }];
        let output = MarkdownFormatter::new().format("title", &sections);
        assert!(!output.contains("Bug Fixes"));
    }

    #[test]
    fn test_breaking_section() {
        let sections = vec![Section {
            title: "Breaking Changes".to_string(),
            breaking: true,
            scopes: vec![ScopeGroup {
                name: "api".to_string(),
                entries: vec![entry("api", "drop v1", "", None)],
            }],
        }];
        let output = MarkdownFormatter::new().format("1.0.0", &sections);
        assert_eq!(
            output,
            "## 1.0.0\n\n\n### Breaking Changes\n\n* **api**\n  * **00000001**:\n    drop v1\n\n\n\n"
        );
    }
}
