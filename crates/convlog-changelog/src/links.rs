//! Revision and issue labels

const GITHUB_URL: &str = "https://github.com";

/// Number of characters shown for a linked revision
const SHORT_REVISION_LEN: usize = 8;

/// Builds revision and issue labels, as GitHub links when a project path is set
#[derive(Debug, Clone, Default)]
pub struct LinkBuilder {
    project_url: Option<String>,
}

impl LinkBuilder {
    /// Create a link builder for an optional `owner/repo` project path
    pub fn new(project_path: Option<&str>) -> Self {
        let project_url = project_path
            .map(|p| p.trim_matches('/'))
            .filter(|p| !p.is_empty())
            .map(|p| format!("{}/{}", GITHUB_URL, p));

        Self { project_url }
    }

    /// Label for a revision: the raw identifier, or `[short](url/commit/full)`
    pub fn revision(&self, revision: &str) -> String {
        match &self.project_url {
            Some(url) => {
                let short: String = revision.chars().take(SHORT_REVISION_LEN).collect();
                format!("[{}]({}/commit/{})", short, url, revision)
            }
            None => revision.to_string(),
        }
    }

    /// Label for an issue: `#N`, or `[#N](url/issues/N)`
    pub fn issue(&self, number: u64) -> String {
        match &self.project_url {
            Some(url) => format!("[#{}]({}/issues/{})", number, url, number),
            None => format!("#{}", number),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_labels() {
        let links = LinkBuilder::new(None);
        assert_eq!(links.revision("0123456789abcdef"), "0123456789abcdef");
        assert_eq!(links.issue(42), "#42");
    }

    #[test]
    fn test_github_labels() {
        let links = LinkBuilder::new(Some("acme/widgets"));
        assert_eq!(
            links.revision("0123456789abcdef"),
            "[01234567](https://github.com/acme/widgets/commit/0123456789abcdef)"
        );
        assert_eq!(
            links.issue(42),
            "[#42](https://github.com/acme/widgets/issues/42)"
        );
    }

    #[test]
    fn test_short_revision_and_blank_path() {
        let links = LinkBuilder::new(Some("/acme/widgets/"));
        assert_eq!(
            links.revision("abc"),
            "[abc](https://github.com/acme/widgets/commit/abc)"
        );

        assert_eq!(LinkBuilder::new(Some("/")).issue(9), "#9");
    }
}
