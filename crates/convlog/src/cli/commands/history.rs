//! History command

use clap::Args;
use tracing::{debug, info};

use convlog_core::config::load_config_or_default;
use convlog_git::{GitRepo, TagInfo};

use super::{build_changelog, ChangelogReport};
use crate::cli::{Cli, OutputFormat};

/// Generate the changelog of past releases
#[derive(Debug, Args)]
pub struct HistoryCommand {
    /// Stop at this release tag
    #[arg(long, value_name = "TAG", conflicts_with = "num")]
    pub since: Option<String>,

    /// Number of releases to render
    #[arg(short, long, value_name = "N")]
    pub num: Option<usize>,

    /// Skip unconventional commits instead of failing
    #[arg(long)]
    pub ignore: bool,
}

impl HistoryCommand {
    /// Execute the history command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(since = ?self.since, num = ?self.num, "executing history command");
        let cwd = std::env::current_dir()?;
        let (config, _) = load_config_or_default(&cwd)?;
        let repo = GitRepo::discover(&cwd)?;

        let tags = repo.version_tags(config.git.tag_pattern.as_deref())?;
        let count = release_count(&tags, self.since.as_deref(), self.num)?;
        debug!(tags = tags.len(), releases = count, "rendering history");

        let mut reports = Vec::with_capacity(count);
        for pair in tags.windows(2).take(count) {
            let (release, previous) = (&pair[0], &pair[1]);
            let commits = repo.commits_between(Some(&previous.name), &release.name)?;
            let generator = build_changelog(&config.changelog, &commits, self.ignore, cli.quiet)?;

            let date = repo.tag_date(&release.name)?;
            let title = format!("{} ({})", release_version(release), date.format("%Y-%m-%d"));

            match cli.format {
                OutputFormat::Text => print!("{}", generator.render(&title)),
                OutputFormat::Json => reports.push(ChangelogReport::new(&title, &generator)),
            }
        }

        if cli.format == OutputFormat::Json {
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }

        Ok(())
    }
}

/// Number of releases to render from tags sorted newest first.
///
/// Each release needs a predecessor, so the oldest tag is never rendered.
fn release_count(tags: &[TagInfo], since: Option<&str>, num: Option<usize>) -> anyhow::Result<usize> {
    let max = tags.len().saturating_sub(1);

    if let Some(since) = since {
        return tags
            .iter()
            .position(|t| t.name == since)
            .ok_or_else(|| anyhow::anyhow!("tag '{}' not found", since));
    }

    Ok(num.map_or(max, |n| n.min(max)))
}

fn release_version(tag: &TagInfo) -> String {
    tag.semver()
        .map(|v| v.to_string())
        .unwrap_or_else(|| tag.name.clone())
}
