//! Changelog command

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use clap::Args;
use tracing::{debug, info};

use convlog_core::config::load_config_or_default;
use convlog_git::GitRepo;

use super::{build_changelog, ChangelogReport};
use crate::cli::output::{self, path_style, release_style};
use crate::cli::{Cli, OutputFormat};

/// Generate the changelog for unreleased commits
#[derive(Debug, Args)]
pub struct ChangelogCommand {
    /// Section title (default: "Unreleased (<today>)")
    #[arg(long)]
    pub title: Option<String>,

    /// Exclusive start revision (default: latest release tag)
    #[arg(long, value_name = "REV")]
    pub from: Option<String>,

    /// Inclusive end revision
    #[arg(long, value_name = "REV", default_value = "HEAD")]
    pub to: String,

    /// Print to stdout instead of updating the changelog file
    #[arg(long)]
    pub stdout: bool,

    /// Changelog file (defaults to the configured file)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Skip unconventional commits instead of failing
    #[arg(long)]
    pub ignore: bool,
}

impl ChangelogCommand {
    /// Execute the changelog command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(from = ?self.from, to = %self.to, stdout = self.stdout, "executing changelog command");
        let cwd = std::env::current_dir()?;
        let (config, config_path) = load_config_or_default(&cwd)?;
        if let Some(path) = &config_path {
            debug!(path = %path.display(), "using configuration");
        }

        let repo = GitRepo::discover(&cwd)?;
        if !repo.has_commits() {
            anyhow::bail!("repository {} has no commits", repo.path().display());
        }

        let from = match &self.from {
            Some(rev) => Some(rev.clone()),
            None => repo
                .find_latest_tag(config.git.tag_pattern.as_deref())?
                .map(|tag| tag.name),
        };
        debug!(from = ?from, to = %self.to, "collecting commits");

        let commits = repo.commits_between(from.as_deref(), &self.to)?;
        let generator = build_changelog(&config.changelog, &commits, self.ignore, cli.quiet)?;

        let title = self.title.clone().unwrap_or_else(default_title);
        let markdown = generator.render(&title);

        let written = if self.stdout {
            None
        } else {
            let path = self
                .output
                .clone()
                .unwrap_or_else(|| repo.path().join(&config.changelog.file));
            prepend(&path, &markdown)?;
            Some(path)
        };

        match cli.format {
            OutputFormat::Json => {
                let report = ChangelogReport::new(&title, &generator);
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            OutputFormat::Text => {
                match &written {
                    None => print!("{}", markdown),
                    Some(path) if !cli.quiet => output::success(&format!(
                        "Changelog written to {}",
                        path_style().apply_to(path.display())
                    )),
                    Some(_) => {}
                }

                if !cli.quiet {
                    output::info(&format!(
                        "{} commits, release type: {}",
                        generator.len(),
                        release_style().apply_to(generator.release_type())
                    ));
                }
            }
        }

        Ok(())
    }
}

fn default_title() -> String {
    format!("Unreleased ({})", chrono::Local::now().format("%Y-%m-%d"))
}

/// Write `content` in front of the existing file content, creating the file if needed
fn prepend(path: &Path, content: &str) -> std::io::Result<()> {
    let existing = match std::fs::read_to_string(path) {
        Ok(existing) => existing,
        Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
        Err(e) => return Err(e),
    };

    std::fs::write(path, format!("{}{}", content, existing))
}
