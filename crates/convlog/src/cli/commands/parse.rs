//! Parse command

use std::io::Read;

use anyhow::Context;
use clap::Args;
use serde::Serialize;
use tracing::info;

use convlog_changelog::{parse, Commit};

use crate::cli::output::key_value;
use crate::cli::{Cli, OutputFormat};

/// Parse a single commit message
#[derive(Debug, Args)]
pub struct ParseCommand {
    /// Commit message (read from stdin when omitted)
    pub message: Option<String>,
}

/// A parsed commit with its derived properties
#[derive(Debug, Serialize)]
struct ParseReport {
    #[serde(flatten)]
    commit: Commit,
    breaking_message: Option<String>,
    closed_issue: Option<u64>,
}

impl ParseCommand {
    /// Execute the parse command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        let message = match &self.message {
            Some(message) => message.clone(),
            None => {
                let mut buffer = String::new();
                std::io::stdin()
                    .read_to_string(&mut buffer)
                    .context("failed to read commit message from stdin")?;
                buffer
            }
        };
        info!(length = message.len(), "executing parse command");

        let commit = parse(&message).context("not a conventional commit")?;

        match cli.format {
            OutputFormat::Json => {
                let report = ParseReport {
                    breaking_message: commit.breaking_message().map(String::from),
                    closed_issue: commit.closed_issue(),
                    commit,
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            OutputFormat::Text => {
                for line in describe(&commit) {
                    println!("{}", line);
                }
            }
        }

        Ok(())
    }
}

fn describe(commit: &Commit) -> Vec<String> {
    let header = &commit.header;
    let mut lines = vec![
        key_value("type", &header.commit_type),
        key_value(
            "scope",
            if header.scope.is_empty() { "-" } else { header.scope.as_str() },
        ),
        key_value("description", &header.description),
        key_value("breaking", commit.breaking_message().unwrap_or("no")),
    ];

    if let Some(issue) = commit.closed_issue() {
        lines.push(key_value("closes", &format!("#{}", issue)));
    }

    if !commit.body.is_empty() {
        lines.push(key_value("body", &commit.body.replace('\n', "\n    ")));
    }

    for footer in &commit.footers {
        lines.push(key_value("footer", &format!("{}: {}", footer.token, footer.value)));
    }

    lines
}
