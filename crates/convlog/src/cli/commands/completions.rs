//! Completions command

use std::path::{Path, PathBuf};

use clap::{Args, Command, CommandFactory};
use clap_complete::{generate, generate_to, Shell};
use tracing::info;

use crate::cli::output::{self, path_style};
use crate::cli::Cli;

/// Print or install shell completions for convlog
#[derive(Debug, Args)]
pub struct CompletionsCommand {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,

    /// Write the script into this directory, named after the shell's convention
    #[arg(short = 'd', long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,
}

impl CompletionsCommand {
    /// Execute the completions command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(shell = %self.shell, out_dir = ?self.out_dir, "executing completions command");
        let mut cmd = Cli::command();

        match &self.out_dir {
            Some(dir) => {
                let path = install(self.shell, &mut cmd, dir)?;
                if !cli.quiet {
                    output::success(&format!(
                        "{} completions written to {}",
                        self.shell,
                        path_style().apply_to(path.display())
                    ));
                }
            }
            None => {
                let bin_name = cmd.get_name().to_string();
                generate(self.shell, &mut cmd, bin_name, &mut std::io::stdout());
            }
        }

        Ok(())
    }
}

/// Write the completion script for `shell` into `dir` and return its path
fn install(shell: Shell, cmd: &mut Command, dir: &Path) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let bin_name = cmd.get_name().to_string();
    Ok(generate_to(shell, cmd, bin_name, dir)?)
}
