//! Init command

use std::path::{Path, PathBuf};

use clap::Args;
use tracing::info;

use convlog_core::config::defaults::{DEFAULT_CONFIG_TEMPLATE, DEFAULT_CONFIG_TOML, DEFAULT_CONFIG_YAML};
use convlog_core::config::{render_config, Config};

use crate::cli::output::{self, path_style};
use crate::cli::Cli;

/// Initialize a new convlog configuration
#[derive(Debug, Args)]
pub struct InitCommand {
    /// Force overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,

    /// Write TOML instead of YAML
    #[arg(long)]
    pub toml: bool,

    /// Output file path
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl InitCommand {
    /// Execute the init command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(force = self.force, toml = self.toml, "executing init command");
        let cwd = std::env::current_dir()?;
        let file_name = if self.toml {
            DEFAULT_CONFIG_TOML
        } else {
            DEFAULT_CONFIG_YAML
        };
        let config_path = self.output.clone().unwrap_or_else(|| cwd.join(file_name));

        write_config(&config_path, self.force)?;

        if !cli.quiet {
            output::success(&format!(
                "Created configuration at {}",
                path_style().apply_to(config_path.display())
            ));
            println!();
            println!("Next steps:");
            println!("  1. Edit {} to map commit types to sections", config_path.display());
            println!("  2. Run {} to preview the changelog", path_style().apply_to("convlog changelog --stdout"));
        }

        Ok(())
    }
}

/// Write the default configuration, in TOML when the path ends in `.toml`
fn write_config(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    let content = if path.extension().is_some_and(|e| e == "toml") {
        render_config(&Config::default(), path)?
    } else {
        DEFAULT_CONFIG_TEMPLATE.to_string()
    };

    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use convlog_core::config::load_config;
    use tempfile::TempDir;

    #[test]
    fn test_write_yaml_config() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(DEFAULT_CONFIG_YAML);

        write_config(&path, false).unwrap();
        assert_eq!(load_config(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_write_toml_config() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(DEFAULT_CONFIG_TOML);

        write_config(&path, false).unwrap();
        assert_eq!(load_config(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_existing_config_requires_force() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(DEFAULT_CONFIG_YAML);
        std::fs::write(&path, "changelog: {}\n").unwrap();

        assert!(write_config(&path, false).is_err());
        write_config(&path, true).unwrap();
        assert_eq!(load_config(&path).unwrap(), Config::default());
    }
}
