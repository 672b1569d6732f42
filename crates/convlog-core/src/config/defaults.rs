//! Default configuration values

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "convlog.yaml";

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "convlog.toml";

/// Alternative configuration file name (YAML)
pub const ALT_CONFIG_FILE: &str = ".convlog.yaml";

/// Alternative configuration file name (TOML)
pub const ALT_CONFIG_TOML: &str = ".convlog.toml";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_YAML,
        DEFAULT_CONFIG_TOML,
        ALT_CONFIG_FILE,
        ALT_CONFIG_TOML,
    ]
}

/// Default configuration template
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# convlog configuration

changelog:
  file: CHANGELOG.md
  # github_project_path: owner/repo
  skip_prefixes:
    - "Merge "
    - "Revert "
  sections:
    - type: build
      title: Build System
      hidden: true
    - type: docs
      title: Documentation
      hidden: true
    - type: feat
      title: New Features
      hidden: false
    - type: fix
      title: Bug Fixes
      hidden: false
    - type: refactor
      title: Code Refactoring
      hidden: true
    - type: test
      title: Test
      hidden: true
    - type: chore
      title: Tasks
      hidden: true

# git:
#   tag_pattern: "^v[0-9]+"
"#;
