//! Changelog formatters

mod markdown;

pub use markdown::MarkdownFormatter;

use crate::types::Section;

/// Trait for changelog formatters
pub trait ChangelogFormatter: Send + Sync {
    /// Render a titled changelog from sections in listing order
    fn format(&self, title: &str, sections: &[Section]) -> String;
}
