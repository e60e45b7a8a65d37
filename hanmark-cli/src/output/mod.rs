//! Output formatting module

use anyhow::Result;
use hanmark_core::Entry;

/// Trait for discovered-entry formatters
pub trait EntryFormatter: Send + Sync {
    /// Format one discovered entry of `file`
    fn format_entry(&mut self, file: &str, entry: &Entry) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod markdown;
pub mod text;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;
