//! Markdown output formatter

use super::EntryFormatter;
use anyhow::Result;
use hanmark_core::Entry;
use std::io::Write;

/// Markdown formatter - outputs discovered entries as a table
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    entry_count: usize,
    header_written: bool,
}

impl<W: Write> MarkdownFormatter<W> {
    /// Create a new markdown formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            entry_count: 0,
            header_written: false,
        }
    }
}

impl<W: Write + Send + Sync> EntryFormatter for MarkdownFormatter<W> {
    fn format_entry(&mut self, file: &str, entry: &Entry) -> Result<()> {
        if !self.header_written {
            writeln!(self.writer, "| file | location | kind | text | occurrences |")?;
            writeln!(self.writer, "| --- | --- | --- | --- | --- |")?;
            self.header_written = true;
        }
        let first = &entry.spans[0];
        writeln!(
            self.writer,
            "| {file} | {}:{} | {} | {} | {} |",
            first.start.line + 1,
            first.start.character,
            first.kind,
            entry.value.replace('|', "\\|").replace('\n', " "),
            entry.spans.len()
        )?;
        self.entry_count += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        writeln!(self.writer)?;
        writeln!(self.writer, "*Total entries: {}*", self.entry_count)?;
        self.writer.flush()?;
        Ok(())
    }
}
