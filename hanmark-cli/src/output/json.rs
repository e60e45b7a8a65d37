//! JSON output formatter

use super::EntryFormatter;
use anyhow::Result;
use hanmark_core::Entry;
use serde::Serialize;
use std::io::Write;

/// JSON formatter - outputs discovered entries as a JSON array
pub struct JsonFormatter<W: Write> {
    writer: W,
    records: Vec<EntryRecord>,
}

/// Data structure for JSON output
#[derive(Debug, Serialize)]
pub struct EntryRecord {
    /// Source file the entry was found in
    pub file: String,
    /// The entry itself: id, key, value, spans, translations
    #[serde(flatten)]
    pub entry: Entry,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            records: Vec::new(),
        }
    }
}

impl<W: Write + Send + Sync> EntryFormatter for JsonFormatter<W> {
    fn format_entry(&mut self, file: &str, entry: &Entry) -> Result<()> {
        self.records.push(EntryRecord {
            file: file.to_string(),
            entry: entry.clone(),
        });
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, &self.records)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hanmark_core::{EntryId, Position, Span, SpanKind};

    #[test]
    fn test_json_array_with_spans() {
        let entry = Entry::new(
            EntryId(7),
            "你好",
            Span::new(Position::new(0, 5), Position::new(0, 7), SpanKind::Tag),
        );

        let mut out = Vec::new();
        {
            let mut formatter = JsonFormatter::new(&mut out);
            formatter.format_entry("page.vue", &entry).unwrap();
            formatter.finish().unwrap();
        }
        let text = String::from_utf8(out).unwrap();
        assert!(text.trim_start().starts_with('['));
        assert!(text.contains("\"file\": \"page.vue\""));
        assert!(text.contains("\"value\": \"你好\""));
        assert!(text.contains("\"kind\": \"tag\""));
    }
}
