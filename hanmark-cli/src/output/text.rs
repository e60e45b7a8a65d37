//! Plain text output formatter

use super::EntryFormatter;
use anyhow::Result;
use hanmark_core::Entry;
use std::io::{self, Write};

/// Plain text formatter - one line per occurrence
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl TextFormatter<io::Stdout> {
    /// Create a formatter that writes to stdout
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send + Sync> EntryFormatter for TextFormatter<W> {
    fn format_entry(&mut self, file: &str, entry: &Entry) -> Result<()> {
        for span in &entry.spans {
            writeln!(
                self.writer,
                "{file}:{}:{} {} {}",
                span.start.line + 1,
                span.start.character,
                span.kind,
                entry.value
            )?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hanmark_core::{EntryId, Position, Span, SpanKind};

    #[test]
    fn test_one_line_per_span() {
        let mut entry = Entry::new(
            EntryId(1),
            "你好",
            Span::new(Position::new(0, 5), Position::new(0, 7), SpanKind::Tag),
        );
        entry.spans.push(Span::new(
            Position::new(3, 1),
            Position::new(3, 3),
            SpanKind::Attribute,
        ));

        let mut out = Vec::new();
        {
            let mut formatter = TextFormatter::new(&mut out);
            formatter.format_entry("page.vue", &entry).unwrap();
            formatter.finish().unwrap();
        }
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "page.vue:1:5 tag 你好\npage.vue:4:1 attribute 你好\n");
    }
}
