//! Document access boundary and the in-memory text buffer
//!
//! The core never touches an editor or the filesystem directly; everything
//! goes through the [`Document`] trait. [`TextBuffer`] is the in-memory
//! implementation used by the CLI and the test suites.

use crate::error::{Error, Result};
use crate::types::Position;

/// A contiguous range of document text
///
/// `start` is inclusive; `end` is exclusive in the character dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    /// First position covered by the range
    pub start: Position,
    /// Position one past the last covered character
    pub end: Position,
}

impl Range {
    /// Create a new range
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }
}

/// Outcome of one edit as reported by the document accessor
///
/// `lines` is the line-count difference between the new and old text of the
/// edited range; `trailing_chars` is the character-length difference of the
/// final line of that text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EditDelta {
    /// Line-count delta (new minus old)
    pub lines: isize,
    /// Character delta on the trailing line (new minus old)
    pub trailing_chars: isize,
}

/// Read/write access to one document
pub trait Document {
    /// Number of lines in the document
    fn line_count(&self) -> usize;

    /// Text of line `line` without its terminator, or `None` past the end
    fn line_text(&self, line: usize) -> Option<&str>;

    /// Replace `range` with `new_text` and report the resulting shift
    fn apply_edit(&mut self, range: Range, new_text: &str) -> Result<EditDelta>;
}

/// Byte offset of the `chars`-th character of `s`
fn byte_offset(s: &str, chars: usize) -> Option<usize> {
    let mut count = 0;
    for (b, _) in s.char_indices() {
        if count == chars {
            return Some(b);
        }
        count += 1;
    }
    if count == chars {
        Some(s.len())
    } else {
        None
    }
}

/// In-memory line-oriented document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuffer {
    lines: Vec<String>,
}

impl TextBuffer {
    /// Build a buffer from full document text
    pub fn new(text: &str) -> Self {
        Self {
            lines: text.split('\n').map(str::to_string).collect(),
        }
    }

    /// Reassemble the full document text
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    fn check_position(&self, pos: Position) -> Result<usize> {
        let line = self
            .lines
            .get(pos.line)
            .ok_or_else(|| Error::Document(format!("line {} out of bounds", pos.line)))?;
        byte_offset(line, pos.character).ok_or_else(|| {
            Error::Document(format!("character {} out of bounds on line {}", pos.character, pos.line))
        })
    }
}

impl Document for TextBuffer {
    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn line_text(&self, line: usize) -> Option<&str> {
        self.lines.get(line).map(String::as_str)
    }

    fn apply_edit(&mut self, range: Range, new_text: &str) -> Result<EditDelta> {
        if (range.end.line, range.end.character) < (range.start.line, range.start.character) {
            return Err(Error::Document(format!(
                "inverted range {}..{}",
                range.start, range.end
            )));
        }
        let start_byte = self.check_position(range.start)?;
        let end_byte = self.check_position(range.end)?;

        // Old text of the range, for delta reporting.
        let old_text = if range.start.line == range.end.line {
            self.lines[range.start.line][start_byte..end_byte].to_string()
        } else {
            let mut s = self.lines[range.start.line][start_byte..].to_string();
            for line in &self.lines[range.start.line + 1..range.end.line] {
                s.push('\n');
                s.push_str(line);
            }
            s.push('\n');
            s.push_str(&self.lines[range.end.line][..end_byte]);
            s
        };

        let prefix = &self.lines[range.start.line][..start_byte];
        let suffix = &self.lines[range.end.line][end_byte..];
        let merged = format!("{prefix}{new_text}{suffix}");
        let replacement: Vec<String> = merged.split('\n').map(str::to_string).collect();
        self.lines
            .splice(range.start.line..=range.end.line, replacement);

        let old_lines: Vec<&str> = old_text.split('\n').collect();
        let new_lines: Vec<&str> = new_text.split('\n').collect();
        let old_trailing = old_lines.last().map_or(0, |l| l.chars().count());
        let new_trailing = new_lines.last().map_or(0, |l| l.chars().count());
        Ok(EditDelta {
            lines: new_lines.len() as isize - old_lines.len() as isize,
            trailing_chars: new_trailing as isize - old_trailing as isize,
        })
    }
}
