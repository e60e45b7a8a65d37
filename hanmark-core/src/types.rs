//! Core types for fragment discovery and rewriting

use core::fmt;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::highlight::HighlightHandle;

/// A (line, character) pair in original, pre-edit document coordinates
///
/// Character indexes count Unicode scalar values, never bytes. Positions are
/// immutable once recorded during scanning; the rewriter translates them into
/// current-document coordinates without mutating the stored value.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Position {
    /// Zero-based line number
    pub line: usize,
    /// Zero-based character index within the line
    pub character: usize,
}

impl Position {
    /// Create a new position
    pub fn new(line: usize, character: usize) -> Self {
        Self { line, character }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.character)
    }
}

/// Syntactic context a span was discovered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpanKind {
    /// Inline text of a markup tag
    Tag,
    /// Quoted attribute value
    Attribute,
    /// String literal inside a script region
    Script,
    /// Operator-selected range
    Custom,
}

impl fmt::Display for SpanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpanKind::Tag => write!(f, "tag"),
            SpanKind::Attribute => write!(f, "attribute"),
            SpanKind::Script => write!(f, "script"),
            SpanKind::Custom => write!(f, "custom"),
        }
    }
}

/// One occurrence of a fragment's text in the document
///
/// The highlight handle is leased from the [`HighlightSink`] that was active
/// at discovery time and must be released when the span is removed.
///
/// [`HighlightSink`]: crate::highlight::HighlightSink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// Start of the occurrence, inclusive
    pub start: Position,
    /// End of the occurrence, exclusive in the character dimension
    pub end: Position,
    /// Syntactic context the occurrence was found in
    pub kind: SpanKind,
    /// Leased highlight, if any
    #[serde(skip)]
    pub highlight: Option<HighlightHandle>,
}

impl Span {
    /// Create a span with no highlight attached
    pub fn new(start: Position, end: Position, kind: SpanKind) -> Self {
        Self {
            start,
            end,
            kind,
            highlight: None,
        }
    }

    /// Rectangular containment over the (line, character) plane
    pub fn contains(&self, point: Position) -> bool {
        point.line >= self.start.line
            && point.line <= self.end.line
            && point.character >= self.start.character
            && point.character <= self.end.character
    }

    /// Whether two spans cover exactly the same range
    pub fn same_range(&self, other: &Span) -> bool {
        self.start == other.start && self.end == other.end
    }
}

/// Unique identifier of a registry entry
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct EntryId(pub u64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The deduplicated record for one distinct fragment value
///
/// Invariant: `spans` is never empty while the entry exists; the registry
/// deletes an entry whose last span is removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    /// Identifier assigned at creation time
    pub id: EntryId,
    /// Assigned lookup key; empty until an operator assigns one
    pub key: String,
    /// The fragment's exact text
    pub value: String,
    /// All known occurrences, in discovery order
    pub spans: Vec<Span>,
    /// Per-language translations keyed by language code
    pub translations: BTreeMap<String, String>,
}

impl Entry {
    /// Create an entry holding its first occurrence
    pub fn new(id: EntryId, value: impl Into<String>, span: Span) -> Self {
        Self {
            id,
            key: String::new(),
            value: value.into(),
            spans: vec![span],
            translations: BTreeMap::new(),
        }
    }

    /// Whether an operator has assigned a key
    pub fn has_key(&self) -> bool {
        !self.key.is_empty()
    }
}
