//! Mode-aware CJK fragment discovery and offset-tracking rewriting
//!
//! This crate locates hardcoded natural-language text in mixed-syntax source
//! documents (template markup plus embedded script blocks, or script-only
//! files), deduplicates the discovered fragments into a registry, classifies
//! the syntactic shape each occurrence sits in, and rewrites keyed fragments
//! into i18n call expressions while keeping every not-yet-rewritten span's
//! coordinates valid across the edit sequence.
//!
//! # Architecture
//!
//! The pipeline is strictly layered:
//! - **Scanner**: line-oriented, mode-aware discovery over masked text
//! - **Registry**: dedup-by-value store of entries and their occurrences
//! - **Classifier**: per-occurrence syntactic shape and boundary correction
//! - **Rewriter**: sequential edits with running line/character offsets
//!
//! The editor surface, highlight drawing, and translation transport sit
//! behind the [`Document`], [`HighlightSink`], and [`TranslationProvider`]
//! traits; the core performs no I/O of its own.
//!
//! # Example
//!
//! ```rust
//! use hanmark_core::{
//!     rewrite, Config, NoopHighlights, Registry, ScanMode, Scanner, TextBuffer,
//! };
//!
//! let mut doc = TextBuffer::new("<template><div>你好</div></template>");
//! let mut registry = Registry::new();
//! let mut sink = NoopHighlights::new();
//!
//! let summary = Scanner::new(&mut registry, &mut sink).scan(&doc, ScanMode::Outside);
//! assert_eq!(summary.spans, 1);
//!
//! let id = registry.entries()[0].id;
//! registry.update(id, "greeting", "你好");
//!
//! let config = Config::default();
//! rewrite(&mut doc, &registry, &config, &mut sink).unwrap();
//! assert_eq!(doc.text(), "<template><div>{{$t('greeting')}}</div></template>");
//! ```

#![warn(missing_docs)]

pub mod charclass;
pub mod classify;
pub mod config;
pub mod document;
pub mod error;
pub mod highlight;
pub mod mask;
pub mod registry;
pub mod rewrite;
pub mod scanner;
pub mod translate;
pub mod types;

pub use classify::{classify, Classification, ContextShape};
pub use config::{Config, ConfigBuilder};
pub use document::{Document, EditDelta, Range, TextBuffer};
pub use error::{Error, Result};
pub use highlight::{HighlightHandle, HighlightSink, NoopHighlights, RecordingHighlights};
pub use registry::{AddOutcome, Registry};
pub use rewrite::{rewrite, RewriteReport};
pub use scanner::{ScanMode, ScanSummary, Scanner};
pub use translate::{translate_entries, Translation, TranslationProvider, TranslationReport};
pub use types::{Entry, EntryId, Position, Span, SpanKind};
