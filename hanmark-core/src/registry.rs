//! Deduplicating fragment registry
//!
//! Owns every entry and span discovered in one document. Fragments with
//! identical text merge into a single entry no matter which syntactic context
//! they were found in; that unification is deliberate.

use crate::highlight::HighlightSink;
use crate::types::{Entry, EntryId, Position, Span, SpanKind};

/// Result of submitting a span to [`Registry::add`]
#[derive(Debug)]
pub enum AddOutcome {
    /// A new entry was created for a previously unseen value
    Created(EntryId),
    /// The span was appended to an existing entry
    Merged(EntryId),
    /// Rejected as an exact duplicate; the span is handed back so the caller
    /// can release its highlight
    Duplicate(Span),
}

/// Registry of discovered fragments for one document
#[derive(Debug, Default)]
pub struct Registry {
    entries: Vec<Entry>,
    next_id: u64,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Submit one occurrence of `value`
    ///
    /// Merges by exact value. Script-kind spans that duplicate an existing
    /// span's range exactly are rejected; other kinds are appended even when
    /// the range repeats.
    pub fn add(&mut self, value: impl Into<String>, span: Span) -> AddOutcome {
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|e| e.value == value) {
            if span.kind == SpanKind::Script && entry.spans.iter().any(|s| s.same_range(&span)) {
                return AddOutcome::Duplicate(span);
            }
            entry.spans.push(span);
            return AddOutcome::Merged(entry.id);
        }
        self.next_id += 1;
        let id = EntryId(self.next_id);
        log::debug!("new entry {id} for {value:?}");
        self.entries.push(Entry::new(id, value, span));
        AddOutcome::Created(id)
    }

    /// Register an operator-selected range as a custom occurrence
    pub fn add_custom(
        &mut self,
        value: impl Into<String>,
        start: Position,
        end: Position,
        sink: &mut dyn HighlightSink,
    ) -> AddOutcome {
        let mut span = Span::new(start, end, SpanKind::Custom);
        span.highlight = Some(sink.highlight(crate::document::Range::new(start, end)));
        self.add(value, span)
    }

    /// Remove the first span containing `point`
    ///
    /// Releases the span's highlight; when the owning entry loses its last
    /// span the entry itself is removed. Returns `false` when no span
    /// contains the point.
    pub fn remove_at_point(&mut self, point: Position, sink: &mut dyn HighlightSink) -> bool {
        let Some(entry_idx) = self
            .entries
            .iter()
            .position(|e| e.spans.iter().any(|s| s.contains(point)))
        else {
            return false;
        };
        let entry = &mut self.entries[entry_idx];
        if let Some(span_idx) = entry.spans.iter().position(|s| s.contains(point)) {
            let span = entry.spans.remove(span_idx);
            if let Some(handle) = span.highlight {
                sink.clear(handle);
            }
        }
        if entry.spans.is_empty() {
            self.entries.remove(entry_idx);
        }
        true
    }

    /// Reassign an entry's key and value in place
    ///
    /// Does not re-check value uniqueness against other entries. Returns
    /// `false` for an unknown id.
    pub fn update(&mut self, id: EntryId, key: impl Into<String>, value: impl Into<String>) -> bool {
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(entry) => {
                entry.key = key.into();
                entry.value = value.into();
                true
            }
            None => false,
        }
    }

    /// Remove an entry wholesale, releasing every span's highlight
    pub fn remove_entry(&mut self, id: EntryId, sink: &mut dyn HighlightSink) -> bool {
        let Some(idx) = self.entries.iter().position(|e| e.id == id) else {
            return false;
        };
        let entry = self.entries.remove(idx);
        for span in entry.spans {
            if let Some(handle) = span.highlight {
                sink.clear(handle);
            }
        }
        true
    }

    /// Whether any span of any entry contains `point`
    pub fn contains_point(&self, point: Position) -> bool {
        self.entries
            .iter()
            .any(|e| e.spans.iter().any(|s| s.contains(point)))
    }

    /// Entries in discovery order
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Look up one entry by id
    pub fn get(&self, id: EntryId) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn entries_mut(&mut self) -> &mut [Entry] {
        &mut self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::RecordingHighlights;

    fn span(kind: SpanKind, sl: usize, sc: usize, el: usize, ec: usize) -> Span {
        Span::new(Position::new(sl, sc), Position::new(el, ec), kind)
    }

    fn leased(
        sink: &mut RecordingHighlights,
        kind: SpanKind,
        sl: usize,
        sc: usize,
        el: usize,
        ec: usize,
    ) -> Span {
        let mut s = span(kind, sl, sc, el, ec);
        s.highlight = Some(sink.highlight(crate::document::Range::new(s.start, s.end)));
        s
    }

    #[test]
    fn test_add_merges_by_value_across_kinds() {
        let mut reg = Registry::new();
        let a = reg.add("你好", span(SpanKind::Tag, 0, 5, 0, 7));
        let b = reg.add("你好", span(SpanKind::Attribute, 2, 8, 2, 10));
        assert!(matches!(a, AddOutcome::Created(_)));
        assert!(matches!(b, AddOutcome::Merged(_)));
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.entries()[0].spans.len(), 2);
    }

    #[test]
    fn test_distinct_values_get_distinct_ids() {
        let mut reg = Registry::new();
        let AddOutcome::Created(a) = reg.add("你好", span(SpanKind::Tag, 0, 0, 0, 2)) else {
            panic!("expected Created");
        };
        let AddOutcome::Created(b) = reg.add("世界", span(SpanKind::Tag, 0, 4, 0, 6)) else {
            panic!("expected Created");
        };
        assert_ne!(a, b);
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn test_script_duplicate_span_rejected() {
        let mut reg = Registry::new();
        reg.add("提示", span(SpanKind::Script, 3, 1, 3, 3));
        let dup = reg.add("提示", span(SpanKind::Script, 3, 1, 3, 3));
        assert!(matches!(dup, AddOutcome::Duplicate(_)));
        assert_eq!(reg.entries()[0].spans.len(), 1);
    }

    #[test]
    fn test_tag_duplicate_span_kept() {
        // Duplicate suppression is deliberately script-only.
        let mut reg = Registry::new();
        reg.add("提示", span(SpanKind::Tag, 3, 1, 3, 3));
        let dup = reg.add("提示", span(SpanKind::Tag, 3, 1, 3, 3));
        assert!(matches!(dup, AddOutcome::Merged(_)));
        assert_eq!(reg.entries()[0].spans.len(), 2);
    }

    #[test]
    fn test_remove_at_point_releases_highlight() {
        let mut sink = RecordingHighlights::new();
        let mut reg = Registry::new();
        let s = leased(&mut sink, SpanKind::Tag, 1, 4, 1, 8);
        reg.add("你好", s);
        assert_eq!(sink.active_count(), 1);

        assert!(reg.remove_at_point(Position::new(1, 5), &mut sink));
        assert_eq!(sink.active_count(), 0);
        assert!(reg.is_empty());
    }

    #[test]
    fn test_remove_at_point_cascades_only_on_last_span() {
        let mut sink = RecordingHighlights::new();
        let mut reg = Registry::new();
        reg.add("你好", leased(&mut sink, SpanKind::Tag, 0, 0, 0, 2));
        reg.add("你好", leased(&mut sink, SpanKind::Tag, 5, 0, 5, 2));

        assert!(reg.remove_at_point(Position::new(0, 1), &mut sink));
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.entries()[0].spans.len(), 1);

        assert!(reg.remove_at_point(Position::new(5, 1), &mut sink));
        assert!(reg.is_empty());
        assert_eq!(sink.active_count(), 0);
    }

    #[test]
    fn test_remove_at_point_miss_is_noop() {
        let mut sink = RecordingHighlights::new();
        let mut reg = Registry::new();
        reg.add("你好", span(SpanKind::Tag, 0, 0, 0, 2));
        assert!(!reg.remove_at_point(Position::new(9, 9), &mut sink));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_update_rewrites_key_and_value() {
        let mut reg = Registry::new();
        let AddOutcome::Created(id) = reg.add("你好", span(SpanKind::Tag, 0, 0, 0, 2)) else {
            panic!("expected Created");
        };
        assert!(reg.update(id, "greeting", "你好"));
        let entry = reg.get(id).unwrap();
        assert_eq!(entry.key, "greeting");
        assert!(!reg.update(EntryId(999), "x", "y"));
    }

    #[test]
    fn test_remove_entry_releases_all_highlights() {
        let mut sink = RecordingHighlights::new();
        let mut reg = Registry::new();
        let AddOutcome::Created(id) = reg.add("你好", leased(&mut sink, SpanKind::Tag, 0, 0, 0, 2))
        else {
            panic!("expected Created");
        };
        reg.add("你好", leased(&mut sink, SpanKind::Script, 4, 0, 4, 2));
        assert_eq!(sink.active_count(), 2);

        assert!(reg.remove_entry(id, &mut sink));
        assert_eq!(sink.active_count(), 0);
        assert!(reg.is_empty());
    }

    #[test]
    fn test_contains_point() {
        let mut reg = Registry::new();
        reg.add("你好", span(SpanKind::Tag, 2, 3, 2, 5));
        assert!(reg.contains_point(Position::new(2, 4)));
        assert!(!reg.contains_point(Position::new(2, 6)));
    }

    #[test]
    fn test_add_custom_leases_highlight() {
        let mut sink = RecordingHighlights::new();
        let mut reg = Registry::new();
        let outcome = reg.add_custom("选中", Position::new(7, 0), Position::new(7, 2), &mut sink);
        assert!(matches!(outcome, AddOutcome::Created(_)));
        assert_eq!(sink.active_count(), 1);
        assert_eq!(reg.entries()[0].spans[0].kind, SpanKind::Custom);
    }
}
