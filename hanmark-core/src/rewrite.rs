//! Offset-tracking rewriter
//!
//! Replays keyed entries back into the document as edits. All span
//! coordinates were recorded in pre-edit space, so every edit's effect on
//! later lines and characters is folded into a running offset state before
//! the next edit is placed. Entries and spans are processed strictly in
//! discovery order; the state only ever accumulates forward.

use std::collections::BTreeMap;

use crate::classify::classify;
use crate::config::Config;
use crate::document::{Document, Range};
use crate::error::{Error, Result};
use crate::highlight::HighlightSink;
use crate::registry::Registry;
use crate::types::Position;

/// Counters reported by one rewrite pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RewriteReport {
    /// Edits applied
    pub edits: usize,
    /// Occurrences that fell back to the degraded whole-match wrap
    pub unknown_contexts: usize,
}

/// Offset bookkeeping for one rewrite pass
///
/// Character shifts are keyed by post-edit line and recorded at the original
/// character index of the edit's end; a later edit on the same line picks up
/// only the shifts recorded at or before its own character index.
#[derive(Debug, Default)]
struct OffsetState {
    line_shift: isize,
    char_shifts: BTreeMap<usize, Vec<(usize, isize)>>,
}

impl OffsetState {
    fn char_shift(&self, line: usize, character: usize) -> isize {
        self.char_shifts.get(&line).map_or(0, |shifts| {
            shifts
                .iter()
                .filter(|(at, _)| *at <= character)
                .map(|(_, delta)| delta)
                .sum()
        })
    }

    fn record(&mut self, line: usize, character: usize, delta: isize) {
        self.char_shifts
            .entry(line)
            .or_default()
            .push((character, delta));
    }
}

fn shifted(base: usize, shift: isize) -> Result<usize> {
    usize::try_from(base as isize + shift)
        .map_err(|_| Error::Document(format!("offset shift moved {base} before document start")))
}

/// Rewrite every keyed entry's occurrences into i18n call expressions
///
/// Unkeyed entries are left untouched in the document. Unknown-context
/// occurrences take the degraded fallback and are counted, never fatal; a
/// document error aborts the pass with edits applied so far left in place.
pub fn rewrite(
    doc: &mut dyn Document,
    registry: &Registry,
    config: &Config,
    sink: &mut dyn HighlightSink,
) -> Result<RewriteReport> {
    let mut state = OffsetState::default();
    let mut report = RewriteReport::default();

    for entry in registry.entries() {
        if !entry.has_key() {
            continue;
        }
        for span in &entry.spans {
            let start_line = shifted(span.start.line, state.line_shift)?;
            let end_line = shifted(span.end.line, state.line_shift)?;
            let start_char = shifted(
                span.start.character,
                state.char_shift(start_line, span.start.character),
            )?;
            let end_char = shifted(
                span.end.character,
                state.char_shift(end_line, span.end.character),
            )?;

            if let Some(handle) = span.highlight {
                sink.clear(handle);
            }

            let mut content = String::new();
            for line in start_line..=end_line {
                content.push_str(doc.line_text(line).unwrap_or(""));
            }
            let mut classification =
                classify(&content, &entry.value, &entry.key, &config.function_name);
            if classification.lead > start_char {
                // The syntactic region reaches onto an earlier line; fall
                // back to the in-place wrap rather than mis-placing the edit.
                classification.lead = 0;
                classification.trail = 0;
                classification.replacement =
                    format!("{}('{}')", config.function_name, entry.key);
                classification.shape = crate::classify::ContextShape::Unknown;
            }
            if !classification.confident() {
                report.unknown_contexts += 1;
                log::warn!(
                    "no context shape for {:?} at {}; wrapping in place",
                    entry.value,
                    span.start
                );
            }
            log::debug!(
                "replacing {:?} at {} as {}",
                entry.value,
                span.start,
                classification.shape.as_str()
            );

            let range = Range::new(
                Position::new(start_line, start_char - classification.lead),
                Position::new(end_line, end_char + classification.trail),
            );
            let delta = doc.apply_edit(range, &classification.replacement)?;

            state.line_shift += delta.lines;
            let record_line = shifted(span.end.line, state.line_shift)?;
            state.record(record_line, span.end.character, delta.trailing_chars);
            report.edits += 1;
        }
    }

    Ok(report)
}
