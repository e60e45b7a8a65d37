//! Mode-aware fragment scanner
//!
//! Walks a document line by line, tracking which syntactic region it is in,
//! and emits every CJK-bearing fragment it finds into the registry. Lines
//! that produce no match are carried over into the next round's text, so a
//! fragment wrapped across source lines is captured as one contiguous span.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::charclass;
use crate::document::{Document, Range};
use crate::highlight::HighlightSink;
use crate::mask;
use crate::registry::{AddOutcome, Registry};
use crate::types::{Position, Span, SpanKind};

/// Syntactic region the scanner is currently in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanMode {
    /// Before the template region of a markup document
    #[default]
    Outside,
    /// Inside the template region
    Template,
    /// Inside a script region; also the initial mode for script-only files
    Script,
}

impl ScanMode {
    /// Initial mode for a file path: script-only sources start in `Script`,
    /// everything else starts outside the template region.
    pub fn for_path(path: &str) -> Self {
        match path.rsplit('.').next().unwrap_or("") {
            "ts" | "js" | "tsx" | "jsx" => ScanMode::Script,
            _ => ScanMode::Outside,
        }
    }
}

/// Counters reported by one scan pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanSummary {
    /// Lines visited
    pub lines: usize,
    /// Spans stored in the registry (duplicates excluded)
    pub spans: usize,
}

/// Tag boundary, attribute region, closing `>`, inline region up to the next
/// `<`. The trailing `<` is not consumed when resuming the search.
static TAG_REGION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(</?[0-9A-Za-z_]+)([^>]*?)>([^<]*)<").unwrap());

fn is_trim_char(c: char) -> bool {
    c.is_whitespace() || c.is_ascii_digit()
}

/// Position of the character at `byte` within `text`, relative to the line
/// the buffered text starts on
fn position_at(text: &str, byte: usize, baseline: usize) -> Position {
    let prefix = &text[..byte];
    let line = baseline + prefix.matches('\n').count();
    let line_start = prefix.rfind('\n').map_or(0, |b| b + 1);
    Position::new(line, prefix[line_start..].chars().count())
}

/// One scan pass over one document
///
/// The scanner submits raw `(value, span)` pairs; merging identical values
/// and rejecting duplicate script spans is the registry's business.
pub struct Scanner<'a> {
    registry: &'a mut Registry,
    sink: &'a mut dyn HighlightSink,
    stored: usize,
}

impl<'a> Scanner<'a> {
    /// Create a scanner feeding `registry`, leasing highlights from `sink`
    pub fn new(registry: &'a mut Registry, sink: &'a mut dyn HighlightSink) -> Self {
        Self {
            registry,
            sink,
            stored: 0,
        }
    }

    /// Scan the whole document starting in `initial` mode
    pub fn scan(&mut self, doc: &dyn Document, initial: ScanMode) -> ScanSummary {
        self.stored = 0;
        let mut mode = initial;
        let mut prior = ScanMode::Outside;
        let mut buffer = String::new();
        let mut baseline = 0usize;
        let line_count = doc.line_count();

        for i in 0..line_count {
            let line = doc.line_text(i).unwrap_or("");
            let text = format!("{buffer}{line}");

            if mode == ScanMode::Outside && text.contains("<template>") {
                // The marker line may carry template content after the tag;
                // fall through and scan it in place.
                mode = ScanMode::Template;
                baseline = i;
                buffer.clear();
            } else if mode != ScanMode::Script && text.contains("<script") {
                // Fragments can precede the marker in the carried buffer.
                if !buffer.is_empty() {
                    self.attr_pass(&mask::mask_comments(&buffer), baseline);
                }
                prior = if mode == ScanMode::Template {
                    ScanMode::Template
                } else {
                    ScanMode::Outside
                };
                mode = ScanMode::Script;
                baseline = i + 1;
                buffer.clear();
                continue;
            } else if mode == ScanMode::Script && text.contains("</script>") {
                mode = prior;
                baseline = i + 1;
                buffer.clear();
                continue;
            }

            if mode == ScanMode::Outside {
                baseline = i + 1;
                buffer.clear();
                continue;
            }

            let text = format!("{buffer}{line}");
            let found = match mode {
                ScanMode::Script => self.script_pass(&mask::mask_comments(&text), baseline),
                _ => self.template_pass(&text, baseline),
            };
            if found == 0 {
                buffer = text;
                buffer.push('\n');
            } else {
                buffer.clear();
                baseline = i + 1;
            }
        }

        if !buffer.is_empty() {
            self.attr_pass(&mask::mask_comments(&buffer), baseline);
        }

        log::debug!("scan complete: {} spans over {line_count} lines", self.stored);
        ScanSummary {
            lines: line_count,
            spans: self.stored,
        }
    }

    /// Tag-text extraction over attribute/comment-masked text; on success the
    /// attribute pass also runs once over the comment-masked text.
    /// Returns the number of accepted tag fragments.
    fn template_pass(&mut self, text: &str, baseline: usize) -> usize {
        let masked = mask::mask_template(text);
        let mut accepted = 0;
        let mut pos = 0;
        while pos < masked.len() {
            let Some(caps) = TAG_REGION.captures_at(&masked, pos) else {
                break;
            };
            let (Some(whole), Some(region)) = (caps.get(0), caps.get(3)) else {
                break;
            };
            accepted += self.tag_region(region.as_str(), region.start(), &masked, baseline);
            // resume at the trailing '<' so adjacent tags are not skipped
            pos = whole.end() - 1;
        }
        if accepted > 0 {
            self.attr_pass(&mask::mask_comments(text), baseline);
        }
        accepted
    }

    /// Split one inline region into pieces at interpolation braces and submit
    /// each CJK-bearing piece
    fn tag_region(&mut self, region: &str, region_start: usize, masked: &str, baseline: usize) -> usize {
        let mut accepted = 0;
        let mut piece_start = 0;
        for (idx, c) in region.char_indices() {
            if c == '{' || c == '}' {
                if self.tag_piece(&region[piece_start..idx], region_start + piece_start, masked, baseline) {
                    accepted += 1;
                }
                piece_start = idx + 1;
            }
        }
        if self.tag_piece(&region[piece_start..], region_start + piece_start, masked, baseline) {
            accepted += 1;
        }
        accepted
    }

    fn tag_piece(&mut self, piece: &str, piece_start: usize, masked: &str, baseline: usize) -> bool {
        let lead_trimmed = piece.trim_start_matches(is_trim_char);
        let lead_bytes = piece.len() - lead_trimmed.len();
        let value = lead_trimmed.trim_end_matches(is_trim_char);
        if value.is_empty() || !charclass::has_fragment_char(value) {
            return false;
        }
        self.submit(masked, piece_start + lead_bytes, value, baseline, SpanKind::Tag)
    }

    /// Quoted-value extraction: the fragment is the substring from the first
    /// through the last fragment character of each quoted body
    fn attr_pass(&mut self, masked: &str, baseline: usize) -> usize {
        let chars: Vec<(usize, char)> = masked.char_indices().collect();
        let mut found = 0;
        let mut i = 0;
        while i < chars.len() {
            let q = chars[i].1;
            if matches!(q, '"' | '\'' | '`') {
                if let Some(rel) = chars[i + 1..].iter().position(|&(_, c)| c == q) {
                    let close = i + 1 + rel;
                    let body_start = chars[i].0 + q.len_utf8();
                    let body = &masked[body_start..chars[close].0];
                    if let Some((offset, value)) = fragment_in_body(body) {
                        if self.submit(
                            masked,
                            body_start + offset,
                            value,
                            baseline,
                            SpanKind::Attribute,
                        ) {
                            found += 1;
                        }
                    }
                    i = close + 1;
                    continue;
                }
            }
            i += 1;
        }
        found
    }

    /// String-literal bodies first (greedy to the last same quote character),
    /// then ideograph-bounded runs within each body.
    /// Returns the number of runs found, duplicates included: a run rejected
    /// by the registry still counts as a match for the buffering rule.
    fn script_pass(&mut self, masked: &str, baseline: usize) -> usize {
        let chars: Vec<(usize, char)> = masked.char_indices().collect();
        let mut found = 0;
        let mut i = 0;
        while i < chars.len() {
            let q = chars[i].1;
            if matches!(q, '"' | '\'' | '`') {
                if let Some(close) = (i + 1..chars.len()).rev().find(|&k| chars[k].1 == q) {
                    let body_start = chars[i].0 + q.len_utf8();
                    found += self.script_runs(masked, body_start, chars[close].0, baseline);
                    i = close + 1;
                    continue;
                }
            }
            i += 1;
        }
        found
    }

    fn script_runs(
        &mut self,
        masked: &str,
        body_start: usize,
        body_end: usize,
        baseline: usize,
    ) -> usize {
        let body = &masked[body_start..body_end];
        let chars: Vec<(usize, char)> = body.char_indices().collect();
        let mut found = 0;
        let mut i = 0;
        while i < chars.len() {
            if !charclass::is_run_boundary(chars[i].1) {
                i += 1;
                continue;
            }
            let mut j = i + 1;
            while j < chars.len() && charclass::is_run_interior(chars[j].1) {
                j += 1;
            }
            // trim back so the run ends on a boundary character
            let mut k = j - 1;
            while !charclass::is_run_boundary(chars[k].1) {
                k -= 1;
            }
            let start = chars[i].0;
            let end = chars[k].0 + chars[k].1.len_utf8();
            found += 1;
            self.submit(
                masked,
                body_start + start,
                &body[start..end],
                baseline,
                SpanKind::Script,
            );
            i = k + 1;
        }
        found
    }

    /// Lease a highlight and hand the span to the registry; a rejected
    /// duplicate gets its lease released again
    fn submit(
        &mut self,
        text: &str,
        start_byte: usize,
        value: &str,
        baseline: usize,
        kind: SpanKind,
    ) -> bool {
        let start = position_at(text, start_byte, baseline);
        let end = position_at(text, start_byte + value.len(), baseline);
        let mut span = Span::new(start, end, kind);
        span.highlight = Some(self.sink.highlight(Range::new(start, end)));
        match self.registry.add(value, span) {
            AddOutcome::Duplicate(dup) => {
                if let Some(handle) = dup.highlight {
                    self.sink.clear(handle);
                }
                false
            }
            _ => {
                self.stored += 1;
                true
            }
        }
    }
}

/// First-through-last fragment character of a quoted body, with its byte
/// offset; `None` when the body has no fragment character
fn fragment_in_body(body: &str) -> Option<(usize, &str)> {
    let (first, _) = body
        .char_indices()
        .find(|&(_, c)| charclass::is_fragment_char(c))?;
    let (last, c) = body
        .char_indices()
        .filter(|&(_, c)| charclass::is_fragment_char(c))
        .last()?;
    Some((first, &body[first..last + c.len_utf8()]))
}
