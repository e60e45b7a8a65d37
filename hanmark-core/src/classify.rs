//! Syntactic context classification for replacement
//!
//! Given the current text of the line(s) holding one occurrence, decide which
//! syntactic shape the fragment sits in, what exact text replaces it, and how
//! far the replaced range must extend beyond the bare fragment to cover the
//! surrounding delimiters.

use regex::{Captures, Regex};

/// The nine syntactic shapes, in precedence order, plus the fallback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextShape {
    /// Markup text node between a tag boundary (or interpolation) and the
    /// next `<` or `{{`
    Tag,
    /// Object key literal immediately followed by `:`
    Key,
    /// Backtick-delimited computed key followed by `]:`
    KeyRaw,
    /// Inside a directive attribute value (`v-...="..."`)
    Command,
    /// Inside an event-binding attribute value (`@...="..."`)
    Event,
    /// Inside any other attribute value
    Attr,
    /// Inside a single-quoted literal
    Value,
    /// Inside a backtick literal
    Raw,
    /// Plain text at line start, outside any markup or brace
    Text,
    /// No shape matched; degraded whole-match fallback
    Unknown,
}

impl ContextShape {
    /// Stable lowercase name, for logs and reports
    pub fn as_str(&self) -> &'static str {
        match self {
            ContextShape::Tag => "tag",
            ContextShape::Key => "key",
            ContextShape::KeyRaw => "keyRaw",
            ContextShape::Command => "command",
            ContextShape::Event => "event",
            ContextShape::Attr => "attr",
            ContextShape::Value => "value",
            ContextShape::Raw => "raw",
            ContextShape::Text => "text",
            ContextShape::Unknown => "unknown",
        }
    }
}

/// Outcome of classifying one occurrence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Shape the fragment was found in
    pub shape: ContextShape,
    /// Exact text to write over the (corrected) range
    pub replacement: String,
    /// Characters before the span start that the replaced range must absorb
    pub lead: usize,
    /// Characters after the span end that the replaced range must absorb
    pub trail: usize,
}

impl Classification {
    /// `false` only for the degraded [`ContextShape::Unknown`] path
    pub fn confident(&self) -> bool {
        self.shape != ContextShape::Unknown
    }

    fn plain(shape: ContextShape, replacement: String) -> Self {
        Self {
            shape,
            replacement,
            lead: 0,
            trail: 0,
        }
    }
}

fn chars(s: &str) -> usize {
    s.chars().count()
}

/// Interpolate the call into `pre VALUE post`, producing either a backtick
/// template or the bare call when the fragment is the whole text
fn interpolated(pre: &str, value: &str, post: &str, call: &str, interp: &str) -> String {
    let inner = format!("{pre}{value}{post}");
    if inner == value {
        call.to_string()
    } else {
        format!("`{inner}`").replacen(value, interp, 1)
    }
}

/// Classify one occurrence of `value` within `content`
///
/// `content` is the concatenation (no separators) of the current text of the
/// lines covered by the translated span. `func` is the configured i18n call
/// function name. Shapes are tried in fixed precedence; the first whose
/// pattern matches wins. When none matches the result is the degraded
/// [`ContextShape::Unknown`] fallback: the bare call over the uncorrected
/// span.
pub fn classify(content: &str, value: &str, key: &str, func: &str) -> Classification {
    let v = regex::escape(value);
    let call = format!("{func}('{key}')");
    let interp = format!("${{{call}}}");

    let patterns: [(ContextShape, String); 9] = [
        (
            ContextShape::Tag,
            format!(r"(</?[0-9A-Za-z_]+[^>]*?>|\}}\}})[^<{{}}]*{v}[^<{{}}]*(<|\{{\{{)"),
        ),
        (
            ContextShape::Key,
            format!(r#"([^"'\s]*?){v}([^"'\s]*?)[\s'"]*:\s"#),
        ),
        (
            ContextShape::KeyRaw,
            format!(r"`([^`]*?){v}([^`]*?)(`*)\]:\s"),
        ),
        (
            ContextShape::Command,
            format!(r#"v-[0-9A-Za-z_:.\-]+="[^"]*?{v}[^"]*?""#),
        ),
        (
            ContextShape::Event,
            format!(r#"@[0-9A-Za-z_:.\-]+="[^"]*?{v}[^"]*?""#),
        ),
        (
            ContextShape::Attr,
            format!(r#"(:?[0-9A-Za-z_:.\-]+)="([^"]*?){v}([^"]*?)""#),
        ),
        (ContextShape::Value, format!(r"'([^']*?){v}([^']*?)'")),
        (ContextShape::Raw, format!(r"`[^`]*?{v}[^`]*?(`|\z)")),
        (ContextShape::Text, format!(r"^\s*[^<{{}}]*{v}")),
    ];

    let matched = patterns.iter().find_map(|(shape, pattern)| {
        let re = Regex::new(pattern).ok()?;
        re.captures(content).map(|caps| (*shape, caps))
    });
    let Some((shape, caps)) = matched else {
        return Classification::plain(ContextShape::Unknown, call);
    };

    match shape {
        ContextShape::Tag | ContextShape::Text => {
            Classification::plain(shape, format!("{{{{{call}}}}}"))
        }
        ContextShape::KeyRaw | ContextShape::Raw => Classification::plain(shape, interp),
        ContextShape::Key => key_shape(&caps, value, &call, &interp),
        ContextShape::Attr => attr_shape(&caps, value, &call, &interp),
        ContextShape::Command | ContextShape::Event | ContextShape::Value => {
            quoted_literal_shape(shape, content, &v, value, &call, &interp)
        }
        ContextShape::Unknown => Classification::plain(shape, call),
    }
}

/// `key`: the bare key text is promoted to a computed key in brackets
fn key_shape(caps: &Captures, value: &str, call: &str, interp: &str) -> Classification {
    let pre = caps.get(1).map_or("", |m| m.as_str());
    let post = caps.get(2).map_or("", |m| m.as_str());
    Classification {
        shape: ContextShape::Key,
        replacement: format!("[{}]", interpolated(pre, value, post, call, interp)),
        lead: chars(pre),
        trail: chars(post),
    }
}

/// `attr`: structural promotion of a static attribute to a bound one
///
/// A static attribute cannot carry a call expression, so the whole
/// declaration is rewritten to `:name="..."`. An attribute that already
/// carries the binding sigil keeps its declaration text unchanged (its value
/// is an expression this heuristic does not rewrite).
fn attr_shape(caps: &Captures, value: &str, call: &str, interp: &str) -> Classification {
    let whole = caps.get(0).map_or("", |m| m.as_str());
    let name = caps.get(1).map_or("", |m| m.as_str());
    let pre = caps.get(2).map_or("", |m| m.as_str());
    let post = caps.get(3).map_or("", |m| m.as_str());
    let replacement = if name.starts_with(':') {
        whole.to_string()
    } else {
        format!(
            ":{name}=\"{}\"",
            interpolated(pre, value, post, call, interp)
        )
    };
    Classification {
        shape: ContextShape::Attr,
        replacement,
        lead: chars(name) + chars(pre) + 2,
        trail: chars(post) + 1,
    }
}

/// `command`/`event`/`value`: a single-quoted literal containing the fragment
/// is replaced whole (quotes included) by a backtick-template interpolation
fn quoted_literal_shape(
    shape: ContextShape,
    content: &str,
    escaped_value: &str,
    value: &str,
    call: &str,
    interp: &str,
) -> Classification {
    let literal = Regex::new(&format!(r"'([^']*?){escaped_value}([^']*?)'"))
        .ok()
        .and_then(|re| {
            re.captures(content).map(|caps| {
                let pre = caps.get(1).map_or("", |m| m.as_str()).to_string();
                let post = caps.get(2).map_or("", |m| m.as_str()).to_string();
                (pre, post)
            })
        });
    match literal {
        Some((pre, post)) => Classification {
            shape,
            replacement: interpolated(&pre, value, &post, call, interp),
            lead: chars(&pre) + 1,
            trail: chars(&post) + 1,
        },
        // No single-quoted literal to widen into: event bindings still want
        // an interpolation, directives fall back to the bare call.
        None => match shape {
            ContextShape::Event => Classification::plain(shape, interp.to_string()),
            _ => Classification::plain(shape, call.to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_between_boundary_and_interpolation() {
        let c = classify(
            "<template><div>你好{{ name }}世界</div></template>",
            "你好",
            "greeting",
            "$t",
        );
        assert_eq!(c.shape, ContextShape::Tag);
        assert_eq!(c.replacement, "{{$t('greeting')}}");
        assert_eq!((c.lead, c.trail), (0, 0));
    }

    #[test]
    fn test_tag_after_interpolation() {
        let c = classify(
            "<template><div>你好{{ name }}世界</div></template>",
            "世界",
            "world",
            "$t",
        );
        assert_eq!(c.shape, ContextShape::Tag);
        assert_eq!(c.replacement, "{{$t('world')}}");
    }

    #[test]
    fn test_key_whole_literal() {
        let c = classify("  名字: 1,", "名字", "name", "$t");
        assert_eq!(c.shape, ContextShape::Key);
        assert_eq!(c.replacement, "[$t('name')]");
        assert_eq!((c.lead, c.trail), (0, 0));
    }

    #[test]
    fn test_key_with_surrounding_text() {
        let c = classify("  abc名字xyz: 1,", "名字", "name", "$t");
        assert_eq!(c.shape, ContextShape::Key);
        assert_eq!(c.replacement, "[`abc${$t('name')}xyz`]");
        assert_eq!((c.lead, c.trail), (3, 3));
    }

    #[test]
    fn test_key_raw_inside_computed_key() {
        // Whitespace inside the computed key keeps the plainer `key` shape
        // from matching, so the backtick form gets its turn.
        let c = classify("  [`x 名字 y`]: 1,", "名字", "name", "$t");
        assert_eq!(c.shape, ContextShape::KeyRaw);
        assert_eq!(c.replacement, "${$t('name')}");
        assert_eq!((c.lead, c.trail), (0, 0));
    }

    #[test]
    fn test_command_with_quoted_literal() {
        let c = classify(r#"<p v-tip="x && '提示'">"#, "提示", "tip", "$t");
        assert_eq!(c.shape, ContextShape::Command);
        assert_eq!(c.replacement, "$t('tip')");
        // Absorbs both single quotes
        assert_eq!((c.lead, c.trail), (1, 1));
    }

    #[test]
    fn test_command_without_quoted_literal_is_bare_call() {
        let c = classify(r#"<p v-text="提示">"#, "提示", "tip", "$t");
        assert_eq!(c.shape, ContextShape::Command);
        assert_eq!(c.replacement, "$t('tip')");
        assert_eq!((c.lead, c.trail), (0, 0));
    }

    #[test]
    fn test_event_without_quoted_literal_interpolates() {
        let c = classify(r#"<p @click="send(提示)">"#, "提示", "tip", "$t");
        assert_eq!(c.shape, ContextShape::Event);
        assert_eq!(c.replacement, "${$t('tip')}");
    }

    #[test]
    fn test_attr_promotion_whole_value() {
        let c = classify(r#"title="你好""#, "你好", "hello", "$t");
        assert_eq!(c.shape, ContextShape::Attr);
        assert_eq!(c.replacement, r#":title="$t('hello')""#);
        // name(5) + pre(0) + `="` , post(0) + closing quote
        assert_eq!((c.lead, c.trail), (7, 1));
    }

    #[test]
    fn test_attr_promotion_partial_value() {
        let c = classify(r#"<p title="说：hello">"#, "说：", "say", "$t");
        assert_eq!(c.shape, ContextShape::Attr);
        assert_eq!(c.replacement, ":title=\"`${$t('say')}hello`\"");
        assert_eq!((c.lead, c.trail), (7, 6));
    }

    #[test]
    fn test_attr_already_bound_is_reproduced() {
        let c = classify(r#"<p :title="你好">"#, "你好", "hello", "$t");
        assert_eq!(c.shape, ContextShape::Attr);
        assert_eq!(c.replacement, r#":title="你好""#);
        assert_eq!((c.lead, c.trail), (8, 1));
    }

    #[test]
    fn test_value_literal_with_tail() {
        let c = classify("const m = '前缀好';", "好", "ok", "$t");
        assert_eq!(c.shape, ContextShape::Value);
        assert_eq!(c.replacement, "`前缀${$t('ok')}`");
        assert_eq!((c.lead, c.trail), (3, 1));
    }

    #[test]
    fn test_raw_backtick_literal() {
        let c = classify("const m = `x 好 y`;", "好", "ok", "$t");
        assert_eq!(c.shape, ContextShape::Raw);
        assert_eq!(c.replacement, "${$t('ok')}");
    }

    #[test]
    fn test_text_at_line_start() {
        let c = classify("  普通文本", "普通文本", "plain", "$t");
        assert_eq!(c.shape, ContextShape::Text);
        assert_eq!(c.replacement, "{{$t('plain')}}");
    }

    #[test]
    fn test_unknown_falls_back_to_bare_call() {
        let c = classify("<div>好{", "好", "ok", "$t");
        assert_eq!(c.shape, ContextShape::Unknown);
        assert!(!c.confident());
        assert_eq!(c.replacement, "$t('ok')");
        assert_eq!((c.lead, c.trail), (0, 0));
    }

    #[test]
    fn test_custom_function_name() {
        let c = classify("<div>你好</div>", "你好", "hi", "i18n.t");
        assert_eq!(c.replacement, "{{i18n.t('hi')}}");
    }
}
