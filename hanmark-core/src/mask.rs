//! Length-preserving masking of comments and quoted attribute values
//!
//! Masked regions keep their exact shape: every non-whitespace character
//! becomes a single space, whitespace (line breaks included) passes through
//! untouched. The scanner's offset arithmetic therefore stays valid on masked
//! text while false matches inside comments and attribute values are
//! suppressed.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static MARKUP_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<!--.+?-->").unwrap());

static BLOCK_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)/\*.*?(\*/|\z)").unwrap());

static LINE_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"//[^\n]*").unwrap());

/// Attribute region: a name introduced by `v-:`, `@`, or whitespace, with a
/// double-quoted value
static ATTR_REGION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(v-:|@|\s)[0-9A-Za-z_:.\-]+="[^"]*?""#).unwrap());

fn blank(caps: &Captures) -> String {
    caps[0]
        .chars()
        .map(|c| if c.is_whitespace() { c } else { ' ' })
        .collect()
}

/// Mask markup comments and quoted-attribute regions for the tag-text pass
pub fn mask_template(text: &str) -> String {
    let masked = MARKUP_COMMENT.replace_all(text, blank);
    ATTR_REGION.replace_all(&masked, blank).into_owned()
}

/// Mask markup, block, and line comments for the attribute and script passes
pub fn mask_comments(text: &str) -> String {
    let masked = MARKUP_COMMENT.replace_all(text, blank);
    let masked = BLOCK_COMMENT.replace_all(&masked, blank);
    LINE_COMMENT.replace_all(&masked, blank).into_owned()
}
