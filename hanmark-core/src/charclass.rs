//! Character classification for CJK fragment detection

/// Han ideograph, U+4E00..=U+9FA5
pub fn is_han(c: char) -> bool {
    ('\u{4e00}'..='\u{9fa5}').contains(&c)
}

/// CJK Symbols and Punctuation block, U+3000..=U+303F
pub fn is_cjk_symbol(c: char) -> bool {
    ('\u{3000}'..='\u{303f}').contains(&c)
}

/// Full-width punctuation accepted at the boundary of a script-mode run
pub fn is_fullwidth_punct(c: char) -> bool {
    matches!(
        c,
        '·' | '！'
            | '？'
            | '、'
            | '—'
            | '，'
            | '。'
            | '；'
            | '：'
            | '\u{2018}'
            | '\u{2019}'
            | '\u{201c}'
            | '\u{201d}'
            | '《'
            | '》'
            | '【'
            | '】'
            | '（'
            | '）'
            | '…'
            | '￥'
    )
}

/// Acceptance test for tag and attribute fragments
pub fn is_fragment_char(c: char) -> bool {
    is_han(c) || is_cjk_symbol(c)
}

/// A script-mode run must start and end on such a character
pub fn is_run_boundary(c: char) -> bool {
    is_han(c) || is_fullwidth_punct(c)
}

/// Characters a script-mode run may pass through
///
/// Everything except the expression/delimiter set `$ { } ` " ' :` qualifies,
/// so a run can carry embedded ASCII but never cross an interpolation or
/// literal boundary.
pub fn is_run_interior(c: char) -> bool {
    is_han(c) || is_cjk_symbol(c) || !matches!(c, '$' | '{' | '}' | '`' | '"' | '\'' | ':')
}

/// Whether the text contains at least one fragment character
pub fn has_fragment_char(s: &str) -> bool {
    s.chars().any(is_fragment_char)
}
