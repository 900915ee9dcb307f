//! Character-level Unicode classification for annotated Chinese text.

/// Chinese numerals accepted inside an index marker such as `(十二)`.
const INDEX_NUMERALS: &str = "一二三四五六七八九十百千萬〇零廿卅卌○";

/// The narrower numeral set used for trailing footnotes in chant text.
const FOOTNOTE_NUMERALS: &str = "一二三四五六七八九十百千零〇○";

/// CJK ideographs: the unified block, extension A, extension B and the
/// compatibility block. Extension B matters for mantra transcription
/// characters such as 𤚥.
pub fn is_han(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
        || ('\u{3400}'..='\u{4DBF}').contains(&c)
        || ('\u{20000}'..='\u{2A6DF}').contains(&c)
        || ('\u{F900}'..='\u{FAFF}').contains(&c)
}

pub fn is_open_paren(c: char) -> bool {
    c == '(' || c == '（'
}

pub fn is_close_paren(c: char) -> bool {
    c == ')' || c == '）'
}

pub fn is_paren(c: char) -> bool {
    is_open_paren(c) || is_close_paren(c)
}

/// Corner quotes are typographic decoration in liturgical sources.
pub fn is_corner_quote(c: char) -> bool {
    matches!(c, '「' | '」' | '『' | '』')
}

fn is_digit(c: char) -> bool {
    c.is_ascii_digit() || ('０'..='９').contains(&c)
}

/// Check if parenthesis content is an index marker: Chinese numerals or
/// digits only. Empty content is not a marker.
pub fn is_index_marker(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| INDEX_NUMERALS.contains(c) || is_digit(c))
}

/// Check if text is a Chinese numeral as used for trailing chant footnotes.
pub fn is_chinese_numeral(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| FOOTNOTE_NUMERALS.contains(c))
}
