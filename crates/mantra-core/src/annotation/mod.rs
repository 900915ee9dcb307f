//! Parsing of annotated Chinese liturgical text.
//!
//! Source lines carry pronunciation hints in parentheses after a character
//! (`唵(引)`), bracketed editorial marks (`[＊]`), corner quotes and a
//! parenthetical index marker (`(十二)`). This module splits those apart.

mod cleaner;
#[cfg(test)]
mod tests;

pub use cleaner::clean_mantra;

use tracing::debug;

use crate::error::Notice;
use crate::unicode::{
    is_chinese_numeral, is_close_paren, is_corner_quote, is_index_marker, is_open_paren, is_paren,
};

/// A line with bracket spans, corner quotes and non-index parentheses removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedLine {
    pub text: String,
    /// Content of the last index-marker parenthesis, without the parens.
    pub index_marker: Option<String>,
}

/// Find the close paren matching the open paren at `start` (char index).
/// The span must not contain another paren. Returns the close index.
fn find_paren_close(chars: &[char], start: usize) -> Option<usize> {
    for (offset, &c) in chars[start + 1..].iter().enumerate() {
        if is_close_paren(c) {
            return Some(start + 1 + offset);
        }
        if is_open_paren(c) {
            return None;
        }
    }
    None
}

/// Clean a line of annotated text.
///
/// - `[...]` spans are removed entirely
/// - corner quotes are removed
/// - a parenthesis whose content is an index marker is kept verbatim and
///   recorded (the last one wins); every other parenthesis is deleted
///
/// Unbalanced brackets or parentheses are kept as literal characters.
pub fn clean_line(line: &str) -> CleanedLine {
    let chars: Vec<char> = line.chars().collect();
    let mut text = String::with_capacity(line.len());
    let mut index_marker = None;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c == '[' {
            if let Some(offset) = chars[i + 1..].iter().position(|&c| c == ']') {
                i += offset + 2;
                continue;
            }
        } else if is_corner_quote(c) {
            i += 1;
            continue;
        } else if is_open_paren(c) {
            if let Some(close) = find_paren_close(&chars, i) {
                let inner: String = chars[i + 1..close].iter().collect();
                if is_index_marker(&inner) {
                    text.extend(&chars[i..=close]);
                    index_marker = Some(inner);
                }
                i = close + 1;
                continue;
            }
            debug!(line, "unbalanced parenthesis kept literally");
        }
        text.push(c);
        i += 1;
    }

    CleanedLine {
        text: text.trim().to_string(),
        index_marker,
    }
}

/// A token split into its base and the literal contents of its hint groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation<'a> {
    pub base: &'a str,
    pub hints: Vec<&'a str>,
}

impl Annotation<'_> {
    /// True if the token had the `char(hint)...` shape. A malformed token is
    /// returned whole as its base with no hints.
    pub fn is_well_formed(&self) -> bool {
        self.base.chars().count() == 1
    }
}

/// Split `token` into one base character and zero or more `(hint)` groups.
///
/// A token that is not exactly one character followed by well-formed,
/// non-empty, non-nested paren groups is returned unchanged with no hints.
pub fn extract_annotation(token: &str) -> Annotation<'_> {
    match parse_annotation(token) {
        Some(annotation) => annotation,
        None => Annotation {
            base: token,
            hints: Vec::new(),
        },
    }
}

fn parse_annotation(token: &str) -> Option<Annotation<'_>> {
    let mut iter = token.char_indices();
    let (_, first) = iter.next()?;
    let base_end = first.len_utf8();
    let base = &token[..base_end];

    let mut hints = Vec::new();
    let mut rest = &token[base_end..];
    while !rest.is_empty() {
        let open = rest.chars().next()?;
        if !is_open_paren(open) {
            return None;
        }
        let body = &rest[open.len_utf8()..];
        let close_at = body.find(is_close_paren)?;
        let hint = &body[..close_at];
        if hint.is_empty() || hint.contains(is_open_paren) {
            return None;
        }
        hints.push(hint);
        let close = body[close_at..].chars().next()?;
        rest = &body[close_at + close.len_utf8()..];
    }

    Some(Annotation { base, hints })
}

/// Substring-based filter for pronunciation hints.
///
/// A hint is removable when it contains any keyword anywhere in its text, so
/// a keyword like `上` also removes hints such as `上聲`. This over-matches
/// on purpose and is kept as substring containment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HintFilter {
    keywords: Vec<String>,
}

impl HintFilter {
    pub fn new(keywords: Vec<String>) -> Self {
        Self { keywords }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn is_hint_removable(&self, hint: &str) -> bool {
        self.keywords.iter().any(|k| hint.contains(k.as_str()))
    }

    /// Hints that survive filtering, in their original order.
    pub fn retain<'a>(&self, hints: &[&'a str]) -> Vec<&'a str> {
        hints
            .iter()
            .copied()
            .filter(|h| !self.is_hint_removable(h))
            .collect()
    }
}

/// Lift a trailing `(numeral)` footnote off the end of a line.
///
/// Returns the line without the footnote (right-trimmed) and the numeral.
/// Only Chinese numerals count here; a trailing `(引)` stays in place.
pub fn take_footnote(line: &str) -> (&str, Option<&str>) {
    let trimmed = line.trim_end();
    let Some(last) = trimmed.chars().last() else {
        return (line, None);
    };
    if !is_close_paren(last) {
        return (line, None);
    }
    let before_close = &trimmed[..trimmed.len() - last.len_utf8()];
    let Some(open_at) = before_close.rfind(is_paren) else {
        return (line, None);
    };
    let open = before_close[open_at..].chars().next();
    if !open.is_some_and(is_open_paren) {
        return (line, None);
    }
    let open_len = open.map_or(0, char::len_utf8);
    let numeral = &before_close[open_at + open_len..];
    if !is_chinese_numeral(numeral) {
        return (line, None);
    }
    (before_close[..open_at].trim_end(), Some(numeral))
}

/// Split a line into annotated parts: a run of characters that are neither
/// whitespace nor parentheses, followed by any well-formed `(hint)` groups.
///
/// Stray parentheses between parts are skipped.
pub fn split_parts(line: &str) -> Vec<&str> {
    split_parts_with_notices(line).0
}

/// Like [`split_parts`], also reporting every skipped stretch of text that
/// contains a parenthesis as a malformed annotation.
pub fn split_parts_with_notices(line: &str) -> (Vec<&str>, Vec<Notice>) {
    let mut parts = Vec::new();
    let mut notices = Vec::new();
    let mut rest = line;

    let mut report = |skipped: &str| {
        if skipped.contains(is_paren) {
            debug!(skipped, "stray parenthesis skipped");
            notices.push(Notice::MalformedAnnotation {
                token: skipped.trim().to_string(),
            });
        }
    };

    while !rest.is_empty() {
        let Some(start) = rest.find(|c: char| !c.is_whitespace() && !is_paren(c)) else {
            report(rest);
            break;
        };
        report(&rest[..start]);
        rest = &rest[start..];
        let run_end = rest
            .find(|c: char| c.is_whitespace() || is_paren(c))
            .unwrap_or(rest.len());
        let mut end = run_end;

        // Attach `(hint)` groups directly following the run.
        loop {
            let tail = &rest[end..];
            let Some(open) = tail.chars().next().filter(|&c| is_open_paren(c)) else {
                break;
            };
            let body = &tail[open.len_utf8()..];
            let Some(close_at) = body.find(is_close_paren) else {
                break;
            };
            let hint = &body[..close_at];
            if hint.is_empty() || hint.contains(is_open_paren) {
                break;
            }
            let close_len = body[close_at..].chars().next().map_or(1, char::len_utf8);
            end += open.len_utf8() + close_at + close_len;
        }

        parts.push(&rest[..end]);
        rest = &rest[end..];
    }

    (parts, notices)
}

/// Remove `[...]` spans and corner quotes, leaving parentheses alone.
/// An unclosed `[` is kept.
pub fn strip_editorial(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut rest = line;
    while let Some(c) = rest.chars().next() {
        if c == '[' {
            if let Some(close) = rest.find(']') {
                rest = &rest[close + 1..];
                continue;
            }
        }
        if !is_corner_quote(c) {
            out.push(c);
        }
        rest = &rest[c.len_utf8()..];
    }
    out
}
