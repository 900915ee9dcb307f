//! Dictionary construction from a parallel corpus.
//!
//! Each corpus line reads `<Chinese with markers> => <target>`. The Chinese
//! side is reduced to a clean lookup key (every parenthetical span and all
//! whitespace removed) and stored with the target. Later lines overwrite
//! earlier ones; there is no length comparison.

use tracing::debug;

use crate::table::MappingTable;
use crate::unicode::{is_close_paren, is_open_paren};

pub const PAIR_SEPARATOR: &str = "=>";

/// One `left => right` record of a parallel corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusLine {
    /// 1-based line number in the source text.
    pub line_no: usize,
    pub raw_chinese: String,
    pub target: String,
}

/// Lines without the separator are skipped, as are lines whose left side
/// is empty. Both sides are trimmed; only the first separator splits.
pub fn parse_corpus(text: &str) -> Vec<CorpusLine> {
    text.lines()
        .enumerate()
        .filter_map(|(i, line)| {
            let (left, right) = line.split_once(PAIR_SEPARATOR)?;
            let left = left.trim();
            if left.is_empty() {
                return None;
            }
            Some(CorpusLine {
                line_no: i + 1,
                raw_chinese: left.to_string(),
                target: right.trim().to_string(),
            })
        })
        .collect()
}

/// Drop every `(...)` / `（...）` span that has no nested parenthesis, then
/// remove all whitespace. Index markers are dropped like any other span.
pub fn strip_markers(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    'outer: while i < chars.len() {
        let c = chars[i];
        if is_open_paren(c) {
            for j in i + 1..chars.len() {
                if is_open_paren(chars[j]) {
                    break;
                }
                if is_close_paren(chars[j]) {
                    i = j + 1;
                    continue 'outer;
                }
            }
        }
        if !c.is_whitespace() {
            out.push(c);
        }
        i += 1;
    }
    out
}

/// Build a dictionary from corpus lines, last line winning per key.
pub fn build(lines: &[CorpusLine]) -> MappingTable {
    let mut table = MappingTable::new();
    let mut overwritten = 0usize;
    for line in lines {
        let key = strip_markers(&line.raw_chinese);
        if key.is_empty() {
            debug!(line = line.line_no, "empty key after stripping markers");
            continue;
        }
        if let Some(previous) = table.insert(key.as_str(), line.target.as_str()) {
            debug!(line = line.line_no, key = %key, previous = %previous, "overwritten");
            overwritten += 1;
        }
    }
    debug!(entries = table.len(), overwritten, "built dictionary");
    table
}

/// `parse_corpus` followed by `build`.
pub fn build_from_text(text: &str) -> MappingTable {
    build(&parse_corpus(text))
}
