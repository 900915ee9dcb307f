//! Greedy longest-match segmentation of Chinese phonetic text.
//!
//! At every position the segmenter tries the longest n-gram first (3, then
//! 2, then 1 characters by default), emits the first hit and advances past
//! it. On a total miss it emits the raw character and advances by one, so
//! every step consumes at least one character. This is forward maximum
//! matching: no backtracking and no global optimization.

use tracing::debug;

use crate::error::Notice;
use crate::table::MappingTable;
use crate::unicode::is_han;

pub const DEFAULT_MAX_NGRAM: usize = 3;
pub const DEFAULT_JOINER: &str = " ";

/// Maximal runs of CJK ideographs. Everything else is dropped from the
/// token stream, not kept as a boundary; callers that need positional
/// fidelity reinsert it.
pub fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = None;
    for (i, c) in text.char_indices() {
        match (is_han(c), start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                tokens.push(&text[s..i]);
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        tokens.push(&text[s..]);
    }
    tokens
}

/// One step of a segmentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub source: String,
    /// `None` when the character had no table entry and passed through.
    pub target: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segmentation {
    pub segments: Vec<Segment>,
    pub notices: Vec<Notice>,
}

impl Segmentation {
    /// Join matched targets and raw fallbacks; empty targets are skipped.
    pub fn render(&self, joiner: &str) -> String {
        self.segments
            .iter()
            .map(|s| s.target.as_deref().unwrap_or(&s.source))
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(joiner)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segmenter {
    max_ngram: usize,
    joiner: String,
}

impl Default for Segmenter {
    fn default() -> Self {
        Self {
            max_ngram: DEFAULT_MAX_NGRAM,
            joiner: DEFAULT_JOINER.to_string(),
        }
    }
}

impl Segmenter {
    /// `max_ngram` is clamped to at least 1.
    pub fn new(max_ngram: usize, joiner: impl Into<String>) -> Self {
        Self {
            max_ngram: max_ngram.max(1),
            joiner: joiner.into(),
        }
    }

    pub fn max_ngram(&self) -> usize {
        self.max_ngram
    }

    pub fn joiner(&self) -> &str {
        &self.joiner
    }

    /// Segment the concatenated token stream. Whatever separated two runs
    /// in the source is already gone, so an n-gram may span a run boundary.
    pub fn segment(&self, tokens: &[&str], table: &MappingTable) -> Segmentation {
        let stream = tokens.concat();
        let bounds: Vec<usize> = stream
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(stream.len()))
            .collect();
        let char_count = bounds.len() - 1;
        let mut segments = Vec::new();
        let mut notices = Vec::new();

        let mut i = 0;
        while i < char_count {
            let longest = self.max_ngram.min(char_count - i);
            let hit = (1..=longest).rev().find_map(|n| {
                let piece = &stream[bounds[i]..bounds[i + n]];
                table.get(piece).map(|target| (n, piece, target))
            });

            match hit {
                Some((n, piece, target)) => {
                    segments.push(Segment {
                        source: piece.to_string(),
                        target: Some(target.to_string()),
                    });
                    i += n;
                }
                None => {
                    let piece = &stream[bounds[i]..bounds[i + 1]];
                    if let Some(ch) = piece.chars().next() {
                        notices.push(Notice::UnmappedCharacter { ch });
                    }
                    segments.push(Segment {
                        source: piece.to_string(),
                        target: None,
                    });
                    i += 1;
                }
            }
        }

        debug!(
            segments = segments.len(),
            unmapped = notices.len(),
            "segmented"
        );
        Segmentation { segments, notices }
    }

    pub fn lookup(&self, tokens: &[&str], table: &MappingTable) -> String {
        self.segment(tokens, table).render(&self.joiner)
    }
}

/// Segment with the default 3-gram limit and a single-space joiner.
pub fn lookup(tokens: &[&str], table: &MappingTable) -> String {
    Segmenter::default().lookup(tokens, table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RuleClass;
    use crate::table::DuplicatePolicy;
    use proptest::prelude::*;

    fn amita_table() -> MappingTable {
        MappingTable::from_entries(
            RuleClass::Dictionary,
            [("阿", "a"), ("阿彌", "amia"), ("阿彌陀", "amita")]
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string())),
            DuplicatePolicy::Reject,
        )
        .unwrap()
    }

    #[test]
    fn tokenize_han_runs() {
        assert_eq!(
            tokenize("南無(十二)觀世音, om 阿"),
            vec!["南無", "十二", "觀世音", "阿"]
        );
        assert!(tokenize("om mani").is_empty());
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn longest_match_wins() {
        let table = amita_table();
        assert_eq!(lookup(&tokenize("阿彌陀佉"), &table), "amita 佉");
    }

    #[test]
    fn falls_back_to_shorter_grams() {
        let table = amita_table();
        assert_eq!(lookup(&["阿彌阿"], &table), "amia a");
    }

    #[test]
    fn unmapped_characters_reported() {
        let table = amita_table();
        let seg = Segmenter::default().segment(&["佉阿"], &table);
        assert_eq!(seg.notices, vec![Notice::UnmappedCharacter { ch: '佉' }]);
        assert_eq!(seg.segments[0].target, None);
        assert_eq!(seg.segments[1].target.as_deref(), Some("a"));
    }

    #[test]
    fn punctuation_does_not_break_a_match() {
        let table = amita_table();
        assert_eq!(lookup(&tokenize("阿，彌陀"), &table), "amita");
        assert_eq!(lookup(&["阿", "彌陀"], &table), "amita");
        assert_eq!(lookup(&tokenize("阿 (一) 彌"), &table), "a 一 彌");
    }

    #[test]
    fn empty_targets_skipped() {
        let mut table = amita_table();
        table.insert("引", "");
        assert_eq!(lookup(&["阿引阿"], &table), "a a");
    }

    #[test]
    fn greedy_not_optimal() {
        // "ABC" could be "A"+"BC", but greedy takes "AB" first.
        let mut table = MappingTable::new();
        table.insert("阿彌", "x");
        table.insert("彌陀", "y");
        table.insert("阿", "a");
        assert_eq!(lookup(&["阿彌陀"], &table), "x 陀");
    }

    #[test]
    fn custom_ngram_and_joiner() {
        let table = amita_table();
        let seg = Segmenter::new(2, "-");
        assert_eq!(seg.lookup(&["阿彌陀"], &table), "amia-陀");
        assert_eq!(Segmenter::new(0, " ").max_ngram(), 1);
    }

    proptest! {
        #[test]
        fn lookup_is_deterministic(s in "[阿彌陀佉薩 a-z,]{0,24}") {
            let table = amita_table();
            let first = lookup(&tokenize(&s), &table);
            let second = lookup(&tokenize(&s), &table);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn every_han_char_is_consumed(s in "[阿彌陀佉薩]{0,24}") {
            let table = amita_table();
            let seg = Segmenter::default().segment(&tokenize(&s), &table);
            let consumed: String = seg.segments.iter().map(|x| x.source.as_str()).collect();
            prop_assert_eq!(consumed, s);
        }
    }
}
