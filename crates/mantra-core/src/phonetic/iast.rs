use tracing::debug;

use crate::rewrite::RewritePass;
use crate::table::MappingTable;

/// Approximate IAST in Zhuyin symbols.
///
/// At each position the longest table pattern wins; text with no pattern
/// passes through one character at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IastZhuyin {
    table: MappingTable,
    max_chars: usize,
}

impl IastZhuyin {
    pub fn new(table: MappingTable) -> Self {
        let max_chars = table.max_key_chars();
        Self { table, max_chars }
    }

    pub fn table(&self) -> &MappingTable {
        &self.table
    }

    pub fn convert(&self, text: &str) -> String {
        let bounds: Vec<usize> = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .collect();
        let char_count = bounds.len() - 1;

        let mut out = String::with_capacity(text.len() * 2);
        let mut passed = 0usize;
        let mut i = 0;
        while i < char_count {
            let longest = self.max_chars.min(char_count - i);
            let hit = (1..=longest).rev().find_map(|n| {
                self.table
                    .get(&text[bounds[i]..bounds[i + n]])
                    .map(|z| (n, z))
            });
            match hit {
                Some((n, zhuyin)) => {
                    out.push_str(zhuyin);
                    i += n;
                }
                None => {
                    out.push_str(&text[bounds[i]..bounds[i + 1]]);
                    passed += 1;
                    i += 1;
                }
            }
        }
        debug!(chars = char_count, passed, "iast to zhuyin");
        out
    }
}

impl RewritePass for IastZhuyin {
    fn name(&self) -> &'static str {
        "iast-zhuyin"
    }

    fn rewrite(&self, text: &str) -> String {
        self.convert(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phonetic::PhoneticTables;

    fn converter() -> IastZhuyin {
        IastZhuyin::new(PhoneticTables::embedded().unwrap().iast_zhuyin)
    }

    #[test]
    fn consonant_with_inherent_vowel() {
        let c = converter();
        assert_eq!(c.convert("ka"), "ㄎㄚ");
        assert_eq!(c.convert("kha"), "ㄎㄚ");
        assert_eq!(c.convert("ma"), "ㄇㄚ");
    }

    #[test]
    fn longest_pattern_wins() {
        let c = converter();
        // "āi" beats "ā" + "i"
        assert_eq!(c.convert("āi"), "ㄞˉ");
        // "th" beats "t" + "h"
        assert_eq!(c.convert("thi"), "ㄊㄧ");
    }

    #[test]
    fn word() {
        let c = converter();
        assert_eq!(c.convert("oṃ maṇi"), "ㄛㆬ ㄇㄚㄋㄧ");
    }

    #[test]
    fn unknown_passes_through() {
        let c = converter();
        assert_eq!(c.convert("x-1"), "x-1");
        assert_eq!(c.convert(""), "");
    }

    #[test]
    fn as_rewrite_pass() {
        let c = converter();
        let out = crate::rewrite::run_passes(&[&c], "sa");
        assert_eq!(out, "ㄙㄚ");
    }
}
