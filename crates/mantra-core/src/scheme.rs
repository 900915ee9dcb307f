//! Romanization scheme conversion for Sanskrit (Velthuis, IAST, Harvard-Kyoto).
//!
//! All schemes share one aligned token inventory. Conversion scans the source
//! text left to right, takes the longest source-scheme token at each position
//! and emits the aligned token of the target scheme. Anything that is not a
//! token of the source scheme passes through unchanged, so the conversion is
//! total over arbitrary input.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    Velthuis,
    Iast,
    HarvardKyoto,
}

impl Scheme {
    fn column(self) -> usize {
        match self {
            Scheme::Velthuis => 0,
            Scheme::Iast => 1,
            Scheme::HarvardKyoto => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Scheme::Velthuis => "velthuis",
            Scheme::Iast => "iast",
            Scheme::HarvardKyoto => "hk",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scheme {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "velthuis" => Ok(Scheme::Velthuis),
            "iast" => Ok(Scheme::Iast),
            "hk" | "harvard-kyoto" | "harvardkyoto" => Ok(Scheme::HarvardKyoto),
            _ => Err(ConfigError::UnknownScheme(s.to_string())),
        }
    }
}

/// Aligned tokens: Velthuis, IAST, Harvard-Kyoto.
const TOKENS: &[[&str; 3]] = &[
    // vowels
    ["a", "a", "a"],
    ["aa", "ā", "A"],
    ["i", "i", "i"],
    ["ii", "ī", "I"],
    ["u", "u", "u"],
    ["uu", "ū", "U"],
    [".r", "ṛ", "R"],
    [".rr", "ṝ", "RR"],
    [".l", "ḷ", "lR"],
    [".ll", "ḹ", "lRR"],
    ["e", "e", "e"],
    ["ai", "ai", "ai"],
    ["o", "o", "o"],
    ["au", "au", "au"],
    // marks
    [".m", "ṃ", "M"],
    [".h", "ḥ", "H"],
    ["/", "m̐", "~"],
    [".a", "'", "'"],
    // consonants
    ["k", "k", "k"],
    ["kh", "kh", "kh"],
    ["g", "g", "g"],
    ["gh", "gh", "gh"],
    ["\"n", "ṅ", "G"],
    ["c", "c", "c"],
    ["ch", "ch", "ch"],
    ["j", "j", "j"],
    ["jh", "jh", "jh"],
    ["~n", "ñ", "J"],
    [".t", "ṭ", "T"],
    [".th", "ṭh", "Th"],
    [".d", "ḍ", "D"],
    [".dh", "ḍh", "Dh"],
    [".n", "ṇ", "N"],
    ["t", "t", "t"],
    ["th", "th", "th"],
    ["d", "d", "d"],
    ["dh", "dh", "dh"],
    ["n", "n", "n"],
    ["p", "p", "p"],
    ["ph", "ph", "ph"],
    ["b", "b", "b"],
    ["bh", "bh", "bh"],
    ["m", "m", "m"],
    ["y", "y", "y"],
    ["r", "r", "r"],
    ["l", "l", "l"],
    ["v", "v", "v"],
    ["\"s", "ś", "z"],
    [".s", "ṣ", "S"],
    ["s", "s", "s"],
    ["h", "h", "h"],
];

/// A compiled source-token -> target-token map for one scheme pair.
#[derive(Debug, Clone)]
pub struct SchemeMap {
    from: Scheme,
    to: Scheme,
    map: HashMap<&'static str, &'static str>,
    max_chars: usize,
}

impl SchemeMap {
    pub fn new(from: Scheme, to: Scheme) -> Self {
        let (src, dst) = (from.column(), to.column());
        let mut map = HashMap::with_capacity(TOKENS.len());
        let mut max_chars = 0;
        for row in TOKENS {
            map.insert(row[src], row[dst]);
            max_chars = max_chars.max(row[src].chars().count());
        }
        Self {
            from,
            to,
            map,
            max_chars,
        }
    }

    pub fn from(&self) -> Scheme {
        self.from
    }

    pub fn to(&self) -> Scheme {
        self.to
    }

    pub fn convert(&self, text: &str) -> String {
        if self.from == self.to {
            return text.to_string();
        }

        // Byte offsets of every char boundary, including the end.
        let bounds: Vec<usize> = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .collect();
        let char_count = bounds.len() - 1;

        let mut out = String::with_capacity(text.len());
        let mut i = 0;
        while i < char_count {
            let longest = self.max_chars.min(char_count - i);
            let mut matched = false;
            for n in (1..=longest).rev() {
                let piece = &text[bounds[i]..bounds[i + n]];
                if let Some(target) = self.map.get(piece) {
                    out.push_str(target);
                    i += n;
                    matched = true;
                    break;
                }
            }
            if !matched {
                out.push_str(&text[bounds[i]..bounds[i + 1]]);
                i += 1;
            }
        }
        out
    }
}

/// Convert `text` from one scheme to another.
pub fn transliterate(text: &str, from: Scheme, to: Scheme) -> String {
    SchemeMap::new(from, to).convert(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn velthuis_to_iast_vowels() {
        assert_eq!(
            transliterate("aa ii uu .r .rr", Scheme::Velthuis, Scheme::Iast),
            "ā ī ū ṛ ṝ"
        );
    }

    #[test]
    fn velthuis_to_iast_retroflex_digraphs() {
        assert_eq!(
            transliterate(".tha .dha .na", Scheme::Velthuis, Scheme::Iast),
            "ṭha ḍha ṇa"
        );
        assert_eq!(
            transliterate("\"sa .sa ~na \"na", Scheme::Velthuis, Scheme::Iast),
            "śa ṣa ña ṅa"
        );
    }

    #[test]
    fn velthuis_marks() {
        assert_eq!(
            transliterate("o.m nama.h", Scheme::Velthuis, Scheme::Iast),
            "oṃ namaḥ"
        );
    }

    #[test]
    fn non_scheme_chars_pass_through() {
        assert_eq!(
            transliterate("Namo, 阿 śrī 123!", Scheme::Velthuis, Scheme::Iast),
            "Namo, 阿 śrī 123!"
        );
    }

    #[test]
    fn iast_to_hk() {
        assert_eq!(
            transliterate("saṃskṛtam", Scheme::Iast, Scheme::HarvardKyoto),
            "saMskRtam"
        );
    }

    #[test]
    fn hk_to_iast() {
        assert_eq!(
            transliterate("zrI", Scheme::HarvardKyoto, Scheme::Iast),
            "śrī"
        );
    }

    #[test]
    fn same_scheme_is_identity() {
        assert_eq!(transliterate(".t", Scheme::Velthuis, Scheme::Velthuis), ".t");
    }

    #[test]
    fn empty_input() {
        assert_eq!(transliterate("", Scheme::Velthuis, Scheme::Iast), "");
    }

    #[test]
    fn parse_scheme_names() {
        assert_eq!("Velthuis".parse::<Scheme>().unwrap(), Scheme::Velthuis);
        assert_eq!("iast".parse::<Scheme>().unwrap(), Scheme::Iast);
        assert_eq!("hk".parse::<Scheme>().unwrap(), Scheme::HarvardKyoto);
        let err = "itrans".parse::<Scheme>().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownScheme(_)));
    }
}
