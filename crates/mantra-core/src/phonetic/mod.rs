//! Phonetic annotation of Chinese chant text.
//!
//! Each character gets a reading: the override table first, then the
//! first reading of the `pinyin` dictionary. A bare vowel reading is
//! lengthened through the long-vowel table. Readings render as Zhuyin
//! (Bopomofo) or as numbered pinyin.

mod iast;
mod records;
mod zhuyin;

pub use iast::IastZhuyin;
pub use records::{
    default_han_iast, parse_reading_records, records_to_json, ReadingRecord,
    DEFAULT_HAN_IAST_TOML,
};
pub use zhuyin::{pinyin_to_zhuyin, zhuyin_to_pinyin};

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use pinyin::ToPinyin;
use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span};

use crate::annotation::{
    extract_annotation, split_parts_with_notices, strip_editorial, take_footnote, HintFilter,
};
use crate::error::{ConfigError, Notice, RuleClass};
use crate::settings::AnnotatorSettings;
use crate::table::{DuplicatePolicy, MappingTable, RawEntries};
use crate::unicode::is_open_paren;

pub const DEFAULT_PHONETIC_TOML: &str = include_str!("default_phonetic.toml");

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputStyle {
    #[default]
    Bopomofo,
    Pinyin,
}

impl fmt::Display for OutputStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputStyle::Bopomofo => "bopomofo",
            OutputStyle::Pinyin => "pinyin",
        })
    }
}

impl FromStr for OutputStyle {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bopomofo" | "zhuyin" => Ok(OutputStyle::Bopomofo),
            "pinyin" => Ok(OutputStyle::Pinyin),
            _ => Err(ConfigError::InvalidValue {
                field: "style".to_string(),
                reason: format!("unknown output style {s:?}"),
            }),
        }
    }
}

/// Override, long-vowel and IAST->Zhuyin tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneticTables {
    /// Character -> Zhuyin reading.
    pub overrides: MappingTable,
    /// Short vowel -> long vowel, both Zhuyin.
    pub long_vowels: MappingTable,
    pub iast_zhuyin: MappingTable,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct PhoneticDoc {
    #[serde(default)]
    overrides: RawEntries,
    #[serde(default)]
    long_vowels: RawEntries,
    #[serde(default)]
    iast_zhuyin: RawEntries,
}

impl PhoneticTables {
    pub fn embedded() -> Result<Self, ConfigError> {
        Self::parse_toml(DEFAULT_PHONETIC_TOML, DuplicatePolicy::Reject)
    }

    pub fn parse_toml(toml_str: &str, policy: DuplicatePolicy) -> Result<Self, ConfigError> {
        let doc: PhoneticDoc =
            toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))?;
        let overrides = doc.overrides.into_table(RuleClass::Dictionary, policy)?;
        if let Some((key, _)) = overrides.iter().find(|(k, _)| k.chars().count() != 1) {
            return Err(ConfigError::InvalidValue {
                field: format!("overrides.{key}"),
                reason: "key must be exactly one character".to_string(),
            });
        }
        Ok(Self {
            overrides,
            long_vowels: doc.long_vowels.into_table(RuleClass::Dictionary, policy)?,
            iast_zhuyin: doc.iast_zhuyin.into_table(RuleClass::Dictionary, policy)?,
        })
    }

    pub fn load(path: &Path, policy: DuplicatePolicy) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse_toml(&content, policy)
    }
}

/// One annotated output line and the anomalies found while producing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedLine {
    pub text: String,
    pub notices: Vec<Notice>,
}

#[derive(Debug, Clone)]
pub struct Annotator {
    overrides: MappingTable,
    long_vowels: MappingTable,
    filter: HintFilter,
    format: AnnotatorSettings,
}

impl Annotator {
    pub fn new(tables: &PhoneticTables, filter: HintFilter, format: AnnotatorSettings) -> Self {
        Self {
            overrides: tables.overrides.clone(),
            long_vowels: tables.long_vowels.clone(),
            filter,
            format,
        }
    }

    pub fn style(&self) -> OutputStyle {
        self.format.style
    }

    /// Reading of one character in the configured style, or `None` when
    /// neither the override table nor the dictionary knows it.
    pub fn reading(&self, ch: char) -> Option<String> {
        let mut buf = [0u8; 4];
        let key: &str = ch.encode_utf8(&mut buf);

        if let Some(zhuyin) = self.overrides.get(key) {
            let zhuyin = self.lengthen(zhuyin);
            return Some(match self.format.style {
                OutputStyle::Bopomofo => zhuyin,
                OutputStyle::Pinyin => zhuyin_to_pinyin(&zhuyin),
            });
        }

        let numbered = ch.to_pinyin()?.with_tone_num_end();
        match self.format.style {
            OutputStyle::Bopomofo => pinyin_to_zhuyin(numbered).map(|z| self.lengthen(&z)),
            OutputStyle::Pinyin => Some(numbered.to_string()),
        }
    }

    fn lengthen(&self, zhuyin: &str) -> String {
        self.long_vowels.get(zhuyin).unwrap_or(zhuyin).to_string()
    }

    fn render_token(&self, ch: char, hints: &[&str], notices: &mut Vec<Notice>) -> String {
        let reading = match self.reading(ch) {
            Some(r) => r,
            None => {
                debug!(%ch, "no reading");
                notices.push(Notice::UnmappedCharacter { ch });
                self.format.unknown_reading.clone()
            }
        };
        let kept = self.filter.retain(hints);
        if kept.is_empty() {
            format!("{ch}({reading})")
        } else {
            format!(
                "{ch}({reading}{}{})",
                self.format.hint_separator,
                kept.join(self.format.hint_joiner.as_str())
            )
        }
    }

    /// Annotate one line.
    ///
    /// Hints written after a run of characters belong to its last
    /// character. A trailing Chinese-numeral parenthesis becomes a footnote.
    pub fn annotate_line(&self, line: &str) -> AnnotatedLine {
        let stripped = strip_editorial(line);
        let (body, footnote) = take_footnote(&stripped);
        let (parts, mut notices) = split_parts_with_notices(body);

        let mut tokens = Vec::new();
        for part in parts {
            let run_end = part.find(is_open_paren).unwrap_or(part.len());
            let (run, groups) = part.split_at(run_end);
            let Some(last) = run.chars().last() else {
                continue;
            };
            for ch in run[..run.len() - last.len_utf8()].chars() {
                tokens.push(self.render_token(ch, &[], &mut notices));
            }

            let token = format!("{last}{groups}");
            let annotation = extract_annotation(&token);
            if !annotation.is_well_formed() {
                notices.push(Notice::MalformedAnnotation {
                    token: part.to_string(),
                });
            }
            tokens.push(self.render_token(last, &annotation.hints, &mut notices));
        }

        let mut text = tokens.join(self.format.token_joiner.as_str());
        if let Some(n) = footnote {
            if !text.is_empty() {
                text.push_str(&self.format.token_joiner);
            }
            text.push_str(&self.format.footnote_open);
            text.push_str(n);
            text.push_str(&self.format.footnote_close);
        }

        AnnotatedLine { text, notices }
    }

    /// Annotate every line of a document. Surrounding blank lines are
    /// dropped; interior blank lines stay blank.
    pub fn annotate_text(&self, text: &str) -> AnnotatedText {
        let _span = debug_span!("annotate", style = %self.format.style).entered();
        let mut lines = Vec::new();
        let mut notices = Vec::new();
        for line in text.trim().lines() {
            let annotated = self.annotate_line(line);
            lines.push(annotated.text);
            notices.extend(annotated.notices);
        }
        debug!(lines = lines.len(), notices = notices.len(), "annotated");
        AnnotatedText { lines, notices }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedText {
    pub lines: Vec<String>,
    pub notices: Vec<Notice>,
}

impl AnnotatedText {
    pub fn render(&self) -> String {
        self.lines.join("\n")
    }
}
