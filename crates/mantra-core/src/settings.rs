//! Settings loaded from TOML.
//!
//! - `Settings::default()` matches the embedded `default_settings.toml`
//! - `parse_settings_toml` validates every field before returning
//! - settings are plain values passed to the components that use them

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::phonetic::OutputStyle;
use crate::segment::{Segmenter, DEFAULT_JOINER, DEFAULT_MAX_NGRAM};
use crate::table::DuplicatePolicy;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

/// Upper bound for `segmenter.max_ngram`.
pub const MAX_NGRAM_LIMIT: usize = 8;

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    pub annotator: AnnotatorSettings,
    pub segmenter: SegmenterSettings,
    pub rules: RuleSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnnotatorSettings {
    pub hint_separator: String,
    pub hint_joiner: String,
    pub token_joiner: String,
    pub footnote_open: String,
    pub footnote_close: String,
    pub unknown_reading: String,
    pub style: OutputStyle,
}

impl Default for AnnotatorSettings {
    fn default() -> Self {
        Self {
            hint_separator: "｜".to_string(),
            hint_joiner: ",".to_string(),
            token_joiner: " ".to_string(),
            footnote_open: "〔".to_string(),
            footnote_close: "〕".to_string(),
            unknown_reading: "？".to_string(),
            style: OutputStyle::Bopomofo,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SegmenterSettings {
    pub max_ngram: usize,
    pub joiner: String,
}

impl Default for SegmenterSettings {
    fn default() -> Self {
        Self {
            max_ngram: DEFAULT_MAX_NGRAM,
            joiner: DEFAULT_JOINER.to_string(),
        }
    }
}

impl SegmenterSettings {
    pub fn segmenter(&self) -> Segmenter {
        Segmenter::new(self.max_ngram, self.joiner.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleSettings {
    pub allow_override: bool,
}

impl RuleSettings {
    pub fn duplicate_policy(&self) -> DuplicatePolicy {
        if self.allow_override {
            DuplicatePolicy::AllowOverride
        } else {
            DuplicatePolicy::Reject
        }
    }
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, ConfigError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

pub fn load_settings(path: &Path) -> Result<Settings, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_settings_toml(&content)
}

impl Settings {
    /// Serialize back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

fn validate(s: &Settings) -> Result<(), ConfigError> {
    macro_rules! check_non_empty {
        ($section:ident . $field:ident) => {
            if s.$section.$field.is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must not be empty".to_string(),
                });
            }
        };
    }

    check_non_empty!(annotator.hint_separator);
    check_non_empty!(annotator.hint_joiner);
    check_non_empty!(annotator.token_joiner);
    check_non_empty!(annotator.unknown_reading);

    if !(1..=MAX_NGRAM_LIMIT).contains(&s.segmenter.max_ngram) {
        return Err(ConfigError::InvalidValue {
            field: "segmenter.max_ngram".to_string(),
            reason: format!("must be between 1 and {MAX_NGRAM_LIMIT}"),
        });
    }

    // An empty joiner is allowed: it glues segment targets together.
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_default_toml() {
        let s = parse_settings_toml(DEFAULT_SETTINGS_TOML).unwrap();
        assert_eq!(s.annotator.hint_separator, "｜");
        assert_eq!(s.annotator.hint_joiner, ",");
        assert_eq!(s.annotator.footnote_open, "〔");
        assert_eq!(s.annotator.footnote_close, "〕");
        assert_eq!(s.annotator.unknown_reading, "？");
        assert_eq!(s.annotator.style, OutputStyle::Bopomofo);
        assert_eq!(s.segmenter.max_ngram, 3);
        assert_eq!(s.segmenter.joiner, " ");
        assert!(!s.rules.allow_override);
    }

    #[test]
    fn embedded_matches_default_impl() {
        let s = parse_settings_toml(DEFAULT_SETTINGS_TOML).unwrap();
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn parse_valid_custom_toml() {
        let toml = r#"
[annotator]
hint_separator = "|"
hint_joiner = "/"
token_joiner = "  "
footnote_open = "["
footnote_close = "]"
unknown_reading = "?"
style = "pinyin"

[segmenter]
max_ngram = 4
joiner = ""

[rules]
allow_override = true
"#;
        let s = parse_settings_toml(toml).unwrap();
        assert_eq!(s.annotator.style, OutputStyle::Pinyin);
        assert_eq!(s.segmenter.max_ngram, 4);
        assert_eq!(s.segmenter.segmenter().joiner(), "");
        assert_eq!(s.rules.duplicate_policy(), DuplicatePolicy::AllowOverride);
    }

    #[test]
    fn reject_zero_ngram() {
        let toml = DEFAULT_SETTINGS_TOML.replace("max_ngram = 3", "max_ngram = 0");
        let err = parse_settings_toml(&toml).unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "segmenter.max_ngram")
        );
    }

    #[test]
    fn reject_huge_ngram() {
        let toml = DEFAULT_SETTINGS_TOML.replace("max_ngram = 3", "max_ngram = 99");
        assert!(parse_settings_toml(&toml).is_err());
    }

    #[test]
    fn reject_empty_separator() {
        let toml = DEFAULT_SETTINGS_TOML.replace("hint_separator = \"｜\"", "hint_separator = \"\"");
        let err = parse_settings_toml(&toml).unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "annotator.hint_separator")
        );
    }

    #[test]
    fn reject_unknown_style() {
        let toml = DEFAULT_SETTINGS_TOML.replace("style = \"bopomofo\"", "style = \"ipa\"");
        assert!(matches!(
            parse_settings_toml(&toml),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn reject_missing_section() {
        let toml = "[segmenter]\nmax_ngram = 3\njoiner = \" \"\n";
        assert!(matches!(
            parse_settings_toml(toml),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn to_toml_round_trips() {
        let s = Settings::default();
        let text = s.to_toml().unwrap();
        assert_eq!(parse_settings_toml(&text).unwrap(), s);
    }
}
