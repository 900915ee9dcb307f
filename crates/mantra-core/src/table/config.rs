use std::fmt;
use std::fs;
use std::path::Path;

use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer};

use super::{DuplicatePolicy, MappingTable, RuleSet};
use crate::error::{ConfigError, RuleClass};

pub const DEFAULT_RULES_TOML: &str = include_str!("default_rules.toml");
pub const DEFAULT_KEYWORDS_TOML: &str = include_str!("default_keywords.toml");
pub const DEFAULT_CLEAN_KEYWORDS_TOML: &str = include_str!("default_clean_keywords.toml");

/// Returns the embedded default rule set TOML content.
pub fn default_rules_toml() -> &'static str {
    DEFAULT_RULES_TOML
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Json,
    Toml,
}

impl TableFormat {
    /// `.json` files are JSON, everything else is TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => TableFormat::Json,
            _ => TableFormat::Toml,
        }
    }
}

/// A value slot of a flat mapping: `Some` for strings, `None` for anything
/// else (numbers, arrays, nested tables).
struct FlatValue(Option<String>);

impl<'de> Deserialize<'de> for FlatValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FlatValueVisitor;

        impl<'de> Visitor<'de> for FlatValueVisitor {
            type Value = FlatValue;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a string")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<FlatValue, E> {
                Ok(FlatValue(Some(v.to_string())))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<FlatValue, E> {
                Ok(FlatValue(Some(v)))
            }

            fn visit_bool<E: de::Error>(self, _: bool) -> Result<FlatValue, E> {
                Ok(FlatValue(None))
            }

            fn visit_i64<E: de::Error>(self, _: i64) -> Result<FlatValue, E> {
                Ok(FlatValue(None))
            }

            fn visit_u64<E: de::Error>(self, _: u64) -> Result<FlatValue, E> {
                Ok(FlatValue(None))
            }

            fn visit_f64<E: de::Error>(self, _: f64) -> Result<FlatValue, E> {
                Ok(FlatValue(None))
            }

            fn visit_unit<E: de::Error>(self) -> Result<FlatValue, E> {
                Ok(FlatValue(None))
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<FlatValue, A::Error> {
                while seq.next_element::<IgnoredAny>()?.is_some() {}
                Ok(FlatValue(None))
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<FlatValue, A::Error> {
                while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
                Ok(FlatValue(None))
            }
        }

        deserializer.deserialize_any(FlatValueVisitor)
    }
}

/// Map entries in document order, duplicates included.
#[derive(Default)]
pub(crate) struct RawEntries(Vec<(String, Option<String>)>);

impl<'de> Deserialize<'de> for RawEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = RawEntries;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a table of pattern = \"replacement\" entries")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<RawEntries, A::Error> {
                let mut entries = Vec::new();
                while let Some((key, value)) = map.next_entry::<String, FlatValue>()? {
                    entries.push((key, value.0));
                }
                Ok(RawEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

impl RawEntries {
    pub(crate) fn into_table(
        self,
        class: RuleClass,
        policy: DuplicatePolicy,
    ) -> Result<MappingTable, ConfigError> {
        let mut entries = Vec::with_capacity(self.0.len());
        for (key, value) in self.0 {
            let Some(value) = value else {
                return Err(ConfigError::NotFlatMapping { class, key });
            };
            entries.push((key, value));
        }
        MappingTable::from_entries(class, entries, policy)
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RulesDoc {
    #[serde(default)]
    multi: RawEntries,
    #[serde(default)]
    single: RawEntries,
    #[serde(default)]
    postfix: RawEntries,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct KeywordsDoc {
    keywords: Vec<String>,
}

/// Parse a rule set from TOML with `[multi]`, `[single]` and `[postfix]`
/// tables. Document order is application order.
pub fn parse_rules_toml(toml_str: &str, policy: DuplicatePolicy) -> Result<RuleSet, ConfigError> {
    let doc: RulesDoc = toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))?;

    let multi = doc.multi.into_table(RuleClass::Multi, policy)?;
    let single = doc.single.into_table(RuleClass::Single, policy)?;
    let postfix = doc.postfix.into_table(RuleClass::Postfix, policy)?;

    if multi.is_empty() && single.is_empty() && postfix.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "rules".to_string(),
            reason: "no rules defined".to_string(),
        });
    }

    RuleSet::new(multi, &single, postfix)
}

/// Parse a flat JSON object into a table, keeping key order.
pub fn parse_table_json(
    json_str: &str,
    class: RuleClass,
    policy: DuplicatePolicy,
) -> Result<MappingTable, ConfigError> {
    let raw: RawEntries =
        serde_json::from_str(json_str).map_err(|e| ConfigError::Parse(e.to_string()))?;
    raw.into_table(class, policy)
}

/// Parse a flat top-level TOML table into a table, keeping key order.
pub fn parse_table_toml(
    toml_str: &str,
    class: RuleClass,
    policy: DuplicatePolicy,
) -> Result<MappingTable, ConfigError> {
    let raw: RawEntries = toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))?;
    raw.into_table(class, policy)
}

/// Load one table from disk, choosing the format by file extension.
pub fn load_table(
    path: &Path,
    class: RuleClass,
    policy: DuplicatePolicy,
) -> Result<MappingTable, ConfigError> {
    let content = fs::read_to_string(path)?;
    match TableFormat::from_path(path) {
        TableFormat::Json => parse_table_json(&content, class, policy),
        TableFormat::Toml => parse_table_toml(&content, class, policy),
    }
}

/// Load a TOML rule set from disk.
pub fn load_rules(path: &Path, policy: DuplicatePolicy) -> Result<RuleSet, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_rules_toml(&content, policy)
}

fn validate_keywords(keywords: Vec<String>) -> Result<Vec<String>, ConfigError> {
    if keywords.iter().any(|k| k.is_empty()) {
        return Err(ConfigError::InvalidValue {
            field: "keywords".to_string(),
            reason: "empty keyword would match every hint".to_string(),
        });
    }
    Ok(keywords)
}

/// Parse a JSON array of hint keywords.
pub fn parse_keywords_json(json_str: &str) -> Result<Vec<String>, ConfigError> {
    let keywords: Vec<String> =
        serde_json::from_str(json_str).map_err(|e| ConfigError::Parse(e.to_string()))?;
    validate_keywords(keywords)
}

/// Parse a TOML document of the form `keywords = ["上", ...]`.
pub fn parse_keywords_toml(toml_str: &str) -> Result<Vec<String>, ConfigError> {
    let doc: KeywordsDoc =
        toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))?;
    validate_keywords(doc.keywords)
}

pub fn load_keywords(path: &Path) -> Result<Vec<String>, ConfigError> {
    let content = fs::read_to_string(path)?;
    match TableFormat::from_path(path) {
        TableFormat::Json => parse_keywords_json(&content),
        TableFormat::Toml => parse_keywords_toml(&content),
    }
}
