//! Mapping tables: ordered rewrite rules and phonetic dictionaries.
//!
//! A `MappingTable` keeps its entries in declaration order (rule order is
//! significant for the multi-character pass) and indexes them by key for
//! exact-match lookup. Tables are loaded once and read-only afterwards.

mod config;
mod io;

pub use config::{
    default_rules_toml, load_keywords, load_rules, load_table, parse_keywords_json,
    parse_keywords_toml, parse_rules_toml, parse_table_json, parse_table_toml, TableFormat,
    DEFAULT_CLEAN_KEYWORDS_TOML, DEFAULT_KEYWORDS_TOML, DEFAULT_RULES_TOML,
};
pub(crate) use config::RawEntries;

use std::collections::HashMap;

use serde::ser::SerializeMap;
use serde::Serialize;

use crate::error::{ConfigError, RuleClass};

/// How to treat a key that appears twice in one table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Fail with `ConfigError::DuplicateKey`.
    #[default]
    Reject,
    /// Later value replaces the earlier one, keeping the earlier position.
    AllowOverride,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingTable {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl MappingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from ordered `(pattern, replacement)` pairs.
    ///
    /// Empty patterns are rejected. Duplicate patterns follow `policy`.
    pub fn from_entries<I>(
        class: RuleClass,
        entries: I,
        policy: DuplicatePolicy,
    ) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut table = Self::new();
        for (key, value) in entries {
            if key.is_empty() {
                return Err(ConfigError::EmptyPattern {
                    class,
                    replacement: value,
                });
            }
            if table.contains_key(&key) && policy == DuplicatePolicy::Reject {
                return Err(ConfigError::DuplicateKey { class, key });
            }
            table.insert(key, value);
        }
        Ok(table)
    }

    /// Insert or overwrite. An overwritten key keeps its original position.
    /// Returns the previous value, if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        match self.index.get(&key) {
            Some(&i) => Some(std::mem::replace(&mut self.entries[i].1, value)),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.index.get(key).map(|&i| self.entries[i].1.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Length in characters of the longest key, or 0 if empty.
    pub fn max_key_chars(&self) -> usize {
        self.entries
            .iter()
            .map(|(k, _)| k.chars().count())
            .max()
            .unwrap_or(0)
    }

    /// Pretty JSON object with keys in declaration order.
    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

impl Serialize for MappingTable {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Character-level translation table for the single-character pass.
///
/// Every key is exactly one character; values may be any string, including
/// the empty string (deletion).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharTable {
    map: HashMap<char, String>,
}

impl CharTable {
    pub fn from_table(table: &MappingTable) -> Result<Self, ConfigError> {
        let mut map = HashMap::with_capacity(table.len());
        for (key, value) in table.iter() {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => {
                    map.insert(c, value.to_string());
                }
                (None, _) => {
                    return Err(ConfigError::EmptyPattern {
                        class: RuleClass::Single,
                        replacement: value.to_string(),
                    })
                }
                (Some(_), Some(_)) => {
                    return Err(ConfigError::InvalidValue {
                        field: format!("single.{key}"),
                        reason: "pattern must be exactly one character".to_string(),
                    })
                }
            }
        }
        Ok(Self { map })
    }

    pub fn get(&self, c: char) -> Option<&str> {
        self.map.get(&c).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Map every character of `text` independently in one scan. A
    /// replacement is never rescanned.
    pub fn translate(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            match self.map.get(&c) {
                Some(repl) => out.push_str(repl),
                None => out.push(c),
            }
        }
        out
    }
}

/// The three rule classes of the rewrite pipeline, in application order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    pub multi: MappingTable,
    pub single: CharTable,
    pub postfix: MappingTable,
}

impl RuleSet {
    pub fn new(
        multi: MappingTable,
        single: &MappingTable,
        postfix: MappingTable,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            multi,
            single: CharTable::from_table(single)?,
            postfix,
        })
    }

    /// The embedded ASCII-code (CSX) rule set.
    pub fn embedded() -> Result<Self, ConfigError> {
        parse_rules_toml(DEFAULT_RULES_TOML, DuplicatePolicy::Reject)
    }

    pub fn rule_count(&self) -> usize {
        self.multi.len() + self.single.len() + self.postfix.len()
    }
}
