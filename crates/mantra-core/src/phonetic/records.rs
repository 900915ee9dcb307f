//! Reading records for `漢字<TAB>注音` lists.

use serde::Serialize;
use tracing::debug;

use crate::error::{ConfigError, RuleClass};
use crate::table::{parse_table_toml, DuplicatePolicy, MappingTable};

use super::zhuyin_to_pinyin;

pub const DEFAULT_HAN_IAST_TOML: &str = include_str!("default_han_iast.toml");

/// The embedded character -> IAST table.
pub fn default_han_iast() -> Result<MappingTable, ConfigError> {
    parse_table_toml(
        DEFAULT_HAN_IAST_TOML,
        RuleClass::Dictionary,
        DuplicatePolicy::Reject,
    )
}

/// One exported line. Field names follow the JSON consumed downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadingRecord {
    pub id: usize,
    #[serde(rename = "漢字")]
    pub hanzi: String,
    #[serde(rename = "注音")]
    pub zhuyin: String,
    #[serde(rename = "漢語拼音")]
    pub pinyin: String,
    /// Empty when the table has no entry for `hanzi`.
    #[serde(rename = "IAST")]
    pub iast: String,
}

/// Parse tab-separated `hanzi<TAB>zhuyin` lines.
///
/// Lines without a tab are skipped, but `id` still counts them, so it is
/// the 1-based line number within the trimmed input.
pub fn parse_reading_records(text: &str, han_iast: &MappingTable) -> Vec<ReadingRecord> {
    let records: Vec<ReadingRecord> = text
        .trim()
        .lines()
        .enumerate()
        .filter_map(|(i, line)| {
            let (hanzi, zhuyin) = line.trim().split_once('\t')?;
            let (hanzi, zhuyin) = (hanzi.trim(), zhuyin.trim());
            Some(ReadingRecord {
                id: i + 1,
                hanzi: hanzi.to_string(),
                zhuyin: zhuyin.to_string(),
                pinyin: zhuyin_to_pinyin(zhuyin),
                iast: han_iast.get(hanzi).unwrap_or_default().to_string(),
            })
        })
        .collect();
    debug!(records = records.len(), "parsed reading records");
    records
}

/// Pretty JSON array, non-ASCII kept as is.
pub fn records_to_json(records: &[ReadingRecord]) -> Result<String, ConfigError> {
    serde_json::to_string_pretty(records).map_err(|e| ConfigError::Parse(e.to_string()))
}
