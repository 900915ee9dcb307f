use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{DuplicatePolicy, MappingTable};
use crate::error::{ConfigError, RuleClass};

const MAGIC: &[u8; 4] = b"MTBL";
const VERSION: u8 = 1;

#[derive(Serialize, Deserialize)]
struct TableRecord {
    key: String,
    value: String,
}

impl MappingTable {
    /// Serialize to bytes (MTBL format).
    pub fn to_bytes(&self) -> Result<Vec<u8>, ConfigError> {
        let records: Vec<TableRecord> = self
            .iter()
            .map(|(key, value)| TableRecord {
                key: key.to_string(),
                value: value.to_string(),
            })
            .collect();

        let body = bincode::serialize(&records).map_err(|e| ConfigError::Parse(e.to_string()))?;
        let mut buf = Vec::with_capacity(5 + body.len());
        buf.extend_from_slice(MAGIC);
        buf.push(VERSION);
        buf.extend_from_slice(&body);
        Ok(buf)
    }

    /// Deserialize from bytes (MTBL format). A compiled table was built with
    /// unique keys, so a duplicate here means a corrupt artifact.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        if bytes.len() < 5 {
            return Err(ConfigError::InvalidArtifact("too short"));
        }
        if &bytes[0..4] != MAGIC {
            return Err(ConfigError::InvalidArtifact("bad magic"));
        }
        if bytes[4] != VERSION {
            return Err(ConfigError::InvalidArtifact("unsupported version"));
        }
        let records: Vec<TableRecord> =
            bincode::deserialize(&bytes[5..]).map_err(|e| ConfigError::Parse(e.to_string()))?;

        MappingTable::from_entries(
            RuleClass::Dictionary,
            records.into_iter().map(|r| (r.key, r.value)),
            DuplicatePolicy::Reject,
        )
    }

    /// Atomic write: write to .tmp then rename.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let bytes = self.to_bytes()?;
        let tmp = path.with_extension("tmp");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&tmp, &bytes)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }

    /// Open a compiled table. A missing file is an error: tables are
    /// required before any text is converted.
    pub fn open(path: &Path) -> Result<Self, ConfigError> {
        let bytes = fs::read(path)?;
        Self::from_bytes(&bytes)
    }
}
