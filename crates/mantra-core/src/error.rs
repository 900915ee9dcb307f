//! Error and notice types shared by every conversion stage.
//!
//! `ConfigError` is the only fatal error: it is raised while loading tables
//! or settings, before any text is processed. Text-shape anomalies are
//! reported as [`Notice`] values and never abort a conversion.

use std::fmt;
use std::io;

/// Which rule table a configuration problem was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleClass {
    Multi,
    Single,
    Postfix,
    Dictionary,
}

impl fmt::Display for RuleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RuleClass::Multi => "multi",
            RuleClass::Single => "single",
            RuleClass::Postfix => "postfix",
            RuleClass::Dictionary => "dictionary",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("[{class}] is not a flat string-to-string mapping (key: {key})")]
    NotFlatMapping { class: RuleClass, key: String },

    #[error("[{class}] empty pattern (replacement: {replacement:?})")]
    EmptyPattern {
        class: RuleClass,
        replacement: String,
    },

    #[error("[{class}] duplicate key: {key}")]
    DuplicateKey { class: RuleClass, key: String },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("invalid table artifact: {0}")]
    InvalidArtifact(&'static str),

    #[error("unknown scheme: {0}")]
    UnknownScheme(String),
}

/// A non-fatal anomaly found while converting text.
///
/// Conversions still produce output when a notice is raised; the affected
/// text passes through literally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A token or parenthetical span did not parse as `char(hint)...`.
    MalformedAnnotation { token: String },
    /// No table entry or phonetic reading exists for a character.
    UnmappedCharacter { ch: char },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::MalformedAnnotation { token } => {
                write!(f, "malformed annotation: {token}")
            }
            Notice::UnmappedCharacter { ch } => write!(f, "unmapped character: {ch}"),
        }
    }
}
