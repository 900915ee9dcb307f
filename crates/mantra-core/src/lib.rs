pub mod annotation;
pub mod builder;
pub mod converter;
pub mod error;
pub mod phonetic;
pub mod report;
pub mod rewrite;
pub mod scheme;
pub mod segment;
pub mod settings;
pub mod table;
pub mod unicode;

pub use error::{ConfigError, Notice, RuleClass};
