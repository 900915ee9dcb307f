use std::path::Path;

use mantra_core::phonetic::{PhoneticTables, DEFAULT_PHONETIC_TOML};
use mantra_core::settings;
use mantra_core::table::{self, DuplicatePolicy};

use super::read_file;

pub fn rules_export() {
    print!("{}", table::default_rules_toml());
}

pub fn rules_validate(file: &str) {
    let content = die!(read_file(file), "Error: {}");
    let rules = die!(
        table::parse_rules_toml(&content, DuplicatePolicy::Reject),
        "Error: {}"
    );
    println!(
        "OK: {} rules (multi={}, single={}, postfix={})",
        rules.rule_count(),
        rules.multi.len(),
        rules.single.len(),
        rules.postfix.len()
    );
}

pub fn phonetic_export() {
    print!("{DEFAULT_PHONETIC_TOML}");
}

pub fn phonetic_validate(file: &str) {
    let tables = die!(
        PhoneticTables::load(Path::new(file), DuplicatePolicy::Reject),
        "Error: {}"
    );
    println!(
        "OK: overrides={}, long_vowels={}, iast_zhuyin={}",
        tables.overrides.len(),
        tables.long_vowels.len(),
        tables.iast_zhuyin.len()
    );
}

pub fn settings_export() {
    print!("{}", settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(read_file(file), "Error: {}");
    let s = die!(settings::parse_settings_toml(&content), "Error: {}");
    println!(
        "OK: annotator.style={}, segmenter.max_ngram={}, rules.allow_override={}",
        s.annotator.style, s.segmenter.max_ngram, s.rules.allow_override
    );
}
