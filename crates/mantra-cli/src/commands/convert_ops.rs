use std::path::{Path, PathBuf};

use tracing::{debug, info};

use mantra_core::converter::{CsxConverter, SideTable, ZhIastConverter};
use mantra_core::phonetic::{
    default_han_iast, parse_reading_records, records_to_json, zhuyin_to_pinyin, IastZhuyin,
    PhoneticTables,
};
use mantra_core::table::{self, load_rules, CharTable, MappingTable, RuleSet};
use mantra_core::RuleClass;

use super::{load_settings, read_file, read_input, write_file, write_output};
use crate::CliError;

/// Where the CSX rules come from. `rules_file` (or the embedded set) is the
/// base; each per-class file replaces that whole class. The duplicate policy
/// comes from `rules.allow_override` in the settings.
#[derive(Debug, Default)]
pub struct CsxOptions<'a> {
    pub rules_file: Option<&'a str>,
    pub multi_file: Option<&'a str>,
    pub single_file: Option<&'a str>,
    pub postfix_file: Option<&'a str>,
    pub settings_file: Option<&'a str>,
    pub no_scheme: bool,
}

pub fn csx_cmd(
    text: &[String],
    input_file: Option<&str>,
    output_file: Option<&str>,
    opts: &CsxOptions,
) {
    let source = die!(read_input(text, input_file), "Error: {}");
    let converter = die!(csx_converter(opts), "Error loading rules: {}");
    die!(
        write_output(output_file, &converter.convert(&source)),
        "Error writing output: {}"
    );
}

pub fn csx_rules(opts: &CsxOptions) -> Result<RuleSet, CliError> {
    let policy = load_settings(opts.settings_file)?.rules.duplicate_policy();
    let mut rules = match opts.rules_file {
        Some(path) => load_rules(Path::new(path), policy)?,
        None => RuleSet::embedded()?,
    };
    if let Some(path) = opts.multi_file {
        rules.multi = table::load_table(Path::new(path), RuleClass::Multi, policy)?;
    }
    if let Some(path) = opts.single_file {
        let single = table::load_table(Path::new(path), RuleClass::Single, policy)?;
        rules.single = CharTable::from_table(&single)?;
    }
    if let Some(path) = opts.postfix_file {
        rules.postfix = table::load_table(Path::new(path), RuleClass::Postfix, policy)?;
    }
    debug!(rules = rules.rule_count(), "csx rules loaded");
    Ok(rules)
}

pub fn csx_converter(opts: &CsxOptions) -> Result<CsxConverter, CliError> {
    let converter = CsxConverter::new(csx_rules(opts)?);
    Ok(if opts.no_scheme {
        converter.with_scheme(None)
    } else {
        converter
    })
}

/// A compiled `.mtbl` artifact or a JSON/TOML dictionary.
pub fn load_dictionary(path: &str, allow_override: bool) -> Result<MappingTable, CliError> {
    let path = Path::new(path);
    let is_compiled = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("mtbl"));
    let dict = if is_compiled {
        MappingTable::open(path)?
    } else {
        let policy = if allow_override {
            table::DuplicatePolicy::AllowOverride
        } else {
            table::DuplicatePolicy::Reject
        };
        table::load_table(path, RuleClass::Dictionary, policy)?
    };
    Ok(dict)
}

pub fn zh_iast_cmd(
    input_file: &str,
    map_file: &str,
    output_file: &str,
    settings_file: Option<&str>,
) {
    let settings = die!(load_settings(settings_file), "Error loading settings: {}");
    let table = die!(
        load_dictionary(map_file, settings.rules.allow_override),
        "Error loading mapping: {}"
    );
    let text = die!(read_file(input_file), "Error: {}");
    let converter = ZhIastConverter::with_segmenter(table, settings.segmenter.segmenter());
    let (txt, md, side) = die!(
        write_side_tables(&converter, &text, Path::new(output_file)),
        "Error writing output: {}"
    );
    for notice in &side.notices {
        debug!(%notice);
    }
    println!(
        "wrote {} and {} ({} rows, {} unmapped)",
        txt.display(),
        md.display(),
        side.rows.len(),
        side.notices.len()
    );
}

/// Convert `text` and write `<out>` plus its `.md` sibling.
pub fn write_side_tables(
    converter: &ZhIastConverter,
    text: &str,
    out_txt: &Path,
) -> Result<(PathBuf, PathBuf, SideTable), CliError> {
    let side = converter.convert_document(text);
    let out_md = out_txt.with_extension("md");
    write_file(out_txt, &side.render_text())?;
    write_file(&out_md, &side.render_markdown())?;
    info!(rows = side.rows.len(), "side tables written");
    Ok((out_txt.to_path_buf(), out_md, side))
}

pub fn iast_zhuyin_cmd(
    input_file: &str,
    output_file: Option<&str>,
    phonetic_file: Option<&str>,
) {
    let converter = die!(iast_zhuyin(phonetic_file), "Error loading tables: {}");
    let text = die!(read_file(input_file), "Error: {}");
    die!(
        write_output(output_file, &converter.convert(&text)),
        "Error writing output: {}"
    );
}

pub fn iast_zhuyin(phonetic_file: Option<&str>) -> Result<IastZhuyin, CliError> {
    let tables = match phonetic_file {
        Some(path) => PhoneticTables::load(Path::new(path), Default::default())?,
        None => PhoneticTables::embedded()?,
    };
    Ok(IastZhuyin::new(tables.iast_zhuyin))
}

/// Convert each argument (or each whitespace-separated item of the input
/// file) and print one result per line.
pub fn zhuyin_pinyin_cmd(items: &[String], input_file: Option<&str>, output_file: Option<&str>) {
    let text = die!(read_input(items, input_file), "Error: {}");
    let converted: Vec<String> = text.split_whitespace().map(zhuyin_to_pinyin).collect();
    die!(
        write_output(output_file, &converted.join("\n")),
        "Error writing output: {}"
    );
}

/// Export `漢字<TAB>注音` lines as JSON reading records.
pub fn zhuyin_records_cmd(input_file: &str, output_file: Option<&str>, map_file: Option<&str>) {
    let text = die!(read_file(input_file), "Error: {}");
    let json = die!(zhuyin_records(&text, map_file), "Error: {}");
    die!(write_output(output_file, &json), "Error writing output: {}");
    if let Some(path) = output_file {
        println!("wrote {path}");
    }
}

/// `map_file` is any dictionary `load_dictionary` accepts; without one the
/// embedded character table is used.
pub fn zhuyin_records(text: &str, map_file: Option<&str>) -> Result<String, CliError> {
    let han_iast = match map_file {
        Some(path) => load_dictionary(path, false)?,
        None => default_han_iast()?,
    };
    let records = parse_reading_records(text, &han_iast);
    info!(records = records.len(), "reading records parsed");
    Ok(records_to_json(&records)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mantra_core::builder::build_from_text;
    use mantra_core::settings::Settings;
    use mantra_core::ConfigError;

    #[test]
    fn embedded_csx_converter() {
        let c = csx_converter(&CsxOptions::default()).unwrap();
        assert_eq!(c.convert("o3 ma5i"), "oṃ maṇi");
        let raw = csx_converter(&CsxOptions {
            no_scheme: true,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(raw.convert("k.r"), "k.r");
    }

    #[test]
    fn custom_rules_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.toml");
        std::fs::write(&path, "[single]\n\"9\" = \"ū\"\n").unwrap();
        let c = csx_converter(&CsxOptions {
            rules_file: path.to_str(),
            no_scheme: true,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(c.convert("h9"), "hū");
    }

    #[test]
    fn json_class_tables_replace_embedded_classes() {
        let dir = tempfile::tempdir().unwrap();
        let multi = dir.path().join("multi_mapping.json");
        let single = dir.path().join("table_mapping.json");
        let postfix = dir.path().join("postfix_cleanup_rules.json");
        std::fs::write(&multi, r#"{"sh": "ś"}"#).unwrap();
        std::fs::write(&single, r#"{"3": "ṃ"}"#).unwrap();
        std::fs::write(&postfix, r#"{"ś": "sh"}"#).unwrap();

        let opts = CsxOptions {
            multi_file: multi.to_str(),
            single_file: single.to_str(),
            ..Default::default()
        };
        let rules = csx_rules(&opts).unwrap();
        assert_eq!(rules.multi.len(), 1);
        assert_eq!(rules.single.len(), 1);
        assert_eq!(rules.postfix, RuleSet::embedded().unwrap().postfix);

        let opts = CsxOptions {
            postfix_file: postfix.to_str(),
            no_scheme: true,
            ..opts
        };
        assert_eq!(csx_converter(&opts).unwrap().convert("sho3"), "shoṃ");
    }

    #[test]
    fn duplicate_json_key_follows_settings_policy() {
        let dir = tempfile::tempdir().unwrap();
        let multi = dir.path().join("multi_mapping.json");
        std::fs::write(&multi, r#"{"j#": "jñ", "a#": "ā", "j#": "ñ"}"#).unwrap();

        let rejecting = CsxOptions {
            multi_file: multi.to_str(),
            ..Default::default()
        };
        let err = csx_rules(&rejecting).unwrap_err();
        assert!(matches!(
            err,
            CliError::Config(ConfigError::DuplicateKey { ref key, .. }) if key == "j#"
        ));

        let mut settings = Settings::default();
        settings.rules.allow_override = true;
        let settings_path = dir.path().join("settings.toml");
        std::fs::write(&settings_path, settings.to_toml().unwrap()).unwrap();
        let overriding = CsxOptions {
            settings_file: settings_path.to_str(),
            ..rejecting
        };
        let rules = csx_rules(&overriding).unwrap();
        let entries: Vec<_> = rules.multi.iter().collect();
        assert_eq!(entries, vec![("j#", "ñ"), ("a#", "ā")]);
    }

    #[test]
    fn zhuyin_records_with_embedded_table() {
        let json = zhuyin_records("唵\tㄥˋ\n吽\tㄏㄨㄥˋ\n", None).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["漢語拼音"], "eng4");
        assert_eq!(value[1]["id"], 2);
        assert_eq!(value[1]["IAST"], "hūṃ");
    }

    #[test]
    fn zhuyin_records_with_dictionary_file() {
        let dir = tempfile::tempdir().unwrap();
        let map = dir.path().join("han_iast.json");
        std::fs::write(&map, r#"{"唵": "om"}"#).unwrap();
        let json = zhuyin_records("唵\tㄥˋ", map.to_str()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["IAST"], "om");
    }

    #[test]
    fn side_tables_written_next_to_each_other() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("mapping.txt");
        let converter = ZhIastConverter::new(build_from_text("南無 => namo\n一 => eka\n"));
        let (txt, md, side) = write_side_tables(&converter, "南無(一)\n", &out).unwrap();
        assert_eq!(md, dir.path().join("mapping.md"));
        assert_eq!(std::fs::read_to_string(txt).unwrap(), "南無(一) => namo eka\n");
        let md_text = std::fs::read_to_string(md).unwrap();
        assert!(md_text.contains("1. `南無(一)` => **namo eka**"));
        assert!(side.notices.is_empty());
    }

    #[test]
    fn dictionary_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("map.json");
        std::fs::write(&json, r#"{"阿": "a"}"#).unwrap();
        let table = load_dictionary(json.to_str().unwrap(), false).unwrap();
        assert_eq!(table.get("阿"), Some("a"));

        let compiled = dir.path().join("map.mtbl");
        table.save(&compiled).unwrap();
        let reopened = load_dictionary(compiled.to_str().unwrap(), false).unwrap();
        assert_eq!(reopened, table);
    }

    #[test]
    fn embedded_iast_zhuyin() {
        let c = iast_zhuyin(None).unwrap();
        assert_eq!(c.convert("sa"), "ㄙㄚ");
    }
}
