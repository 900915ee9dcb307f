use std::path::Path;

use tracing::info;

use mantra_core::builder::{build, parse_corpus};
use mantra_core::table::MappingTable;

use super::{read_file, write_file};
use crate::CliError;

pub fn build_map_cmd(parallel_file: &str, output_file: &str) {
    let text = die!(read_file(parallel_file), "Error: {}");
    let table = die!(
        write_mapping(&text, Path::new(output_file)),
        "Error writing mapping: {}"
    );
    println!("wrote {output_file} with {} entries", table.len());
}

/// Build a dictionary from corpus text and write it as a compiled `.mtbl`
/// artifact or, for any other extension, as pretty JSON.
pub fn write_mapping(text: &str, out: &Path) -> Result<MappingTable, CliError> {
    let lines = parse_corpus(text);
    let table = build(&lines);
    info!(lines = lines.len(), entries = table.len(), "built mapping");

    let compiled = out
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("mtbl"));
    if compiled {
        table.save(out)?;
    } else {
        write_file(out, &table.to_json_pretty()?)?;
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CORPUS: &str = "阿(一) => a\n阿彌(二) => ami\n阿 => aa\nno separator\n";

    #[test]
    fn json_mapping() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("zh_iast_mapping.json");
        let table = write_mapping(CORPUS, &out).unwrap();
        assert_eq!(table.len(), 2);
        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(written["阿"], "aa");
        assert_eq!(written["阿彌"], "ami");
    }

    #[test]
    fn compiled_mapping() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("zh_iast.mtbl");
        let table = write_mapping(CORPUS, &out).unwrap();
        assert_eq!(MappingTable::open(&out).unwrap(), table);
    }
}
