//! Side-table rendering for converted documents.

use serde::Serialize;

pub const MARKDOWN_TITLE: &str = "Chinese ⇒ IAST Mapping";

/// One converted source line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MappingRow {
    /// 1-based line number in the source document.
    pub line_no: usize,
    pub source: String,
    pub target: String,
}

/// `source => target`, one row per line.
pub fn render_text(rows: &[MappingRow]) -> String {
    let mut out = String::new();
    for row in rows {
        out.push_str(&row.source);
        out.push_str(" => ");
        out.push_str(&row.target);
        out.push('\n');
    }
    out
}

/// A Markdown document: a level-one heading, then one numbered item per
/// row, numbered by source line.
pub fn render_markdown(title: &str, rows: &[MappingRow]) -> String {
    let mut out = format!("# {title}\n\n");
    for row in rows {
        out.push_str(&format!(
            "{}. `{}` => **{}**\n\n",
            row.line_no, row.source, row.target
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<MappingRow> {
        vec![
            MappingRow {
                line_no: 1,
                source: "南無".to_string(),
                target: "namo".to_string(),
            },
            MappingRow {
                line_no: 3,
                source: "阿(二)".to_string(),
                target: "a".to_string(),
            },
        ]
    }

    #[test]
    fn text_rows() {
        assert_eq!(render_text(&rows()), "南無 => namo\n阿(二) => a\n");
        assert_eq!(render_text(&[]), "");
    }

    #[test]
    fn markdown_numbered_by_line() {
        let md = render_markdown(MARKDOWN_TITLE, &rows());
        assert_eq!(
            md,
            "# Chinese ⇒ IAST Mapping\n\n1. `南無` => **namo**\n\n3. `阿(二)` => **a**\n\n"
        );
    }
}
