//! End-to-end conversions.
//!
//! - [`CsxConverter`]: ASCII phonetic code to IAST through the rewrite
//!   pipeline with a Velthuis -> IAST scheme step
//! - [`ZhIastConverter`]: Chinese phonetic lines to target strings through
//!   line cleaning, Han-run tokenization and longest-match segmentation


use tracing::{debug, debug_span};

use crate::annotation::{clean_line, CleanedLine};
use crate::error::Notice;
use crate::report::{self, MappingRow, MARKDOWN_TITLE};
use crate::rewrite::apply_rules;
use crate::scheme::{Scheme, SchemeMap};
use crate::segment::{tokenize, Segmentation, Segmenter};
use crate::table::{MappingTable, RuleSet};

#[derive(Debug, Clone)]
pub struct CsxConverter {
    rules: RuleSet,
    scheme: Option<SchemeMap>,
}

impl CsxConverter {
    /// Rules followed by the Velthuis -> IAST scheme step.
    pub fn new(rules: RuleSet) -> Self {
        Self {
            rules,
            scheme: Some(SchemeMap::new(Scheme::Velthuis, Scheme::Iast)),
        }
    }

    /// Replace the scheme step, or drop it with `None`.
    pub fn with_scheme(mut self, scheme: Option<SchemeMap>) -> Self {
        self.scheme = scheme;
        self
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn convert(&self, text: &str) -> String {
        let _span = debug_span!("csx", len = text.len()).entered();
        apply_rules(text, &self.rules, self.scheme.as_ref())
    }
}

/// Convert ASCII code to IAST with `rules` and the Velthuis scheme step.
pub fn convert_csx_to_iast(text: &str, rules: &RuleSet) -> String {
    let scheme = SchemeMap::new(Scheme::Velthuis, Scheme::Iast);
    apply_rules(text, rules, Some(&scheme))
}

/// One converted line with its intermediate forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedLine {
    pub cleaned: CleanedLine,
    pub segmentation: Segmentation,
    pub target: String,
}

/// Ordered rows of a converted document plus every notice raised.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SideTable {
    pub rows: Vec<MappingRow>,
    pub notices: Vec<Notice>,
}

impl SideTable {
    pub fn render_text(&self) -> String {
        report::render_text(&self.rows)
    }

    pub fn render_markdown(&self) -> String {
        report::render_markdown(MARKDOWN_TITLE, &self.rows)
    }

    /// Target column only, one line per row.
    pub fn targets(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.target.as_str()).collect()
    }
}

#[derive(Debug, Clone)]
pub struct ZhIastConverter {
    table: MappingTable,
    segmenter: Segmenter,
}

impl ZhIastConverter {
    pub fn new(table: MappingTable) -> Self {
        Self::with_segmenter(table, Segmenter::default())
    }

    pub fn with_segmenter(table: MappingTable, segmenter: Segmenter) -> Self {
        Self { table, segmenter }
    }

    pub fn table(&self) -> &MappingTable {
        &self.table
    }

    /// The cleaned text, index marker included, is what gets segmented.
    pub fn convert_line(&self, line: &str) -> ConvertedLine {
        let cleaned = clean_line(line);
        let tokens = tokenize(&cleaned.text);
        let segmentation = self.segmenter.segment(&tokens, &self.table);
        let target = segmentation.render(self.segmenter.joiner());
        ConvertedLine {
            cleaned,
            segmentation,
            target,
        }
    }

    /// Convert every non-blank line. Rows keep their source line numbers.
    pub fn convert_document(&self, text: &str) -> SideTable {
        let _span = debug_span!("zh_iast").entered();
        let mut table = SideTable::default();
        for (i, raw) in text.lines().enumerate() {
            let raw = raw.trim();
            if raw.is_empty() {
                continue;
            }
            let converted = self.convert_line(raw);
            table.notices.extend(converted.segmentation.notices);
            table.rows.push(MappingRow {
                line_no: i + 1,
                source: converted.cleaned.text,
                target: converted.target,
            });
        }
        debug!(
            rows = table.rows.len(),
            notices = table.notices.len(),
            "converted document"
        );
        table
    }
}
