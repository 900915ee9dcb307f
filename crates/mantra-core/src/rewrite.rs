//! Ordered rewrite pipeline.
//!
//! Passes run strictly one after another, and each pass is total over the
//! buffer before the next one starts:
//!
//! 1. multi-character rules, each a global literal replace, in table order
//! 2. single-character translation, one simultaneous scan
//! 3. optional scheme step (e.g. Velthuis -> IAST)
//! 4. postfix cleanups, in table order

use tracing::{debug, debug_span};

use crate::scheme::SchemeMap;
use crate::table::{CharTable, MappingTable, RuleSet};

/// A text-to-text pass of the pipeline.
pub trait RewritePass {
    fn name(&self) -> &'static str;
    fn rewrite(&self, text: &str) -> String;
}

/// Run all passes in sequence on `text`.
pub fn run_passes(passes: &[&dyn RewritePass], text: &str) -> String {
    let mut buf = text.to_string();
    for pass in passes {
        let _span = debug_span!("pass", name = pass.name()).entered();
        buf = pass.rewrite(&buf);
    }
    buf
}

/// Global literal replace of every rule, top to bottom. Later rules see the
/// output of earlier ones.
pub struct MultiCharPass<'a>(pub &'a MappingTable);

impl RewritePass for MultiCharPass<'_> {
    fn name(&self) -> &'static str {
        "multi"
    }

    fn rewrite(&self, text: &str) -> String {
        replace_in_order(self.0, text)
    }
}

pub struct SingleCharPass<'a>(pub &'a CharTable);

impl RewritePass for SingleCharPass<'_> {
    fn name(&self) -> &'static str {
        "single"
    }

    fn rewrite(&self, text: &str) -> String {
        self.0.translate(text)
    }
}

/// Reinterpret the buffer under a secondary romanization scheme.
pub struct SchemePass<'a>(pub &'a SchemeMap);

impl RewritePass for SchemePass<'_> {
    fn name(&self) -> &'static str {
        "scheme"
    }

    fn rewrite(&self, text: &str) -> String {
        self.0.convert(text)
    }
}

pub struct PostfixPass<'a>(pub &'a MappingTable);

impl RewritePass for PostfixPass<'_> {
    fn name(&self) -> &'static str {
        "postfix"
    }

    fn rewrite(&self, text: &str) -> String {
        replace_in_order(self.0, text)
    }
}

fn replace_in_order(table: &MappingTable, text: &str) -> String {
    let mut buf = text.to_string();
    let mut fired = 0usize;
    for (pattern, replacement) in table.iter() {
        if buf.contains(pattern) {
            buf = buf.replace(pattern, replacement);
            fired += 1;
        }
    }
    debug!(rules = table.len(), fired);
    buf
}

/// Apply the three rule classes with no scheme step.
pub fn apply(
    text: &str,
    multi: &MappingTable,
    single: &CharTable,
    postfix: &MappingTable,
) -> String {
    if text.is_empty() {
        return String::new();
    }
    run_passes(
        &[
            &MultiCharPass(multi),
            &SingleCharPass(single),
            &PostfixPass(postfix),
        ],
        text,
    )
}

/// Apply a rule set, with an optional scheme step between the
/// single-character pass and the postfix pass.
pub fn apply_rules(text: &str, rules: &RuleSet, scheme: Option<&SchemeMap>) -> String {
    if text.is_empty() {
        return String::new();
    }
    let multi = MultiCharPass(&rules.multi);
    let single = SingleCharPass(&rules.single);
    let postfix = PostfixPass(&rules.postfix);
    match scheme {
        Some(map) => {
            let step = SchemePass(map);
            run_passes(&[&multi, &single, &step, &postfix], text)
        }
        None => run_passes(&[&multi, &single, &postfix], text),
    }
}
