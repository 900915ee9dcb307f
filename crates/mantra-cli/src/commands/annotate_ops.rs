use std::path::Path;

use tracing::{info, warn};

use mantra_core::annotation::clean_mantra;
use mantra_core::phonetic::{AnnotatedText, Annotator, OutputStyle, PhoneticTables};
use mantra_core::Notice;

use super::{load_clean_filter, load_filter, load_settings, read_file, write_output};
use crate::CliError;

pub struct AnnotateOptions<'a> {
    pub style: Option<OutputStyle>,
    pub keywords_file: Option<&'a str>,
    pub phonetic_file: Option<&'a str>,
    pub settings_file: Option<&'a str>,
}

pub fn annotate_cmd(input_file: &str, output_file: Option<&str>, opts: &AnnotateOptions) {
    let text = die!(read_file(input_file), "Error: {}");
    let annotator = die!(build_annotator(opts), "Error loading tables: {}");
    let annotated = annotate(&annotator, &text);
    die!(
        write_output(output_file, &annotated.render()),
        "Error writing output: {}"
    );
    if let Some(path) = output_file {
        println!("annotated {} lines -> {path}", annotated.lines.len());
    }
}

pub fn build_annotator(opts: &AnnotateOptions) -> Result<Annotator, CliError> {
    let settings = load_settings(opts.settings_file)?;
    let filter = load_filter(opts.keywords_file)?;
    let tables = match opts.phonetic_file {
        Some(path) => {
            PhoneticTables::load(Path::new(path), settings.rules.duplicate_policy())?
        }
        None => PhoneticTables::embedded()?,
    };
    let mut format = settings.annotator;
    if let Some(style) = opts.style {
        format.style = style;
    }
    Ok(Annotator::new(&tables, filter, format))
}

/// Annotate and log what could not be read.
pub fn annotate(annotator: &Annotator, text: &str) -> AnnotatedText {
    let annotated = annotator.annotate_text(text);
    for notice in &annotated.notices {
        match notice {
            Notice::MalformedAnnotation { .. } => warn!(%notice),
            Notice::UnmappedCharacter { .. } => info!(%notice),
        }
    }
    annotated
}

pub fn clean_cmd(input_file: &str, output_file: Option<&str>, keywords_file: Option<&str>) {
    let text = die!(read_file(input_file), "Error: {}");
    let filter = die!(load_clean_filter(keywords_file), "Error loading keywords: {}");
    die!(
        write_output(output_file, &clean_mantra(&text, &filter)),
        "Error writing output: {}"
    );
}
