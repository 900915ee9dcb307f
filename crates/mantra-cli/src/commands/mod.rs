//! Subcommand implementations for `mantratool`.
//!
//! Each `*_cmd` function reports fatal errors on stderr and exits with
//! status 1. The fallible helpers underneath return `CliError`.

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            std::process::exit(1);
        })
    };
}

pub mod annotate_ops;
pub mod config_ops;
pub mod convert_ops;
pub mod table_ops;

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use mantra_core::annotation::HintFilter;
use mantra_core::settings::{self, Settings};
use mantra_core::table::{self, DEFAULT_CLEAN_KEYWORDS_TOML, DEFAULT_KEYWORDS_TOML};

use crate::CliError;

/// Input text from positional arguments (joined with spaces) or a file.
pub fn read_input(args: &[String], input_file: Option<&str>) -> Result<String, CliError> {
    match input_file {
        Some(path) => read_file(path),
        None if !args.is_empty() => Ok(args.join(" ")),
        None => Err(CliError::NoInput),
    }
}

pub fn read_file(path: &str) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|e| CliError::io(path, e))
}

/// Write to `path`, or to stdout when no path is given. A trailing newline
/// is added for stdout only.
pub fn write_output(path: Option<&str>, content: &str) -> Result<(), CliError> {
    match path {
        Some(p) => write_file(Path::new(p), content),
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{content}").map_err(|e| CliError::io("<stdout>", e))
        }
    }
}

pub fn write_file(path: &Path, content: &str) -> Result<(), CliError> {
    fs::write(path, content).map_err(|e| CliError::io(&path.display().to_string(), e))
}

/// Settings from a file, or the built-in defaults.
pub fn load_settings(path: Option<&str>) -> Result<Settings, CliError> {
    match path {
        Some(p) => Ok(settings::load_settings(Path::new(p))?),
        None => Ok(Settings::default()),
    }
}

/// Hint keywords from a JSON/TOML file, or the annotator's built-in list.
pub fn load_filter(path: Option<&str>) -> Result<HintFilter, CliError> {
    load_filter_or(path, DEFAULT_KEYWORDS_TOML)
}

/// Like [`load_filter`], defaulting to the cleaner's list.
pub fn load_clean_filter(path: Option<&str>) -> Result<HintFilter, CliError> {
    load_filter_or(path, DEFAULT_CLEAN_KEYWORDS_TOML)
}

fn load_filter_or(path: Option<&str>, default_toml: &str) -> Result<HintFilter, CliError> {
    let keywords = match path {
        Some(p) => table::load_keywords(Path::new(p))?,
        None => table::parse_keywords_toml(default_toml)?,
    };
    Ok(HintFilter::new(keywords))
}
