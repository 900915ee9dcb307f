use std::io;

use mantra_core::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("no input: pass text arguments or --in <file>")]
    NoInput,
}

impl CliError {
    pub(crate) fn io(path: &str, source: io::Error) -> Self {
        CliError::Io {
            path: path.to_string(),
            source,
        }
    }
}
