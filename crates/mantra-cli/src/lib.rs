pub mod commands;
mod error;
pub mod trace_init;

pub use error::CliError;
