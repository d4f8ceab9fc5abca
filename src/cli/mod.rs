//! Command-line interface for the deployment composer.
//!
//! Command definitions live in `commands`, display formatting in
//! `output`.

mod commands;
mod output;

pub use commands::{Cli, Commands, OutputFormat};
pub use output::OutputFormatter;
