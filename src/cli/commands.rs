//! CLI command definitions.
//!
//! This module defines all CLI commands and their arguments using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// onedevx - Declarative deployment composer.
#[derive(Parser, Debug)]
#[command(name = "onedevx")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a sample specification tree.
    Init {
        /// Directory to initialize (defaults to current directory).
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Force overwrite existing files.
        #[arg(short, long)]
        force: bool,
    },

    /// Load and resolve every specification without touching a cluster.
    Validate {
        /// Root of the specification tree.
        #[arg(default_value = ".")]
        root: PathBuf,
    },

    /// Render the resources an installation would create.
    Render {
        /// Root of the specification tree.
        #[arg(default_value = ".")]
        root: PathBuf,

        /// Deployment stack name; the target namespace is onedevx-<stack>.
        #[arg(short, long, env = "ONEDEVX_STACK", default_value = "dev")]
        stack: String,

        /// Write one manifest file per resource instead of printing.
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },

    /// Install the specification tree into the target cluster.
    Apply {
        /// Root of the specification tree.
        #[arg(default_value = ".")]
        root: PathBuf,

        /// Deployment stack name; the target namespace is onedevx-<stack>.
        #[arg(short, long, env = "ONEDEVX_STACK", default_value = "dev")]
        stack: String,

        /// Skip confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
