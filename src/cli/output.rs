//! Output formatting for CLI commands.
//!
//! This module provides formatting utilities for displaying
//! installation results to the user in various formats.

use colored::Colorize;
use std::fmt::Write;
use tabled::{Table, Tabled};

use crate::installer::InstallSummary;

use super::commands::OutputFormat;

/// Output formatter for CLI.
#[derive(Debug)]
pub struct OutputFormatter {
    /// Output format.
    format: OutputFormat,
}

/// Applied resource row for table display.
#[derive(Tabled)]
struct ResourceRow {
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Namespace")]
    namespace: String,
}

impl OutputFormatter {
    /// Creates a new output formatter.
    #[must_use]
    pub const fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats an installation summary for display.
    #[must_use]
    pub fn format_summary(&self, summary: &InstallSummary) -> String {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(summary).unwrap_or_default(),
            OutputFormat::Text => Self::format_summary_text(summary),
        }
    }

    /// Formats a summary as text.
    fn format_summary_text(summary: &InstallSummary) -> String {
        let mut output = String::new();

        let _ = writeln!(
            output,
            "\n{} Installed {} component(s) from {} workspec(s) into namespace {}\n",
            "✓".green(),
            summary.components,
            summary.workspecs,
            summary.namespace.bold()
        );

        let rows: Vec<ResourceRow> = summary
            .resources
            .iter()
            .map(|r| ResourceRow {
                kind: r.kind.to_string(),
                name: r.name.clone(),
                namespace: r.namespace.clone(),
            })
            .collect();

        if !rows.is_empty() {
            let table = Table::new(rows).to_string();
            output.push_str(&table);
            output.push('\n');
        }

        let _ = writeln!(
            output,
            "\nResources: {} applied",
            summary.resource_count().to_string().green()
        );

        output
    }
}
