//! Rendering of the synthesized rule document for `--show-rules`.

use crate::emit::RuleDocument;
use anyhow::{Context, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// The make file exactly as the executor would read it
    Make,
    Json,
    Yaml,
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self, document: &RuleDocument) -> Result<String> {
        match self.format {
            OutputFormat::Make => Ok(document.to_makefile()),
            OutputFormat::Json => serde_json::to_string_pretty(document)
                .context("Failed to serialize rules to JSON"),
            OutputFormat::Yaml => {
                serde_yaml::to_string(document).context("Failed to serialize rules to YAML")
            }
        }
    }
}
