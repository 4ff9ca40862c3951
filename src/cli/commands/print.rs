//! Print command implementation
//!
//! This module implements the `print` command, which flattens each section
//! of a document and prints it as `key: value` lines or JSON.

use super::{load_config_or_exit, load_input_or_exit, EXIT_CONFIG_ERROR, EXIT_SUCCESS};
use crate::config::CdaConfig;
use crate::core::extract::{extract_sections, ExtractOptions, DOCUMENT_PREFIX};
use crate::core::render::{OutputFormat, PrintReport};
use crate::core::select::Selector;
use crate::core::transform::find_and_flatten;
use clap::Args;

/// Arguments for the print command
#[derive(Args, Debug)]
pub struct PrintArgs {
    /// CDA document to read (overrides input.path)
    #[arg(short, long)]
    pub file: Option<String>,

    /// Extra selector to flatten, e.g. ".//cda:observation" (repeatable)
    #[arg(short, long = "select", value_name = "EXPR")]
    pub select: Vec<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl PrintArgs {
    /// Execute the print command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting print command");

        let config = match load_config_or_exit(config_path) {
            Ok(config) => config,
            Err(code) => return Ok(code),
        };

        let report = match self.build_report(&config) {
            Ok(report) => report,
            Err(code) => return Ok(code),
        };

        print!("{}", report.render(self.format)?);

        tracing::info!(
            sections = report.sections().len(),
            selectors = report.selectors().len(),
            "Print command completed"
        );
        Ok(EXIT_SUCCESS)
    }

    /// Loads the input and flattens every configured section and selector
    ///
    /// Returns the exit code to use on failure.
    pub fn build_report(&self, config: &CdaConfig) -> Result<PrintReport, i32> {
        // Parse selectors before touching the document
        let mut selectors = Vec::with_capacity(self.select.len());
        for expression in &self.select {
            match Selector::parse(expression, &config.input.namespaces) {
                Ok(selector) => selectors.push(selector),
                Err(e) => {
                    tracing::error!(error = %e, "Invalid selector");
                    eprintln!("Error: {e}");
                    return Err(EXIT_CONFIG_ERROR);
                }
            }
        }

        let document = load_input_or_exit(self.file.as_deref(), config)?;

        let options = ExtractOptions {
            namespace: config.input.namespace.clone(),
            document_prefix: DOCUMENT_PREFIX.to_string(),
            sections: config.input.sections.clone(),
        };

        let mut report = PrintReport::new();
        for extracted in extract_sections(&document, &options) {
            report.push_section(extracted.section, extracted.record);
        }
        for selector in &selectors {
            report.push_selector(
                selector.expression(),
                find_and_flatten(document.root(), selector),
            );
        }

        Ok(report)
    }
}
