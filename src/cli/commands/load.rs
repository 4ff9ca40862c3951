//! Load command implementation
//!
//! This module implements the `load` command, which turns each section into
//! a single-row table frame and loads the frames through the configured sink.

use super::{
    load_config_or_exit, load_input_or_exit, EXIT_CONFIG_ERROR, EXIT_FAILURE, EXIT_SUCCESS,
};
use crate::adapters::database::create_table_sink;
use crate::core::extract::{extract_sections, ExtractOptions};
use crate::core::frame::TableFrame;
use crate::core::render::render_frame;
use crate::domain::CdaError;
use crate::log_error_with_context;
use clap::Args;

/// Arguments for the load command
#[derive(Args, Debug)]
pub struct LoadArgs {
    /// CDA document to read (overrides input.path)
    #[arg(short, long)]
    pub file: Option<String>,

    /// Build statements without executing or writing them
    #[arg(long)]
    pub dry_run: bool,
}

impl LoadArgs {
    /// Execute the load command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting load command");

        let mut config = match load_config_or_exit(config_path) {
            Ok(config) => config,
            Err(code) => return Ok(code),
        };

        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.application.dry_run = true;
        }
        let dry_run = config.application.dry_run;

        let document = match load_input_or_exit(self.file.as_deref(), &config) {
            Ok(document) => document,
            Err(code) => return Ok(code),
        };

        let options = ExtractOptions {
            namespace: config.input.namespace.clone(),
            document_prefix: String::new(),
            sections: config.input.sections.clone(),
        };

        let mut frames = Vec::with_capacity(options.sections.len());
        for extracted in extract_sections(&document, &options) {
            let frame = TableFrame::from_record(extracted.section.table_name(), &extracted.record);
            print!("{}", render_frame(&extracted.section.title(), &frame));
            frames.push(frame);
        }

        let sink = match create_table_sink(&config) {
            Ok(sink) => sink,
            Err(e) => {
                log_error_with_context!(&e, "Failed to create table sink");
                eprintln!("Error: {e}");
                let code = match e {
                    CdaError::Configuration(_) => EXIT_CONFIG_ERROR,
                    _ => EXIT_FAILURE,
                };
                return Ok(code);
            }
        };

        if dry_run {
            println!();
            println!("DRY RUN MODE - nothing will be written to {}", sink.target_name());
        }

        match sink.load_frames(&frames, dry_run).await {
            Ok(summary) => {
                tracing::info!(
                    target_name = %sink.target_name(),
                    tables = summary.tables_created,
                    rows = summary.rows_inserted,
                    "Load completed"
                );
                eprintln!();
                eprintln!("Loaded into {}: {}", sink.target_name(), summary);
                Ok(EXIT_SUCCESS)
            }
            Err(e) => {
                log_error_with_context!(&e, "Failed to load frames");
                eprintln!("Error: {e}");
                Ok(EXIT_FAILURE)
            }
        }
    }
}
