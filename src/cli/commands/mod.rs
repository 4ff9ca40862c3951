//! CLI command implementations
//!
//! This module contains all CLI command implementations and the steps they
//! share: loading the configuration and the input document.

pub mod init;
pub mod load;
pub mod print;
pub mod validate;

use crate::config::{load_config, CdaConfig};
use crate::core::document::{load_document, Document};
use crate::log_error_with_context;

/// Exit code for a successful run
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code for document load or sink failures
pub const EXIT_FAILURE: i32 = 1;

/// Exit code for configuration errors
pub const EXIT_CONFIG_ERROR: i32 = 2;

/// Loads and validates the configuration, reporting failures on stderr
///
/// Returns the exit code to use on failure.
pub(crate) fn load_config_or_exit(config_path: &str) -> Result<CdaConfig, i32> {
    load_config(config_path).map_err(|e| {
        log_error_with_context!(&e, "Failed to load configuration");
        eprintln!("Error: {e}");
        EXIT_CONFIG_ERROR
    })
}

/// Resolves the input path (`--file` first, then `input.path`) and loads
/// the document
///
/// Returns the exit code to use on failure.
pub(crate) fn load_input_or_exit(file: Option<&str>, config: &CdaConfig) -> Result<Document, i32> {
    let Some(path) = file.or(config.input.path.as_deref()) else {
        tracing::error!("No input document given");
        eprintln!("Error: no input document. Pass --file or set input.path");
        return Err(EXIT_CONFIG_ERROR);
    };

    load_document(path).map_err(|e| {
        log_error_with_context!(&e, "Failed to load document");
        eprintln!("Error: {e}");
        EXIT_FAILURE
    })
}
