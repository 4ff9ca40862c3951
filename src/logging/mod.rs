//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Human-readable console logs on stderr
//! - Configurable log levels, overridable with `RUST_LOG`
//! - JSON file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use cdaflat::logging::init_logging;
//! use cdaflat::config::LoggingConfig;
//!
//! let _guard = init_logging("info", &LoggingConfig::console_only())
//!     .expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the outcome of extracting one section
///
/// # Example
///
/// ```no_run
/// use cdaflat::log_section_extracted;
/// use cdaflat::domain::Section;
///
/// log_section_extracted!(Section::Patient, 12);
/// ```
#[macro_export]
macro_rules! log_section_extracted {
    ($section:expr, $entries:expr) => {
        tracing::debug!(
            section = %$section,
            entries = $entries,
            "Section extracted"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use cdaflat::log_error_with_context;
/// use cdaflat::domain::CdaError;
///
/// let error = CdaError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
