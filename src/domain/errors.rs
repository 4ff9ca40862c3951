//! Domain error types
//!
//! This module defines the error hierarchy for cdaflat. Document loading has
//! its own [`LoadError`] so callers can tell a missing file from a malformed
//! one without inspecting console output; everything else is a [`CdaError`].

use thiserror::Error;

/// Main cdaflat error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum CdaError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Source document could not be loaded
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Invalid selector expression
    #[error("Selector error: {0}")]
    Selector(String),

    /// Database-related errors
    #[error("Database error: {0}")]
    Database(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Errors raised while reading and parsing a source document
#[derive(Debug, Error)]
pub enum LoadError {
    /// The source path does not exist
    #[error("File '{0}' not found.")]
    FileNotFound(String),

    /// The source exists but could not be read
    #[error("Failed to read file '{path}': {message}")]
    Read { path: String, message: String },

    /// The source is not well-formed XML
    #[error("Failed to parse XML file. {0}")]
    Parse(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for CdaError {
    fn from(err: std::io::Error) -> Self {
        CdaError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for CdaError {
    fn from(err: serde_json::Error) -> Self {
        CdaError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for CdaError {
    fn from(err: toml::de::Error) -> Self {
        CdaError::Configuration(format!("TOML parse error: {err}"))
    }
}

// Conversion from quick-xml errors raised by the document loader
impl From<quick_xml::Error> for LoadError {
    fn from(err: quick_xml::Error) -> Self {
        LoadError::Parse(err.to_string())
    }
}
