//! Configuration management for cdaflat.
//!
//! # Overview
//!
//! cdaflat reads a TOML configuration file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `CDAFLAT_<SECTION>_<KEY>` environment overrides
//! - Default values for optional settings
//! - Validation on load
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level and dry-run flag
//! - [`InputConfig`] - Document path, namespace, sections and selector prefixes
//! - [`TablesConfig`] - Table drop/create behaviour
//! - [`PostgreSQLConfig`] - PostgreSQL connection settings
//! - [`ScriptConfig`] - SQL script output
//! - [`LoggingConfig`] - Local file logging
//!
//! # Example Configuration
//!
//! ```toml
//! database_target = "postgresql"
//!
//! [input]
//! path = "samples/document.xml"
//! sections = ["document", "patient", "author"]
//!
//! [postgresql]
//! connection_string = "${CDAFLAT_PG_CONNECTION}"
//! ```
//!
//! # Loading
//!
//! ```rust,no_run
//! use cdaflat::config::load_config;
//!
//! match load_config("cdaflat.toml") {
//!     Ok(config) => println!("Sections: {:?}", config.input.sections),
//!     Err(e) => eprintln!("Configuration error: {}", e),
//! }
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, parse_config};
pub use schema::{
    ApplicationConfig, CdaConfig, DatabaseTarget, InputConfig, LoggingConfig, PostgreSQLConfig,
    ScriptConfig, TablesConfig,
};
pub use secret::{redact_connection_string, secret_string, ConnectionString, SecretString};
