//! Table sink factory
//!
//! This module creates the table sink selected by the configuration.

use crate::adapters::database::traits::TableSink;
use crate::adapters::postgresql::adapter::PostgreSQLAdapter;
use crate::adapters::postgresql::client::PostgreSQLClient;
use crate::adapters::postgresql::statements::TableOptions;
use crate::adapters::script::ScriptSink;
use crate::config::schema::{CdaConfig, DatabaseTarget};
use crate::domain::{CdaError, Result};
use std::path::PathBuf;
use std::sync::Arc;

/// Table options taken from the `[tables]` section
pub fn table_options(config: &CdaConfig) -> TableOptions {
    TableOptions {
        drop_existing: config.tables.drop_existing,
        if_not_exists: config.tables.if_not_exists,
    }
}

/// Create a table sink based on the configuration
///
/// This factory function examines the `database_target` in the configuration
/// and creates the matching sink. No connection is opened here.
///
/// # Errors
///
/// Returns an error if the selected sink's configuration is missing or the
/// connection string cannot be parsed.
pub fn create_table_sink(config: &CdaConfig) -> Result<Arc<dyn TableSink>> {
    let options = table_options(config);

    match config.database_target {
        DatabaseTarget::PostgreSQL => {
            let pg_config = config.postgresql.as_ref().ok_or_else(|| {
                CdaError::Configuration(
                    "postgresql configuration is required when database_target = 'postgresql'"
                        .to_string(),
                )
            })?;

            tracing::info!("Creating PostgreSQL table sink");
            let client = PostgreSQLClient::new(pg_config.clone())?;
            Ok(Arc::new(PostgreSQLAdapter::new(client, options)) as Arc<dyn TableSink>)
        }
        DatabaseTarget::Script => {
            tracing::info!(path = ?config.script.path, "Creating SQL script sink");
            let sink = ScriptSink::new(config.script.path.as_ref().map(PathBuf::from), options);
            Ok(Arc::new(sink) as Arc<dyn TableSink>)
        }
    }
}
