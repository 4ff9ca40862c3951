//! PostgreSQL client implementation
//!
//! This module provides the client for interacting with PostgreSQL. Each
//! operation opens its own connection and releases it when done.

use crate::config::schema::PostgreSQLConfig;
use crate::domain::{CdaError, Result};
use postgres_native_tls::MakeTlsConnector;
use secrecy::ExposeSecret;
use std::time::Duration;
use tokio_postgres::config::SslMode;
use tokio_postgres::{Client, NoTls};

/// PostgreSQL client for cdaflat
///
/// Holds the parsed connection settings; connections are opened per call.
pub struct PostgreSQLClient {
    /// Parsed connection settings
    pg_config: tokio_postgres::Config,

    /// Configuration
    config: PostgreSQLConfig,
}

impl PostgreSQLClient {
    /// Create a new PostgreSQL client
    ///
    /// # Errors
    ///
    /// Returns an error if the connection string cannot be parsed or the SSL
    /// mode is unknown.
    pub fn new(config: PostgreSQLConfig) -> Result<Self> {
        let mut pg_config: tokio_postgres::Config =
            config.connection_string.expose_secret().as_str().parse().map_err(|e| {
                CdaError::Configuration(format!("Invalid PostgreSQL connection string: {}", e))
            })?;

        pg_config.connect_timeout(Duration::from_secs(config.connection_timeout_seconds));
        pg_config.ssl_mode(parse_ssl_mode(&config.ssl_mode)?);

        Ok(Self { pg_config, config })
    }

    /// Open a connection
    ///
    /// The connection task is spawned on the current runtime and ends when
    /// the returned client is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if TLS setup or the connection fails.
    pub async fn connect(&self) -> Result<Client> {
        let connect_error =
            |e: tokio_postgres::Error| CdaError::Database(format!("Failed to connect: {}", e));

        if self.config.ssl_mode == "disable" {
            let (client, connection) = self.pg_config.connect(NoTls).await.map_err(connect_error)?;
            tokio::spawn(async move {
                if let Err(e) = connection.await {
                    tracing::error!(error = %e, "PostgreSQL connection error");
                }
            });
            return Ok(client);
        }

        let connector = native_tls::TlsConnector::builder()
            .build()
            .map_err(|e| CdaError::Database(format!("Failed to build TLS connector: {}", e)))?;
        let (client, connection) = self
            .pg_config
            .connect(MakeTlsConnector::new(connector))
            .await
            .map_err(connect_error)?;
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!(error = %e, "PostgreSQL connection error");
            }
        });
        Ok(client)
    }

    /// Test the connection to PostgreSQL
    ///
    /// Opens a connection and executes a simple query.
    pub async fn test_connection(&self) -> Result<()> {
        let client = self.connect().await?;

        client
            .query_one("SELECT 1", &[])
            .await
            .map_err(|e| CdaError::Database(format!("Connection test failed: {}", e)))?;

        tracing::info!(target_db = %self.connection_string_safe(), "PostgreSQL connection test successful");
        Ok(())
    }

    /// Execute statements in a single transaction
    ///
    /// The statement timeout applies to the transaction only. Any failure
    /// rolls back everything executed so far.
    ///
    /// # Errors
    ///
    /// Returns an error if connecting, any statement or the commit fails.
    pub async fn execute_in_transaction(&self, statements: &[&str]) -> Result<usize> {
        let mut client = self.connect().await?;
        let transaction = client
            .transaction()
            .await
            .map_err(|e| CdaError::Database(format!("Failed to begin transaction: {}", e)))?;

        transaction
            .batch_execute(&format!(
                "SET LOCAL statement_timeout = {}",
                self.statement_timeout_ms()
            ))
            .await
            .map_err(|e| CdaError::Database(format!("Failed to set statement timeout: {}", e)))?;

        let mut executed = 0;
        for &statement in statements {
            tracing::debug!(statement = %statement, "Executing statement");
            transaction.batch_execute(statement).await.map_err(|e| {
                CdaError::Database(format!("Statement execution failed: {}: {}", e, statement))
            })?;
            executed += 1;
        }

        transaction
            .commit()
            .await
            .map_err(|e| CdaError::Database(format!("Failed to commit transaction: {}", e)))?;

        Ok(executed)
    }

    /// Statement timeout in milliseconds
    pub fn statement_timeout_ms(&self) -> u64 {
        self.config.statement_timeout_seconds.saturating_mul(1000)
    }

    /// Get the connection string (without credentials)
    pub fn connection_string_safe(&self) -> String {
        self.config.connection_string.expose_secret().redacted()
    }
}

fn parse_ssl_mode(mode: &str) -> Result<SslMode> {
    match mode {
        "disable" => Ok(SslMode::Disable),
        "prefer" => Ok(SslMode::Prefer),
        "require" => Ok(SslMode::Require),
        other => Err(CdaError::Configuration(format!(
            "postgresql.ssl_mode must be one of: disable, prefer, require, got '{}'",
            other
        ))),
    }
}
