//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the cdaflat configuration file.

use super::{EXIT_CONFIG_ERROR, EXIT_FAILURE, EXIT_SUCCESS};
use crate::adapters::database::create_table_sink;
use crate::config::load_config;
use crate::config::schema::DatabaseTarget;
use clap::Args;
use secrecy::ExposeSecret;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Also check that the configured sink is reachable
    #[arg(long)]
    pub test_connection: bool,
}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("Validating configuration file: {config_path}");
        println!();

        // load_config validates as part of loading
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("Configuration is invalid");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        println!("Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Dry Run: {}", config.application.dry_run);
        println!(
            "  Input: {}",
            config.input.path.as_deref().unwrap_or("(from --file)")
        );
        println!("  Namespace: {}", config.input.namespace);
        println!(
            "  Sections: {}",
            config
                .input
                .sections
                .iter()
                .map(|section| section.name())
                .collect::<Vec<_>>()
                .join(", ")
        );

        match config.database_target {
            DatabaseTarget::PostgreSQL => {
                println!("  Database Target: PostgreSQL");
                if let Some(ref pg_config) = config.postgresql {
                    println!(
                        "  PostgreSQL Connection: {}",
                        pg_config.connection_string.expose_secret().redacted()
                    );
                    println!("  SSL Mode: {}", pg_config.ssl_mode);
                }
            }
            DatabaseTarget::Script => {
                println!("  Database Target: SQL script");
                println!(
                    "  Script Output: {}",
                    config.script.path.as_deref().unwrap_or("stdout")
                );
            }
        }
        println!(
            "  Tables: drop_existing={}, if_not_exists={}",
            config.tables.drop_existing, config.tables.if_not_exists
        );
        println!();

        if self.test_connection {
            let result = match create_table_sink(&config) {
                Ok(sink) => sink.test_connection().await,
                Err(e) => Err(e),
            };
            match result {
                Ok(()) => println!("Connection test succeeded"),
                Err(e) => {
                    println!("Connection test failed");
                    println!("   Error: {e}");
                    return Ok(EXIT_FAILURE);
                }
            }
        }

        Ok(EXIT_SUCCESS)
    }
}
