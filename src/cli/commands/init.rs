//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use super::{EXIT_CONFIG_ERROR, EXIT_FAILURE, EXIT_SUCCESS};
use clap::Args;
use std::fs;
use std::path::Path;

/// Sample configuration written by `init`
pub const SAMPLE_CONFIG: &str = r#"# cdaflat configuration file
# Flattens HL7 CDA documents into records and relational tables

# Table sink (postgresql or script)
database_target = "script"  # script | postgresql

[application]
log_level = "info"
dry_run = false

[input]
# Document to read; `--file` takes precedence
path = "samples/document.xml"
namespace = "urn:hl7-org:v3"
sections = ["document", "patient", "guardian", "author", "custodian", "encounter", "component"]

# Prefixes usable in `print --select` expressions
[input.namespaces]
cda = "urn:hl7-org:v3"

[tables]
drop_existing = false
if_not_exists = false

# Used when database_target = "postgresql"
# [postgresql]
# connection_string = "${CDAFLAT_PG_CONNECTION}"
# connection_timeout_seconds = 30
# statement_timeout_seconds = 60
# ssl_mode = "prefer"  # disable | prefer | require

[script]
# Omit to write the script to stdout
# path = "cdaflat.sql"

[logging]
local_enabled = false
local_path = "/var/log/cdaflat"
local_rotation = "daily"  # daily | hourly | never
"#;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "cdaflat.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        if Path::new(&self.output).exists() && !self.force {
            println!("Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIG_ERROR);
        }

        match fs::write(&self.output, SAMPLE_CONFIG) {
            Ok(_) => {
                println!("Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Set database_target to 'script' or 'postgresql'");
                println!("  3. For PostgreSQL, set CDAFLAT_PG_CONNECTION in the environment or a .env file");
                println!("  4. Validate configuration: cdaflat validate-config");
                println!("  5. Print a document: cdaflat print --file <document.xml>");
                println!();
                Ok(EXIT_SUCCESS)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to write configuration file");
                println!("Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(EXIT_FAILURE)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;
    use tempfile::TempDir;

    #[test]
    fn test_sample_config_is_valid() {
        let config = parse_config(SAMPLE_CONFIG).unwrap();
        assert_eq!(config.input.sections.len(), 7);
        assert!(config.postgresql.is_none());
    }

    #[tokio::test]
    async fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("cdaflat.toml");
        fs::write(&output, "existing").unwrap();

        let args = InitArgs {
            output: output.to_string_lossy().to_string(),
            force: false,
        };
        assert_eq!(args.execute().await.unwrap(), EXIT_CONFIG_ERROR);
        assert_eq!(fs::read_to_string(&output).unwrap(), "existing");

        let args = InitArgs { force: true, ..args };
        assert_eq!(args.execute().await.unwrap(), EXIT_SUCCESS);
        assert_eq!(fs::read_to_string(&output).unwrap(), SAMPLE_CONFIG);
    }
}
