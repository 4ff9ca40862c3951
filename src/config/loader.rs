//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{CdaConfig, DatabaseTarget};
use crate::config::secret_string;
use crate::domain::errors::CdaError;
use crate::domain::result::Result;
use crate::domain::Section;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into CdaConfig
/// 4. Applies environment variable overrides (CDAFLAT_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`CdaError::Configuration`] if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use cdaflat::config::loader::load_config;
///
/// let config = load_config("cdaflat.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<CdaConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(CdaError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        CdaError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Parses configuration from TOML text
///
/// Runs the same substitution, override and validation steps as
/// [`load_config`].
///
/// # Errors
///
/// Returns [`CdaError::Configuration`] on any failure.
pub fn parse_config(contents: &str) -> Result<CdaConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: CdaConfig = toml::from_str(&contents)
        .map_err(|e| CdaError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        CdaError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied unchanged.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| CdaError::Other(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let processed_line = re.replace_all(line, |cap: &regex::Captures| {
            let var_name = &cap[1];
            std::env::var(var_name).unwrap_or_else(|_| {
                if !missing_vars.iter().any(|missing| missing == var_name) {
                    missing_vars.push(var_name.to_string());
                }
                String::new()
            })
        });
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(CdaError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using CDAFLAT_* prefix
///
/// Environment variables follow the pattern: CDAFLAT_<SECTION>_<KEY>
/// For example: CDAFLAT_INPUT_PATH, CDAFLAT_TABLES_DROP_EXISTING
fn apply_env_overrides(config: &mut CdaConfig) -> Result<()> {
    if let Ok(val) = std::env::var("CDAFLAT_DATABASE_TARGET") {
        config.database_target = match val.to_lowercase().as_str() {
            "postgresql" => DatabaseTarget::PostgreSQL,
            "script" => DatabaseTarget::Script,
            _ => {
                return Err(CdaError::Configuration(format!(
                    "Invalid CDAFLAT_DATABASE_TARGET '{val}'. Must be 'postgresql' or 'script'"
                )))
            }
        };
    }

    // Application overrides
    if let Ok(val) = std::env::var("CDAFLAT_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("CDAFLAT_APPLICATION_DRY_RUN") {
        config.application.dry_run = val.parse().unwrap_or(false);
    }

    // Input overrides
    if let Ok(val) = std::env::var("CDAFLAT_INPUT_PATH") {
        config.input.path = Some(val);
    }
    if let Ok(val) = std::env::var("CDAFLAT_INPUT_NAMESPACE") {
        config.input.namespace = val;
    }
    if let Ok(val) = std::env::var("CDAFLAT_INPUT_SECTIONS") {
        config.input.sections = val
            .split(',')
            .filter(|s| !s.trim().is_empty())
            .map(str::parse::<Section>)
            .collect::<Result<Vec<_>>>()?;
    }

    // Tables overrides
    if let Ok(val) = std::env::var("CDAFLAT_TABLES_DROP_EXISTING") {
        config.tables.drop_existing = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("CDAFLAT_TABLES_IF_NOT_EXISTS") {
        config.tables.if_not_exists = val.parse().unwrap_or(false);
    }

    // PostgreSQL overrides (only if PostgreSQL is configured)
    if let Some(ref mut pg_config) = config.postgresql {
        if let Ok(val) = std::env::var("CDAFLAT_POSTGRESQL_CONNECTION_STRING") {
            pg_config.connection_string = secret_string(val);
        }
        if let Ok(val) = std::env::var("CDAFLAT_POSTGRESQL_CONNECTION_TIMEOUT_SECONDS") {
            if let Ok(timeout) = val.parse() {
                pg_config.connection_timeout_seconds = timeout;
            }
        }
        if let Ok(val) = std::env::var("CDAFLAT_POSTGRESQL_STATEMENT_TIMEOUT_SECONDS") {
            if let Ok(timeout) = val.parse() {
                pg_config.statement_timeout_seconds = timeout;
            }
        }
        if let Ok(val) = std::env::var("CDAFLAT_POSTGRESQL_SSL_MODE") {
            pg_config.ssl_mode = val;
        }
    }

    // Script overrides
    if let Ok(val) = std::env::var("CDAFLAT_SCRIPT_PATH") {
        config.script.path = Some(val);
    }

    // Logging overrides
    if let Ok(val) = std::env::var("CDAFLAT_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("CDAFLAT_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("CDAFLAT_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}
