//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for cdaflat using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// cdaflat - HL7 CDA flattening tool
#[derive(Parser, Debug)]
#[command(name = "cdaflat")]
#[command(version, about, long_about = None)]
#[command(author = "cdaflat Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "cdaflat.toml", env = "CDAFLAT_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "CDAFLAT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print each section of a document as key-value records
    Print(commands::print::PrintArgs),

    /// Load each section of a document into its own table
    Load(commands::load::LoadArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

impl Cli {
    /// Execute the selected command and return its exit code
    pub async fn execute(&self) -> anyhow::Result<i32> {
        match &self.command {
            Commands::Print(args) => args.execute(&self.config).await,
            Commands::Load(args) => args.execute(&self.config).await,
            Commands::ValidateConfig(args) => args.execute(&self.config).await,
            Commands::Init(args) => args.execute().await,
        }
    }
}
