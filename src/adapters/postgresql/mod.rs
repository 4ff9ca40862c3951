//! PostgreSQL database integration
//!
//! This module loads table frames into PostgreSQL and builds the SQL
//! statements shared with the script sink.

pub mod adapter;
pub mod client;
pub mod statements;

pub use adapter::PostgreSQLAdapter;
pub use client::PostgreSQLClient;
pub use statements::{FrameStatements, TableOptions};
