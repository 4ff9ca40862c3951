//! Table sink abstraction layer
//!
//! This module provides a trait-based abstraction over the destinations that
//! receive table frames (PostgreSQL or a SQL script).

pub mod factory;
pub mod traits;

pub use factory::{create_table_sink, table_options};
pub use traits::{plan_statements, LoadSummary, TableSink};
