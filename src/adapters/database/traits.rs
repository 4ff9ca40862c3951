//! Table sink traits
//!
//! This module defines the trait that table sinks must implement to receive
//! the frames produced by the `load` command.

use crate::adapters::postgresql::statements::{FrameStatements, TableOptions};
use crate::core::frame::TableFrame;
use crate::domain::Result;
use async_trait::async_trait;
use std::fmt;

/// Outcome of loading a set of frames
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Number of tables created (or that would be created in a dry run)
    pub tables_created: usize,

    /// Number of rows inserted (or that would be inserted in a dry run)
    pub rows_inserted: usize,

    /// Total statements built
    pub statements: usize,

    /// Whether execution was skipped
    pub dry_run: bool,
}

impl LoadSummary {
    /// Counts the statements of a frame into the summary
    pub fn record(&mut self, statements: &FrameStatements) {
        self.tables_created += 1;
        self.rows_inserted += usize::from(statements.insert.is_some());
        self.statements += statements.len();
    }
}

impl fmt::Display for LoadSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} tables, {} rows, {} statements",
            self.tables_created, self.rows_inserted, self.statements
        )?;
        if self.dry_run {
            write!(f, " (dry run)")?;
        }
        Ok(())
    }
}

/// Builds the statements for every frame, in order
pub fn plan_statements(frames: &[TableFrame], options: TableOptions) -> Vec<FrameStatements> {
    frames
        .iter()
        .map(|frame| FrameStatements::for_frame(frame, options))
        .collect()
}

/// Destination for table frames
///
/// Implementations create one table per frame and insert its row. All
/// frames of a call succeed or fail together.
#[async_trait]
pub trait TableSink: Send + Sync {
    /// Human-readable name of the sink, for logs and summaries
    fn target_name(&self) -> &str;

    /// Test that the sink is reachable
    ///
    /// # Errors
    ///
    /// Returns an error if the connection test fails.
    async fn test_connection(&self) -> Result<()>;

    /// Create tables and insert rows for every frame
    ///
    /// # Arguments
    ///
    /// * `frames` - Frames to load, one table each
    /// * `dry_run` - If true, build and count statements without executing
    ///
    /// # Errors
    ///
    /// Returns an error if any statement fails; nothing is committed.
    async fn load_frames(&self, frames: &[TableFrame], dry_run: bool) -> Result<LoadSummary>;
}
