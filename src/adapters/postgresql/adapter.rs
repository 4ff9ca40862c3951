//! PostgreSQL adapter implementing the table sink trait

use crate::adapters::database::traits::{plan_statements, LoadSummary, TableSink};
use crate::adapters::postgresql::client::PostgreSQLClient;
use crate::adapters::postgresql::statements::{FrameStatements, TableOptions};
use crate::core::frame::TableFrame;
use crate::domain::Result;
use async_trait::async_trait;

/// PostgreSQL implementation of [`TableSink`]
///
/// Wraps a [`PostgreSQLClient`]; every `load_frames` call runs in its own
/// connection and transaction.
pub struct PostgreSQLAdapter {
    client: PostgreSQLClient,
    options: TableOptions,
    name: String,
}

impl PostgreSQLAdapter {
    /// Create a new PostgreSQL adapter
    pub fn new(client: PostgreSQLClient, options: TableOptions) -> Self {
        let name = client.connection_string_safe();
        Self {
            client,
            options,
            name,
        }
    }
}

#[async_trait]
impl TableSink for PostgreSQLAdapter {
    fn target_name(&self) -> &str {
        &self.name
    }

    async fn test_connection(&self) -> Result<()> {
        self.client.test_connection().await
    }

    async fn load_frames(&self, frames: &[TableFrame], dry_run: bool) -> Result<LoadSummary> {
        let plan = plan_statements(frames, self.options);

        let mut summary = LoadSummary {
            dry_run,
            ..LoadSummary::default()
        };
        for statements in &plan {
            summary.record(statements);
        }

        if dry_run {
            tracing::info!(
                tables = summary.tables_created,
                rows = summary.rows_inserted,
                "DRY RUN: Would execute {} statements against PostgreSQL",
                summary.statements
            );
            return Ok(summary);
        }

        let statements: Vec<&str> = plan.iter().flat_map(FrameStatements::iter).collect();
        let executed = self.client.execute_in_transaction(&statements).await?;

        tracing::info!(
            tables = summary.tables_created,
            rows = summary.rows_inserted,
            statements = executed,
            "Committed frames to PostgreSQL"
        );
        Ok(summary)
    }
}
