//! SQL script table sink
//!
//! Writes the statements the PostgreSQL sink would execute, wrapped in a
//! single transaction block, to stdout or a file.

use crate::adapters::database::traits::{plan_statements, LoadSummary, TableSink};
use crate::adapters::postgresql::statements::{FrameStatements, TableOptions};
use crate::core::frame::TableFrame;
use crate::domain::{CdaError, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;

/// Sink that emits a SQL script instead of executing statements
pub struct ScriptSink {
    path: Option<PathBuf>,
    options: TableOptions,
    name: String,
}

impl ScriptSink {
    /// Creates a sink writing to `path`, or to stdout when `None`
    pub fn new(path: Option<PathBuf>, options: TableOptions) -> Self {
        let name = path
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "stdout".to_string());
        Self {
            path,
            options,
            name,
        }
    }
}

/// Renders planned statements as a script, one statement per line
pub fn render_script(plan: &[FrameStatements]) -> String {
    let mut script = String::from("BEGIN;\n");
    for statements in plan {
        for statement in statements.iter() {
            script.push_str(statement);
            script.push('\n');
        }
    }
    script.push_str("COMMIT;\n");
    script
}

#[async_trait]
impl TableSink for ScriptSink {
    fn target_name(&self) -> &str {
        &self.name
    }

    async fn test_connection(&self) -> Result<()> {
        let parent = self
            .path
            .as_ref()
            .and_then(|path| path.parent())
            .filter(|parent| !parent.as_os_str().is_empty());

        if let Some(parent) = parent {
            if !tokio::fs::try_exists(parent).await? {
                return Err(CdaError::Io(format!(
                    "Script directory does not exist: {}",
                    parent.display()
                )));
            }
        }
        Ok(())
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
                target_name = %self.name,
                "DRY RUN: Would write {} statements",
                summary.statements
            );
            return Ok(summary);
        }

        let script = render_script(&plan);
        match &self.path {
            Some(path) => tokio::fs::write(path, script.as_bytes()).await?,
            None => {
                let mut stdout = tokio::io::stdout();
                stdout.write_all(script.as_bytes()).await?;
                stdout.flush().await?;
            }
        }

        tracing::info!(
            target_name = %self.name,
            statements = summary.statements,
            "SQL script written"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FlatRecord;
    use tempfile::TempDir;

    fn frames() -> Vec<TableFrame> {
        let patient: FlatRecord = [("id/@extension", "123"), ("addr", "1 Main St")]
            .into_iter()
            .collect();
        vec![
            TableFrame::from_record("PatientTable", &patient),
            TableFrame::new("GuardianTable"),
        ]
    }

    #[test]
    fn test_render_script() {
        let plan = plan_statements(&frames(), TableOptions::default());
        let script = render_script(&plan);

        let lines: Vec<_> = script.lines().collect();
        assert_eq!(lines.first(), Some(&"BEGIN;"));
        assert_eq!(lines.last(), Some(&"COMMIT;"));
        assert_eq!(lines.len(), 5);
        assert_eq!(
            lines[2],
            "INSERT INTO \"PatientTable\" (\"IdExtension\", \"Addr\") VALUES ('123', '1 Main St');"
        );
        assert_eq!(lines[3], "CREATE TABLE \"GuardianTable\" ();");
    }

    #[tokio::test]
    async fn test_load_frames_writes_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.sql");
        let sink = ScriptSink::new(Some(path.clone()), TableOptions::default());

        sink.test_connection().await.unwrap();
        let summary = sink.load_frames(&frames(), false).await.unwrap();

        assert_eq!(summary.tables_created, 2);
        assert_eq!(summary.rows_inserted, 1);
        assert!(!summary.dry_run);

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("BEGIN;\nCREATE TABLE \"PatientTable\""));
        assert!(written.ends_with("COMMIT;\n"));
    }

    #[tokio::test]
    async fn test_dry_run_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.sql");
        let sink = ScriptSink::new(Some(path.clone()), TableOptions::default());

        let summary = sink.load_frames(&frames(), true).await.unwrap();

        assert!(summary.dry_run);
        assert_eq!(summary.statements, 3);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_missing_directory_fails_connection_test() {
        let dir = TempDir::new().unwrap();
        let sink = ScriptSink::new(
            Some(dir.path().join("missing").join("out.sql")),
            TableOptions::default(),
        );
        assert!(matches!(sink.test_connection().await, Err(CdaError::Io(_))));
    }
}
