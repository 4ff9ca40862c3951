//! SQL statement synthesis for table frames
//!
//! Every frame becomes one table of `TEXT` columns holding a single row.
//! Statements are built as literal SQL text so the same output can be
//! executed against PostgreSQL or written to a script.

use crate::core::frame::TableFrame;

/// Table creation options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableOptions {
    /// Emit `DROP TABLE IF EXISTS` before creating
    pub drop_existing: bool,

    /// Use `CREATE TABLE IF NOT EXISTS`
    pub if_not_exists: bool,
}

/// Quotes an identifier, doubling embedded double quotes
pub fn quote_identifier(identifier: &str) -> String {
    format!("\"{}\"", identifier.replace('"', "\"\""))
}

/// Renders a value as a SQL literal; `None` becomes `NULL`
pub fn escape_sql_value(value: Option<&str>) -> String {
    match value {
        Some(value) => format!("'{}'", value.replace('\'', "''")),
        None => "NULL".to_string(),
    }
}

/// `DROP TABLE IF EXISTS "<table>";`
pub fn drop_table_sql(table_name: &str) -> String {
    format!("DROP TABLE IF EXISTS {};", quote_identifier(table_name))
}

/// `CREATE TABLE "<table>" ("<col>" TEXT, ...);`
pub fn create_table_sql(frame: &TableFrame, if_not_exists: bool) -> String {
    let columns = frame
        .column_names()
        .map(|column| format!("{} TEXT", quote_identifier(column)))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "CREATE TABLE {}{} ({});",
        if if_not_exists { "IF NOT EXISTS " } else { "" },
        quote_identifier(frame.table_name()),
        columns
    )
}

/// `INSERT INTO "<table>" (...) VALUES (...);`, or `None` for a frame with
/// no columns
pub fn insert_sql(frame: &TableFrame) -> Option<String> {
    if frame.is_empty() {
        return None;
    }

    let (columns, values): (Vec<String>, Vec<String>) = frame
        .columns()
        .map(|(column, value)| (quote_identifier(column), escape_sql_value(value)))
        .unzip();

    Some(format!(
        "INSERT INTO {} ({}) VALUES ({});",
        quote_identifier(frame.table_name()),
        columns.join(", "),
        values.join(", ")
    ))
}

/// All statements for one frame, in execution order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameStatements {
    /// Target table
    pub table_name: String,

    /// Optional drop, then create
    pub ddl: Vec<String>,

    /// Row insert, absent for an empty frame
    pub insert: Option<String>,
}

impl FrameStatements {
    /// Builds the statements for a frame
    pub fn for_frame(frame: &TableFrame, options: TableOptions) -> Self {
        let mut ddl = Vec::with_capacity(2);
        if options.drop_existing {
            ddl.push(drop_table_sql(frame.table_name()));
        }
        ddl.push(create_table_sql(frame, options.if_not_exists));

        Self {
            table_name: frame.table_name().to_string(),
            ddl,
            insert: insert_sql(frame),
        }
    }

    /// Statements in execution order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ddl
            .iter()
            .chain(self.insert.iter())
            .map(String::as_str)
    }

    /// Number of statements
    pub fn len(&self) -> usize {
        self.ddl.len() + usize::from(self.insert.is_some())
    }

    /// Returns true if there are no statements
    pub fn is_empty(&self) -> bool {
        self.ddl.is_empty() && self.insert.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FlatRecord;

    fn patient_frame() -> TableFrame {
        let record: FlatRecord = [("id/@extension", "123"), ("addr", "O'Brien St")]
            .into_iter()
            .collect();
        TableFrame::from_record("PatientTable", &record)
    }

    #[test]
    fn test_quote_identifier() {
        assert_eq!(quote_identifier("PatientTable"), "\"PatientTable\"");
        assert_eq!(quote_identifier("a\"b"), "\"a\"\"b\"");
    }

    #[test]
    fn test_escape_sql_value() {
        assert_eq!(escape_sql_value(Some("O'Brien")), "'O''Brien'");
        assert_eq!(escape_sql_value(Some("")), "''");
        assert_eq!(escape_sql_value(None), "NULL");
    }

    #[test]
    fn test_create_table_sql() {
        let frame = patient_frame();
        assert_eq!(
            create_table_sql(&frame, false),
            "CREATE TABLE \"PatientTable\" (\"IdExtension\" TEXT, \"Addr\" TEXT);"
        );
        assert!(create_table_sql(&frame, true).starts_with("CREATE TABLE IF NOT EXISTS "));
    }

    #[test]
    fn test_insert_sql() {
        assert_eq!(
            insert_sql(&patient_frame()).unwrap(),
            "INSERT INTO \"PatientTable\" (\"IdExtension\", \"Addr\") VALUES ('123', 'O''Brien St');"
        );
    }

    #[test]
    fn test_insert_null_value() {
        let mut frame = TableFrame::new("T");
        frame.set("A", None);
        assert_eq!(
            insert_sql(&frame).unwrap(),
            "INSERT INTO \"T\" (\"A\") VALUES (NULL);"
        );
    }

    #[test]
    fn test_empty_frame_has_no_insert() {
        let frame = TableFrame::new("GuardianTable");
        assert!(insert_sql(&frame).is_none());
        assert_eq!(create_table_sql(&frame, false), "CREATE TABLE \"GuardianTable\" ();");

        let statements = FrameStatements::for_frame(&frame, TableOptions::default());
        assert_eq!(statements.len(), 1);
    }

    #[test]
    fn test_frame_statements_order() {
        let options = TableOptions {
            drop_existing: true,
            if_not_exists: false,
        };
        let statements = FrameStatements::for_frame(&patient_frame(), options);
        let all: Vec<_> = statements.iter().collect();

        assert_eq!(all.len(), 3);
        assert!(all[0].starts_with("DROP TABLE IF EXISTS \"PatientTable\""));
        assert!(all[1].starts_with("CREATE TABLE"));
        assert!(all[2].starts_with("INSERT INTO"));
    }
}
