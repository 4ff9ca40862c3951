//! Single-row table frames
//!
//! A [`TableFrame`] is a flattened section with its keys renamed to derived
//! column names, ready to be rendered or inserted into a table.

use crate::core::transform::derive_column_name;
use crate::domain::FlatRecord;
use indexmap::IndexMap;
use std::fmt;

/// Label of the only row in a frame
const ROW_LABEL: &str = "0";

/// Spacing between rendered columns
const COLUMN_GAP: usize = 2;

/// A one-row table with named columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableFrame {
    table_name: String,
    columns: IndexMap<String, Option<String>>,
}

impl TableFrame {
    /// Creates a frame with no columns
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            columns: IndexMap::new(),
        }
    }

    /// Builds a frame from a flattened record
    ///
    /// Every key is renamed with [`derive_column_name`]. When several keys
    /// map to the same column the later value wins and the column keeps its
    /// first position. Keys that derive to an empty name are dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use cdaflat::core::frame::TableFrame;
    /// use cdaflat::domain::FlatRecord;
    ///
    /// let record: FlatRecord = [("id/@extension", "123"), ("addr", "1 Main St")]
    ///     .into_iter()
    ///     .collect();
    ///
    /// let frame = TableFrame::from_record("PatientTable", &record);
    /// assert_eq!(frame.column_names().collect::<Vec<_>>(), vec!["IdExtension", "Addr"]);
    /// ```
    pub fn from_record(table_name: impl Into<String>, record: &FlatRecord) -> Self {
        let mut frame = Self::new(table_name);
        for (key, value) in record {
            let column = derive_column_name(key);
            if column.is_empty() {
                tracing::debug!(key = %key, "Skipping key with empty column name");
                continue;
            }
            frame.set(column, Some(value.clone()));
        }
        frame
    }

    /// Sets a column value, keeping the column's position if it exists
    pub fn set(&mut self, column: impl Into<String>, value: Option<String>) {
        self.columns.insert(column.into(), value);
    }

    /// Target table name
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Column names in order
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Columns and their values in order
    pub fn columns(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.columns
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_deref()))
    }

    /// Value of a column; `None` if the column is absent or null
    pub fn get(&self, column: &str) -> Option<&str> {
        self.columns.get(column).and_then(|value| value.as_deref())
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if the frame has no columns
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl fmt::Display for TableFrame {
    /// Renders the frame as a header line and a single indexed row
    ///
    /// ```text
    ///    IdExtension       Addr
    /// 0          123  1 Main St
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "Empty DataFrame\nColumns: []\nIndex: [{ROW_LABEL}]");
        }

        let mut header = " ".repeat(ROW_LABEL.len());
        let mut row = ROW_LABEL.to_string();

        for (name, value) in self.columns() {
            let value = value.unwrap_or("None");
            let width = name.chars().count().max(value.chars().count()) + COLUMN_GAP;
            header.push_str(&format!("{name:>width$}"));
            row.push_str(&format!("{value:>width$}"));
        }

        write!(f, "{header}\n{row}")
    }
}
