//! Console rendering of records and frames

use crate::core::frame::TableFrame;
use crate::domain::{FlatRecord, Result, Section};
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt::Write;

/// Line printed for an empty record
pub const NO_DATA: &str = "No data found.";

/// Output format of the `print` command
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Titled `key: value` blocks
    #[default]
    Text,
    /// One pretty-printed JSON object
    Json,
}

/// Renders a titled block of `key: value` lines
///
/// # Examples
///
/// ```
/// use cdaflat::core::render::render_record;
/// use cdaflat::domain::FlatRecord;
///
/// let record: FlatRecord = [("addr", "1 Main St")].into_iter().collect();
/// assert_eq!(render_record("Patient Information", &record), "\nPatient Information:\naddr: 1 Main St\n");
/// assert_eq!(render_record("Guardian Information", &FlatRecord::new()), "\nGuardian Information:\nNo data found.\n");
/// ```
pub fn render_record(title: &str, record: &FlatRecord) -> String {
    let mut output = format!("\n{title}:\n");
    if record.is_empty() {
        output.push_str(NO_DATA);
        output.push('\n');
        return output;
    }

    for (key, value) in record {
        // Writing to a String cannot fail
        let _ = writeln!(output, "{key}: {value}");
    }
    output
}

/// Renders a titled frame table
pub fn render_frame(title: &str, frame: &TableFrame) -> String {
    format!("\n{title} DataFrame:\n{frame}\n")
}

/// Blocks shown by `print`: one per section, then one per selector
///
/// Sections and selectors are kept apart, so a selector spelled like a
/// section name never replaces that section's block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrintReport {
    sections: Vec<(Section, FlatRecord)>,
    selectors: Vec<(String, FlatRecord)>,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    sections: IndexMap<&'a str, &'a FlatRecord>,
    selectors: IndexMap<&'a str, &'a FlatRecord>,
}

impl PrintReport {
    /// Creates an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a section block
    pub fn push_section(&mut self, section: Section, record: FlatRecord) {
        self.sections.push((section, record));
    }

    /// Appends a block for a `--select` expression
    pub fn push_selector(&mut self, expression: impl Into<String>, record: FlatRecord) {
        self.selectors.push((expression.into(), record));
    }

    /// Section blocks in order
    pub fn sections(&self) -> &[(Section, FlatRecord)] {
        &self.sections
    }

    /// Selector blocks in order
    pub fn selectors(&self) -> &[(String, FlatRecord)] {
        &self.selectors
    }

    /// Renders the report in the requested format
    ///
    /// Text is one [`render_record`] block per entry, titled with the
    /// section title or the selector expression. JSON is an object with a
    /// `sections` map keyed by section name and a `selectors` map keyed by
    /// expression.
    ///
    /// # Errors
    ///
    /// Returns [`CdaError::Serialization`](crate::domain::CdaError::Serialization)
    /// if JSON serialization fails.
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(self.render_text()),
            OutputFormat::Json => {
                let report = JsonReport {
                    sections: self
                        .sections
                        .iter()
                        .map(|(section, record)| (section.name(), record))
                        .collect(),
                    selectors: self
                        .selectors
                        .iter()
                        .map(|(expression, record)| (expression.as_str(), record))
                        .collect(),
                };
                Ok(format!("{}\n", serde_json::to_string_pretty(&report)?))
            }
        }
    }

    fn render_text(&self) -> String {
        let sections = self
            .sections
            .iter()
            .map(|(section, record)| render_record(&section.title(), record));
        let selectors = self
            .selectors
            .iter()
            .map(|(expression, record)| render_record(expression, record));
        sections.chain(selectors).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_record_lines_in_order() {
        let record: FlatRecord = [("id/@extension", "123"), ("addr", "1 Main St")]
            .into_iter()
            .collect();

        let output = render_record("Patient Information", &record);
        assert_eq!(
            output,
            "\nPatient Information:\nid/@extension: 123\naddr: 1 Main St\n"
        );
    }

    #[test]
    fn test_render_frame_title() {
        let frame = TableFrame::new("GuardianTable");
        let output = render_frame("Guardian Information", &frame);
        assert!(output.starts_with("\nGuardian Information DataFrame:\nEmpty DataFrame\n"));
    }

    fn report() -> PrintReport {
        let mut report = PrintReport::new();
        report.push_section(
            Section::Patient,
            [("addr", "1 Main St")].into_iter().collect(),
        );
        report.push_section(Section::Guardian, FlatRecord::new());
        report.push_selector("patient", FlatRecord::new());
        report
    }

    #[test]
    fn test_report_text_keeps_section_and_selector_blocks() {
        let text = report().render(OutputFormat::Text).unwrap();
        assert_eq!(
            text,
            "\nPatient Information:\naddr: 1 Main St\n\nGuardian Information:\nNo data found.\n\npatient:\nNo data found.\n"
        );
    }

    #[test]
    fn test_report_json_separates_selectors() {
        let json = report().render(OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["sections"]["patient"]["addr"], "1 Main St");
        assert!(value["sections"]["guardian"].as_object().unwrap().is_empty());
        assert!(value["selectors"]["patient"].as_object().unwrap().is_empty());
        assert!(json.find("\"patient\"").unwrap() < json.find("\"guardian\"").unwrap());
        assert!(json.ends_with("}\n"));
    }
}
