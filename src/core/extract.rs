//! Section extraction
//!
//! Runs the fixed set of section selectors against a document and flattens
//! each match into a named record.

use crate::core::document::Document;
use crate::core::select::Selector;
use crate::core::transform::{find_and_flatten, flatten};
use crate::domain::{FlatRecord, Section, CDA_NAMESPACE};
use crate::log_section_extracted;

/// Prefix applied to whole-document keys in console output
pub const DOCUMENT_PREFIX: &str = "document/";

/// Options controlling which sections are extracted and how
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Namespace URI of the section elements
    pub namespace: String,

    /// Key prefix used when flattening the whole document
    pub document_prefix: String,

    /// Sections to extract, in output order
    pub sections: Vec<Section>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            namespace: CDA_NAMESPACE.to_string(),
            document_prefix: DOCUMENT_PREFIX.to_string(),
            sections: Section::ALL.to_vec(),
        }
    }
}

impl ExtractOptions {
    /// Replaces the whole-document key prefix
    pub fn with_document_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.document_prefix = prefix.into();
        self
    }

    /// Selector that locates a section, `None` for the whole document
    pub fn selector(&self, section: Section) -> Option<Selector> {
        let namespace = Some(self.namespace.as_str()).filter(|ns| !ns.is_empty());
        section
            .element_tag()
            .map(|tag| Selector::descendant(namespace, tag))
    }
}

/// A flattened section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionRecord {
    /// Which section this is
    pub section: Section,

    /// Flattened content, empty when the section was not found
    pub record: FlatRecord,
}

/// Flatten a single section of the document
pub fn extract_section(
    document: &Document,
    section: Section,
    options: &ExtractOptions,
) -> FlatRecord {
    let root = document.root();
    let record = match options.selector(section) {
        Some(selector) => find_and_flatten(root, &selector),
        None => flatten(root, &options.document_prefix),
    };

    log_section_extracted!(section, record.len());
    record
}

/// Flatten every configured section, in configuration order
pub fn extract_sections(document: &Document, options: &ExtractOptions) -> Vec<SectionRecord> {
    options
        .sections
        .iter()
        .map(|&section| SectionRecord {
            section,
            record: extract_section(document, section, options),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::document::parse_document;

    const SAMPLE: &str = r#"<ClinicalDocument xmlns="urn:hl7-org:v3">
  <title>Initial Case Report</title>
  <recordTarget>
    <patientRole>
      <id extension="123" root="2.16.840.1.113883.19.5"/>
      <addr use="HP">1 Main St</addr>
    </patientRole>
  </recordTarget>
  <author><time value="20240101"/></author>
  <componentOf><encompassingEncounter><id extension="E1"/></encompassingEncounter></componentOf>
</ClinicalDocument>"#;

    #[test]
    fn test_extract_all_sections() {
        let document = parse_document(SAMPLE).unwrap();
        let records = extract_sections(&document, &ExtractOptions::default());

        assert_eq!(records.len(), 7);
        assert_eq!(records[0].section, Section::Document);
        assert_eq!(
            records[0].record.get("document/title"),
            Some("Initial Case Report")
        );

        let patient = &records[1].record;
        assert_eq!(patient.get("id/@extension"), Some("123"));
        assert_eq!(patient.get("addr"), Some("1 Main St"));
        assert_eq!(patient.get("addr/@use"), Some("HP"));

        assert!(records[2].record.is_empty(), "no guardian in sample");
        assert_eq!(records[3].record.get("time/@value"), Some("20240101"));
        assert!(records[4].record.is_empty(), "no custodian in sample");
        assert_eq!(
            records[5].record.get("encompassingEncounter/id/@extension"),
            Some("E1")
        );
        assert!(records[6].record.is_empty(), "no component in sample");
    }

    #[test]
    fn test_document_prefix_override() {
        let document = parse_document(SAMPLE).unwrap();
        let options = ExtractOptions::default().with_document_prefix("");
        let record = extract_section(&document, Section::Document, &options);
        assert_eq!(record.get("title"), Some("Initial Case Report"));
    }

    #[test]
    fn test_other_namespace_finds_nothing() {
        let document = parse_document(SAMPLE).unwrap();
        let options = ExtractOptions {
            namespace: "urn:example:other".to_string(),
            ..ExtractOptions::default()
        };
        assert!(extract_section(&document, Section::Patient, &options).is_empty());
    }
}
