//! Named document sections
//!
//! Each section is a fixed subtree of a CDA document. All sections except
//! [`Section::Document`] are located with a "first descendant with this tag"
//! query in the CDA namespace.

use crate::domain::errors::CdaError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The HL7 v3 namespace used by CDA documents
pub const CDA_NAMESPACE: &str = "urn:hl7-org:v3";

/// A section extracted from a CDA document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    /// The whole document, flattened from the root
    Document,
    /// `patientRole`
    Patient,
    /// `guardian`
    Guardian,
    /// `author`
    Author,
    /// `custodian`
    Custodian,
    /// `componentOf` (the encompassing encounter)
    Encounter,
    /// `component`
    Component,
}

impl Section {
    /// All sections in extraction order
    pub const ALL: [Section; 7] = [
        Section::Document,
        Section::Patient,
        Section::Guardian,
        Section::Author,
        Section::Custodian,
        Section::Encounter,
        Section::Component,
    ];

    /// Lowercase section name
    pub fn name(&self) -> &'static str {
        match self {
            Section::Document => "document",
            Section::Patient => "patient",
            Section::Guardian => "guardian",
            Section::Author => "author",
            Section::Custodian => "custodian",
            Section::Encounter => "encounter",
            Section::Component => "component",
        }
    }

    /// Local tag of the element this section selects, `None` for the root
    pub fn element_tag(&self) -> Option<&'static str> {
        match self {
            Section::Document => None,
            Section::Patient => Some("patientRole"),
            Section::Guardian => Some("guardian"),
            Section::Author => Some("author"),
            Section::Custodian => Some("custodian"),
            Section::Encounter => Some("componentOf"),
            Section::Component => Some("component"),
        }
    }

    /// Section name with its first letter uppercased
    pub fn display_name(&self) -> String {
        let name = self.name();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Heading used by the console output, e.g. `Patient Information`
    pub fn title(&self) -> String {
        format!("{} Information", self.display_name())
    }

    /// Relational table name, e.g. `PatientTable`
    pub fn table_name(&self) -> String {
        format!("{}Table", self.display_name())
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Section {
    type Err = CdaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Section::ALL
            .into_iter()
            .find(|section| {
                section.name().eq_ignore_ascii_case(wanted)
                    || section
                        .element_tag()
                        .is_some_and(|tag| tag.eq_ignore_ascii_case(wanted))
            })
            .ok_or_else(|| {
                CdaError::Configuration(format!(
                    "Unknown section '{s}'. Expected one of: {}",
                    Section::ALL.map(|section| section.name()).join(", ")
                ))
            })
    }
}
