//! Core logic for cdaflat.
//!
//! This module turns a CDA document into records, frames and text.
//!
//! # Modules
//!
//! - [`document`] - Loading and parsing XML into an element tree
//! - [`select`] - Path selectors with namespace prefixes
//! - [`transform`] - Flattening and column naming
//! - [`extract`] - Per-section extraction
//! - [`frame`] - Single-row table frames
//! - [`render`] - Console and JSON output
//!
//! # Workflow
//!
//! 1. **Load**: Parse the XML file into a [`document::Document`]
//! 2. **Extract**: Locate each section and flatten it into a record
//! 3. **Output**: Print the records, or build frames and load them into tables
//!
//! # Example
//!
//! ```rust,no_run
//! use cdaflat::core::document::load_document;
//! use cdaflat::core::extract::{extract_sections, ExtractOptions};
//! use cdaflat::core::render::render_record;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let document = load_document("samples/document.xml")?;
//!
//! for section in extract_sections(&document, &ExtractOptions::default()) {
//!     print!("{}", render_record(&section.section.title(), &section.record));
//! }
//! # Ok(())
//! # }
//! ```

pub mod document;
pub mod extract;
pub mod frame;
pub mod render;
pub mod select;
pub mod transform;
