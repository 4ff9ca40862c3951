// cdaflat - HL7 CDA flattening and loading tool
// Copyright (c) 2025 cdaflat Contributors
// Licensed under the MIT License

//! # cdaflat - HL7 CDA flattening
//!
//! cdaflat turns HL7 Clinical Document Architecture (CDA) XML documents into
//! flat key-value records and loads them into relational tables.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Parsing** CDA XML into an immutable element tree
//! - **Flattening** element subtrees into path-keyed records
//! - **Naming** table columns from flattened paths
//! - **Loading** one single-row table per document section into PostgreSQL
//!   or a SQL script
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Document loading, selection, flattening, frames and rendering
//! - [`adapters`] - Table sinks (PostgreSQL, SQL script)
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust
//! use cdaflat::core::document::parse_document;
//! use cdaflat::core::extract::{extract_section, ExtractOptions};
//! use cdaflat::domain::Section;
//!
//! let xml = r#"<ClinicalDocument xmlns="urn:hl7-org:v3">
//!   <recordTarget>
//!     <patientRole>
//!       <id extension="123"/>
//!       <addr>1 Main St</addr>
//!     </patientRole>
//!   </recordTarget>
//! </ClinicalDocument>"#;
//!
//! let document = parse_document(xml)?;
//! let patient = extract_section(&document, Section::Patient, &ExtractOptions::default());
//!
//! assert_eq!(patient.get("id/@extension"), Some("123"));
//! assert_eq!(patient.get("addr"), Some("1 Main St"));
//! # Ok::<(), cdaflat::domain::LoadError>(())
//! ```
//!
//! ## Column Names
//!
//! ```rust
//! use cdaflat::core::transform::derive_column_name;
//!
//! assert_eq!(derive_column_name("cda:patientRole/cda:id/@extension"), "IdExtension");
//! ```
//!
//! ## Error Handling
//!
//! Library operations return [`domain::Result`], an alias over
//! [`domain::CdaError`]. Document loading returns [`domain::LoadError`] so
//! callers can tell a missing file from malformed XML.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
