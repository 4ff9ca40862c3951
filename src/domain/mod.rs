//! Domain models and types for cdaflat.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **The parsed XML tree** ([`Element`])
//! - **Flattened output** ([`FlatRecord`])
//! - **Named document sections** ([`Section`])
//! - **Error types** ([`CdaError`], [`LoadError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible library operations return [`Result<T, CdaError>`]; document
//! loading returns [`LoadError`] directly so callers can match on the kind:
//!
//! ```rust
//! use cdaflat::core::document::load_document;
//! use cdaflat::domain::LoadError;
//!
//! match load_document("missing.xml") {
//!     Err(LoadError::FileNotFound(path)) => println!("no such file: {path}"),
//!     Err(other) => println!("{other}"),
//!     Ok(document) => println!("root: {}", document.root().local_name()),
//! }
//! ```

pub mod element;
pub mod errors;
pub mod record;
pub mod result;
pub mod section;

// Re-export commonly used types for convenience
pub use element::{local_tag, Element};
pub use errors::{CdaError, LoadError};
pub use record::FlatRecord;
pub use result::Result;
pub use section::{Section, CDA_NAMESPACE};
