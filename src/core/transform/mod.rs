//! Data transformation logic
//!
//! This module provides the two transformations applied to parsed documents:
//!
//! - **Flatten**: converts an element subtree into a flat record keyed by
//!   slash-delimited paths
//! - **Column naming**: converts a flattened path into a short column name
//!   for relational output

pub mod column;
pub mod flatten;

pub use column::derive_column_name;
pub use flatten::{find_and_flatten, flatten, flatten_optional};
