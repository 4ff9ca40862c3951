//! Result type alias for cdaflat

use super::errors::CdaError;

/// Result type alias for cdaflat operations
///
/// # Examples
///
/// ```
/// use cdaflat::domain::result::Result;
/// use cdaflat::domain::errors::CdaError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(CdaError::Selector("empty expression".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, CdaError>;
