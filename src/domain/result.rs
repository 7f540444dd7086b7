//! Result type alias for ontex

use super::errors::OntexError;

/// Result type alias used throughout the crate
///
/// # Examples
///
/// ```
/// use ontex::domain::result::Result;
/// use ontex::domain::errors::OntexError;
///
/// fn validated(input: &str) -> Result<&str> {
///     if input.is_empty() {
///         return Err(OntexError::Validation("empty input".to_string()));
///     }
///     Ok(input)
/// }
/// ```
pub type Result<T> = std::result::Result<T, OntexError>;
