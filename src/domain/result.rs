//! Result type alias for the anonymizer

use super::errors::AnonError;

/// Result type alias for anonymizer operations
///
/// # Examples
///
/// ```
/// use mismo_anon::domain::result::Result;
/// use mismo_anon::domain::errors::AnonError;
///
/// fn parse_step() -> Result<String> {
///     Ok("parsed".to_string())
/// }
///
/// fn failing_step() -> Result<()> {
///     Err(AnonError::Validation("empty payload".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, AnonError>;
