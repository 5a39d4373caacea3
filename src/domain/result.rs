//! Result type alias for stowage
//!
//! This module provides a convenient Result type alias that uses StowageError
//! as the error type.

use super::errors::StowageError;

/// Result type alias for stowage operations
///
/// This is a convenience type alias that uses `StowageError` as the error type.
/// Use this throughout the codebase for fallible operations.
///
/// # Examples
///
/// ```
/// use stowage::domain::result::Result;
/// use stowage::domain::errors::StowageError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(StowageError::Configuration("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, StowageError>;
