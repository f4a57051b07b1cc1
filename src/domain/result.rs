//! Result type alias for MyTracker
//!
//! This module provides a convenient Result type alias that uses
//! `MyTrackerError` as the error type.

use super::errors::MyTrackerError;

/// Result type alias for MyTracker operations
///
/// # Examples
///
/// ```
/// use mytracker::domain::result::Result;
/// use mytracker::domain::errors::MyTrackerError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(MyTrackerError::Configuration("missing account_id".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, MyTrackerError>;
