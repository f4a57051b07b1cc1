//! Logging and observability
//!
//! Structured logging on `tracing` with:
//! - console output on stderr
//! - optional JSON log files with rotation
//! - helper macros for the export polling loop
//!
//! # Example
//!
//! ```no_run
//! use mytracker::logging::init_logging;
//! use mytracker::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!(kind = "raw", "Export started");
//! ```

pub mod structured;

pub use structured::{init_logging, parse_log_level, LoggingGuard};

/// Log one status request of an export job
///
/// # Example
///
/// ```no_run
/// use mytracker::log_poll_attempt;
///
/// log_poll_attempt!("raw", "12345", 3, "In progress");
/// ```
#[macro_export]
macro_rules! log_poll_attempt {
    ($kind:expr, $handle:expr, $poll:expr, $status:expr) => {
        tracing::debug!(
            kind = %$kind,
            handle = %$handle,
            poll = $poll,
            status = %$status,
            "Polled export job"
        );
    };
}

/// Log a retry attempt
///
/// # Example
///
/// ```no_run
/// use mytracker::log_retry_attempt;
///
/// log_retry_attempt!(2, Some(20), "Error occurred");
/// ```
#[macro_export]
macro_rules! log_retry_attempt {
    ($attempt:expr, $max_attempts:expr, $reason:expr) => {
        tracing::warn!(
            attempt = $attempt,
            max_attempts = ?$max_attempts,
            reason = $reason,
            "Retrying operation"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use mytracker::log_error_with_context;
/// use mytracker::domain::MyTrackerError;
///
/// let error = MyTrackerError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = %$context,
            "Error occurred"
        );
    };
}
