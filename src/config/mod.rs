//! Configuration management for the MyTracker client.
//!
//! # Overview
//!
//! Configuration lives in a TOML file (by default `mytracker.toml`) with
//! support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `MYTRACKER_<SECTION>_<KEY>` overrides
//! - Default values for optional settings
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use mytracker::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("mytracker.toml")?;
//! println!("API host: {}", config.api.base_url);
//! println!("Poll interval: {:?}", config.polling.interval());
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - log level
//! - [`ApiConfig`] - credentials, host and timeouts
//! - [`PollingConfig`] - poll interval and retry bounds
//! - [`LoggingConfig`] - optional JSON log files
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [api]
//! account_id = "12345"
//! secret_key = "${MYTRACKER_SECRET_KEY}"
//!
//! [polling]
//! interval_ms = 3000
//! max_error_retries = 20
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::{load_config, load_config_from_str};
pub use schema::{ApiConfig, ApplicationConfig, LoggingConfig, MyTrackerConfig, PollingConfig};
pub use secret::{secret_string, SecretString, SecretValue};
