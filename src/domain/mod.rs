//! Domain models and types for MyTracker exports.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Identifiers** ([`JobHandle`])
//! - **Request and response shapes** ([`ExportParams`], [`ResponseEnvelope`])
//! - **Job vocabulary** ([`ExportKind`], [`ExportStatus`])
//! - **Tabular results** ([`DataTable`])
//! - **Error types** ([`MyTrackerError`]) and the [`Result`] alias
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, MyTrackerError>`]:
//!
//! ```rust
//! use mytracker::domain::{ExportParams, Result};
//!
//! fn example() -> Result<()> {
//!     let params = ExportParams::from_json(&serde_json::json!({"idApp": 1}))
//!         .map_err(mytracker::domain::MyTrackerError::Configuration)?;
//!     assert_eq!(params.encode(), "idApp=1");
//!     Ok(())
//! }
//! ```

pub mod envelope;
pub mod errors;
pub mod ids;
pub mod params;
pub mod result;
pub mod status;
pub mod table;

pub use envelope::{FileLink, ResponseEnvelope};
pub use errors::MyTrackerError;
pub use ids::JobHandle;
pub use params::{form_encode, ExportParams, ParamValue};
pub use result::Result;
pub use status::{ExportKind, ExportStatus};
pub use table::DataTable;
