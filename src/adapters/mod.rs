//! External system integrations.
//!
//! - [`mytracker`] - MyTracker export API: request signing, endpoints and the
//!   HTTP client
//!
//! The export state machine talks to the API through the
//! [`ExportApi`](mytracker::ExportApi) trait so it can be driven by a scripted
//! implementation in tests.
//!
//! ```rust,no_run
//! use mytracker::adapters::mytracker::{ExportApi, MyTrackerClient};
//! use mytracker::config::ApiConfig;
//! use mytracker::domain::{ExportKind, ExportParams};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = MyTrackerClient::new(&ApiConfig::with_credentials("12345", "secret"))?;
//! let envelope = client
//!     .create(ExportKind::Segment, &ExportParams::new().with("idSegment", 1111))
//!     .await?;
//! println!("{envelope}");
//! # Ok(())
//! # }
//! ```

pub mod mytracker;
