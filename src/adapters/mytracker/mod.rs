//! MyTracker export API adapter
//!
//! Request signing, endpoint resolution and the reqwest-based HTTP client
//! behind the [`ExportApi`] seam.

pub mod api;
pub mod client;
pub mod endpoints;
pub mod signer;

pub use api::ExportApi;
pub use client::MyTrackerClient;
pub use endpoints::Endpoints;
pub use signer::RequestSigner;
