//! Transport seam between the export state machine and the remote API

use crate::domain::{DataTable, ExportKind, ExportParams, JobHandle, ResponseEnvelope, Result};
use async_trait::async_trait;

/// Raw calls against the MyTracker export API
///
/// Implementations only move envelopes over the wire; interpreting response
/// codes and job statuses is left to the caller. [`MyTrackerClient`] is the
/// HTTP implementation, tests script their own.
///
/// [`MyTrackerClient`]: super::MyTrackerClient
#[async_trait]
pub trait ExportApi: Send + Sync {
    /// Signed POST to the create endpoint of `kind`
    async fn create(&self, kind: ExportKind, params: &ExportParams) -> Result<ResponseEnvelope>;

    /// Signed GET to the status endpoint of `kind`
    async fn get(&self, kind: ExportKind, params: &ExportParams) -> Result<ResponseEnvelope>;

    /// Signed GET to the cancel endpoint of `kind`
    ///
    /// # Errors
    ///
    /// Returns a configuration error for kinds without a cancel endpoint
    async fn cancel(&self, kind: ExportKind, handle: &JobHandle) -> Result<ResponseEnvelope>;

    /// Fetch one gzip CSV result file and parse it
    async fn download(&self, link: &str) -> Result<DataTable>;
}
