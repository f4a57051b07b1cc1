//! Export coordinator - create, poll and fetch state machine
//!
//! One loop serves all three export kinds. The job is created, its status is
//! polled at a fixed interval until the [`StatusPolicy`] of the kind says it
//! is done, and then the result files are downloaded into a [`DataTable`].

use super::cancel::CancelSignal;
use super::policy::{Disposition, FailureKind, StatusPolicy};
use super::summary::ExportSummary;
use crate::adapters::mytracker::{ExportApi, MyTrackerClient};
use crate::config::{MyTrackerConfig, PollingConfig};
use crate::domain::{
    DataTable, ExportKind, ExportParams, ExportStatus, JobHandle, MyTrackerError,
    ResponseEnvelope, Result,
};
use crate::{log_error_with_context, log_poll_attempt, log_retry_attempt};
use std::sync::Arc;
use std::time::Instant;

/// What a successful flow hands back
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResultFormat {
    /// Download the result files and return them as one table
    #[default]
    Table,
    /// Return the final status envelope without downloading anything
    Envelope,
}

/// Result of a successful export flow
#[derive(Debug, Clone, PartialEq)]
pub enum ExportOutcome {
    /// Downloaded CSV data
    Table(DataTable),
    /// Final status response
    Envelope(ResponseEnvelope),
}

impl ExportOutcome {
    /// The table, if this outcome carries one
    pub fn into_table(self) -> Option<DataTable> {
        match self {
            Self::Table(table) => Some(table),
            Self::Envelope(_) => None,
        }
    }

    /// The envelope, if this outcome carries one
    pub fn into_envelope(self) -> Option<ResponseEnvelope> {
        match self {
            Self::Envelope(envelope) => Some(envelope),
            Self::Table(_) => None,
        }
    }
}

/// Outcome of a flow together with its statistics
#[derive(Debug, Clone)]
pub struct ExportRun {
    /// What the flow produced
    pub outcome: ExportOutcome,
    /// Poll and download statistics
    pub summary: ExportSummary,
}

/// Export coordinator
///
/// # Example
///
/// ```rust,no_run
/// use mytracker::core::export::{ExportCoordinator, ResultFormat};
/// use mytracker::domain::ExportParams;
///
/// # async fn example() -> mytracker::domain::Result<()> {
/// let tracker = ExportCoordinator::new("12345", "secret-key")?;
/// let params = ExportParams::new()
///     .with("idApp[]", vec![1, 2])
///     .with("event", "installs")
///     .with("selectors", "tsEvent,idApp")
///     .with("dateFrom", "2022-05-01")
///     .with("dateTo", "2022-05-02");
///
/// let table = tracker
///     .get_raw_data(params, ResultFormat::Table)
///     .await?
///     .into_table()
///     .unwrap_or_default();
/// println!("{} rows", table.len());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ExportCoordinator {
    api: Arc<dyn ExportApi>,
    polling: PollingConfig,
}

impl ExportCoordinator {
    /// Create a coordinator for the production API with default settings
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the credentials are empty
    pub fn new(account_id: impl Into<String>, secret_key: impl Into<String>) -> Result<Self> {
        let config = MyTrackerConfig::with_credentials(account_id, secret_key);
        config.validate().map_err(MyTrackerError::Configuration)?;
        Self::from_config(&config)
    }

    /// Create a coordinator from a loaded configuration
    pub fn from_config(config: &MyTrackerConfig) -> Result<Self> {
        let client = MyTrackerClient::new(&config.api)?;
        Ok(Self::with_api(Arc::new(client), config.polling.clone()))
    }

    /// Create a coordinator over any [`ExportApi`] implementation
    pub fn with_api(api: Arc<dyn ExportApi>, polling: PollingConfig) -> Self {
        Self { api, polling }
    }

    /// Polling settings in use
    pub fn polling(&self) -> &PollingConfig {
        &self.polling
    }

    /// Create an export job
    ///
    /// Returns the envelope of a code 200 reply; the job handle is stored
    /// under `data.<id key>` of the kind.
    pub async fn create_export(
        &self,
        kind: ExportKind,
        params: &ExportParams,
    ) -> Result<ResponseEnvelope> {
        let envelope = self.api.create(kind, params).await?;
        check_create_response(envelope)
    }

    /// Send one status request and return the reply uninterpreted
    pub async fn get_export(
        &self,
        kind: ExportKind,
        params: &ExportParams,
    ) -> Result<ResponseEnvelope> {
        self.api.get(kind, params).await
    }

    /// Ask the server to cancel a raw data export
    pub async fn cancel_raw_data_export(&self, handle: &JobHandle) -> Result<ResponseEnvelope> {
        tracing::info!(handle = %handle, "Canceling raw data export");
        self.api.cancel(ExportKind::Raw, handle).await
    }

    /// Raw event data export
    pub async fn get_raw_data(
        &self,
        params: ExportParams,
        format: ResultFormat,
    ) -> Result<ExportOutcome> {
        self.get_raw_data_with_cancel(params, format, CancelSignal::never())
            .await
    }

    /// Raw event data export that stops when `cancel` fires
    ///
    /// On cancellation the remote job is canceled as well.
    pub async fn get_raw_data_with_cancel(
        &self,
        params: ExportParams,
        format: ResultFormat,
        cancel: CancelSignal,
    ) -> Result<ExportOutcome> {
        self.run(ExportKind::Raw, params, format, cancel).await
    }

    /// Report file export
    ///
    /// A `fileType` parameter is forced to `csv`.
    pub async fn get_report(
        &self,
        params: ExportParams,
        format: ResultFormat,
    ) -> Result<ExportOutcome> {
        self.get_report_with_cancel(params, format, CancelSignal::never())
            .await
    }

    /// Report file export that stops when `cancel` fires
    pub async fn get_report_with_cancel(
        &self,
        params: ExportParams,
        format: ResultFormat,
        cancel: CancelSignal,
    ) -> Result<ExportOutcome> {
        self.run(ExportKind::Report, params, format, cancel).await
    }

    /// Segment export; returns the final status envelope
    pub async fn get_segment(&self, params: ExportParams) -> Result<ResponseEnvelope> {
        self.get_segment_with_cancel(params, CancelSignal::never())
            .await
    }

    /// Segment export that stops when `cancel` fires
    pub async fn get_segment_with_cancel(
        &self,
        params: ExportParams,
        cancel: CancelSignal,
    ) -> Result<ResponseEnvelope> {
        match self
            .run(ExportKind::Segment, params, ResultFormat::Envelope, cancel)
            .await?
        {
            ExportOutcome::Envelope(envelope) => Ok(envelope),
            ExportOutcome::Table(_) => Err(MyTrackerError::InvalidResponse(
                "Segment export produced a table".to_string(),
            )),
        }
    }

    /// Run a full flow for `kind` and return its outcome
    pub async fn run(
        &self,
        kind: ExportKind,
        params: ExportParams,
        format: ResultFormat,
        cancel: CancelSignal,
    ) -> Result<ExportOutcome> {
        self.execute(kind, params, format, cancel)
            .await
            .map(|run| run.outcome)
    }

    /// Run a full flow for `kind` and return its outcome with statistics
    pub async fn execute(
        &self,
        kind: ExportKind,
        params: ExportParams,
        format: ResultFormat,
        cancel: CancelSignal,
    ) -> Result<ExportRun> {
        let start_time = Instant::now();
        let mut summary = ExportSummary::new(kind);

        match self
            .drive(kind, normalize_params(kind, params), format, cancel, &mut summary)
            .await
        {
            Ok(outcome) => {
                let summary = summary.with_duration(start_time.elapsed());
                summary.log_summary();
                Ok(ExportRun { outcome, summary })
            }
            Err(e) => {
                log_error_with_context!(&e, format!("{kind} export failed"));
                Err(e)
            }
        }
    }

    async fn drive(
        &self,
        kind: ExportKind,
        params: ExportParams,
        format: ResultFormat,
        mut cancel: CancelSignal,
        summary: &mut ExportSummary,
    ) -> Result<ExportOutcome> {
        if cancel.is_cancelled() {
            return Err(MyTrackerError::Interrupted {
                cancel_response: None,
            });
        }

        tracing::info!(kind = %kind, params = %params, "Creating export job");
        let created = self.create_export(kind, &params).await?;
        let handle = created.job_handle(kind.id_key()).ok_or_else(|| {
            MyTrackerError::InvalidResponse(format!(
                "Create response has no {}: {created}",
                kind.id_key()
            ))
        })?;
        summary.handle = Some(handle.clone());
        tracing::info!(kind = %kind, handle = %handle, "Export job created");

        let policy = StatusPolicy::for_kind(kind);
        let poll_params = ExportParams::new().with(kind.id_key(), handle.as_str());
        let mut consecutive_errors: u32 = 0;

        loop {
            if cancel.is_cancelled() {
                return Err(self.interrupt(kind, &handle).await);
            }

            let envelope = tokio::select! {
                reply = self.get_export(kind, &poll_params) => reply?,
                _ = cancel.cancelled() => return Err(self.interrupt(kind, &handle).await),
            };
            summary.polls += 1;

            match envelope.code {
                200 => {}
                403 => return Err(MyTrackerError::AccessDenied { response: envelope }),
                404 => return Err(MyTrackerError::NotFound { response: envelope }),
                _ => return Err(MyTrackerError::Unknown { response: envelope }),
            }

            let Some(status) = envelope.status() else {
                return Err(MyTrackerError::Unknown { response: envelope });
            };
            log_poll_attempt!(kind, handle, summary.polls, status);

            match policy.disposition(&status) {
                Disposition::Complete => {
                    return self
                        .finish(kind, &handle, envelope, format, &mut cancel, summary)
                        .await;
                }
                Disposition::Fail(failure) => return Err(failure_error(failure, envelope)),
                Disposition::Retry => {
                    if status == ExportStatus::ErrorOccurred {
                        consecutive_errors += 1;
                        summary.error_retries += 1;
                        let limit = self.polling.error_retry_limit();
                        log_retry_attempt!(consecutive_errors, limit, status.as_remote());
                        if limit.is_some_and(|max| consecutive_errors > max)
                        {
                            return Err(MyTrackerError::RetryLimitExceeded {
                                attempts: summary.polls,
                                response: envelope,
                            });
                        }
                    } else {
                        consecutive_errors = 0;
                    }

                    if self
                        .polling
                        .max_polls
                        .is_some_and(|max| summary.polls >= max)
                    {
                        return Err(MyTrackerError::RetryLimitExceeded {
                            attempts: summary.polls,
                            response: envelope,
                        });
                    }
                }
            }

            tokio::select! {
                _ = tokio::time::sleep(self.polling.interval()) => {}
                _ = cancel.cancelled() => return Err(self.interrupt(kind, &handle).await),
            }
        }
    }

    async fn finish(
        &self,
        kind: ExportKind,
        handle: &JobHandle,
        envelope: ResponseEnvelope,
        format: ResultFormat,
        cancel: &mut CancelSignal,
        summary: &mut ExportSummary,
    ) -> Result<ExportOutcome> {
        if kind == ExportKind::Segment || format == ResultFormat::Envelope {
            return Ok(ExportOutcome::Envelope(envelope));
        }

        let files = envelope.files();
        let links: Vec<&str> = match kind {
            ExportKind::Report => {
                let first = files.first().ok_or_else(|| {
                    MyTrackerError::InvalidResponse(format!(
                        "Report is ready but lists no files: {envelope}"
                    ))
                })?;
                vec![first.link.as_str()]
            }
            _ => files.iter().map(|f| f.link.as_str()).collect(),
        };

        tracing::info!(kind = %kind, files = links.len(), "Downloading result files");

        let mut tables = Vec::with_capacity(links.len());
        for link in links {
            let table = tokio::select! {
                table = self.api.download(link) => table?,
                _ = cancel.cancelled() => return Err(self.interrupt(kind, handle).await),
            };
            tables.push(table);
            summary.files_downloaded += 1;
        }

        let table = DataTable::concat(tables);
        summary.rows = table.len();
        Ok(ExportOutcome::Table(table))
    }

    /// Cancels the remote job where possible and builds the interruption error
    async fn interrupt(&self, kind: ExportKind, handle: &JobHandle) -> MyTrackerError {
        tracing::warn!(kind = %kind, handle = %handle, "Export interrupted");

        if !kind.supports_cancel() {
            return MyTrackerError::Interrupted {
                cancel_response: None,
            };
        }

        let cancel_response = match self.api.cancel(kind, handle).await {
            Ok(envelope) => Some(envelope),
            Err(e) => {
                log_error_with_context!(&e, "Failed to cancel remote export job");
                None
            }
        };
        MyTrackerError::Interrupted { cancel_response }
    }
}

impl std::fmt::Debug for ExportCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportCoordinator")
            .field("polling", &self.polling)
            .finish_non_exhaustive()
    }
}

/// Maps the code of a create reply to success or a typed error
fn check_create_response(envelope: ResponseEnvelope) -> Result<ResponseEnvelope> {
    match envelope.code {
        200 => Ok(envelope),
        400 => Err(MyTrackerError::BadRequest {
            detail: envelope
                .error_detail()
                .unwrap_or("No details provided")
                .to_string(),
            response: envelope,
        }),
        403 => Err(MyTrackerError::AccessDenied { response: envelope }),
        _ => Err(MyTrackerError::Unknown { response: envelope }),
    }
}

/// Reports can only be parsed as CSV
fn normalize_params(kind: ExportKind, mut params: ExportParams) -> ExportParams {
    if kind == ExportKind::Report && params.contains_key("fileType") {
        params.insert("fileType", "csv");
    }
    params
}

fn failure_error(failure: FailureKind, response: ResponseEnvelope) -> MyTrackerError {
    match failure {
        FailureKind::UserError => MyTrackerError::UserError {
            message: response
                .error_message()
                .unwrap_or("User error occurred")
                .to_string(),
            response,
        },
        FailureKind::Canceled => MyTrackerError::Canceled { response },
        FailureKind::ReportGeneration => MyTrackerError::ReportGeneration { response },
        FailureKind::Unknown => MyTrackerError::Unknown { response },
    }
}
