//! HTTP client for the MyTracker export API

use super::api::ExportApi;
use super::endpoints::Endpoints;
use super::signer::RequestSigner;
use crate::config::ApiConfig;
use crate::domain::{
    DataTable, ExportKind, ExportParams, JobHandle, MyTrackerError, ResponseEnvelope, Result,
};
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, ClientBuilder, Method};
use std::time::Duration;

/// Signed reqwest-based implementation of [`ExportApi`]
///
/// # Example
///
/// ```no_run
/// use mytracker::adapters::mytracker::{ExportApi, MyTrackerClient};
/// use mytracker::config::ApiConfig;
/// use mytracker::domain::{ExportKind, ExportParams};
///
/// # async fn example() -> mytracker::domain::Result<()> {
/// let client = MyTrackerClient::new(&ApiConfig::with_credentials("12345", "secret"))?;
/// let params = ExportParams::new().with("idRawExport", 42);
/// let envelope = client.get(ExportKind::Raw, &params).await?;
/// println!("{envelope}");
/// # Ok(())
/// # }
/// ```
pub struct MyTrackerClient {
    client: Client,
    signer: RequestSigner,
    endpoints: Endpoints,
    download_timeout: Duration,
}

impl MyTrackerClient {
    /// Create a client from API configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(config.timeout())
            .connect_timeout(config.timeout())
            .build()
            .map_err(|e| {
                MyTrackerError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            signer: RequestSigner::new(config.account_id.clone(), config.secret_key.clone()),
            endpoints: Endpoints::new(config.base_url.clone()),
            download_timeout: config.download_timeout(),
        })
    }

    /// Endpoint table in use
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Sends a signed request with `params` in the query string and parses
    /// the envelope, whatever the HTTP status
    async fn send_signed(
        &self,
        method: Method,
        url: &str,
        params: &ExportParams,
    ) -> Result<ResponseEnvelope> {
        let url = if params.is_empty() {
            url.to_string()
        } else {
            format!("{url}?{}", params.encode())
        };
        let authorization = self.signer.authorization(method.as_str(), &url, "")?;

        tracing::debug!(method = %method, url = %url, "Sending signed request");

        let response = self
            .client
            .request(method, &url)
            .header(AUTHORIZATION, authorization)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        serde_json::from_str::<ResponseEnvelope>(&body).map_err(|e| {
            tracing::error!(http_status = %status, error = %e, "Response is not a JSON envelope");
            MyTrackerError::InvalidResponse(format!(
                "HTTP {status}: {e}; body: {}",
                body.chars().take(200).collect::<String>()
            ))
        })
    }
}

#[async_trait]
impl ExportApi for MyTrackerClient {
    async fn create(&self, kind: ExportKind, params: &ExportParams) -> Result<ResponseEnvelope> {
        let url = self.endpoints.create_url(kind);
        self.send_signed(Method::POST, &url, params).await
    }

    async fn get(&self, kind: ExportKind, params: &ExportParams) -> Result<ResponseEnvelope> {
        let url = self.endpoints.get_url(kind);
        self.send_signed(Method::GET, &url, params).await
    }

    async fn cancel(&self, kind: ExportKind, handle: &JobHandle) -> Result<ResponseEnvelope> {
        let url = self.endpoints.cancel_url(kind).ok_or_else(|| {
            MyTrackerError::Configuration(format!("{kind} exports cannot be canceled"))
        })?;
        let params = ExportParams::new().with(kind.id_key(), handle.as_str());
        self.send_signed(Method::GET, &url, &params).await
    }

    async fn download(&self, link: &str) -> Result<DataTable> {
        tracing::debug!(link = %link, "Downloading result file");

        let response = self
            .client
            .get(link)
            .timeout(self.download_timeout)
            .send()
            .await
            .map_err(|e| MyTrackerError::Download(format!("{link}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MyTrackerError::Download(format!(
                "{link}: server returned {status}"
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| MyTrackerError::Download(format!("{link}: {e}")))?;

        DataTable::from_gzip_csv(&bytes)
    }
}
