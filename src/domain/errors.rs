//! Domain error types
//!
//! Every failure surfaced by the library is a [`MyTrackerError`]. Errors that
//! originate from a server reply keep the full response envelope so callers can
//! inspect what the remote side actually said.
//! Third-party error types are converted to strings and never exposed.

use super::envelope::ResponseEnvelope;
use thiserror::Error;

/// Main MyTracker error type
#[derive(Debug, Error)]
pub enum MyTrackerError {
    /// The create call was rejected as malformed (code 400)
    #[error("Bad request. {detail}.\nResponse: {response}")]
    BadRequest {
        /// Server-supplied explanation (`data.error.detail`)
        detail: String,
        /// Full server response
        response: ResponseEnvelope,
    },

    /// Authentication failed (code 403)
    #[error(
        "Access denied. Maybe you made mistakes or forgot to send authorization data.\nResponse: {response}"
    )]
    AccessDenied {
        /// Full server response
        response: ResponseEnvelope,
    },

    /// The job handle is stale or unknown (code 404)
    #[error("The request is unavailable or could not be found.\nResponse: {response}")]
    NotFound {
        /// Full server response
        response: ResponseEnvelope,
    },

    /// The job failed with a semantic error reported by the server
    #[error("{message}.\nResponse: {response}")]
    UserError {
        /// Server-supplied error message (`data.errorMessage`)
        message: String,
        /// Full server response
        response: ResponseEnvelope,
    },

    /// The job was canceled on the server side
    #[error("The request was canceled.\nResponse: {response}")]
    Canceled {
        /// Full server response
        response: ResponseEnvelope,
    },

    /// Report generation failed and will never produce a file
    #[error("Error occurred. The file will never be created.\nResponse: {response}")]
    ReportGeneration {
        /// Full server response
        response: ResponseEnvelope,
    },

    /// Unrecognized response code or status
    #[error("Unknown error.\nResponse: {response}")]
    Unknown {
        /// Full server response
        response: ResponseEnvelope,
    },

    /// The configured polling bound was reached before a terminal status
    #[error("Gave up after {attempts} polls without a terminal status.\nResponse: {response}")]
    RetryLimitExceeded {
        /// Number of polls issued
        attempts: u32,
        /// Last response received
        response: ResponseEnvelope,
    },

    /// The caller aborted the flow through its cancel signal
    #[error("The program was interrupted. The request was canceled.")]
    Interrupted {
        /// Response of the remote cancel call, when one was issued
        cancel_response: Option<ResponseEnvelope>,
    },

    /// The server reply did not have the expected shape
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),

    /// Network/transport errors
    #[error("HTTP error: {0}")]
    Http(String),

    /// Result file could not be fetched or decompressed
    #[error("Download error: {0}")]
    Download(String),

    /// Result file could not be parsed as CSV
    #[error("CSV error: {0}")]
    Csv(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl MyTrackerError {
    /// Returns the server response attached to this error, if any
    pub fn response(&self) -> Option<&ResponseEnvelope> {
        match self {
            Self::BadRequest { response, .. }
            | Self::AccessDenied { response }
            | Self::NotFound { response }
            | Self::UserError { response, .. }
            | Self::Canceled { response }
            | Self::ReportGeneration { response }
            | Self::Unknown { response }
            | Self::RetryLimitExceeded { response, .. } => Some(response),
            Self::Interrupted { cancel_response } => cancel_response.as_ref(),
            _ => None,
        }
    }

    /// Returns true if the error was reported by the remote API rather than
    /// raised locally
    pub fn is_api_error(&self) -> bool {
        matches!(
            self,
            Self::BadRequest { .. }
                | Self::AccessDenied { .. }
                | Self::NotFound { .. }
                | Self::UserError { .. }
                | Self::Canceled { .. }
                | Self::ReportGeneration { .. }
                | Self::Unknown { .. }
        )
    }
}

impl From<std::io::Error> for MyTrackerError {
    fn from(err: std::io::Error) -> Self {
        MyTrackerError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for MyTrackerError {
    fn from(err: serde_json::Error) -> Self {
        MyTrackerError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for MyTrackerError {
    fn from(err: toml::de::Error) -> Self {
        MyTrackerError::Configuration(format!("TOML parse error: {err}"))
    }
}

impl From<csv::Error> for MyTrackerError {
    fn from(err: csv::Error) -> Self {
        MyTrackerError::Csv(err.to_string())
    }
}

impl From<reqwest::Error> for MyTrackerError {
    fn from(err: reqwest::Error) -> Self {
        MyTrackerError::Http(err.to_string())
    }
}
