//! Error types for report ingestion and remote TCM access.
//!
//! Remote errors are classified the same way HTTP responses are: a server
//! error (5xx or a transport failure) is transient and may be retried, a
//! client error (4xx) is permanent.
//!
//! # Example
//!
//! ```rust
//! use zephyr_sync::errors::TcmError;
//!
//! let err = TcmError::api(503, None);
//! assert!(err.is_server_error());
//! assert!(!err.is_client_error());
//! ```

use crate::tcm::models::ErrorResponse;
use std::path::PathBuf;
use thiserror::Error;

pub type TcmResult<T> = Result<T, TcmError>;

/// Failure of a call to the remote TCM service.
#[derive(Debug, Error)]
pub enum TcmError {
    /// The request never produced an HTTP response (refused, timed out, DNS).
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    /// The service answered with a non-2xx status.
    #[error("TCM responded with HTTP {status}: {}", describe_body(.body))]
    Api {
        status: u16,
        body: Option<ErrorResponse>,
    },

    /// A 2xx response whose body could not be decoded.
    #[error("failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },

    /// The HTTP client itself could not be built.
    #[error("invalid client configuration: {0}")]
    Config(String),
}

impl TcmError {
    pub fn api(status: u16, body: Option<ErrorResponse>) -> Self {
        Self::Api { status, body }
    }

    pub fn transport(url: impl Into<String>, source: &reqwest::Error) -> Self {
        Self::Transport {
            url: url.into(),
            message: source.to_string(),
        }
    }

    /// HTTP status of the failed call, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Transient failures: 5xx and network-level errors.
    pub fn is_server_error(&self) -> bool {
        match self {
            Self::Transport { .. } => true,
            Self::Api { status, .. } => (500..600).contains(status),
            Self::Decode { .. } | Self::Config(_) => false,
        }
    }

    /// Permanent application errors: 4xx.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Api { status, .. } if (400..500).contains(status))
    }

    pub fn is_retryable(&self) -> bool {
        self.is_server_error()
    }
}

fn describe_body(body: &Option<ErrorResponse>) -> String {
    body.as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| "<empty body>".to_string())
}

/// Failure while reading a local test report.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse Allure result {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse XML report {path}: {message}")]
    Xml { path: PathBuf, message: String },

    #[error("report path {0} does not exist")]
    MissingPath(PathBuf),

    #[error("failed to walk {path}: {message}")]
    Walk { path: PathBuf, message: String },
}

impl IngestError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn xml(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Xml {
            path: path.into(),
            message: message.to_string(),
        }
    }
}
