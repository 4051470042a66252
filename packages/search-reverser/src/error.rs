//! Typed errors for the profiler.
//!
//! Uses `thiserror` for library errors (not `anyhow`) so the binary can
//! tell transport failures, which are recorded as evidence, apart from
//! malformed bodies and preflight failures, which stop the run.

use thiserror::Error;

/// Errors that can occur while probing a search endpoint.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The request never completed (connection refused, timeout, ...).
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The endpoint answered with a non-2xx status.
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// A 2xx response whose body is not the expected JSON array.
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Connectivity probe failed before any query was issued.
    #[error("target unreachable: {url}")]
    Unreachable {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Target URL could not be parsed.
    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },

    /// Configuration value could not be parsed.
    #[error("config error: {key}: {reason}")]
    Config { key: String, reason: String },
}

impl ProbeError {
    /// Whether this error is a per-query network failure.
    ///
    /// Transport failures are converted into an empty result list by the
    /// engine; every other variant aborts the run.
    pub fn is_transport(&self) -> bool {
        matches!(self, ProbeError::Http(_) | ProbeError::Status { .. })
    }
}

/// Result type alias for probe operations.
pub type Result<T> = std::result::Result<T, ProbeError>;
