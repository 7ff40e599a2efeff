//! HTTP Client port

use std::future::Future;

use restcheck_domain::{DomainError, request::RequestSpec, response::ResponseSpec};
use thiserror::Error;

/// Transport-level failures. Each request is attempted once.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HttpClientError {
    /// The URL could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The request body could not be sent.
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// The request did not complete in time.
    #[error("request timed out after {timeout_ms} ms")]
    Timeout {
        /// Applied timeout.
        timeout_ms: u64,
    },

    /// The host name could not be resolved.
    #[error("DNS resolution failed for {host}: {message}")]
    DnsError {
        /// Host that failed to resolve.
        host: String,
        /// Resolver message.
        message: String,
    },

    /// The server refused the connection.
    #[error("connection refused by {host}:{port}")]
    ConnectionRefused {
        /// Target host.
        host: String,
        /// Target port.
        port: u16,
    },

    /// The connection failed for another reason.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The redirect limit was exceeded.
    #[error("too many redirects (max {max})")]
    TooManyRedirects {
        /// Redirect limit.
        max: usize,
    },

    /// Any other client failure.
    #[error("HTTP client error: {0}")]
    Other(String),
}

impl From<DomainError> for HttpClientError {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::InvalidUrl(message) => Self::InvalidUrl(message),
            DomainError::InvalidBody(message) => Self::InvalidBody(message),
            other => Self::Other(other.to_string()),
        }
    }
}

/// Port for executing HTTP requests.
///
/// This trait abstracts the HTTP client implementation, allowing
/// services to be exercised against an in-memory client in tests.
pub trait HttpClient: Send + Sync {
    /// Executes an HTTP request and returns the response snapshot.
    ///
    /// Any status code, including 4xx and 5xx, is a successful exchange.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails due to network issues,
    /// timeout, or an invalid request.
    fn execute(
        &self,
        request: &RequestSpec,
    ) -> impl Future<Output = Result<ResponseSpec, HttpClientError>> + Send;
}
