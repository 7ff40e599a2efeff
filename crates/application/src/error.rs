//! Application error types

use restcheck_domain::{AssertionFailure, DomainError};
use thiserror::Error;

use crate::ports::HttpClientError;

/// Application-level errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    /// A verification or extraction on the response failed.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// An HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] HttpClientError),

    /// Settings could not be loaded.
    #[error("configuration error: {0}")]
    Config(String),

    /// A report could not be written.
    #[error("report error: {0}")]
    Report(String),
}

impl ApplicationError {
    /// Returns the assertion failure if this is one.
    #[must_use]
    pub const fn as_assertion(&self) -> Option<&AssertionFailure> {
        match self {
            Self::Domain(error) => error.as_assertion(),
            Self::Http(_) | Self::Config(_) | Self::Report(_) => None,
        }
    }
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
