//! Domain error types

use thiserror::Error;

use crate::testing::AssertionFailure;

/// Domain-level errors raised while inspecting or verifying a response.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// One or more conditions did not hold for the response.
    #[error("{0}")]
    Assertion(AssertionFailure),

    /// The body could not be read as the requested shape.
    #[error("cannot deserialize response body into {target}: {message}")]
    Deserialization {
        /// Name of the target shape.
        target: String,
        /// Underlying parser message.
        message: String,
    },

    /// An expected field is missing from the response body.
    #[error("field '{field}' is absent from the response body")]
    Extraction {
        /// Path of the missing field.
        field: String,
    },

    /// A JSON path expression could not be parsed.
    #[error("invalid JSON path '{path}': {reason}")]
    InvalidJsonPath {
        /// The offending path.
        path: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The provided URL is invalid or malformed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The request body could not be encoded.
    #[error("invalid body: {0}")]
    InvalidBody(String),
}

impl DomainError {
    /// Builds a deserialization error for the type `T`.
    #[must_use]
    pub fn deserialization<T: ?Sized>(message: impl ToString) -> Self {
        Self::Deserialization {
            target: std::any::type_name::<T>().to_string(),
            message: message.to_string(),
        }
    }

    /// Builds an extraction error for the given field path.
    #[must_use]
    pub fn extraction(field: impl Into<String>) -> Self {
        Self::Extraction {
            field: field.into(),
        }
    }

    /// Returns the assertion failure if this is one.
    #[must_use]
    pub const fn as_assertion(&self) -> Option<&AssertionFailure> {
        match self {
            Self::Assertion(failure) => Some(failure),
            _ => None,
        }
    }
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
