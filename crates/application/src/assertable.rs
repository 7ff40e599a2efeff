//! Fluent verification over a received HTTP response.
//!
//! An [`AssertableResponse`] owns exactly one [`ResponseSpec`] and records
//! a [`ConditionResult`] for every condition evaluated against it. Each
//! `should` call is fail-fast: the first condition that does not hold ends
//! the chain with an [`AssertionFailure`] carrying the full history.
//! [`AssertableResponse::should_all`] is the soft variant; it evaluates a
//! whole group before failing once.
//!
//! ```ignore
//! let token = users
//!     .auth(&user)
//!     .await?
//!     .should(has_status_code(200))?
//!     .as_jwt()?;
//! ```

use restcheck_domain::{
    AssertionFailure, Condition, ConditionResult, DomainError, ResponseSpec, VerificationReport,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::error::{ApplicationError, ApplicationResult};

/// Field holding the bearer token in authentication responses.
pub const TOKEN_FIELD: &str = "token";

/// A response snapshot under verification.
#[derive(Debug, Clone)]
pub struct AssertableResponse {
    response: ResponseSpec,
    results: Vec<ConditionResult>,
}

impl AssertableResponse {
    /// Wraps a received response.
    #[must_use]
    pub const fn new(response: ResponseSpec) -> Self {
        Self {
            response,
            results: Vec::new(),
        }
    }

    /// Evaluates `condition` against the held response.
    ///
    /// The result is recorded whether or not it passes.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Assertion`] if the condition does not hold.
    pub fn should<C: Condition>(mut self, condition: C) -> ApplicationResult<Self> {
        let from = self.results.len();
        let result = self.record(&condition);

        if result {
            Ok(self)
        } else {
            Err(self.into_failure(from))
        }
    }

    /// Evaluates every condition, then fails once if any did not hold.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Assertion`] listing each failed condition.
    pub fn should_all(mut self, conditions: &[&dyn Condition]) -> ApplicationResult<Self> {
        let from = self.results.len();
        let mut all_passed = true;
        for condition in conditions {
            all_passed &= self.record(*condition);
        }

        if all_passed {
            Ok(self)
        } else {
            Err(self.into_failure(from))
        }
    }

    /// Extracts the bearer token from the `token` field.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Extraction`] if the field is absent or not a
    /// string, or [`DomainError::Deserialization`] if the body is not JSON.
    pub fn as_jwt(&self) -> ApplicationResult<String> {
        match self.response.json_field(TOKEN_FIELD)? {
            Some(Value::String(token)) => Ok(token.clone()),
            _ => Err(DomainError::extraction(TOKEN_FIELD).into()),
        }
    }

    /// Reads the body as a JSON array of `T`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Deserialization`] if the body is not an array
    /// or an element does not match `T`.
    pub fn as_list<T: DeserializeOwned>(&self) -> ApplicationResult<Vec<T>> {
        Ok(self.response.deserialize::<Vec<T>>()?)
    }

    /// Reads the whole body as `T`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Deserialization`] on a shape mismatch.
    pub fn as_model<T: DeserializeOwned>(&self) -> ApplicationResult<T> {
        Ok(self.response.deserialize()?)
    }

    /// Reads the value at `path` as `T`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Extraction`] if the field is absent, or
    /// [`DomainError::Deserialization`] on a shape mismatch.
    pub fn field<T: DeserializeOwned>(&self, path: &str) -> ApplicationResult<T> {
        Ok(self.response.json_field_as(path)?)
    }

    /// Borrows the raw response.
    #[must_use]
    pub const fn as_response(&self) -> &ResponseSpec {
        &self.response
    }

    /// Releases the raw response, ending the chain.
    #[must_use]
    pub fn into_response(self) -> ResponseSpec {
        self.response
    }

    /// Every result recorded so far, in evaluation order.
    #[must_use]
    pub fn results(&self) -> &[ConditionResult] {
        &self.results
    }

    /// Summarizes the recorded results.
    #[must_use]
    pub fn report(&self, name: impl Into<String>) -> VerificationReport {
        let duration_ms = u64::try_from(self.response.duration().as_millis()).unwrap_or(u64::MAX);
        VerificationReport::new(
            name,
            self.response.status_code(),
            duration_ms,
            self.results.clone(),
        )
    }

    fn record<C: Condition + ?Sized>(&mut self, condition: &C) -> bool {
        let result = condition.evaluate(&self.response);
        debug!(
            condition = %result.description,
            passed = result.passed,
            message = %result.message,
            "Condition evaluated"
        );
        let passed = result.passed;
        self.results.push(result);
        passed
    }

    fn into_failure(self, from: usize) -> ApplicationError {
        DomainError::Assertion(AssertionFailure::from_history(self.results, from)).into()
    }
}

impl From<ResponseSpec> for AssertableResponse {
    fn from(response: ResponseSpec) -> Self {
        Self::new(response)
    }
}
