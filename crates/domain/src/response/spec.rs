//! Response specification type
//!
//! Contains the immutable snapshot of an HTTP response with typed
//! accessors for status, headers, JSON fields and typed body views.

use std::collections::HashMap;
use std::sync::OnceLock;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::json_path;
use crate::error::{DomainError, DomainResult};

/// HTTP status code with semantic helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusCode(pub u16);

impl StatusCode {
    /// Creates a new `StatusCode`.
    #[must_use]
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Returns the numeric status code.
    #[must_use]
    pub const fn as_u16(&self) -> u16 {
        self.0
    }

    /// Returns true if this is a 2xx success status.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.0 >= 200 && self.0 < 300
    }

    /// Returns true if this is a 4xx client error status.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.0 >= 400 && self.0 < 500
    }

    /// Returns true if this is a 5xx server error status.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.0 >= 500 && self.0 < 600
    }

    /// Returns the canonical reason phrase for common status codes.
    #[must_use]
    pub const fn reason_phrase(&self) -> &'static str {
        match self.0 {
            200 => "OK",
            201 => "Created",
            202 => "Accepted",
            204 => "No Content",
            301 => "Moved Permanently",
            302 => "Found",
            304 => "Not Modified",
            400 => "Bad Request",
            401 => "Unauthorized",
            403 => "Forbidden",
            404 => "Not Found",
            405 => "Method Not Allowed",
            409 => "Conflict",
            422 => "Unprocessable Entity",
            429 => "Too Many Requests",
            500 => "Internal Server Error",
            502 => "Bad Gateway",
            503 => "Service Unavailable",
            504 => "Gateway Timeout",
            _ => "Unknown",
        }
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.0, self.reason_phrase())
    }
}

impl From<u16> for StatusCode {
    fn from(code: u16) -> Self {
        Self(code)
    }
}

/// Immutable snapshot of an HTTP response.
///
/// Every accessor derives from the data captured at construction. The JSON
/// view is parsed on first use and cached, so repeated lookups never
/// re-read the body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponseSpec {
    status: u16,
    status_text: String,
    #[serde(default)]
    headers: HashMap<String, String>,
    body: String,
    #[serde(default)]
    body_bytes: Vec<u8>,
    #[serde(with = "duration_millis")]
    duration: Duration,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content_type: Option<String>,
    #[serde(skip)]
    json: OnceLock<Result<Value, String>>,
}

impl ResponseSpec {
    /// Creates a new `ResponseSpec` from raw response data.
    #[must_use]
    pub fn new(
        status: impl Into<StatusCode>,
        headers: HashMap<String, String>,
        body: Vec<u8>,
        duration: Duration,
    ) -> Self {
        let status_code = status.into();
        let content_type = headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("content-type"))
            .map(|(_, v)| v.clone());

        Self {
            status: status_code.as_u16(),
            status_text: status_code.reason_phrase().to_string(),
            headers,
            body: String::from_utf8_lossy(&body).into_owned(),
            body_bytes: body,
            duration,
            content_type,
            json: OnceLock::new(),
        }
    }

    /// Creates a response with a JSON body and matching content type.
    #[must_use]
    pub fn json_response(status: u16, body: &Value) -> Self {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Self::new(status, headers, body.to_string().into_bytes(), Duration::ZERO)
    }

    /// Returns the numeric status code.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        self.status
    }

    /// Returns the status as a `StatusCode` struct.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        StatusCode::new(self.status)
    }

    /// Returns the reason phrase captured with the status.
    #[must_use]
    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    /// Returns true if the status code indicates success (2xx).
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status().is_success()
    }

    /// Returns true if the status code indicates a client error (4xx).
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.status().is_client_error()
    }

    /// Returns true if the status code indicates a server error (5xx).
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.status().is_server_error()
    }

    /// Gets a header value by name (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns all response headers.
    #[must_use]
    pub const fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Returns the Content-Type header, if any.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Returns the body as text; invalid UTF-8 is replaced.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the raw body bytes.
    #[must_use]
    pub fn body_bytes(&self) -> &[u8] {
        &self.body_bytes
    }

    /// Returns the body size in bytes.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn size(&self) -> usize {
        self.body_bytes.len()
    }

    /// Returns the response time.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.duration
    }

    /// Returns true if the content type indicates JSON.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.content_type
            .as_ref()
            .is_some_and(|ct| ct.contains("application/json") || ct.contains("+json"))
    }

    /// Returns the parsed JSON body.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Deserialization` if the body is not valid JSON.
    pub fn json(&self) -> DomainResult<&Value> {
        let source = if self.body_bytes.is_empty() {
            self.body.as_bytes()
        } else {
            self.body_bytes.as_slice()
        };
        self.json
            .get_or_init(|| serde_json::from_slice(source).map_err(|e| e.to_string()))
            .as_ref()
            .map_err(|message| DomainError::Deserialization {
                target: "JSON document".to_string(),
                message: message.clone(),
            })
    }

    /// Looks up a field in the JSON body.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Deserialization` if the body is not JSON and
    /// `DomainError::InvalidJsonPath` if the path is malformed.
    pub fn json_field(&self, path: &str) -> DomainResult<Option<&Value>> {
        json_path::lookup(self.json()?, path)
    }

    /// Looks up a field and converts it to `T`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Extraction` if the field is absent and
    /// `DomainError::Deserialization` if it has the wrong shape.
    pub fn json_field_as<T: DeserializeOwned>(&self, path: &str) -> DomainResult<T> {
        let value = self
            .json_field(path)?
            .ok_or_else(|| DomainError::extraction(path))?;
        T::deserialize(value).map_err(DomainError::deserialization::<T>)
    }

    /// Deserializes the whole body as `T`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Deserialization` on invalid JSON, a missing
    /// required field or a type mismatch.
    pub fn deserialize<T: DeserializeOwned>(&self) -> DomainResult<T> {
        T::deserialize(self.json()?).map_err(DomainError::deserialization::<T>)
    }
}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    #[allow(clippy::cast_possible_truncation)]
    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Info {
        status: String,
        message: String,
    }

    #[test]
    fn test_status_code_display() {
        assert_eq!(StatusCode::new(201).to_string(), "201 Created");
        assert_eq!(StatusCode::new(401).to_string(), "401 Unauthorized");
        assert!(StatusCode::new(404).is_client_error());
        assert!(StatusCode::new(503).is_server_error());
    }

    #[test]
    fn test_response_new() {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());

        let response = ResponseSpec::new(
            200,
            headers,
            b"Hello, World!".to_vec(),
            Duration::from_millis(100),
        );

        assert_eq!(response.status_code(), 200);
        assert_eq!(response.status_text(), "OK");
        assert_eq!(response.body(), "Hello, World!");
        assert_eq!(response.size(), 13);
        assert!(response.is_json());
        assert!(response.is_success());
    }

    #[test]
    fn test_header_is_case_insensitive() {
        let mut headers = HashMap::new();
        headers.insert("X-Request-Id".to_string(), "abc".to_string());
        let response = ResponseSpec::new(200, headers, vec![], Duration::ZERO);

        assert_eq!(response.header("x-request-id"), Some("abc"));
        assert_eq!(response.header("X-REQUEST-ID"), Some("abc"));
        assert_eq!(response.header("Missing"), None);
    }

    #[test]
    fn test_json_field() {
        let response = ResponseSpec::json_response(
            201,
            &json!({"info": {"status": "success", "message": "User created"}}),
        );

        assert_eq!(
            response.json_field("info.message").unwrap(),
            Some(&json!("User created"))
        );
        assert_eq!(response.json_field("info.missing").unwrap(), None);
    }

    #[test]
    fn test_json_field_on_non_json_body() {
        let response = ResponseSpec::new(500, HashMap::new(), b"<html>".to_vec(), Duration::ZERO);

        assert!(matches!(
            response.json_field("info"),
            Err(DomainError::Deserialization { .. })
        ));
    }

    #[test]
    fn test_json_field_as() {
        let response = ResponseSpec::json_response(
            200,
            &json!({"info": {"status": "success", "message": "ok"}}),
        );

        let info: Info = response.json_field_as("info").unwrap();
        assert_eq!(
            info,
            Info {
                status: "success".to_string(),
                message: "ok".to_string(),
            }
        );

        let missing = response.json_field_as::<Info>("other");
        assert_eq!(missing, Err(DomainError::extraction("other")));

        let wrong = response.json_field_as::<u32>("info.message");
        assert!(matches!(wrong, Err(DomainError::Deserialization { .. })));
    }

    #[test]
    fn test_deserialize_shape_mismatch() {
        let response = ResponseSpec::json_response(200, &json!({"status": "success"}));

        let result = response.deserialize::<Info>();
        match result {
            Err(DomainError::Deserialization { target, message }) => {
                assert!(target.ends_with("Info"));
                assert!(message.contains("message"));
            }
            other => panic!("expected deserialization error, got {other:?}"),
        }
    }

    #[test]
    fn test_json_view_is_cached() {
        let response = ResponseSpec::json_response(200, &json!({"a": 1}));
        let first = response.json().unwrap() as *const Value;
        let second = response.json().unwrap() as *const Value;
        assert_eq!(first, second);
    }
}
