//! Condition predicates over HTTP responses.
//!
//! A [`Condition`] is a named, stateless check that turns a
//! [`ResponseSpec`] into a [`ConditionResult`]. Conditions are built with
//! the factory functions in this module; any
//! `Fn(&ResponseSpec) -> ConditionResult` closure is a condition too, so
//! new checks are plain functions.

use serde_json::Value;

use crate::response::ResponseSpec;
use crate::testing::{ComparisonOperator, ConditionResult};

/// JSON path of the message field in user API responses.
pub const MESSAGE_PATH: &str = "info.message";

const ABSENT: &str = "<absent>";

/// A named pass/fail check over a response.
pub trait Condition {
    /// Human-readable description, used in reports and failure messages.
    fn description(&self) -> String;

    /// Evaluates the condition against `response`.
    fn evaluate(&self, response: &ResponseSpec) -> ConditionResult;
}

impl<F> Condition for F
where
    F: Fn(&ResponseSpec) -> ConditionResult,
{
    fn description(&self) -> String {
        "custom condition".to_string()
    }

    fn evaluate(&self, response: &ResponseSpec) -> ConditionResult {
        self(response)
    }
}

/// Passes iff the status code equals `expected` exactly.
#[must_use]
pub const fn has_status_code(expected: u16) -> StatusCodeCondition {
    StatusCodeCondition { expected }
}

/// Passes iff `info.message` equals `expected`.
#[must_use]
pub fn has_message(expected: impl Into<String>) -> MessageCondition {
    MessageCondition {
        expected: expected.into(),
    }
}

/// Passes iff the JSON value at `path` equals `expected`.
#[must_use]
pub fn has_json_field(path: impl Into<String>, expected: impl Into<Value>) -> JsonFieldCondition {
    json_field_matches(path, ComparisonOperator::Equals, expected)
}

/// Passes iff the JSON value at `path` compares to `expected` with `operator`.
#[must_use]
pub fn json_field_matches(
    path: impl Into<String>,
    operator: ComparisonOperator,
    expected: impl Into<Value>,
) -> JsonFieldCondition {
    JsonFieldCondition {
        path: path.into(),
        operator,
        expected: expected.into(),
    }
}

/// Passes iff the header exists and equals `value`.
#[must_use]
pub fn has_header(name: impl Into<String>, value: impl Into<String>) -> HeaderCondition {
    HeaderCondition {
        name: name.into(),
        expected: Some(value.into()),
    }
}

/// Passes iff the header exists.
#[must_use]
pub fn header_exists(name: impl Into<String>) -> HeaderCondition {
    HeaderCondition {
        name: name.into(),
        expected: None,
    }
}

/// Passes iff the body text contains `text`.
#[must_use]
pub fn body_contains(text: impl Into<String>) -> BodyContainsCondition {
    BodyContainsCondition { text: text.into() }
}

/// Passes iff the body parses as JSON.
#[must_use]
pub const fn is_json() -> IsJsonCondition {
    IsJsonCondition
}

/// Names an ad hoc check.
#[must_use]
pub fn condition<F>(description: impl Into<String>, check: F) -> NamedCondition<F>
where
    F: Fn(&ResponseSpec) -> bool,
{
    NamedCondition {
        description: description.into(),
        check,
    }
}

/// See [`has_status_code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusCodeCondition {
    expected: u16,
}

impl Condition for StatusCodeCondition {
    fn description(&self) -> String {
        format!("status code = {}", self.expected)
    }

    fn evaluate(&self, response: &ResponseSpec) -> ConditionResult {
        let actual = response.status_code();
        if actual == self.expected {
            ConditionResult::pass_with_value(self.description(), actual.to_string())
                .with_expected(self.expected.to_string())
        } else {
            ConditionResult::mismatch(
                self.description(),
                self.expected.to_string(),
                actual.to_string(),
                format!("expected status {}, got {}", self.expected, response.status()),
            )
        }
    }
}

/// See [`has_message`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageCondition {
    expected: String,
}

impl Condition for MessageCondition {
    fn description(&self) -> String {
        format!("{MESSAGE_PATH} = \"{}\"", self.expected)
    }

    fn evaluate(&self, response: &ResponseSpec) -> ConditionResult {
        let description = self.description();
        let value = match response.json_field(MESSAGE_PATH) {
            Ok(Some(value)) => value,
            Ok(None) => {
                return ConditionResult::mismatch(
                    description,
                    &self.expected,
                    ABSENT,
                    format!("field '{MESSAGE_PATH}' is absent"),
                );
            }
            Err(e) => {
                return ConditionResult::fail(description, e.to_string())
                    .with_expected(&self.expected);
            }
        };

        match value {
            Value::String(actual) if *actual == self.expected => {
                ConditionResult::pass_with_value(description, actual)
                    .with_expected(&self.expected)
            }
            Value::String(actual) => ConditionResult::mismatch(
                description,
                &self.expected,
                actual,
                format!("expected message \"{}\", got \"{actual}\"", self.expected),
            ),
            other => ConditionResult::mismatch(
                description,
                &self.expected,
                other.to_string(),
                format!("expected message \"{}\", got non-string {other}", self.expected),
            ),
        }
    }
}

/// See [`json_field_matches`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFieldCondition {
    path: String,
    operator: ComparisonOperator,
    expected: Value,
}

impl Condition for JsonFieldCondition {
    fn description(&self) -> String {
        format!("JSON {} {} {}", self.path, self.operator.symbol(), self.expected)
    }

    fn evaluate(&self, response: &ResponseSpec) -> ConditionResult {
        let description = self.description();
        let expected = self.expected.to_string();
        match response.json_field(&self.path) {
            Ok(Some(value)) if self.operator.compare(value, &self.expected) => {
                ConditionResult::pass_with_value(description, value.to_string())
                    .with_expected(expected)
            }
            Ok(Some(value)) => ConditionResult::mismatch(
                description,
                expected,
                value.to_string(),
                format!(
                    "JSON path '{}' comparison failed: {} {} {}",
                    self.path,
                    value,
                    self.operator.symbol(),
                    self.expected
                ),
            ),
            Ok(None) => ConditionResult::mismatch(
                description,
                expected,
                ABSENT,
                format!("field '{}' is absent", self.path),
            ),
            Err(e) => ConditionResult::fail(description, e.to_string()).with_expected(expected),
        }
    }
}

/// See [`has_header`] and [`header_exists`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCondition {
    name: String,
    expected: Option<String>,
}

impl Condition for HeaderCondition {
    fn description(&self) -> String {
        match &self.expected {
            Some(value) => format!("header '{}' = '{value}'", self.name),
            None => format!("header '{}' exists", self.name),
        }
    }

    fn evaluate(&self, response: &ResponseSpec) -> ConditionResult {
        let description = self.description();
        match (response.header(&self.name), &self.expected) {
            (None, _) => ConditionResult::fail(description, format!("header '{}' not found", self.name)),
            (Some(actual), None) => ConditionResult::pass_with_value(description, actual),
            (Some(actual), Some(expected)) if actual == expected => {
                ConditionResult::pass_with_value(description, actual).with_expected(expected)
            }
            (Some(actual), Some(expected)) => ConditionResult::mismatch(
                description,
                expected,
                actual,
                format!(
                    "header '{}' value mismatch: expected '{expected}', got '{actual}'",
                    self.name
                ),
            ),
        }
    }
}

/// See [`body_contains`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyContainsCondition {
    text: String,
}

impl Condition for BodyContainsCondition {
    fn description(&self) -> String {
        format!("body contains '{}'", self.text)
    }

    fn evaluate(&self, response: &ResponseSpec) -> ConditionResult {
        let body = response.body();
        if body.contains(&self.text) {
            ConditionResult::pass(self.description())
        } else {
            ConditionResult::mismatch(
                self.description(),
                &self.text,
                preview(body),
                format!("body does not contain '{}'", self.text),
            )
        }
    }
}

/// See [`is_json`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IsJsonCondition;

impl Condition for IsJsonCondition {
    fn description(&self) -> String {
        "body is valid JSON".to_string()
    }

    fn evaluate(&self, response: &ResponseSpec) -> ConditionResult {
        match response.json() {
            Ok(_) => ConditionResult::pass(self.description()),
            Err(e) => ConditionResult::fail(self.description(), e.to_string()),
        }
    }
}

/// See [`condition`].
pub struct NamedCondition<F> {
    description: String,
    check: F,
}

impl<F> Condition for NamedCondition<F>
where
    F: Fn(&ResponseSpec) -> bool,
{
    fn description(&self) -> String {
        self.description.clone()
    }

    fn evaluate(&self, response: &ResponseSpec) -> ConditionResult {
        if (self.check)(response) {
            ConditionResult::pass(&self.description)
        } else {
            ConditionResult::fail(&self.description, format!("'{}' did not hold", self.description))
        }
    }
}

fn preview(body: &str) -> String {
    const LIMIT: usize = 100;
    match body.char_indices().nth(LIMIT) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::collections::HashMap;
    use std::time::Duration;

    fn text_response(status: u16, body: &str) -> ResponseSpec {
        ResponseSpec::new(status, HashMap::new(), body.as_bytes().to_vec(), Duration::ZERO)
    }

    #[test]
    fn test_status_code_exact() {
        let response = text_response(201, "");

        assert!(has_status_code(201).evaluate(&response).passed);

        let result = has_status_code(200).evaluate(&response);
        assert!(!result.passed);
        assert_eq!(result.expected.as_deref(), Some("200"));
        assert_eq!(result.actual.as_deref(), Some("201"));
        assert_eq!(result.message, "expected status 200, got 201 Created");
    }

    #[test]
    fn test_status_code_has_no_range_matching() {
        let response = text_response(204, "");
        assert!(!has_status_code(200).evaluate(&response).passed);
        assert!(!has_status_code(299).evaluate(&response).passed);
    }

    #[test]
    fn test_has_message() {
        let response = ResponseSpec::json_response(
            201,
            &json!({"info": {"status": "success", "message": "User created"}}),
        );

        assert!(has_message("User created").evaluate(&response).passed);

        let result = has_message("Login already exist").evaluate(&response);
        assert!(!result.passed);
        assert_eq!(result.actual.as_deref(), Some("User created"));
        assert!(result.message.contains("Login already exist"));
    }

    #[test]
    fn test_has_message_absent_field() {
        let response = ResponseSpec::json_response(401, &json!({}));

        let result = has_message("x").evaluate(&response);
        assert!(!result.passed);
        assert_eq!(result.message, "field 'info.message' is absent");
        assert_eq!(result.actual.as_deref(), Some(ABSENT));
    }

    #[test]
    fn test_has_message_non_json_body() {
        let response = text_response(502, "Bad Gateway");

        let result = has_message("x").evaluate(&response);
        assert!(!result.passed);
        assert!(result.message.starts_with("cannot deserialize response body"));
    }

    #[test]
    fn test_has_message_non_string_value() {
        let response = ResponseSpec::json_response(200, &json!({"info": {"message": 42}}));
        let result = has_message("42").evaluate(&response);
        assert!(!result.passed);
        assert!(result.message.contains("non-string"));
    }

    #[test]
    fn test_json_field_conditions() {
        let response = ResponseSpec::json_response(200, &json!({"id": 11, "name": {"firstname": "Thomas"}}));

        assert!(has_json_field("id", 11).evaluate(&response).passed);
        assert!(has_json_field("name.firstname", "Thomas").evaluate(&response).passed);
        assert!(
            json_field_matches("id", ComparisonOperator::GreaterThan, 10)
                .evaluate(&response)
                .passed
        );

        let result = has_json_field("missing", 1).evaluate(&response);
        assert!(!result.passed);
        assert_eq!(result.message, "field 'missing' is absent");
    }

    #[test]
    fn test_json_field_equality_ignores_number_representation() {
        let response = ResponseSpec::json_response(200, &json!({"price": 10.0}));

        assert!(has_json_field("price", 10).evaluate(&response).passed);
        assert!(
            json_field_matches("price", ComparisonOperator::GreaterThan, 9)
                .evaluate(&response)
                .passed
        );
        assert!(
            !json_field_matches("price", ComparisonOperator::NotEquals, 10)
                .evaluate(&response)
                .passed
        );
        assert!(!has_json_field("price", 10.5).evaluate(&response).passed);
    }

    #[test]
    fn test_header_conditions() {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        let response = ResponseSpec::new(200, headers, b"{}".to_vec(), Duration::ZERO);

        assert!(header_exists("content-type").evaluate(&response).passed);
        assert!(has_header("CONTENT-TYPE", "application/json").evaluate(&response).passed);
        assert!(!has_header("Content-Type", "text/plain").evaluate(&response).passed);
        assert!(!header_exists("X-Missing").evaluate(&response).passed);
    }

    #[test]
    fn test_body_conditions() {
        let response = text_response(200, "Hello World!");
        assert!(body_contains("World").evaluate(&response).passed);
        assert!(!body_contains("world").evaluate(&response).passed);
        assert!(!is_json().evaluate(&response).passed);
        assert!(is_json().evaluate(&text_response(200, "[]")).passed);
    }

    #[test]
    fn test_closures_are_conditions() {
        let response = text_response(200, "");
        let closure = |r: &ResponseSpec| {
            if r.is_success() {
                ConditionResult::pass("is success")
            } else {
                ConditionResult::fail("is success", "not a 2xx")
            }
        };
        assert!(closure.evaluate(&response).passed);

        let named = condition("empty body", |r: &ResponseSpec| r.body().is_empty());
        assert_eq!(named.description(), "empty body");
        assert!(named.evaluate(&response).passed);
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        let long = "é".repeat(150);
        let shown = preview(&long);
        assert!(shown.ends_with("..."));
        assert_eq!(shown.chars().count(), 103);
    }
}
