//! Verification results and reports.
//!
//! This module provides the types produced when conditions are evaluated
//! against a response: per-condition results, the failure raised when a
//! chain does not hold, and a serializable report of a whole chain.

use std::fmt;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Comparison operators for value conditions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonOperator {
    /// Equal to.
    Equals,
    /// Not equal to.
    NotEquals,
    /// Greater than.
    GreaterThan,
    /// Greater than or equal to.
    GreaterThanOrEqual,
    /// Less than.
    LessThan,
    /// Less than or equal to.
    LessThanOrEqual,
    /// Contains (for strings/arrays).
    Contains,
    /// Matches regex pattern.
    Matches,
}

impl ComparisonOperator {
    /// Get the symbol for this operator.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Equals => "==",
            Self::NotEquals => "!=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
            Self::Contains => "contains",
            Self::Matches => "matches",
        }
    }

    /// Compares two JSON values with this operator.
    ///
    /// Numbers compare by value for every operator, so `10` equals `10.0`.
    /// Ordering operators only apply to numbers; `Matches` expects a string
    /// pattern and an invalid pattern never matches.
    #[must_use]
    pub fn compare(&self, actual: &serde_json::Value, expected: &serde_json::Value) -> bool {
        use serde_json::Value;

        match self {
            Self::Equals => json_eq(actual, expected),
            Self::NotEquals => !json_eq(actual, expected),
            Self::GreaterThan => compare_numeric(actual, expected, |a, b| a > b),
            Self::GreaterThanOrEqual => compare_numeric(actual, expected, |a, b| a >= b),
            Self::LessThan => compare_numeric(actual, expected, |a, b| a < b),
            Self::LessThanOrEqual => compare_numeric(actual, expected, |a, b| a <= b),
            Self::Contains => match (actual, expected) {
                (Value::String(s), Value::String(needle)) => s.contains(needle.as_str()),
                (Value::Array(arr), _) => arr.iter().any(|item| json_eq(item, expected)),
                _ => false,
            },
            Self::Matches => {
                if let (Value::String(s), Value::String(pattern)) = (actual, expected) {
                    Regex::new(pattern).is_ok_and(|re| re.is_match(s))
                } else {
                    false
                }
            }
        }
    }
}

fn json_eq(actual: &serde_json::Value, expected: &serde_json::Value) -> bool {
    match (actual, expected) {
        (serde_json::Value::Number(_), serde_json::Value::Number(_)) => {
            compare_numeric(actual, expected, |a, b| (a - b).abs() < f64::EPSILON)
        }
        _ => actual == expected,
    }
}

fn compare_numeric<F>(actual: &serde_json::Value, expected: &serde_json::Value, cmp: F) -> bool
where
    F: Fn(f64, f64) -> bool,
{
    match (actual.as_f64(), expected.as_f64()) {
        (Some(a), Some(b)) => cmp(a, b),
        _ => false,
    }
}

/// Result of evaluating a single condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionResult {
    /// Human-readable description of the condition.
    pub description: String,
    /// Whether the condition held.
    pub passed: bool,
    /// Expected value (for display).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    /// Actual value found (for display).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
    /// Outcome message; explains the failure when `passed` is false.
    pub message: String,
}

impl ConditionResult {
    /// Create a passed result.
    #[must_use]
    pub fn pass(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            passed: true,
            expected: None,
            actual: None,
            message: "ok".to_string(),
        }
    }

    /// Create a passed result with actual value.
    #[must_use]
    pub fn pass_with_value(description: impl Into<String>, actual: impl Into<String>) -> Self {
        Self {
            actual: Some(actual.into()),
            ..Self::pass(description)
        }
    }

    /// Create a failed result.
    #[must_use]
    pub fn fail(description: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            passed: false,
            expected: None,
            actual: None,
            message: message.into(),
        }
    }

    /// Create a failed result with expected and actual values.
    #[must_use]
    pub fn mismatch(
        description: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            passed: false,
            expected: Some(expected.into()),
            actual: Some(actual.into()),
            message: message.into(),
        }
    }

    /// Sets the expected value for display.
    #[must_use]
    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }
}

/// Raised when a verification chain does not hold.
///
/// `failures` lists the conditions that failed in the step that raised;
/// `evaluated` is every result recorded on the response so far,
/// including passes from earlier steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssertionFailure {
    /// Conditions that failed.
    pub failures: Vec<ConditionResult>,
    /// Every condition evaluated on the response, in order.
    pub evaluated: Vec<ConditionResult>,
}

impl AssertionFailure {
    /// Creates a failure from the full history of results.
    ///
    /// `failures` is taken from `evaluated[from..]`.
    #[must_use]
    pub fn from_history(evaluated: Vec<ConditionResult>, from: usize) -> Self {
        let failures = evaluated
            .iter()
            .skip(from)
            .filter(|r| !r.passed)
            .cloned()
            .collect();
        Self {
            failures,
            evaluated,
        }
    }

    /// Returns the first failed condition.
    #[must_use]
    pub fn first(&self) -> Option<&ConditionResult> {
        self.failures.first()
    }
}

impl fmt::Display for AssertionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.failures.as_slice() {
            [] => write!(f, "assertion failed"),
            [only] => write!(
                f,
                "condition '{}' failed: {} ({} evaluated)",
                only.description,
                only.message,
                self.evaluated.len()
            ),
            many => {
                write!(
                    f,
                    "{} of {} conditions failed:",
                    many.len(),
                    self.evaluated.len()
                )?;
                for failure in many {
                    write!(f, "\n  - '{}': {}", failure.description, failure.message)?;
                }
                Ok(())
            }
        }
    }
}

/// Serializable summary of every condition evaluated on one response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationReport {
    /// Unique identifier.
    pub id: Uuid,
    /// Name of the verified step.
    pub name: String,
    /// When the report was produced.
    pub generated_at: DateTime<Utc>,
    /// Status code of the verified response.
    pub status: u16,
    /// Response time in milliseconds.
    pub duration_ms: u64,
    /// Individual condition results.
    pub results: Vec<ConditionResult>,
    /// Total number of conditions.
    pub total: usize,
    /// Number of passed conditions.
    pub passed: usize,
    /// Number of failed conditions.
    pub failed: usize,
}

impl VerificationReport {
    /// Create a new report.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        status: u16,
        duration_ms: u64,
        results: Vec<ConditionResult>,
    ) -> Self {
        let total = results.len();
        let passed = results.iter().filter(|r| r.passed).count();

        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            generated_at: Utc::now(),
            status,
            duration_ms,
            results,
            total,
            passed,
            failed: total - passed,
        }
    }

    /// Check if all conditions passed.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Get pass rate as percentage.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            (self.passed as f64 / self.total as f64) * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_operator_numeric() {
        assert!(ComparisonOperator::GreaterThan.compare(&json!(10), &json!(5)));
        assert!(!ComparisonOperator::LessThan.compare(&json!(10), &json!(5)));
        assert!(ComparisonOperator::GreaterThanOrEqual.compare(&json!(3), &json!(3.0)));
        assert!(!ComparisonOperator::GreaterThan.compare(&json!("10"), &json!(5)));
    }

    #[test]
    fn test_operator_equality_compares_numbers_by_value() {
        assert!(ComparisonOperator::Equals.compare(&json!(10.0), &json!(10)));
        assert!(ComparisonOperator::Equals.compare(&json!(-3), &json!(-3.0)));
        assert!(!ComparisonOperator::NotEquals.compare(&json!(10.0), &json!(10)));
        assert!(ComparisonOperator::NotEquals.compare(&json!(10.5), &json!(10)));
        assert!(!ComparisonOperator::Equals.compare(&json!("10"), &json!(10)));
        assert!(ComparisonOperator::Contains.compare(&json!([1.0, 2.0]), &json!(2)));
    }

    #[test]
    fn test_operator_contains_and_matches() {
        assert!(ComparisonOperator::Contains.compare(&json!("User created"), &json!("created")));
        assert!(ComparisonOperator::Contains.compare(&json!([1, 2, 3]), &json!(2)));
        assert!(ComparisonOperator::Matches.compare(&json!("45871-5231"), &json!(r"^\d{5}-\d{4}$")));
        assert!(!ComparisonOperator::Matches.compare(&json!("abc"), &json!("(")));
    }

    #[test]
    fn test_failure_display_single() {
        let evaluated = vec![
            ConditionResult::pass("status code = 201"),
            ConditionResult::fail("message = 'x'", "field 'info.message' is absent"),
        ];
        let failure = AssertionFailure::from_history(evaluated, 1);

        assert_eq!(failure.failures.len(), 1);
        assert_eq!(
            failure.to_string(),
            "condition 'message = 'x'' failed: field 'info.message' is absent (2 evaluated)"
        );
    }

    #[test]
    fn test_failure_only_counts_current_step() {
        let evaluated = vec![
            ConditionResult::fail("a", "first"),
            ConditionResult::pass("b"),
            ConditionResult::fail("c", "third"),
        ];
        let failure = AssertionFailure::from_history(evaluated, 1);

        assert_eq!(failure.failures.len(), 1);
        assert_eq!(failure.first().map(|r| r.description.as_str()), Some("c"));
        assert_eq!(failure.evaluated.len(), 3);
    }

    #[test]
    fn test_failure_display_many() {
        let evaluated = vec![
            ConditionResult::fail("a", "first"),
            ConditionResult::fail("b", "second"),
        ];
        let failure = AssertionFailure::from_history(evaluated, 0);
        let text = failure.to_string();

        assert!(text.starts_with("2 of 2 conditions failed:"));
        assert!(text.contains("'a': first"));
        assert!(text.contains("'b': second"));
    }

    #[test]
    fn test_report_counts() {
        let results = vec![
            ConditionResult::pass("status code = 200"),
            ConditionResult::fail("body is JSON", "Invalid JSON"),
        ];

        let report = VerificationReport::new("Suite", 200, 100, results);
        assert_eq!(report.total, 2);
        assert_eq!(report.passed, 1);
        assert_eq!(report.failed, 1);
        assert!(!report.all_passed());
        assert!((report.pass_rate() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_report_passes() {
        let report = VerificationReport::new("Empty", 204, 0, Vec::new());
        assert!(report.all_passed());
        assert!((report.pass_rate() - 100.0).abs() < f64::EPSILON);
    }
}
