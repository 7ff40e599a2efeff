//! Restcheck Domain - Core types
//!
//! This crate defines the request and response model, the condition
//! predicates evaluated against responses, and the payload models of the
//! APIs under test. All types here are pure Rust with no I/O dependencies.

pub mod condition;
pub mod error;
pub mod models;
pub mod request;
pub mod response;
pub mod settings;
pub mod testing;

pub use condition::{
    Condition, body_contains, condition, has_header, has_json_field, has_message,
    has_status_code, header_exists, is_json, json_field_matches,
};
pub use error::{DomainError, DomainResult};
pub use request::{HttpMethod, RequestSpec};
pub use response::{ResponseSpec, StatusCode};
pub use settings::Settings;
pub use testing::{AssertionFailure, ComparisonOperator, ConditionResult, VerificationReport};
