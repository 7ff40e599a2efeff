//! HTTP response model

pub mod json_path;
mod spec;

pub use spec::{ResponseSpec, StatusCode};
