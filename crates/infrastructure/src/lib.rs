//! Restcheck Infrastructure - Adapters and implementations
//!
//! This crate provides the reqwest implementation of the HTTP port,
//! layered settings loading, logging bootstrap and report files.

pub mod adapters;
pub mod config;
pub mod reporting;
pub mod serialization;
pub mod telemetry;

pub use adapters::ReqwestHttpClient;
pub use self::config::{ConfigError, SettingsLoader, load_settings, load_settings_from};
pub use reporting::{ReportError, ReportWriter};
pub use serialization::SerializationError;
pub use telemetry::init_tracing;
