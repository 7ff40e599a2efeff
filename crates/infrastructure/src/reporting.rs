//! Verification report files.
//!
//! Each report is written as `<dir>/<slug>.json`, where the slug is the
//! report name lowercased with runs of other characters collapsed to `-`.

use std::path::{Path, PathBuf};

use restcheck_application::ApplicationError;
use restcheck_domain::{VerificationReport, settings::ReportSettings};
use tokio::fs;
use tracing::info;

use crate::serialization::{SerializationError, from_json, to_json_stable};

/// Errors raised while writing or reading reports.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// The report could not be encoded or decoded.
    #[error(transparent)]
    Serialization(#[from] SerializationError),

    /// The report file could not be accessed.
    #[error("report I/O failed for {path}: {source}")]
    Io {
        /// File or directory involved.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
}

impl From<ReportError> for ApplicationError {
    fn from(error: ReportError) -> Self {
        Self::Report(error.to_string())
    }
}

/// Writes verification reports under one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportWriter {
    dir: PathBuf,
}

impl ReportWriter {
    /// Creates a writer for `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Creates a writer for the `report` settings section.
    #[must_use]
    pub fn from_settings(settings: &ReportSettings) -> Self {
        Self::new(&settings.dir)
    }

    /// Directory reports are written to.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File a report named `name` is written to.
    #[must_use]
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.json", slug(name)))
    }

    /// Writes `report`, replacing any earlier report of the same name.
    ///
    /// # Errors
    ///
    /// Returns an error if the report cannot be encoded or written.
    pub async fn write(&self, report: &VerificationReport) -> Result<PathBuf, ReportError> {
        let json = to_json_stable(report)?;
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| ReportError::Io {
                path: self.dir.clone(),
                source,
            })?;

        let path = self.path_for(&report.name);
        fs::write(&path, json)
            .await
            .map_err(|source| ReportError::Io {
                path: path.clone(),
                source,
            })?;

        info!(
            report = %report.name,
            passed = report.passed,
            failed = report.failed,
            path = %path.display(),
            "Report written"
        );
        Ok(path)
    }

    /// Reads back the report named `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or malformed.
    pub async fn read(&self, name: &str) -> Result<VerificationReport, ReportError> {
        let path = self.path_for(name);
        let json = fs::read_to_string(&path)
            .await
            .map_err(|source| ReportError::Io { path, source })?;
        Ok(from_json(&json)?)
    }
}

/// File-name-safe form of a report name.
#[must_use]
pub fn slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let trimmed = slug.trim_end_matches('-');
    if trimmed.is_empty() {
        "report".to_string()
    } else {
        trimmed.to_string()
    }
}
