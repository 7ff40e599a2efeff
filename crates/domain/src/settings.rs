//! Test run settings.
//!
//! Every field has a default, so an empty configuration source yields a
//! usable `Settings` pointing both APIs at a local instance on port 8080.

use serde::{Deserialize, Serialize};

/// Root settings for a test run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    /// User-management API target.
    pub user_api: ApiTarget,
    /// Fake e-commerce API target.
    pub store_api: ApiTarget,
    /// HTTP client settings.
    pub http: HttpSettings,
    /// Privileged account used by the admin fixture.
    pub admin: AdminCredentials,
    /// Logging settings.
    pub log: LogSettings,
    /// Report output settings.
    pub report: ReportSettings,
}

impl Settings {
    /// Default settings with both APIs pointed at `base_url`.
    #[must_use]
    pub fn for_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            user_api: ApiTarget::new(base_url.clone()),
            store_api: ApiTarget::new(base_url),
            ..Self::default()
        }
    }
}

/// Base URL of one API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiTarget {
    /// Base URL endpoints are joined onto.
    pub base_url: String,
}

impl ApiTarget {
    /// Creates a target.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Default for ApiTarget {
    fn default() -> Self {
        Self::new("http://localhost:8080/api")
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
    /// User-Agent header value.
    pub user_agent: String,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_ms: 30_000,
            user_agent: concat!("restcheck/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Login and password of the privileged account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminCredentials {
    /// Admin login.
    pub login: String,
    /// Admin password.
    pub password: String,
}

impl Default for AdminCredentials {
    fn default() -> Self {
        Self {
            login: "admin".to_string(),
            password: "admin".to_string(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

/// Report output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// Directory verification reports are written to.
    pub dir: String,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            dir: "target/restcheck-reports".to_string(),
        }
    }
}
