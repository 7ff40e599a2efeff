//! Settings loading.
//!
//! Sources are layered, later ones winning:
//! 1. Built-in defaults of [`Settings`]
//! 2. A TOML file (`restcheck.toml` unless told otherwise)
//! 3. `RESTCHECK__*` environment variables, `__` separating sections,
//!    e.g. `RESTCHECK__USER_API__BASE_URL`

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use restcheck_application::ApplicationError;
use restcheck_domain::Settings;
use tracing::debug;

/// Settings file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "restcheck.toml";

/// Prefix of settings environment variables.
pub const ENV_PREFIX: &str = "RESTCHECK";

const ENV_SEPARATOR: &str = "__";

/// Errors raised while loading settings.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required settings file does not exist.
    #[error("settings file not found: {0}")]
    NotFound(PathBuf),

    /// A source could not be read or merged.
    #[error("failed to load settings: {0}")]
    Load(#[from] config::ConfigError),
}

impl From<ConfigError> for ApplicationError {
    fn from(error: ConfigError) -> Self {
        Self::Config(error.to_string())
    }
}

/// Builder for the layered settings sources.
#[derive(Debug, Clone)]
pub struct SettingsLoader {
    file: PathBuf,
    required: bool,
    env: Option<HashMap<String, String>>,
}

impl Default for SettingsLoader {
    fn default() -> Self {
        Self {
            file: PathBuf::from(DEFAULT_CONFIG_FILE),
            required: false,
            env: None,
        }
    }
}

impl SettingsLoader {
    /// Loader reading the optional default file and the process environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads `path` instead of the default file and requires it to exist.
    #[must_use]
    pub fn file(mut self, path: impl AsRef<Path>) -> Self {
        self.file = path.as_ref().to_path_buf();
        self.required = true;
        self
    }

    /// Reads environment variables from `vars` instead of the process.
    #[must_use]
    pub fn env_vars(mut self, vars: HashMap<String, String>) -> Self {
        self.env = Some(vars);
        self
    }

    /// Merges the sources into [`Settings`].
    ///
    /// # Errors
    ///
    /// Returns an error if a required file is missing, a source cannot be
    /// parsed, or a value has the wrong type.
    pub fn load(self) -> Result<Settings, ConfigError> {
        if self.required && !self.file.is_file() {
            return Err(ConfigError::NotFound(self.file));
        }

        let environment = Environment::with_prefix(ENV_PREFIX)
            .separator(ENV_SEPARATOR)
            .try_parsing(true)
            .source(self.env);

        let settings: Settings = Config::builder()
            .add_source(
                File::from(self.file.as_path())
                    .format(FileFormat::Toml)
                    .required(self.required),
            )
            .add_source(environment)
            .build()?
            .try_deserialize()?;

        debug!(
            user_api = %settings.user_api.base_url,
            store_api = %settings.store_api.base_url,
            "Settings loaded"
        );
        Ok(settings)
    }
}

/// Loads settings from `restcheck.toml` (if present) and the environment.
///
/// # Errors
///
/// Returns an error if a source cannot be parsed.
pub fn load_settings() -> Result<Settings, ConfigError> {
    SettingsLoader::new().load()
}

/// Loads settings from the file at `path` and the environment.
///
/// # Errors
///
/// Returns an error if the file is missing or a source cannot be parsed.
pub fn load_settings_from(path: impl AsRef<Path>) -> Result<Settings, ConfigError> {
    SettingsLoader::new().file(path).load()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn no_env() -> HashMap<String, String> {
        HashMap::new()
    }

    #[test]
    fn test_defaults_without_sources() {
        let settings = SettingsLoader::new().env_vars(no_env()).load().unwrap();

        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[user_api]\nbase_url = \"http://127.0.0.1:9000/api\"\n\n[http]\ntimeout_ms = 500"
        )
        .unwrap();

        let settings = SettingsLoader::new()
            .file(file.path())
            .env_vars(no_env())
            .load()
            .unwrap();

        assert_eq!(settings.user_api.base_url, "http://127.0.0.1:9000/api");
        assert_eq!(settings.http.timeout_ms, 500);
        assert_eq!(settings.admin.login, "admin");
    }

    #[test]
    fn test_env_overrides_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[admin]\nlogin = \"from-file\"").unwrap();

        let env = HashMap::from([
            ("RESTCHECK__ADMIN__LOGIN".to_string(), "from-env".to_string()),
            ("RESTCHECK__HTTP__TIMEOUT_MS".to_string(), "1500".to_string()),
        ]);
        let settings = SettingsLoader::new()
            .file(file.path())
            .env_vars(env)
            .load()
            .unwrap();

        assert_eq!(settings.admin.login, "from-env");
        assert_eq!(settings.http.timeout_ms, 1500);
    }

    #[test]
    fn test_missing_required_file() {
        let error = load_settings_from("/nonexistent/restcheck.toml").unwrap_err();
        assert!(matches!(error, ConfigError::NotFound(_)));

        let app: ApplicationError = error.into();
        assert!(matches!(app, ApplicationError::Config(_)));
    }

    #[test]
    fn test_wrong_type_is_rejected() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[http]\ntimeout_ms = \"soon\"").unwrap();

        let result = SettingsLoader::new()
            .file(file.path())
            .env_vars(no_env())
            .load();
        assert!(matches!(result, Err(ConfigError::Load(_))));
    }
}
