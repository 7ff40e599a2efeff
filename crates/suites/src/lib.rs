//! Restcheck Suites - Scenario tests against the APIs under test
//!
//! The scenarios live in `tests/`. This crate supplies what they share:
//! in-process fakes of both APIs and a [`Suite`] wiring settings,
//! services and reports together.

pub mod exercises;
pub mod mock_api;

use std::path::Path;
use std::sync::Arc;

use restcheck_application::{
    AdminUser, ApplicationResult, FixtureProvider, StoreService, UserService,
};
use restcheck_domain::{Settings, models::FullUser};
use restcheck_infrastructure::{ReportWriter, ReqwestHttpClient, init_tracing, load_settings};

use crate::mock_api::{StoreApiMock, UserApiMock};

/// Services and settings for one scenario, backed by fresh fakes.
pub struct Suite {
    /// Effective settings, with both base URLs pointing at the fakes.
    pub settings: Settings,
    /// User API service.
    pub users: UserService<ReqwestHttpClient>,
    /// Store API service.
    pub store: StoreService<ReqwestHttpClient>,
    /// Report writer for the configured directory.
    pub reports: ReportWriter,
    user_api: UserApiMock,
    _store_api: StoreApiMock,
}

impl Suite {
    /// Loads settings, starts both fakes and builds the services.
    ///
    /// # Errors
    ///
    /// Returns an error if settings cannot be loaded or the HTTP client
    /// cannot be built.
    pub async fn start() -> ApplicationResult<Self> {
        let mut settings = load_settings()?;
        init_tracing(&settings.log.filter);

        let user_api = UserApiMock::start(&settings.admin).await;
        let store_api = StoreApiMock::start().await;
        settings.user_api.base_url = user_api.base_url();
        settings.store_api.base_url = store_api.base_url();

        let client = Arc::new(ReqwestHttpClient::new(&settings.http)?);
        Ok(Self {
            users: UserService::new(Arc::clone(&client), &settings.user_api.base_url),
            store: StoreService::new(client, &settings.store_api.base_url),
            reports: ReportWriter::from_settings(&settings.report),
            settings,
            user_api,
            _store_api: store_api,
        })
    }

    /// Redirects reports to `dir`.
    #[must_use]
    pub fn with_report_dir(mut self, dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        self.settings.report.dir = dir.display().to_string();
        self.reports = ReportWriter::new(dir);
        self
    }

    /// The privileged base account.
    #[must_use]
    pub fn admin(&self) -> FullUser {
        AdminUser::from_settings(&self.settings).provide()
    }

    /// The user API fake.
    #[must_use]
    pub const fn user_api(&self) -> &UserApiMock {
        &self.user_api
    }
}
