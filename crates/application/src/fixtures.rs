//! Fixtures handed to scenarios.
//!
//! A fixture is a named factory: the scenario asks for it by type and
//! calls [`FixtureProvider::provide`] before using the value.

use restcheck_domain::{
    has_status_code,
    models::FullUser,
    settings::{AdminCredentials, Settings},
};
use tracing::debug;

use crate::error::ApplicationResult;
use crate::ports::HttpClient;
use crate::services::UserService;
use crate::test_data;

/// A named factory of test inputs.
pub trait FixtureProvider {
    /// The value supplied to the scenario.
    type Output;

    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// Builds a fresh value.
    fn provide(&self) -> Self::Output;
}

/// The privileged base account of the user API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminUser {
    credentials: AdminCredentials,
}

impl AdminUser {
    /// Creates the fixture from explicit credentials.
    #[must_use]
    pub const fn new(credentials: AdminCredentials) -> Self {
        Self { credentials }
    }

    /// Creates the fixture from the `admin` settings section.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.admin.clone())
    }
}

impl FixtureProvider for AdminUser {
    type Output = FullUser;

    fn name(&self) -> &'static str {
        "admin user"
    }

    fn provide(&self) -> FullUser {
        FullUser::new(&self.credentials.login, &self.credentials.password)
    }
}

/// A freshly generated, unregistered user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RandomUser {
    with_games: bool,
}

impl RandomUser {
    /// Users without games.
    #[must_use]
    pub const fn new() -> Self {
        Self { with_games: false }
    }

    /// Users owning some games.
    #[must_use]
    pub const fn with_games() -> Self {
        Self { with_games: true }
    }
}

impl FixtureProvider for RandomUser {
    type Output = FullUser;

    fn name(&self) -> &'static str {
        if self.with_games {
            "random user with games"
        } else {
            "random user"
        }
    }

    fn provide(&self) -> FullUser {
        if self.with_games {
            test_data::random_user_with_games()
        } else {
            test_data::random_user()
        }
    }
}

/// A user together with a valid bearer token.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticatedUser {
    /// The logged-in user.
    pub user: FullUser,
    /// Token from `/login`.
    pub token: String,
}

/// Logs `user` in and pairs it with the returned token.
///
/// # Errors
///
/// Returns an assertion failure if login does not answer 200, or an
/// extraction error if no token comes back.
pub async fn authenticated<C: HttpClient>(
    users: &UserService<C>,
    user: FullUser,
) -> ApplicationResult<AuthenticatedUser> {
    let token = users
        .auth(&user)
        .await?
        .should(has_status_code(200))?
        .as_jwt()?;
    debug!(login = %user.login, "Authenticated fixture user");
    Ok(AuthenticatedUser { user, token })
}
