//! User-management API service.

use std::sync::Arc;

use restcheck_domain::{
    RequestSpec,
    models::{FullUser, PasswordChange},
    request::endpoint,
};

use super::send;
use crate::assertable::AssertableResponse;
use crate::error::ApplicationResult;
use crate::ports::HttpClient;

/// Client for the user-management API.
///
/// Every method issues exactly one request and returns the response
/// unverified, whatever its status code.
pub struct UserService<C: HttpClient> {
    client: Arc<C>,
    base_url: String,
}

impl<C: HttpClient> UserService<C> {
    /// Creates a service targeting `base_url`.
    pub fn new(client: Arc<C>, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Base URL the endpoints are joined onto.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Registers a user with `POST /signup`.
    ///
    /// # Errors
    ///
    /// Returns an error if the user cannot be encoded or the request fails.
    pub async fn register_user(&self, user: &FullUser) -> ApplicationResult<AssertableResponse> {
        let request = RequestSpec::post(self.url("signup")).with_json(user)?;
        send(self.client.as_ref(), request).await
    }

    /// Logs in with the user's credentials via `POST /login`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn auth(&self, user: &FullUser) -> ApplicationResult<AssertableResponse> {
        let request = RequestSpec::post(self.url("login")).with_json(&user.credentials())?;
        send(self.client.as_ref(), request).await
    }

    /// Reads the user owning `token` with `GET /user`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_user_info(&self, token: &str) -> ApplicationResult<AssertableResponse> {
        let request = RequestSpec::get(self.url("user")).with_bearer(token);
        send(self.client.as_ref(), request).await
    }

    /// Calls `GET /user` without a token.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_user_info_anonymous(&self) -> ApplicationResult<AssertableResponse> {
        send(self.client.as_ref(), RequestSpec::get(self.url("user"))).await
    }

    /// Changes the password of the user owning `token` with `PUT /user`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn update_user_pass(
        &self,
        new_pass: &str,
        token: &str,
    ) -> ApplicationResult<AssertableResponse> {
        let body = PasswordChange {
            password: new_pass.to_string(),
        };
        let request = RequestSpec::put(self.url("user"))
            .with_bearer(token)
            .with_json(&body)?;
        send(self.client.as_ref(), request).await
    }

    /// Deletes the user owning `token` with `DELETE /user`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn delete_user(&self, token: &str) -> ApplicationResult<AssertableResponse> {
        let request = RequestSpec::delete(self.url("user")).with_bearer(token);
        send(self.client.as_ref(), request).await
    }

    /// Lists every login with `GET /users`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_all_users(&self) -> ApplicationResult<AssertableResponse> {
        send(self.client.as_ref(), RequestSpec::get(self.url("users"))).await
    }

    fn url(&self, path: &str) -> String {
        endpoint(&self.base_url, path)
    }
}
