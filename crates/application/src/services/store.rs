//! Fake e-commerce API service.

use std::sync::Arc;

use restcheck_domain::{
    RequestSpec,
    models::{AuthData, StoreUser, UserQuery},
    request::endpoint,
};

use super::send;
use crate::assertable::AssertableResponse;
use crate::error::ApplicationResult;
use crate::ports::HttpClient;

/// Client for the store API's users and auth endpoints.
pub struct StoreService<C: HttpClient> {
    client: Arc<C>,
    base_url: String,
}

impl<C: HttpClient> StoreService<C> {
    /// Creates a service targeting `base_url`.
    pub fn new(client: Arc<C>, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Lists users with `GET /users`, applying `limit` and `sort` if set.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_all_users(&self, query: UserQuery) -> ApplicationResult<AssertableResponse> {
        let mut request = RequestSpec::get(self.url("users"));
        if let Some(limit) = query.limit {
            request = request.with_query("limit", limit);
        }
        if let Some(sort) = query.sort {
            request = request.with_query("sort", sort.as_str());
        }
        send(self.client.as_ref(), request).await
    }

    /// Reads one user with `GET /users/{id}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_user(&self, id: i64) -> ApplicationResult<AssertableResponse> {
        send(self.client.as_ref(), RequestSpec::get(self.user_url(id))).await
    }

    /// Creates a user with `POST /users`.
    ///
    /// # Errors
    ///
    /// Returns an error if the user cannot be encoded or the request fails.
    pub async fn add_user(&self, user: &StoreUser) -> ApplicationResult<AssertableResponse> {
        let request = RequestSpec::post(self.url("users")).with_json(user)?;
        send(self.client.as_ref(), request).await
    }

    /// Replaces a user with `PUT /users/{id}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the user cannot be encoded or the request fails.
    pub async fn update_user(
        &self,
        id: i64,
        user: &StoreUser,
    ) -> ApplicationResult<AssertableResponse> {
        let request = RequestSpec::put(self.user_url(id)).with_json(user)?;
        send(self.client.as_ref(), request).await
    }

    /// Deletes a user with `DELETE /users/{id}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn delete_user(&self, id: i64) -> ApplicationResult<AssertableResponse> {
        send(self.client.as_ref(), RequestSpec::delete(self.user_url(id))).await
    }

    /// Logs in with `POST /auth/login`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn login(&self, credentials: &AuthData) -> ApplicationResult<AssertableResponse> {
        let request = RequestSpec::post(self.url("auth/login")).with_json(credentials)?;
        send(self.client.as_ref(), request).await
    }

    fn url(&self, path: &str) -> String {
        endpoint(&self.base_url, path)
    }

    fn user_url(&self, id: i64) -> String {
        self.url(&format!("users/{id}"))
    }
}
