//! Fake e-commerce API models.

use serde::{Deserialize, Serialize};

/// A store customer as returned by `/users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct StoreUser {
    #[serde(default)]
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub username: String,
    pub password: String,
    pub name: Name,
    pub address: Address,
    pub phone: String,
}

/// Customer name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Name {
    pub firstname: String,
    pub lastname: String,
}

impl Name {
    /// Creates a name.
    #[must_use]
    pub fn new(firstname: impl Into<String>, lastname: impl Into<String>) -> Self {
        Self {
            firstname: firstname.into(),
            lastname: lastname.into(),
        }
    }
}

/// Postal address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Address {
    pub city: String,
    pub street: String,
    pub number: i64,
    pub zipcode: String,
    pub geolocation: Geolocation,
}

/// Coordinates, sent as strings by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Geolocation {
    pub lat: String,
    pub long: String,
}

impl Geolocation {
    /// Creates a geolocation.
    #[must_use]
    pub fn new(lat: impl Into<String>, long: impl Into<String>) -> Self {
        Self {
            lat: lat.into(),
            long: long.into(),
        }
    }
}

/// `POST /auth/login` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthData {
    pub username: String,
    pub password: String,
}

impl AuthData {
    /// Creates login credentials.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Sort order accepted by `GET /users?sort=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Query-string value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Optional filters for listing store users.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserQuery {
    pub limit: Option<u32>,
    pub sort: Option<SortOrder>,
}

impl UserQuery {
    /// Limits the number of users returned.
    #[must_use]
    pub const fn limit(limit: u32) -> Self {
        Self {
            limit: Some(limit),
            sort: None,
        }
    }

    /// Sorts users by id.
    #[must_use]
    pub const fn sorted(sort: SortOrder) -> Self {
        Self {
            limit: None,
            sort: Some(sort),
        }
    }
}
