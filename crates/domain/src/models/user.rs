//! User-management API models.

use serde::{Deserialize, Serialize};

/// A registered user, as sent to `/signup` and returned by `/user`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FullUser {
    /// Server-assigned identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Login name.
    pub login: String,
    /// Password; `None` serializes as `null` to exercise validation.
    pub pass: Option<String>,
    /// Games owned by the user.
    #[serde(default)]
    pub games: Vec<Game>,
}

impl FullUser {
    /// Creates a user with no games.
    #[must_use]
    pub fn new(login: impl Into<String>, pass: impl Into<String>) -> Self {
        Self {
            id: None,
            login: login.into(),
            pass: Some(pass.into()),
            games: Vec::new(),
        }
    }

    /// Credentials for `/login`.
    #[must_use]
    pub fn credentials(&self) -> JwtAuthData {
        JwtAuthData {
            username: self.login.clone(),
            password: self.pass.clone().unwrap_or_default(),
        }
    }
}

/// Login request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtAuthData {
    /// Login name.
    pub username: String,
    /// Password.
    pub password: String,
}

/// Status block carried by most user API responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Info {
    /// `success` or `fail`.
    pub status: String,
    /// Human-readable outcome.
    pub message: String,
}

/// Body of `PUT /user`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordChange {
    /// The new password.
    pub password: String,
}

/// A game in a user's library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_id: Option<i64>,
    pub title: String,
    pub genre: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(rename = "publish_date", default)]
    pub publish_date: String,
    pub rating: i32,
    pub required_age: bool,
    pub is_free: bool,
    pub has_dlcs: bool,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub dlcs: Vec<Dlc>,
    #[serde(default)]
    pub requirements: Requirements,
}

/// Downloadable content for a game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Dlc {
    pub dlc_name: String,
    pub is_dlc_free: bool,
    pub price: f64,
    pub rating: i32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub similar_dlc: SimilarDlc,
}

/// Cross-reference to a DLC of another game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SimilarDlc {
    pub dlc_name_from_another_game: String,
    pub is_free: bool,
}

/// Minimum system requirements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Requirements {
    pub os_name: String,
    pub ram_gb: i32,
    pub hard_drive: i32,
    pub video_card: String,
}
