//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::auth::{SessionUser, UserProfile};

/// Query string of a route search.
///
/// Every field is optional here so that missing values reach the handler
/// and get the same 400 message as empty ones.
#[derive(Debug, Default, Deserialize)]
pub struct RouteSearchQuery {
    pub origin: Option<String>,
    pub destination: Option<String>,
    /// Travel date; accepted but unused since schedules repeat daily.
    pub date: Option<String>,
    /// One of `time`, `cost`, `comfort`; defaults to `time`.
    pub preference: Option<String>,
}

/// A route id as sent by clients: a JSON number or a numeric string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RouteIdInput {
    Number(i64),
    Text(String),
}

/// Body of `POST /api/routes/confirm`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmRequest {
    pub route_id: Option<RouteIdInput>,
    pub email: Option<String>,
}

/// Body of `POST /api/register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    /// Display name; defaults to the username.
    pub name: Option<String>,
}

/// Body of `POST /api/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// A freshly issued session.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    /// Bearer token for the `Authorization` header
    pub token: String,
    pub user: UserResponse,
}

/// The signed-in user.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: u32,
    pub username: String,
    pub name: String,
}

impl From<&UserProfile> for UserResponse {
    fn from(user: &UserProfile) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            name: user.name.clone(),
        }
    }
}

impl From<&SessionUser> for UserResponse {
    fn from(user: &SessionUser) -> Self {
        Self {
            id: user.user_id,
            username: user.username.clone(),
            name: user.name.clone(),
        }
    }
}

/// A plain status message, optionally with details.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}
