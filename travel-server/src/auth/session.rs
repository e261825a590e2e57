//! Login sessions keyed by bearer token.

use std::time::Duration;

use argon2::password_hash::rand_core::{OsRng, RngCore};
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use moka::future::Cache;
use serde::Serialize;

use super::users::UserProfile;

/// Bytes of randomness in a session token.
const TOKEN_BYTES: usize = 32;

/// The user behind an authenticated request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub user_id: u32,
    pub username: String,
    pub name: String,
    pub logged_in_at: DateTime<Utc>,
}

impl SessionUser {
    /// Name used to greet the user in messages.
    pub fn display_name(&self) -> &str {
        if self.username.is_empty() {
            "Traveler"
        } else {
            &self.username
        }
    }
}

/// Expiring session storage.
///
/// Sessions expire `ttl` after login; expired tokens are indistinguishable
/// from unknown ones.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Cache<String, SessionUser>,
}

impl SessionStore {
    /// Create a store whose sessions live for `ttl`.
    pub fn new(ttl: Duration, max_capacity: u64) -> Self {
        let sessions = Cache::builder()
            .time_to_live(ttl)
            .max_capacity(max_capacity)
            .build();
        Self { sessions }
    }

    /// Start a session for `user` and return its token.
    pub async fn create(&self, user: &UserProfile) -> (String, SessionUser) {
        let token = new_token();
        let session = SessionUser {
            user_id: user.id,
            username: user.username.clone(),
            name: user.name.clone(),
            logged_in_at: Utc::now(),
        };
        self.sessions.insert(token.clone(), session.clone()).await;
        (token, session)
    }

    /// Look up a live session.
    pub async fn get(&self, token: &str) -> Option<SessionUser> {
        self.sessions.get(token).await
    }

    /// End a session. Unknown tokens are ignored.
    pub async fn remove(&self, token: &str) -> Option<SessionUser> {
        self.sessions.remove(token).await
    }
}

fn new_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
