//! Registered users with hashed passwords.

use std::collections::HashMap;

use argon2::Argon2;
use argon2::password_hash::{
    self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
};
use serde::Serialize;
use tokio::sync::RwLock;

use super::error::AuthError;

/// Public view of a registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    pub id: u32,
    pub username: String,
    pub name: String,
}

#[derive(Debug)]
struct StoredUser {
    profile: UserProfile,
    password_hash: String,
}

/// Thread-safe in-memory user registry.
///
/// Passwords are stored as argon2 hashes. Hashing runs on the blocking
/// thread pool.
#[derive(Debug, Default)]
pub struct UserRegistry {
    users: RwLock<HashMap<String, StoredUser>>,
}

impl UserRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new user.
    ///
    /// Usernames are case-sensitive and must be unique.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        name: &str,
    ) -> Result<UserProfile, AuthError> {
        if self.users.read().await.contains_key(username) {
            return Err(AuthError::UsernameTaken(username.to_string()));
        }

        let password = password.to_string();
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| AuthError::Hash(e.to_string()))??;

        let mut users = self.users.write().await;
        // Checked again: another registration may have won the race while hashing.
        if users.contains_key(username) {
            return Err(AuthError::UsernameTaken(username.to_string()));
        }

        let profile = UserProfile {
            id: u32::try_from(users.len()).map_or(u32::MAX, |n| n.saturating_add(1)),
            username: username.to_string(),
            name: name.to_string(),
        };
        users.insert(
            username.to_string(),
            StoredUser {
                profile: profile.clone(),
                password_hash,
            },
        );

        tracing::info!(username, "registered user");
        Ok(profile)
    }

    /// Check a username and password.
    ///
    /// Returns `Ok(None)` for an unknown user or a wrong password.
    pub async fn verify(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<UserProfile>, AuthError> {
        let (profile, password_hash) = {
            let users = self.users.read().await;
            match users.get(username) {
                Some(user) => (user.profile.clone(), user.password_hash.clone()),
                None => return Ok(None),
            }
        };

        let password = password.to_string();
        let matches =
            tokio::task::spawn_blocking(move || verify_password(&password, &password_hash))
                .await
                .map_err(|e| AuthError::Hash(e.to_string()))??;

        Ok(matches.then_some(profile))
    }
}

fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Hash(e.to_string()))
}

fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(hash).map_err(|e| AuthError::Hash(e.to_string()))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AuthError::Hash(e.to_string())),
    }
}
