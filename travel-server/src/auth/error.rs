//! Authentication error types.

/// Errors from user registration and login.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Another user already has this username
    #[error("username '{0}' is already taken")]
    UsernameTaken(String),

    /// Password hashing or verification failed internally
    #[error("password hashing failed: {0}")]
    Hash(String),
}
