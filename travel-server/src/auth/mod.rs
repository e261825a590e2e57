//! Authentication for the confirmation endpoint.
//!
//! Users register and log in with a username and password; a successful
//! login yields an opaque bearer token backed by an expiring session.

mod error;
mod session;
mod users;

pub use error::AuthError;
pub use session::{SessionStore, SessionUser};
pub use users::{UserProfile, UserRegistry};
