//! Web layer for the travel route planner.
//!
//! Provides JSON endpoints for reference data, route search, login and
//! booking confirmation.

mod dto;
mod error;
mod extract;
mod routes;
mod state;

pub use dto::*;
pub use error::AppError;
pub use extract::{AuthUser, bearer_token};
pub use routes::create_router;
pub use state::AppState;
