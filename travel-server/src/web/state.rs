//! Application state for the web layer.

use std::sync::Arc;
use std::time::Duration;

use crate::auth::{SessionStore, UserRegistry};
use crate::email::Mailer;
use crate::search::{ConfirmationAssembler, RouteSearch};
use crate::store::AnyStore;

/// Upper bound on concurrently live sessions.
const MAX_SESSIONS: u64 = 100_000;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Reference data backend
    pub store: Arc<AnyStore>,

    /// Route search over `store`
    pub search: RouteSearch<AnyStore>,

    /// Confirmation details over `store`
    pub assembler: ConfirmationAssembler<AnyStore>,

    /// Registered users
    pub users: Arc<UserRegistry>,

    /// Live login sessions
    pub sessions: SessionStore,

    /// Outbound confirmation mail
    pub mailer: Mailer,
}

impl AppState {
    /// Create a new app state.
    pub fn new(store: AnyStore, mailer: Mailer, session_ttl: Duration) -> Self {
        let store = Arc::new(store);
        Self {
            search: RouteSearch::new(Arc::clone(&store)),
            assembler: ConfirmationAssembler::new(Arc::clone(&store)),
            store,
            users: Arc::new(UserRegistry::new()),
            sessions: SessionStore::new(session_ttl, MAX_SESSIONS),
            mailer,
        }
    }
}
