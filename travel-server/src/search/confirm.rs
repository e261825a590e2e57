//! Route details for booking confirmations.

use std::sync::Arc;

use crate::domain::{RouteId, RouteWithDetails};
use crate::store::TravelStore;

use super::engine::join_route;
use super::error::SearchError;

/// Assembles the details of a single route for a confirmation message.
///
/// Unlike search results, assembled routes carry no tags and no distance.
pub struct ConfirmationAssembler<S> {
    store: Arc<S>,
}

impl<S> Clone for ConfirmationAssembler<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: TravelStore> ConfirmationAssembler<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Look up `id` and join its cities and mode.
    ///
    /// Returns `Ok(None)` for an unknown route. A known route whose city or
    /// mode is missing yields [`SearchError::Integrity`].
    pub async fn assemble(&self, id: RouteId) -> Result<Option<RouteWithDetails>, SearchError> {
        let Some(route) = self.store.route_by_id(id).await? else {
            return Ok(None);
        };

        join_route(self.store.as_ref(), route).await.map(Some)
    }
}
