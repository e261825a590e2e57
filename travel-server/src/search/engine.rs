//! The route search engine.

use std::sync::Arc;

use futures::future::try_join_all;

use crate::domain::{Preference, Route, RouteWithDetails};
use crate::geo::distance_km;
use crate::store::TravelStore;

use super::error::{IntegrityError, SearchError};
use super::rank::rank_routes;
use super::tags::tags_for;

/// Searches direct routes between two named cities.
///
/// The engine only reads from the store, so one instance can serve any
/// number of concurrent searches.
pub struct RouteSearch<S> {
    store: Arc<S>,
}

impl<S> Clone for RouteSearch<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: TravelStore> RouteSearch<S> {
    /// Create an engine reading from `store`.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Find routes from `origin` to `destination`, best first for
    /// `preference`.
    ///
    /// City names match case-insensitively. If either name is unknown the
    /// result is empty. Every returned route carries the same `distance`:
    /// the straight-line distance between the two cities, in whole
    /// kilometres.
    ///
    /// Dropping the returned future abandons any outstanding lookups.
    pub async fn search(
        &self,
        origin: &str,
        destination: &str,
        preference: Preference,
    ) -> Result<Vec<RouteWithDetails>, SearchError> {
        let (origin_city, destination_city) = futures::try_join!(
            self.store.city_by_name(origin),
            self.store.city_by_name(destination)
        )?;

        let (Some(origin_city), Some(destination_city)) = (origin_city, destination_city) else {
            tracing::debug!(origin, destination, "unresolved city name, no routes");
            return Ok(Vec::new());
        };

        let distance = distance_km(origin_city.coordinates(), destination_city.coordinates());

        let candidates = self
            .store
            .routes_between(origin_city.id, destination_city.id)
            .await?;

        // One independent join per candidate; try_join_all keeps input order.
        let mut results = try_join_all(candidates.into_iter().map(|route| async move {
            let mut details = join_route(self.store.as_ref(), route).await?;
            details.tags = tags_for(&details.transport_mode.name, details.route.price);
            details.distance = Some(distance);
            Ok::<_, SearchError>(details)
        }))
        .await?;

        rank_routes(&mut results, preference);

        tracing::debug!(
            origin = %origin_city.name,
            destination = %destination_city.name,
            %preference,
            distance,
            results = results.len(),
            "route search complete"
        );

        Ok(results)
    }
}

/// Join a route with its cities and transport mode.
///
/// The result has no tags and no distance. A missing city or mode is an
/// integrity failure and is logged as such.
pub(super) async fn join_route<S: TravelStore>(
    store: &S,
    route: Route,
) -> Result<RouteWithDetails, SearchError> {
    let (origin_city, destination_city, transport_mode) = futures::try_join!(
        store.city_by_id(route.origin_city_id),
        store.city_by_id(route.destination_city_id),
        store.mode_by_id(route.transport_mode_id)
    )?;

    let origin_city = origin_city.ok_or_else(|| {
        integrity_failure(IntegrityError::MissingCity {
            route: route.id,
            city: route.origin_city_id,
        })
    })?;
    let destination_city = destination_city.ok_or_else(|| {
        integrity_failure(IntegrityError::MissingCity {
            route: route.id,
            city: route.destination_city_id,
        })
    })?;
    let transport_mode = transport_mode.ok_or_else(|| {
        integrity_failure(IntegrityError::MissingMode {
            route: route.id,
            mode: route.transport_mode_id,
        })
    })?;

    Ok(RouteWithDetails {
        route,
        origin_city,
        destination_city,
        transport_mode,
        tags: Vec::new(),
        distance: None,
    })
}

fn integrity_failure(err: IntegrityError) -> SearchError {
    tracing::error!(error = %err, "reference data integrity violation");
    SearchError::Integrity(err)
}
