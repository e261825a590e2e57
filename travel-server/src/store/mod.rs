//! Data access for cities, transport modes and routes.
//!
//! The search engine depends only on the traits in this module. Two backends
//! implement them: [`MemoryStore`], seeded in-process, and [`PgStore`],
//! backed by PostgreSQL. [`AnyStore`] picks one at startup.

mod error;
pub mod memory;
pub mod postgres;
pub mod seed;

use std::future::Future;

use crate::domain::{
    City, CityId, ModeId, NewCity, NewRoute, NewTransportMode, Route, RouteId, TransportMode,
};

pub use error::StoreError;
pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use seed::{SeedData, SeedError, SeedSummary, apply_seed};

/// Lookup of city records.
pub trait CityDirectory: Send + Sync {
    /// All cities, in a stable order.
    fn list_cities(&self) -> impl Future<Output = Result<Vec<City>, StoreError>> + Send;

    fn city_by_id(
        &self,
        id: CityId,
    ) -> impl Future<Output = Result<Option<City>, StoreError>> + Send;

    /// Case-insensitive exact match on the city name.
    ///
    /// An unknown name is `Ok(None)`; free-text input makes that routine.
    fn city_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<City>, StoreError>> + Send;

    fn insert_city(&self, city: NewCity) -> impl Future<Output = Result<City, StoreError>> + Send;
}

/// Lookup of transport mode records.
pub trait ModeDirectory: Send + Sync {
    fn list_modes(&self) -> impl Future<Output = Result<Vec<TransportMode>, StoreError>> + Send;

    fn mode_by_id(
        &self,
        id: ModeId,
    ) -> impl Future<Output = Result<Option<TransportMode>, StoreError>> + Send;

    fn insert_mode(
        &self,
        mode: NewTransportMode,
    ) -> impl Future<Output = Result<TransportMode, StoreError>> + Send;
}

/// Lookup of route records.
pub trait RouteRepository: Send + Sync {
    /// All routes, in repository iteration order.
    fn list_routes(&self) -> impl Future<Output = Result<Vec<Route>, StoreError>> + Send;

    fn route_by_id(
        &self,
        id: RouteId,
    ) -> impl Future<Output = Result<Option<Route>, StoreError>> + Send;

    fn insert_route(
        &self,
        route: NewRoute,
    ) -> impl Future<Output = Result<Route, StoreError>> + Send;

    /// Routes running from `origin` to `destination`.
    ///
    /// Directional: routes from `destination` to `origin` are not included.
    /// The default scans [`list_routes`](Self::list_routes) and keeps its
    /// order.
    fn routes_between(
        &self,
        origin: CityId,
        destination: CityId,
    ) -> impl Future<Output = Result<Vec<Route>, StoreError>> + Send {
        async move {
            let routes = self.list_routes().await?;
            Ok(routes
                .into_iter()
                .filter(|r| r.connects(origin, destination))
                .collect())
        }
    }
}

/// The full data-access contract.
pub trait TravelStore: CityDirectory + ModeDirectory + RouteRepository {}

impl<T: CityDirectory + ModeDirectory + RouteRepository> TravelStore for T {}

/// Backend chosen at startup.
pub enum AnyStore {
    Memory(MemoryStore),
    Postgres(PgStore),
}

impl AnyStore {
    /// Short backend name for logs.
    pub fn backend_name(&self) -> &'static str {
        match self {
            AnyStore::Memory(_) => "memory",
            AnyStore::Postgres(_) => "postgres",
        }
    }
}

impl CityDirectory for AnyStore {
    async fn list_cities(&self) -> Result<Vec<City>, StoreError> {
        match self {
            AnyStore::Memory(s) => s.list_cities().await,
            AnyStore::Postgres(s) => s.list_cities().await,
        }
    }

    async fn city_by_id(&self, id: CityId) -> Result<Option<City>, StoreError> {
        match self {
            AnyStore::Memory(s) => s.city_by_id(id).await,
            AnyStore::Postgres(s) => s.city_by_id(id).await,
        }
    }

    async fn city_by_name(&self, name: &str) -> Result<Option<City>, StoreError> {
        match self {
            AnyStore::Memory(s) => s.city_by_name(name).await,
            AnyStore::Postgres(s) => s.city_by_name(name).await,
        }
    }

    async fn insert_city(&self, city: NewCity) -> Result<City, StoreError> {
        match self {
            AnyStore::Memory(s) => s.insert_city(city).await,
            AnyStore::Postgres(s) => s.insert_city(city).await,
        }
    }
}

impl ModeDirectory for AnyStore {
    async fn list_modes(&self) -> Result<Vec<TransportMode>, StoreError> {
        match self {
            AnyStore::Memory(s) => s.list_modes().await,
            AnyStore::Postgres(s) => s.list_modes().await,
        }
    }

    async fn mode_by_id(&self, id: ModeId) -> Result<Option<TransportMode>, StoreError> {
        match self {
            AnyStore::Memory(s) => s.mode_by_id(id).await,
            AnyStore::Postgres(s) => s.mode_by_id(id).await,
        }
    }

    async fn insert_mode(&self, mode: NewTransportMode) -> Result<TransportMode, StoreError> {
        match self {
            AnyStore::Memory(s) => s.insert_mode(mode).await,
            AnyStore::Postgres(s) => s.insert_mode(mode).await,
        }
    }
}

impl RouteRepository for AnyStore {
    async fn list_routes(&self) -> Result<Vec<Route>, StoreError> {
        match self {
            AnyStore::Memory(s) => s.list_routes().await,
            AnyStore::Postgres(s) => s.list_routes().await,
        }
    }

    async fn route_by_id(&self, id: RouteId) -> Result<Option<Route>, StoreError> {
        match self {
            AnyStore::Memory(s) => s.route_by_id(id).await,
            AnyStore::Postgres(s) => s.route_by_id(id).await,
        }
    }

    async fn insert_route(&self, route: NewRoute) -> Result<Route, StoreError> {
        match self {
            AnyStore::Memory(s) => s.insert_route(route).await,
            AnyStore::Postgres(s) => s.insert_route(route).await,
        }
    }

    async fn routes_between(
        &self,
        origin: CityId,
        destination: CityId,
    ) -> Result<Vec<Route>, StoreError> {
        match self {
            AnyStore::Memory(s) => s.routes_between(origin, destination).await,
            AnyStore::Postgres(s) => s.routes_between(origin, destination).await,
        }
    }
}
