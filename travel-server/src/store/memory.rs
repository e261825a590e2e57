//! In-process store for seeded reference data.

use tokio::sync::RwLock;

use crate::domain::{
    City, CityId, ModeId, NewCity, NewRoute, NewTransportMode, Route, RouteId, TransportMode,
};

use super::seed::{SeedData, SeedError, apply_seed};
use super::{CityDirectory, ModeDirectory, RouteRepository, StoreError};

#[derive(Debug, Default)]
struct Tables {
    cities: Vec<City>,
    modes: Vec<TransportMode>,
    routes: Vec<Route>,
}

/// Thread-safe in-memory store.
///
/// Records keep insertion order and receive sequential ids starting at 1.
/// Inserts take a write lock; every lookup is read-only.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store populated from seed data.
    pub async fn seeded(data: &SeedData) -> Result<Self, SeedError> {
        let store = Self::new();
        apply_seed(&store, data).await?;
        Ok(store)
    }
}

/// Next sequential id for a table holding `len` records.
fn next_id(len: usize) -> i32 {
    i32::try_from(len).map_or(i32::MAX, |n| n.saturating_add(1))
}

impl CityDirectory for MemoryStore {
    async fn list_cities(&self) -> Result<Vec<City>, StoreError> {
        Ok(self.tables.read().await.cities.clone())
    }

    async fn city_by_id(&self, id: CityId) -> Result<Option<City>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.cities.iter().find(|c| c.id == id).cloned())
    }

    async fn city_by_name(&self, name: &str) -> Result<Option<City>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.cities.iter().find(|c| c.name_matches(name)).cloned())
    }

    async fn insert_city(&self, city: NewCity) -> Result<City, StoreError> {
        let mut tables = self.tables.write().await;
        let city = city.with_id(CityId(next_id(tables.cities.len())));
        tables.cities.push(city.clone());
        Ok(city)
    }
}

impl ModeDirectory for MemoryStore {
    async fn list_modes(&self) -> Result<Vec<TransportMode>, StoreError> {
        Ok(self.tables.read().await.modes.clone())
    }

    async fn mode_by_id(&self, id: ModeId) -> Result<Option<TransportMode>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.modes.iter().find(|m| m.id == id).cloned())
    }

    async fn insert_mode(&self, mode: NewTransportMode) -> Result<TransportMode, StoreError> {
        let mut tables = self.tables.write().await;
        let mode = mode.with_id(ModeId(next_id(tables.modes.len())));
        tables.modes.push(mode.clone());
        Ok(mode)
    }
}

impl RouteRepository for MemoryStore {
    async fn list_routes(&self) -> Result<Vec<Route>, StoreError> {
        Ok(self.tables.read().await.routes.clone())
    }

    async fn route_by_id(&self, id: RouteId) -> Result<Option<Route>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.routes.iter().find(|r| r.id == id).cloned())
    }

    /// Stores the route as given; city and mode ids are not checked.
    async fn insert_route(&self, route: NewRoute) -> Result<Route, StoreError> {
        let mut tables = self.tables.write().await;
        let route = route.with_id(RouteId(next_id(tables.routes.len())));
        tables.routes.push(route.clone());
        Ok(route)
    }

    async fn routes_between(
        &self,
        origin: CityId,
        destination: CityId,
    ) -> Result<Vec<Route>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .routes
            .iter()
            .filter(|r| r.connects(origin, destination))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ComfortScore;

    fn city(name: &str) -> NewCity {
        NewCity {
            name: name.to_string(),
            state: "Test".to_string(),
            latitude: 10.0,
            longitude: 70.0,
        }
    }

    fn route(origin: i32, destination: i32, provider: &str) -> NewRoute {
        NewRoute {
            origin_city_id: CityId(origin),
            destination_city_id: CityId(destination),
            transport_mode_id: ModeId(1),
            provider: provider.to_string(),
            price: 1000,
            duration: 60,
            departure_time: "Flexible".to_string(),
            arrival_time: "Flexible".to_string(),
            comfort_score: ComfortScore::new(3).unwrap(),
            amenities: Vec::new(),
            description: String::new(),
        }
    }

    #[tokio::test]
    async fn ids_are_sequential_from_one() {
        let store = MemoryStore::new();
        let a = store.insert_city(city("Pune")).await.unwrap();
        let b = store.insert_city(city("Goa")).await.unwrap();
        assert_eq!(a.id, CityId(1));
        assert_eq!(b.id, CityId(2));

        let listed = store.list_cities().await.unwrap();
        let names: Vec<_> = listed.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Pune", "Goa"]);
    }

    #[tokio::test]
    async fn city_lookup_by_name_ignores_case() {
        let store = MemoryStore::new();
        store.insert_city(city("Pune")).await.unwrap();

        let found = store.city_by_name("pUNE").await.unwrap();
        assert_eq!(found.map(|c| c.id), Some(CityId(1)));
        assert_eq!(store.city_by_name("Atlantis").await.unwrap(), None);
    }

    #[tokio::test]
    async fn missing_ids_are_none() {
        let store = MemoryStore::new();
        assert_eq!(store.city_by_id(CityId(1)).await.unwrap(), None);
        assert_eq!(store.mode_by_id(ModeId(1)).await.unwrap(), None);
        assert_eq!(store.route_by_id(RouteId(1)).await.unwrap(), None);
    }

    #[tokio::test]
    async fn routes_between_is_directional_and_ordered() {
        let store = MemoryStore::new();
        store.insert_route(route(1, 2, "first")).await.unwrap();
        store.insert_route(route(2, 1, "reverse")).await.unwrap();
        store.insert_route(route(1, 3, "elsewhere")).await.unwrap();
        store.insert_route(route(1, 2, "second")).await.unwrap();

        let found = store.routes_between(CityId(1), CityId(2)).await.unwrap();
        let providers: Vec<_> = found.iter().map(|r| r.provider.as_str()).collect();
        assert_eq!(providers, vec!["first", "second"]);

        let back = store.routes_between(CityId(2), CityId(1)).await.unwrap();
        assert_eq!(back.len(), 1);
        assert_eq!(back[0].provider, "reverse");
    }

    #[tokio::test]
    async fn insert_route_accepts_dangling_references() {
        let store = MemoryStore::new();
        let stored = store.insert_route(route(98, 99, "ghost")).await.unwrap();
        assert_eq!(store.route_by_id(stored.id).await.unwrap(), Some(stored));
    }
}
