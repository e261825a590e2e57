//! Seed data for the reference tables.
//!
//! The built-in data set covers ten Indian cities, four transport modes and
//! a hand-picked set of directed routes. Routes name their cities and mode;
//! names are resolved to ids while seeding.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::domain::{CityId, ComfortScore, ModeId, NewCity, NewRoute, NewTransportMode};

use super::{StoreError, TravelStore};

const BUILTIN_SEED: &str = include_str!("../../data/seed.json");

/// Errors that can occur while loading or applying seed data.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    /// Seed file could not be read
    #[error("failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    /// Seed file is not valid seed JSON
    #[error("invalid seed data: {0}")]
    Json(#[from] serde_json::Error),

    /// A route names a city that the seed does not define
    #[error("route '{provider}' references unknown city '{name}'")]
    UnknownCity { provider: String, name: String },

    /// A route names a transport mode that the seed does not define
    #[error("route '{provider}' references unknown transport mode '{name}'")]
    UnknownMode { provider: String, name: String },

    /// The store rejected an insert
    #[error("store error while seeding: {0}")]
    Store(#[from] StoreError),
}

/// A route in seed form, referring to cities and mode by name.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedRoute {
    pub origin: String,
    pub destination: String,
    pub mode: String,
    pub provider: String,
    pub price: u32,
    pub duration: u32,
    pub departure_time: String,
    pub arrival_time: String,
    pub comfort_score: ComfortScore,
    pub amenities: Vec<String>,
    pub description: String,
}

/// A complete seed data set.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedData {
    pub cities: Vec<NewCity>,
    pub transport_modes: Vec<NewTransportMode>,
    pub routes: Vec<SeedRoute>,
}

/// Counts of records inserted by [`apply_seed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub cities: usize,
    pub transport_modes: usize,
    pub routes: usize,
}

impl SeedData {
    /// The data set shipped with the server.
    pub fn builtin() -> Result<Self, SeedError> {
        Self::from_json(BUILTIN_SEED)
    }

    /// Parse and validate seed JSON.
    pub fn from_json(json: &str) -> Result<Self, SeedError> {
        let data: SeedData = serde_json::from_str(json)?;
        data.validate()?;
        Ok(data)
    }

    /// Load and validate a seed file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SeedError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Check that every route refers to a defined city and mode.
    ///
    /// City names are matched case-insensitively, mode names exactly.
    pub fn validate(&self) -> Result<(), SeedError> {
        for route in &self.routes {
            for name in [&route.origin, &route.destination] {
                if !self.cities.iter().any(|c| c.name.to_lowercase() == name.to_lowercase()) {
                    return Err(SeedError::UnknownCity {
                        provider: route.provider.clone(),
                        name: name.clone(),
                    });
                }
            }
            if !self.transport_modes.iter().any(|m| m.name == route.mode) {
                return Err(SeedError::UnknownMode {
                    provider: route.provider.clone(),
                    name: route.mode.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Insert seed data into a store.
///
/// Cities, then modes, then routes are inserted in file order, so the
/// memory backend assigns the same ids on every run. Validation happens
/// before the first insert.
pub async fn apply_seed<S: TravelStore>(
    store: &S,
    data: &SeedData,
) -> Result<SeedSummary, SeedError> {
    data.validate()?;

    let mut city_ids: HashMap<String, CityId> = HashMap::new();
    for city in &data.cities {
        let stored = store.insert_city(city.clone()).await?;
        city_ids
            .entry(stored.name.to_lowercase())
            .or_insert(stored.id);
    }

    let mut mode_ids: HashMap<String, ModeId> = HashMap::new();
    for mode in &data.transport_modes {
        let stored = store.insert_mode(mode.clone()).await?;
        mode_ids.entry(stored.name.clone()).or_insert(stored.id);
    }

    for route in &data.routes {
        let city = |name: &str| {
            city_ids
                .get(&name.to_lowercase())
                .copied()
                .ok_or_else(|| SeedError::UnknownCity {
                    provider: route.provider.clone(),
                    name: name.to_string(),
                })
        };
        let transport_mode_id =
            mode_ids
                .get(&route.mode)
                .copied()
                .ok_or_else(|| SeedError::UnknownMode {
                    provider: route.provider.clone(),
                    name: route.mode.clone(),
                })?;

        store
            .insert_route(NewRoute {
                origin_city_id: city(&route.origin)?,
                destination_city_id: city(&route.destination)?,
                transport_mode_id,
                provider: route.provider.clone(),
                price: route.price,
                duration: route.duration,
                departure_time: route.departure_time.clone(),
                arrival_time: route.arrival_time.clone(),
                comfort_score: route.comfort_score,
                amenities: route.amenities.clone(),
                description: route.description.clone(),
            })
            .await?;
    }

    let summary = SeedSummary {
        cities: data.cities.len(),
        transport_modes: data.transport_modes.len(),
        routes: data.routes.len(),
    };
    tracing::info!(
        cities = summary.cities,
        transport_modes = summary.transport_modes,
        routes = summary.routes,
        "seeded reference data"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RouteId;
    use crate::store::{CityDirectory, MemoryStore, ModeDirectory, RouteRepository};
    use std::io::Write;

    #[test]
    fn builtin_seed_parses() {
        let data = SeedData::builtin().unwrap();
        assert_eq!(data.cities.len(), 10);
        assert_eq!(data.transport_modes.len(), 4);
        assert_eq!(data.routes.len(), 17);

        let modes: Vec<_> = data.transport_modes.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(modes, vec!["Train", "Flight", "Bus", "Car"]);
    }

    #[test]
    fn unknown_city_is_rejected() {
        let json = r##"{
            "cities": [{"name": "Pune", "state": "Maharashtra", "latitude": 18.5, "longitude": 73.8}],
            "transportModes": [{"name": "Bus", "icon": "bus", "color": "#059669"}],
            "routes": [{
                "origin": "Pune", "destination": "Goa", "mode": "Bus",
                "provider": "Night Rider", "price": 900, "duration": 600,
                "departureTime": "21:00", "arrivalTime": "07:00", "comfortScore": 2,
                "amenities": [], "description": ""
            }]
        }"##;

        let err = SeedData::from_json(json).unwrap_err();
        assert!(matches!(err, SeedError::UnknownCity { ref name, .. } if name == "Goa"));
    }

    #[test]
    fn unknown_mode_is_rejected() {
        let json = r##"{
            "cities": [
                {"name": "Pune", "state": "Maharashtra", "latitude": 18.5, "longitude": 73.8},
                {"name": "Goa", "state": "Goa", "latitude": 15.3, "longitude": 74.1}
            ],
            "transportModes": [{"name": "Bus", "icon": "bus", "color": "#059669"}],
            "routes": [{
                "origin": "Pune", "destination": "goa", "mode": "Ferry",
                "provider": "Konkan Line", "price": 900, "duration": 600,
                "departureTime": "21:00", "arrivalTime": "07:00", "comfortScore": 2,
                "amenities": [], "description": ""
            }]
        }"##;

        let err = SeedData::from_json(json).unwrap_err();
        assert!(matches!(err, SeedError::UnknownMode { ref name, .. } if name == "Ferry"));
    }

    #[test]
    fn invalid_comfort_score_is_rejected() {
        let json = r##"{
            "cities": [{"name": "Pune", "state": "Maharashtra", "latitude": 18.5, "longitude": 73.8}],
            "transportModes": [{"name": "Car", "icon": "car", "color": "#2563EB"}],
            "routes": [{
                "origin": "Pune", "destination": "Pune", "mode": "Car",
                "provider": "Self drive", "price": 0, "duration": 0,
                "departureTime": "Flexible", "arrivalTime": "Flexible", "comfortScore": 6,
                "amenities": [], "description": ""
            }]
        }"##;

        assert!(matches!(SeedData::from_json(json), Err(SeedError::Json(_))));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "cities": [{{"name": "Pune", "state": "Maharashtra", "latitude": 18.5, "longitude": 73.8}}],
                "transportModes": [],
                "routes": []
            }}"#
        )
        .unwrap();

        let data = SeedData::from_path(file.path()).unwrap();
        assert_eq!(data.cities.len(), 1);
        assert_eq!(data.cities[0].name, "Pune");
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SeedData::from_path(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, SeedError::Io(_)));
    }

    #[tokio::test]
    async fn apply_builtin_seed_to_memory() {
        let data = SeedData::builtin().unwrap();
        let store = MemoryStore::new();
        let summary = apply_seed(&store, &data).await.unwrap();

        assert_eq!(
            summary,
            SeedSummary {
                cities: 10,
                transport_modes: 4,
                routes: 17
            }
        );

        let mumbai = store.city_by_name("Mumbai").await.unwrap().unwrap();
        assert_eq!(mumbai.id, CityId(1));
        let flight = store.mode_by_id(ModeId(2)).await.unwrap().unwrap();
        assert_eq!(flight.name, "Flight");

        let first = store.route_by_id(RouteId(1)).await.unwrap().unwrap();
        assert_eq!(first.provider, "IndiGo");
        assert_eq!(first.origin_city_id, CityId(1));
        assert_eq!(first.destination_city_id, CityId(2));
        assert_eq!(first.transport_mode_id, ModeId(2));
    }
}
