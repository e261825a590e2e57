//! City reference records.

use serde::{Deserialize, Serialize};

use super::CityId;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A named city usable as a route origin or destination.
///
/// Names are not unique across states, but lookups treat them as unique and
/// return the first match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct City {
    pub id: CityId,
    pub name: String,
    pub state: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl City {
    /// The city's position.
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    /// Case-insensitive exact comparison against a free-text name.
    pub fn name_matches(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

/// A city that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCity {
    pub name: String,
    pub state: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl NewCity {
    /// Attach the identifier assigned by the store.
    pub fn with_id(self, id: CityId) -> City {
        City {
            id,
            name: self.name,
            state: self.state,
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}
