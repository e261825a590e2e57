//! Route records and their enriched form.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{City, CityId, ModeId, RouteId, TransportMode};

/// Error returned when a comfort score is outside 1..=5.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid comfort score {0}: must be between 1 and 5")]
pub struct InvalidComfortScore(pub i64);

/// A comfort rating from 1 (basic) to 5 (luxurious).
///
/// Valid by construction; deserialization rejects out-of-range values.
///
/// # Examples
///
/// ```
/// use travel_server::domain::ComfortScore;
///
/// let score = ComfortScore::new(4).unwrap();
/// assert_eq!(score.get(), 4);
///
/// assert!(ComfortScore::new(0).is_err());
/// assert!(ComfortScore::new(6).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct ComfortScore(u8);

impl ComfortScore {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Create a score, rejecting values outside 1..=5.
    pub fn new(value: i64) -> Result<Self, InvalidComfortScore> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Ok(ComfortScore(value as u8))
        } else {
            Err(InvalidComfortScore(value))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for ComfortScore {
    type Error = InvalidComfortScore;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        ComfortScore::new(value)
    }
}

impl From<ComfortScore> for u8 {
    fn from(score: ComfortScore) -> Self {
        score.0
    }
}

impl fmt::Display for ComfortScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/5", self.0)
    }
}

/// A directed, scheduled offering between two cities via one transport mode.
///
/// A route from A to B says nothing about B to A.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub id: RouteId,
    pub origin_city_id: CityId,
    pub destination_city_id: CityId,
    pub transport_mode_id: ModeId,
    /// Operator, e.g. "IndiGo" or "Rajdhani Express".
    pub provider: String,
    /// Whole rupees.
    pub price: u32,
    /// Minutes.
    pub duration: u32,
    /// Display string, not necessarily a parseable time ("Flexible").
    pub departure_time: String,
    pub arrival_time: String,
    pub comfort_score: ComfortScore,
    pub amenities: Vec<String>,
    pub description: String,
}

impl Route {
    /// Whether this route runs from `origin` to `destination` (directional).
    pub fn connects(&self, origin: CityId, destination: CityId) -> bool {
        self.origin_city_id == origin && self.destination_city_id == destination
    }
}

/// A route that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRoute {
    pub origin_city_id: CityId,
    pub destination_city_id: CityId,
    pub transport_mode_id: ModeId,
    pub provider: String,
    pub price: u32,
    pub duration: u32,
    pub departure_time: String,
    pub arrival_time: String,
    pub comfort_score: ComfortScore,
    pub amenities: Vec<String>,
    pub description: String,
}

impl NewRoute {
    /// Attach the identifier assigned by the store.
    pub fn with_id(self, id: RouteId) -> Route {
        Route {
            id,
            origin_city_id: self.origin_city_id,
            destination_city_id: self.destination_city_id,
            transport_mode_id: self.transport_mode_id,
            provider: self.provider,
            price: self.price,
            duration: self.duration,
            departure_time: self.departure_time,
            arrival_time: self.arrival_time,
            comfort_score: self.comfort_score,
            amenities: self.amenities,
            description: self.description,
        }
    }
}

/// A display label attached to a search result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tag {
    #[serde(rename = "Fastest")]
    Fastest,
    #[serde(rename = "Medium Cost")]
    MediumCost,
    #[serde(rename = "Recommended")]
    Recommended,
    #[serde(rename = "Best Value")]
    BestValue,
    #[serde(rename = "Budget Option")]
    BudgetOption,
}

impl Tag {
    pub fn label(self) -> &'static str {
        match self {
            Tag::Fastest => "Fastest",
            Tag::MediumCost => "Medium Cost",
            Tag::Recommended => "Recommended",
            Tag::BestValue => "Best Value",
            Tag::BudgetOption => "Budget Option",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A route joined with its cities and mode.
///
/// `distance` is populated by search (the straight-line distance between the
/// searched city pair, in whole kilometres) and left `None` on the
/// confirmation path. `tags` is empty on the confirmation path.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteWithDetails {
    #[serde(flatten)]
    pub route: Route,
    pub origin_city: City,
    pub destination_city: City,
    pub transport_mode: TransportMode,
    pub tags: Vec<Tag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<u32>,
}
