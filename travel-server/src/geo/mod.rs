//! Great-circle distance between coordinates.
//!
//! Distances are straight-line over the Earth's surface, not travel-path
//! lengths: a train and a flight between the same pair of cities get the
//! same figure.

use crate::domain::Coordinates;

/// Mean Earth radius in kilometres, as used by `haversine::Units::Kilometers`.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two points, in kilometres.
pub fn haversine_km(from: Coordinates, to: Coordinates) -> f64 {
    haversine::distance(location(from), location(to), haversine::Units::Kilometers)
}

fn location(point: Coordinates) -> haversine::Location {
    haversine::Location {
        latitude: point.latitude,
        longitude: point.longitude,
    }
}

/// Haversine distance rounded to the nearest whole kilometre.
///
/// This is the figure attached to search results.
pub fn distance_km(from: Coordinates, to: Coordinates) -> u32 {
    // Non-negative, so `round` (half away from zero) matches half-up.
    haversine_km(from, to).round() as u32
}
