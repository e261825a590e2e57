//! Domain types for the travel route planner.
//!
//! Cities, transport modes and routes are immutable reference data. Types
//! with constrained values (comfort scores, preferences) enforce their
//! invariants at construction time.

mod city;
mod ids;
mod preference;
mod route;
mod transport_mode;

pub use city::{City, Coordinates, NewCity};
pub use ids::{CityId, ModeId, RouteId};
pub use preference::{InvalidPreference, Preference};
pub use route::{ComfortScore, InvalidComfortScore, NewRoute, Route, RouteWithDetails, Tag};
pub use transport_mode::{NewTransportMode, TransportMode};
