//! Route search and ranking.
//!
//! Given two city names and a preference, finds every direct route between
//! the cities, joins in the city and mode records, labels each result with
//! display tags and orders them by the preference.

mod confirm;
mod engine;
mod error;
mod rank;
mod tags;

pub use confirm::ConfirmationAssembler;
pub use engine::RouteSearch;
pub use error::{IntegrityError, SearchError};
pub use rank::rank_routes;
pub use tags::{MEDIUM_COST_THRESHOLD, tags_for};

#[cfg(test)]
mod search_tests;
