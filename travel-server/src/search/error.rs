//! Search error types.

use crate::domain::{CityId, ModeId, RouteId};
use crate::store::StoreError;

/// A route refers to a city or mode that is not in the directories.
///
/// This points at broken reference data, never at bad user input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntegrityError {
    #[error("route {route} references missing city {city}")]
    MissingCity { route: RouteId, city: CityId },

    #[error("route {route} references missing transport mode {mode}")]
    MissingMode { route: RouteId, mode: ModeId },
}

/// Errors from searching or assembling routes.
///
/// Unknown city names and unknown route ids are not errors; they produce
/// empty or `None` results.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The store failed
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Reference data is inconsistent
    #[error("reference data integrity violation: {0}")]
    Integrity(#[from] IntegrityError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = IntegrityError::MissingCity {
            route: RouteId(3),
            city: CityId(42),
        };
        assert_eq!(err.to_string(), "route 3 references missing city 42");

        let err = SearchError::from(IntegrityError::MissingMode {
            route: RouteId(3),
            mode: ModeId(9),
        });
        assert_eq!(
            err.to_string(),
            "reference data integrity violation: route 3 references missing transport mode 9"
        );
    }
}
