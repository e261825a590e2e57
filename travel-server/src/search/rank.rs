//! Ordering of search results by preference.

use std::cmp::Reverse;

use crate::domain::{Preference, RouteWithDetails};

/// Sort routes best-first for `preference`.
///
/// * time: shortest duration first
/// * cost: cheapest first
/// * comfort: highest comfort score first
///
/// The sort is stable: routes with equal keys keep their incoming order.
pub fn rank_routes(routes: &mut [RouteWithDetails], preference: Preference) {
    match preference {
        Preference::Time => routes.sort_by_key(|r| r.route.duration),
        Preference::Cost => routes.sort_by_key(|r| r.route.price),
        Preference::Comfort => routes.sort_by_key(|r| Reverse(r.route.comfort_score)),
    }
}
