//! Display tags for search results.
//!
//! Tags are keyed on the exact transport mode name. They are a display
//! heuristic and play no part in ordering.

use crate::domain::Tag;

/// Flights priced above this many rupees are tagged "Medium Cost".
pub const MEDIUM_COST_THRESHOLD: u32 = 4000;

/// Tags for a route travelling by `mode_name` at `price`.
///
/// * Flight: Fastest, plus Medium Cost above the threshold
/// * Train: Recommended and Best Value, always
/// * Bus: Budget Option
/// * anything else: none
pub fn tags_for(mode_name: &str, price: u32) -> Vec<Tag> {
    match mode_name {
        "Flight" if price > MEDIUM_COST_THRESHOLD => vec![Tag::Fastest, Tag::MediumCost],
        "Flight" => vec![Tag::Fastest],
        "Train" => vec![Tag::Recommended, Tag::BestValue],
        "Bus" => vec![Tag::BudgetOption],
        _ => Vec::new(),
    }
}
