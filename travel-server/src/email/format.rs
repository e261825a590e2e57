//! Display formatting for prices and durations.

/// Format whole rupees with Indian digit grouping, e.g. `₹1,85,000`.
///
/// The last three digits form one group; the rest are grouped in pairs.
pub fn format_price(rupees: u32) -> String {
    let digits = rupees.to_string();
    let (head, tail) = digits.split_at(digits.len().saturating_sub(3));

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 2 + 4);
    grouped.push('₹');

    let lead = head.len() % 2;
    for (i, ch) in head.chars().enumerate() {
        if i > 0 && (i + 2 - lead) % 2 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if !head.is_empty() {
        grouped.push(',');
    }
    grouped.push_str(tail);
    grouped
}

/// Format minutes as hours and minutes, e.g. `2h 10m`, `3h`, `45m`.
pub fn format_duration(minutes: u32) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;

    match (hours, mins) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}
