//! Ranking preference for search results.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown preference.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid preference '{0}'. Expected 'time' | 'cost' | 'comfort'")]
pub struct InvalidPreference(pub String);

/// The axis search results are ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preference {
    /// Shortest duration first.
    #[default]
    Time,
    /// Cheapest first.
    Cost,
    /// Most comfortable first.
    Comfort,
}

impl Preference {
    pub fn as_str(self) -> &'static str {
        match self {
            Preference::Time => "time",
            Preference::Cost => "cost",
            Preference::Comfort => "comfort",
        }
    }
}

impl FromStr for Preference {
    type Err = InvalidPreference;

    /// Parses the exact lowercase names only.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "time" => Ok(Preference::Time),
            "cost" => Ok(Preference::Cost),
            "comfort" => Ok(Preference::Comfort),
            other => Err(InvalidPreference(other.to_string())),
        }
    }
}

impl fmt::Display for Preference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
