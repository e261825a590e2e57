//! Transport mode reference records.

use serde::{Deserialize, Serialize};

use super::ModeId;

/// A category of conveyance with display metadata.
///
/// `icon` and `color` are opaque to the server; only `name` carries meaning
/// (it drives tag assignment during search).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportMode {
    pub id: ModeId,
    pub name: String,
    pub icon: String,
    pub color: String,
}

/// A transport mode that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTransportMode {
    pub name: String,
    pub icon: String,
    pub color: String,
}

impl NewTransportMode {
    /// Attach the identifier assigned by the store.
    pub fn with_id(self, id: ModeId) -> TransportMode {
        TransportMode {
            id,
            name: self.name,
            icon: self.icon,
            color: self.color,
        }
    }
}
