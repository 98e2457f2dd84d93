//! Player data structure.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used in matches and history lookups).
pub type PlayerId = Uuid;

/// A club member who can be queued into matches.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    /// Display only; never used as a key.
    pub name: String,
    /// Player has checked in for tonight's session.
    pub is_present: bool,
    pub is_archived: bool,
}

impl Player {
    /// Create a new present, non-archived player with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            is_present: true,
            is_archived: false,
        }
    }

    /// Present and not archived.
    pub fn is_enabled(&self) -> bool {
        self.is_present && !self.is_archived
    }

    pub fn with_name(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }

    pub fn with_presence(&self, is_present: bool) -> Self {
        Self {
            is_present,
            ..self.clone()
        }
    }

    pub fn with_archived(&self, is_archived: bool) -> Self {
        Self {
            is_archived,
            ..self.clone()
        }
    }
}
