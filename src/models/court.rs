//! Court data structure.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a court.
pub type CourtId = Uuid;

/// A physical court. Which match occupies it is derived from match states, not stored here.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Court {
    pub id: CourtId,
    /// Display name or number ("Court 3").
    pub name: String,
    pub can_be_used: bool,
}

impl Court {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            can_be_used: true,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.can_be_used
    }

    pub fn with_name(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }

    pub fn with_usable(&self, can_be_used: bool) -> Self {
        Self {
            can_be_used,
            ..self.clone()
        }
    }
}
