use serde::{Deserialize, Serialize};

/// What an entity is, as far as possession and snapshots are concerned
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// A networked prop: serializable, never controlled
    Actor,
    /// A controllable body
    Pawn,
    /// Possesses at most one Pawn at a time
    Controller,
}

impl EntityKind {
    pub fn name(&self) -> &'static str {
        match self {
            EntityKind::Actor => "Actor",
            EntityKind::Pawn => "Pawn",
            EntityKind::Controller => "Controller",
        }
    }

    pub fn is_possessable(&self) -> bool {
        matches!(self, EntityKind::Pawn)
    }

    pub fn is_controller(&self) -> bool {
        matches!(self, EntityKind::Controller)
    }

    pub fn is_serializable(&self) -> bool {
        matches!(self, EntityKind::Actor | EntityKind::Pawn)
    }
}
