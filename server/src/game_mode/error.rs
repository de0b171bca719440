use thiserror::Error;

use tether_shared::{EntityError, EntityId, EntityKind};

/// Errors that can occur while spawning or placing entities
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpawnError {
    /// Spawning was attempted on a peer that is not the Server
    #[error("{operation} can only be called on the Server")]
    NotServer { operation: &'static str },

    /// Respawn requested while no spawn point is registered
    #[error("Cannot respawn {entity}: no spawn points registered")]
    NoSpawnPoints { entity: EntityId },

    /// Only Pawns can be respawned
    #[error("Cannot respawn {entity}: it is a {kind:?}, not a Pawn")]
    NotAPawn { entity: EntityId, kind: EntityKind },

    #[error("Spawn failed: {0}")]
    Entity(#[from] EntityError),
}
