use thiserror::Error;

use crate::{
    transport::error::TransportError,
    world::{
        entity::{entity_id::EntityId, entity_kind::EntityKind},
        replicated::error::ReplicationError,
    },
    PeerId,
};

/// Errors that can occur while requesting, committing or observing possession
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PossessionError {
    /// Target entity is dead or was never spawned
    #[error("Cannot possess {entity}: entity is not alive")]
    EntityNotAlive { entity: EntityId },

    /// Target entity is of a kind that cannot be controlled
    #[error("Cannot possess {entity}: {kind:?} entities cannot be controlled")]
    NotPossessable { entity: EntityId, kind: EntityKind },

    /// Controller does not exist on this peer
    #[error("Controller {controller} not found: {context}")]
    ControllerNotFound {
        controller: EntityId,
        context: &'static str,
    },

    /// Entity used as a controller is not one
    #[error("{entity} is a {kind:?}, not a Controller")]
    NotAController { entity: EntityId, kind: EntityKind },

    /// Unpossess requested while nothing is possessed
    #[error("Controller {controller} is not possessing anything")]
    NotPossessing { controller: EntityId },

    /// Requesting peer does not own the controller
    #[error("{peer} is not allowed to change the possession of Controller {controller}")]
    Unauthorized { peer: PeerId, controller: EntityId },

    /// Underlying replicated value refused the operation
    #[error("Ownership value error: {0}")]
    Replication(#[from] ReplicationError),

    /// Request could not be forwarded to the Server
    #[error("Failed to forward possession request: {0}")]
    Transport(#[from] TransportError),
}
