use thiserror::Error;

use crate::world::entity::{entity_id::EntityId, entity_kind::EntityKind};

/// Errors that can occur while capturing or applying entity state
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    /// Payload carried no data at all
    #[error("State payload is empty, nothing to apply")]
    EmptyPayload,

    /// Payload could not be decoded into the expected state type
    #[error("Failed to deserialize state payload: {reason}")]
    MalformedPayload { reason: String },

    /// State could not be encoded
    #[error("Failed to serialize state: {reason}")]
    EncodeFailed { reason: String },

    /// Entity does not exist in the world
    #[error("Entity {entity} does not exist, cannot {operation}")]
    EntityNotFound {
        entity: EntityId,
        operation: &'static str,
    },

    /// State was applied through an accessor that only reads
    #[error("Entity {entity} was opened read-only, cannot set its state")]
    ReadOnlyAccess { entity: EntityId },

    /// Entity kind carries no serializable state
    #[error("Entity {entity} of kind {kind:?} has no serializable state")]
    NotSerializable { entity: EntityId, kind: EntityKind },
}
