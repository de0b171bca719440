use thiserror::Error;

use crate::world::entity::{entity_id::EntityId, entity_kind::EntityKind};

/// Errors that can occur while touching entities in a world
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntityError {
    /// Entity was not found during lookup
    #[error("Entity {entity} not found: {context}")]
    EntityNotFound {
        entity: EntityId,
        context: &'static str,
    },

    /// Entity already exists when trying to insert it
    #[error("Entity {entity} already exists in the world")]
    EntityAlreadyExists { entity: EntityId },

    /// Operation is not supported for this kind of entity
    #[error("Operation '{operation}' is not supported for {kind:?} entity {entity}")]
    UnsupportedKind {
        entity: EntityId,
        kind: EntityKind,
        operation: &'static str,
    },
}
