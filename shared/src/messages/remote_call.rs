use serde::{Deserialize, Serialize};

use crate::{
    world::{
        entity::entity_id::EntityId, replicated::replicated_value::ValueUpdate,
        snapshot::serialized_object::StatePayload,
    },
    PeerId,
};

/// Every invocation that travels between peers
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum RemoteCall {
    /// Client → Server: ask that `controller` possess `entity`
    RequestPossess {
        controller: EntityId,
        entity: EntityId,
    },
    /// Client → Server: ask that `controller` release its entity
    RequestUnpossess { controller: EntityId },
    /// Server → all: a committed write of a controller's ownership value
    OwnershipUpdate {
        controller: EntityId,
        update: ValueUpdate<Option<EntityId>>,
    },
    /// Server → one late joiner: the current ownership value of a controller
    OwnershipReplay {
        controller: EntityId,
        update: ValueUpdate<Option<EntityId>>,
    },
    /// Server → one late joiner: full state of an entity
    EntityState {
        entity: EntityId,
        payload: StatePayload,
    },
}

impl RemoteCall {
    pub fn name(&self) -> &'static str {
        match self {
            RemoteCall::RequestPossess { .. } => "RequestPossess",
            RemoteCall::RequestUnpossess { .. } => "RequestUnpossess",
            RemoteCall::OwnershipUpdate { .. } => "OwnershipUpdate",
            RemoteCall::OwnershipReplay { .. } => "OwnershipReplay",
            RemoteCall::EntityState { .. } => "EntityState",
        }
    }
}

/// Who a remote call is addressed to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Recipient {
    /// The authoritative peer
    Server,
    /// One specific connected peer
    Peer(PeerId),
    /// Every connected client
    All,
}
