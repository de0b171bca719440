//! # Tether Shared
//! Common functionality shared between tether-server & tether-client crates:
//! server-authoritative replicated values, the entity registry, the
//! possession state machine and entity state snapshots.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod event_bus;
mod messages;
mod session_context;
mod transport;
mod types;
mod world;

pub use event_bus::{EventBus, DEFAULT_BUS_CAPACITY};
pub use messages::remote_call::{Recipient, RemoteCall};
pub use session_context::SessionContext;
pub use transport::{
    channel::{ChannelClientTransport, ChannelServerTransport},
    error::TransportError,
    Transport, TransportEvent,
};
pub use types::{CommitSequence, HostType, PeerId};
pub use world::{
    entity::{
        entity_id::{EntityId, EntityIdGenerator},
        entity_kind::EntityKind,
        error::EntityError,
        transform::{Quat, Transform, Vec3},
    },
    possession::{
        controller::{Controller, PossessionState},
        error::PossessionError,
        possession_event::PossessionEvent,
        possession_manager::{OwnershipUpdate, PossessionManager},
    },
    registry::{
        entity_registry::EntityRegistry,
        registry_event::{RegistryChanges, RegistryEvent},
    },
    replicated::{
        error::ReplicationError,
        replicated_value::{ReplicatedValue, ValueChange, ValueUpdate},
    },
    snapshot::{
        actor_state::ActorState,
        entity_state::{EntityStateMut, EntityStateRef},
        error::SnapshotError,
        serialized_object::{SerializedObject, StatePayload},
    },
    world_type::{WorldMutType, WorldRefType},
};
