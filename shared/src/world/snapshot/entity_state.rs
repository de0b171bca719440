use crate::world::{
    entity::entity_id::EntityId,
    snapshot::{actor_state::ActorState, error::SnapshotError, serialized_object::SerializedObject},
    world_type::{WorldMutType, WorldRefType},
};

fn check_serializable<W: WorldRefType>(
    world: &W,
    entity: &EntityId,
    operation: &'static str,
) -> Result<(), SnapshotError> {
    let Some(kind) = world.entity_kind(entity) else {
        return Err(SnapshotError::EntityNotFound {
            entity: *entity,
            operation,
        });
    };
    if !kind.is_serializable() {
        return Err(SnapshotError::NotSerializable {
            entity: *entity,
            kind,
        });
    }
    Ok(())
}

fn read_state<W: WorldRefType>(world: &W, entity: &EntityId) -> Result<ActorState, SnapshotError> {
    world
        .transform(entity)
        .map(ActorState::from)
        .ok_or(SnapshotError::EntityNotFound {
            entity: *entity,
            operation: "get state",
        })
}

// EntityStateRef
/// Read-only state accessor over an entity living in a world
pub struct EntityStateRef<'w, W: WorldRefType> {
    world: &'w W,
    entity: EntityId,
}

impl<'w, W: WorldRefType> EntityStateRef<'w, W> {
    pub fn new(world: &'w W, entity: &EntityId) -> Result<Self, SnapshotError> {
        check_serializable(world, entity, "capture state")?;
        Ok(Self {
            world,
            entity: *entity,
        })
    }

    pub fn entity(&self) -> EntityId {
        self.entity
    }
}

impl<W: WorldRefType> SerializedObject for EntityStateRef<'_, W> {
    type State = ActorState;

    fn get_state(&self) -> Result<ActorState, SnapshotError> {
        read_state(self.world, &self.entity)
    }

    fn set_state(&mut self, _state: ActorState) -> Result<(), SnapshotError> {
        Err(SnapshotError::ReadOnlyAccess {
            entity: self.entity,
        })
    }
}

// EntityStateMut
/// Read/write state accessor over an entity living in a world
pub struct EntityStateMut<'w, W: WorldMutType> {
    world: &'w mut W,
    entity: EntityId,
}

impl<'w, W: WorldMutType> EntityStateMut<'w, W> {
    pub fn new(world: &'w mut W, entity: &EntityId) -> Result<Self, SnapshotError> {
        check_serializable(&*world, entity, "apply state")?;
        Ok(Self {
            world,
            entity: *entity,
        })
    }

    pub fn entity(&self) -> EntityId {
        self.entity
    }
}

impl<W: WorldMutType> SerializedObject for EntityStateMut<'_, W> {
    type State = ActorState;

    fn get_state(&self) -> Result<ActorState, SnapshotError> {
        read_state(&*self.world, &self.entity)
    }

    fn set_state(&mut self, state: ActorState) -> Result<(), SnapshotError> {
        self.world
            .set_transform(&self.entity, state.into())
            .map_err(|_| SnapshotError::EntityNotFound {
                entity: self.entity,
                operation: "set state",
            })
    }
}
