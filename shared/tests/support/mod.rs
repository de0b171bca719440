#![allow(dead_code)]

use std::{cell::Cell, collections::BTreeMap};

use tether_shared::{
    EntityError, EntityId, EntityIdGenerator, EntityKind, PeerId, Transform, WorldMutType,
    WorldRefType,
};

struct MockEntity {
    kind: EntityKind,
    owner: Option<PeerId>,
    transform: Transform,
}

/// Minimal spawn list for exercising shared types without a session
#[derive(Default)]
pub struct MockWorld {
    entities: BTreeMap<EntityId, MockEntity>,
    generator: EntityIdGenerator,
    list_reads: Cell<usize>,
}

impl MockWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, kind: EntityKind) -> EntityId {
        self.spawn_entity(kind, None)
    }

    pub fn despawn(&mut self, entity: &EntityId) {
        self.despawn_entity(entity).unwrap();
    }

    /// How many times the full spawn list was collected
    pub fn list_reads(&self) -> usize {
        self.list_reads.get()
    }
}

impl WorldRefType for MockWorld {
    fn has_entity(&self, entity: &EntityId) -> bool {
        self.entities.contains_key(entity)
    }

    fn entities(&self) -> Vec<EntityId> {
        self.list_reads.set(self.list_reads.get() + 1);
        self.entities.keys().copied().collect()
    }

    fn entity_kind(&self, entity: &EntityId) -> Option<EntityKind> {
        self.entities.get(entity).map(|record| record.kind)
    }

    fn entity_owner(&self, entity: &EntityId) -> Option<PeerId> {
        self.entities.get(entity).and_then(|record| record.owner)
    }

    fn transform(&self, entity: &EntityId) -> Option<Transform> {
        self.entities.get(entity).map(|record| record.transform)
    }

    fn entity_count(&self) -> usize {
        self.entities.len()
    }
}

impl WorldMutType for MockWorld {
    fn spawn_entity(&mut self, kind: EntityKind, owner: Option<PeerId>) -> EntityId {
        let entity = self.generator.generate();
        self.entities.insert(
            entity,
            MockEntity {
                kind,
                owner,
                transform: Transform::default(),
            },
        );
        entity
    }

    fn insert_entity(
        &mut self,
        entity: EntityId,
        kind: EntityKind,
        owner: Option<PeerId>,
    ) -> Result<(), EntityError> {
        if self.entities.contains_key(&entity) {
            return Err(EntityError::EntityAlreadyExists { entity });
        }
        self.generator.observe(&entity);
        self.entities.insert(
            entity,
            MockEntity {
                kind,
                owner,
                transform: Transform::default(),
            },
        );
        Ok(())
    }

    fn despawn_entity(&mut self, entity: &EntityId) -> Result<(), EntityError> {
        self.entities
            .remove(entity)
            .map(|_| ())
            .ok_or(EntityError::EntityNotFound {
                entity: *entity,
                context: "despawn",
            })
    }

    fn set_transform(&mut self, entity: &EntityId, transform: Transform) -> Result<(), EntityError> {
        let record = self
            .entities
            .get_mut(entity)
            .ok_or(EntityError::EntityNotFound {
                entity: *entity,
                context: "set transform",
            })?;
        record.transform = transform;
        Ok(())
    }
}
