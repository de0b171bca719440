/// Simple World implementation for multi-peer testing
use std::collections::BTreeMap;

use tether_shared::{
    EntityError, EntityId, EntityIdGenerator, EntityKind, PeerId, Transform, WorldMutType,
    WorldRefType,
};

// TestEntity - one spawned entity
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TestEntity {
    pub kind: EntityKind,
    pub owner: Option<PeerId>,
    pub transform: Transform,
}

// TestWorld - Simple BTreeMap-based world
#[derive(Default)]
pub struct TestWorld {
    entities: BTreeMap<EntityId, TestEntity>,
    generator: EntityIdGenerator,
}

impl TestWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entity(&self, entity: &EntityId) -> Option<&TestEntity> {
        self.entities.get(entity)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Bring this world's spawn list in line with `source`.
    /// Entities new to this world are inserted with a default transform
    /// unless `copy_transforms` is set.
    pub fn mirror_spawns(&mut self, source: &TestWorld, copy_transforms: bool) {
        let stale: Vec<EntityId> = self
            .entities
            .keys()
            .filter(|entity| !source.entities.contains_key(entity))
            .copied()
            .collect();
        for entity in stale {
            self.entities.remove(&entity);
        }

        for (entity, record) in &source.entities {
            if self.entities.contains_key(entity) {
                continue;
            }
            self.generator.observe(entity);
            let transform = if copy_transforms {
                record.transform
            } else {
                Transform::default()
            };
            self.entities.insert(
                *entity,
                TestEntity {
                    kind: record.kind,
                    owner: record.owner,
                    transform,
                },
            );
        }
    }
}

// WorldRefType implementation
impl WorldRefType for TestWorld {
    fn has_entity(&self, entity: &EntityId) -> bool {
        self.entities.contains_key(entity)
    }

    fn entities(&self) -> Vec<EntityId> {
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

// WorldMutType implementation
impl WorldMutType for TestWorld {
    fn spawn_entity(&mut self, kind: EntityKind, owner: Option<PeerId>) -> EntityId {
        let entity = self.generator.generate();
        self.entities.insert(
            entity,
            TestEntity {
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
            TestEntity {
                kind,
                owner,
                transform: Transform::default(),
            },
        );
        Ok(())
    }

    fn despawn_entity(&mut self, entity: &EntityId) -> Result<(), EntityError> {
        match self.entities.remove(entity) {
            Some(_) => Ok(()),
            None => Err(EntityError::EntityNotFound {
                entity: *entity,
                context: "despawn",
            }),
        }
    }

    fn set_transform(&mut self, entity: &EntityId, transform: Transform) -> Result<(), EntityError> {
        let Some(record) = self.entities.get_mut(entity) else {
            return Err(EntityError::EntityNotFound {
                entity: *entity,
                context: "set transform",
            });
        };
        record.transform = transform;
        Ok(())
    }
}
