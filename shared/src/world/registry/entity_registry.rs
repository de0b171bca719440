use std::collections::{HashMap, HashSet};

use log::{debug, trace};

use crate::{
    world::{
        entity::{entity_id::EntityId, entity_kind::EntityKind},
        registry::registry_event::RegistryChanges,
        world_type::WorldRefType,
    },
};

/// Deduplicated view of the live entities of a peer, and of the subset of
/// them that are Controllers.
///
/// The registry never originates state: every poll mirrors the spawn list.
/// Change detection is coarse on purpose, the set is only rebuilt when the
/// spawn list cardinality differs from the last observed one. A despawn and a
/// spawn landing between the same two polls keep the count equal and go
/// unnoticed until the next cardinality change.
pub struct EntityRegistry {
    observed_count: usize,
    actors: HashSet<EntityId>,
    controllers: HashSet<EntityId>,
    actors_by_id: HashMap<EntityId, EntityKind>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self {
            observed_count: 0,
            actors: HashSet::new(),
            controllers: HashSet::new(),
            actors_by_id: HashMap::new(),
        }
    }

    // Polling

    /// Reconcile against the spawn list of a connected session
    pub fn poll<W: WorldRefType>(&mut self, world: &W) -> RegistryChanges {
        let count = world.entity_count();
        if count == self.observed_count {
            return RegistryChanges::default();
        }
        trace!(
            "spawn list count changed from {} to {}, rebuilding registry",
            self.observed_count,
            count
        );
        self.observed_count = count;

        let spawned = world.entities();

        let mut new_actors = HashSet::new();
        self.actors_by_id.clear();
        for entity in spawned {
            let Some(kind) = world.entity_kind(&entity) else {
                continue;
            };
            new_actors.insert(entity);
            self.actors_by_id.insert(entity, kind);
        }

        let mut changes = RegistryChanges::default();
        if new_actors == self.actors {
            return changes;
        }
        self.actors = new_actors;
        changes.actors_changed = true;

        let new_controllers: HashSet<EntityId> = self
            .actors_by_id
            .iter()
            .filter(|(_, kind)| kind.is_controller())
            .map(|(entity, _)| *entity)
            .collect();
        if new_controllers != self.controllers {
            self.controllers = new_controllers;
            changes.controllers_changed = true;
        }

        debug!(
            "registry now tracks {} actors, {} controllers",
            self.actors.len(),
            self.controllers.len()
        );
        changes
    }

    /// Reconcile while no session exists: the registry degrades to empty
    pub fn poll_detached(&mut self) -> RegistryChanges {
        let mut changes = RegistryChanges::default();
        self.observed_count = 0;

        if !self.actors.is_empty() {
            self.actors.clear();
            self.actors_by_id.clear();
            changes.actors_changed = true;
        }
        if !self.controllers.is_empty() {
            self.controllers.clear();
            changes.controllers_changed = true;
        }

        if !changes.is_empty() {
            debug!("session absent, registry cleared");
        }
        changes
    }

    // Queries

    pub fn actors(&self) -> impl Iterator<Item = &EntityId> {
        self.actors.iter()
    }

    pub fn controllers(&self) -> impl Iterator<Item = &EntityId> {
        self.controllers.iter()
    }

    pub fn kind_of(&self, entity: &EntityId) -> Option<EntityKind> {
        self.actors_by_id.get(entity).copied()
    }

    pub fn contains(&self, entity: &EntityId) -> bool {
        self.actors.contains(entity)
    }

    pub fn is_controller(&self, entity: &EntityId) -> bool {
        self.controllers.contains(entity)
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::new()
    }
}
