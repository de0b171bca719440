use crate::{
    world::entity::{entity_id::EntityId, entity_kind::EntityKind, error::EntityError, transform::Transform},
    PeerId,
};

/// Read access to the external spawn list of a peer.
/// An entity is alive exactly as long as `has_entity` returns true for it.
pub trait WorldRefType {
    fn has_entity(&self, entity: &EntityId) -> bool;
    /// All currently spawned, network-visible entities
    fn entities(&self) -> Vec<EntityId>;
    fn entity_kind(&self, entity: &EntityId) -> Option<EntityKind>;
    /// The peer this entity belongs to, `None` for server-owned entities
    fn entity_owner(&self, entity: &EntityId) -> Option<PeerId>;
    fn transform(&self, entity: &EntityId) -> Option<Transform>;

    /// Size of the spawn list. Polled every tick, so worlds that can count
    /// without collecting should override it.
    fn entity_count(&self) -> usize {
        self.entities().len()
    }
}

/// Mutable access to the external spawn mechanism of a peer
pub trait WorldMutType: WorldRefType {
    /// Creates a new entity and assigns it a fresh id
    fn spawn_entity(&mut self, kind: EntityKind, owner: Option<PeerId>) -> EntityId;
    /// Mirrors an entity spawned elsewhere, keeping its id
    fn insert_entity(
        &mut self,
        entity: EntityId,
        kind: EntityKind,
        owner: Option<PeerId>,
    ) -> Result<(), EntityError>;
    fn despawn_entity(&mut self, entity: &EntityId) -> Result<(), EntityError>;
    fn set_transform(&mut self, entity: &EntityId, transform: Transform) -> Result<(), EntityError>;
}
