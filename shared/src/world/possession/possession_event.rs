use crate::world::entity::entity_id::EntityId;

/// Lifecycle hooks of the possession protocol, in the order a peer ran them
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PossessionEvent {
    Possessed { controller: EntityId, entity: EntityId },
    Unpossessed { controller: EntityId, entity: EntityId },
}

impl PossessionEvent {
    pub fn controller(&self) -> EntityId {
        match self {
            PossessionEvent::Possessed { controller, .. }
            | PossessionEvent::Unpossessed { controller, .. } => *controller,
        }
    }

    pub fn entity(&self) -> EntityId {
        match self {
            PossessionEvent::Possessed { entity, .. }
            | PossessionEvent::Unpossessed { entity, .. } => *entity,
        }
    }

    pub fn is_possess(&self) -> bool {
        matches!(self, PossessionEvent::Possessed { .. })
    }
}
