use crate::{
    world::{
        entity::entity_id::EntityId, replicated::replicated_value::ReplicatedValue,
    },
    HostType,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PossessionState {
    Idle,
    Possessed(EntityId),
}

impl PossessionState {
    pub fn possessed(&self) -> Option<EntityId> {
        match self {
            PossessionState::Idle => None,
            PossessionState::Possessed(entity) => Some(*entity),
        }
    }
}

/// Per-peer record of one Controller entity.
///
/// `ownership` is the replicated value, authoritative on the Server and a
/// mirror everywhere else. `possessed` is what this peer has actually attached
/// to, which can lag the value or differ from it when the referenced entity is
/// not alive locally.
pub struct Controller {
    id: EntityId,
    ownership: ReplicatedValue<Option<EntityId>>,
    possessed: Option<EntityId>,
}

impl Controller {
    pub fn new(host_type: HostType, id: EntityId) -> Self {
        Self {
            id,
            ownership: ReplicatedValue::new(host_type),
            possessed: None,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn ownership(&self) -> &ReplicatedValue<Option<EntityId>> {
        &self.ownership
    }

    pub(crate) fn ownership_mut(&mut self) -> &mut ReplicatedValue<Option<EntityId>> {
        &mut self.ownership
    }

    pub fn possessed(&self) -> Option<EntityId> {
        self.possessed
    }

    pub(crate) fn take_possessed(&mut self) -> Option<EntityId> {
        self.possessed.take()
    }

    pub(crate) fn set_possessed(&mut self, entity: EntityId) {
        self.possessed = Some(entity);
    }

    pub fn state(&self) -> PossessionState {
        match self.possessed {
            Some(entity) => PossessionState::Possessed(entity),
            None => PossessionState::Idle,
        }
    }
}
