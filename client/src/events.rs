use std::{mem, vec::IntoIter};

use tether_shared::{EntityId, PeerId, PossessionEvent, RegistryEvent};

use crate::TetherClientError;

pub struct Events {
    connections: Vec<PeerId>,
    disconnections: Vec<PeerId>,
    possessions: Vec<PossessionEvent>,
    registry: Vec<RegistryEvent>,
    states: Vec<EntityId>,
    errors: Vec<TetherClientError>,
    empty: bool,
}

impl Default for Events {
    fn default() -> Self {
        Self::new()
    }
}

impl Events {
    pub(crate) fn new() -> Self {
        Self {
            connections: Vec::new(),
            disconnections: Vec::new(),
            possessions: Vec::new(),
            registry: Vec::new(),
            states: Vec::new(),
            errors: Vec::new(),
            empty: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.empty
    }

    pub fn read<V: Event>(&mut self) -> V::Iter {
        V::iter(self)
    }

    pub fn has<V: Event>(&self) -> bool {
        V::has(self)
    }

    pub(crate) fn push_connection(&mut self, peer: &PeerId) {
        self.connections.push(*peer);
        self.empty = false;
    }

    pub(crate) fn push_disconnection(&mut self, peer: &PeerId) {
        self.disconnections.push(*peer);
        self.empty = false;
    }

    pub(crate) fn push_possessions(&mut self, events: Vec<PossessionEvent>) {
        if events.is_empty() {
            return;
        }
        self.possessions.extend(events);
        self.empty = false;
    }

    pub(crate) fn push_registry(&mut self, event: RegistryEvent) {
        self.registry.push(event);
        self.empty = false;
    }

    pub(crate) fn push_state(&mut self, entity: &EntityId) {
        self.states.push(*entity);
        self.empty = false;
    }

    pub(crate) fn push_error(&mut self, error: TetherClientError) {
        self.errors.push(error);
        self.empty = false;
    }
}

// Event Trait
pub trait Event {
    type Iter;

    fn iter(events: &mut Events) -> Self::Iter;

    fn has(events: &Events) -> bool;
}

// Connect Event, yields the Server's id
pub struct ConnectEvent;
impl Event for ConnectEvent {
    type Iter = IntoIter<PeerId>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = mem::take(&mut events.connections);
        IntoIterator::into_iter(list)
    }

    fn has(events: &Events) -> bool {
        !events.connections.is_empty()
    }
}

// Disconnect Event
pub struct DisconnectEvent;
impl Event for DisconnectEvent {
    type Iter = IntoIter<PeerId>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = mem::take(&mut events.disconnections);
        IntoIterator::into_iter(list)
    }

    fn has(events: &Events) -> bool {
        !events.disconnections.is_empty()
    }
}

// State Applied Event, an entity whose pushed state was applied
pub struct StateAppliedEvent;
impl Event for StateAppliedEvent {
    type Iter = IntoIter<EntityId>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = mem::take(&mut events.states);
        IntoIterator::into_iter(list)
    }

    fn has(events: &Events) -> bool {
        !events.states.is_empty()
    }
}

// Error Event
pub struct ErrorEvent;
impl Event for ErrorEvent {
    type Iter = IntoIter<TetherClientError>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = mem::take(&mut events.errors);
        IntoIterator::into_iter(list)
    }

    fn has(events: &Events) -> bool {
        !events.errors.is_empty()
    }
}

impl Event for PossessionEvent {
    type Iter = IntoIter<PossessionEvent>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = mem::take(&mut events.possessions);
        IntoIterator::into_iter(list)
    }

    fn has(events: &Events) -> bool {
        !events.possessions.is_empty()
    }
}

impl Event for RegistryEvent {
    type Iter = IntoIter<RegistryEvent>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = mem::take(&mut events.registry);
        IntoIterator::into_iter(list)
    }

    fn has(events: &Events) -> bool {
        !events.registry.is_empty()
    }
}
