use std::{mem, vec::IntoIter};

use log::warn;

use tether_shared::{PeerId, PossessionEvent, RegistryEvent};

use crate::TetherServerError;

pub struct Events {
    connections: Vec<PeerId>,
    disconnections: Vec<PeerId>,
    possessions: Vec<PossessionEvent>,
    registry: Vec<RegistryEvent>,
    errors: Vec<TetherServerError>,
    empty: bool,
}

impl Events {
    pub(crate) fn new() -> Self {
        Self {
            connections: Vec::new(),
            disconnections: Vec::new(),
            possessions: Vec::new(),
            registry: Vec::new(),
            errors: Vec::new(),
            empty: true,
        }
    }

    // Public

    pub fn is_empty(&self) -> bool {
        self.empty
    }

    pub fn read<V: Event>(&mut self) -> V::Iter {
        V::iter(self)
    }

    pub fn has<V: Event>(&self) -> bool {
        V::has(self)
    }

    // Crate-public

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

    pub(crate) fn push_error(&mut self, error: TetherServerError) {
        self.errors.push(error);
        self.empty = false;
    }
}

impl Drop for Events {
    fn drop(&mut self) {
        if !self.errors.is_empty() {
            warn!("{} server error event(s) dropped without being read", self.errors.len());
        }
    }
}

// Event Trait
pub trait Event {
    type Iter;

    fn iter(events: &mut Events) -> Self::Iter;

    fn has(events: &Events) -> bool;
}

// ConnectEvent
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

// DisconnectEvent
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

// ErrorEvent
pub struct ErrorEvent;
impl Event for ErrorEvent {
    type Iter = IntoIter<TetherServerError>;

    fn iter(events: &mut Events) -> Self::Iter {
        let list = mem::take(&mut events.errors);
        IntoIterator::into_iter(list)
    }

    fn has(events: &Events) -> bool {
        !events.errors.is_empty()
    }
}

// PossessionEvent, in the order the hooks ran
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

// RegistryEvent
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
