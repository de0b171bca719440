use crate::{world::registry::registry_event::RegistryEvent, EventBus, HostType};

/// Session-wide collaborators handed to every peer and to the game mode at
/// construction. There is no global "current session".
#[derive(Clone, Debug)]
pub struct SessionContext {
    host_type: HostType,
    registry_bus: EventBus<RegistryEvent>,
}

impl SessionContext {
    pub fn new(host_type: HostType) -> Self {
        Self {
            host_type,
            registry_bus: EventBus::new(),
        }
    }

    pub fn host_type(&self) -> HostType {
        self.host_type
    }

    /// Channel on which registry structural changes are published
    pub fn registry_bus(&self) -> &EventBus<RegistryEvent> {
        &self.registry_bus
    }
}
