pub mod entity_registry;
pub mod registry_event;
