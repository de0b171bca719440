pub mod actor_state;
pub mod entity_state;
pub mod error;
pub mod serialized_object;
