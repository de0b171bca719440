pub mod entity_id;
pub mod entity_kind;
pub mod error;
pub mod transform;
