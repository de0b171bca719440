pub mod entity;
pub mod possession;
pub mod registry;
pub mod replicated;
pub mod snapshot;
pub mod world_type;
