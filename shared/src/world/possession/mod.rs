pub mod controller;
pub mod error;
pub mod possession_event;
pub mod possession_manager;
