pub mod error;
pub mod replicated_value;
