use std::default::Default;

/// Contains Config properties which will be used by the Server
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Determines whether a Client's possession request is re-checked against
    /// the Controller's owning peer before it is committed. Clients already
    /// check this locally, this guards against Clients that do not.
    pub validate_owner_on_commit: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            validate_owner_on_commit: true,
        }
    }
}
