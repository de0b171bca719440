use std::default::Default;

/// Contains Config properties which will be used by a Client
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Determines whether possession requests are validated and authorized
    /// before being sent. The Server re-validates every request regardless.
    pub validate_requests_locally: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            validate_requests_locally: true,
        }
    }
}
