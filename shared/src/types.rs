use std::fmt;

use serde::{Deserialize, Serialize};

pub type CommitSequence = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HostType {
    Server,
    Client,
}

impl HostType {
    pub fn invert(self) -> Self {
        match self {
            HostType::Server => HostType::Client,
            HostType::Client => HostType::Server,
        }
    }

    pub fn is_server(self) -> bool {
        self == HostType::Server
    }

    pub fn name(self) -> &'static str {
        match self {
            HostType::Server => "Server",
            HostType::Client => "Client",
        }
    }
}

// PeerId
/// Unique connection id of a peer within a session.
/// The authoritative server always uses `PeerId::SERVER`.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PeerId(u64);

impl PeerId {
    pub const SERVER: PeerId = PeerId(0);

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn to_u64(&self) -> u64 {
        self.0
    }

    pub fn is_server(&self) -> bool {
        *self == Self::SERVER
    }
}

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_server() {
            write!(f, "peer#server")
        } else {
            write!(f, "peer#{}", self.0)
        }
    }
}
