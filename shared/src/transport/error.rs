use thiserror::Error;

use crate::PeerId;

/// Errors that can occur while moving remote calls between peers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The session is not connected
    #[error("Transport is not connected, cannot {operation}")]
    Disconnected { operation: &'static str },

    /// Target peer is not connected
    #[error("Peer {peer} is not connected")]
    UnknownPeer { peer: PeerId },

    /// Recipient cannot be addressed from this side of the session
    #[error("{host_type} cannot send to recipient {recipient}")]
    InvalidRecipient {
        host_type: &'static str,
        recipient: &'static str,
    },

    /// Remote call could not be encoded
    #[error("Failed to encode remote call: {reason}")]
    Encode { reason: String },

    /// Incoming packet could not be decoded into a remote call
    #[error("Failed to decode remote call from {peer}: {reason}")]
    Decode { peer: PeerId, reason: String },
}
