use thiserror::Error;

use crate::CommitSequence;

/// Errors that can occur while writing or mirroring a ReplicatedValue
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplicationError {
    /// Attempted to write a value on a peer that is not authoritative
    #[error("ReplicatedValue can only be written by the Server, attempted {operation} on {host_type}")]
    WriteNotPermitted {
        host_type: &'static str,
        operation: &'static str,
    },

    /// Attempted to apply a remote update on the authoritative peer
    #[error("Server ReplicatedValue should never {operation}")]
    MirrorNotPermitted { operation: &'static str },

    /// A replay arrived carrying an older commit than the one already mirrored
    #[error("Stale ReplicatedValue replay: received sequence {received}, already at {current}")]
    StaleUpdate {
        received: CommitSequence,
        current: CommitSequence,
    },
}
