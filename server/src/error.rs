use thiserror::Error;

use tether_shared::{EntityId, PeerId, PossessionError, SnapshotError, TransportError};

use crate::game_mode::error::SpawnError;

/// Errors surfaced by the Server through `ErrorEvent`
#[derive(Debug, Error)]
pub enum TetherServerError {
    /// A Client request failed validation or authorization and was dropped.
    /// The requester is not told.
    #[error("Rejected possession request from {peer}: {source}")]
    RequestRejected {
        peer: PeerId,
        #[source]
        source: PossessionError,
    },

    /// A Client sent a call only the Server may send
    #[error("Unexpected remote call {call} from {peer}")]
    UnexpectedCall { peer: PeerId, call: &'static str },

    /// State of an entity could not be pushed to a peer
    #[error("Failed to send state of {entity} to {peer}: {source}")]
    StatePush {
        entity: EntityId,
        peer: PeerId,
        #[source]
        source: SnapshotError,
    },

    #[error(transparent)]
    Possession(#[from] PossessionError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Spawn(#[from] SpawnError),
}
