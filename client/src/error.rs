use thiserror::Error;

use tether_shared::{EntityId, PeerId, PossessionError, SnapshotError, TransportError};

/// Errors surfaced by the Client through `ErrorEvent`, or returned by its
/// request methods
#[derive(Debug, Error)]
pub enum TetherClientError {
    /// Request failed local validation or authorization, nothing was sent
    #[error("Possession request rejected locally: {0}")]
    Rejected(#[source] PossessionError),

    /// A committed ownership value could not be applied
    #[error("Cannot apply ownership of Controller {controller}: {source}")]
    Ownership {
        controller: EntityId,
        #[source]
        source: PossessionError,
    },

    /// A pushed entity state was rejected, the entity was left untouched
    #[error("Cannot apply state of {entity}: {source}")]
    StateApply {
        entity: EntityId,
        #[source]
        source: SnapshotError,
    },

    /// A peer sent a call only Clients may send
    #[error("Unexpected remote call {call} from {peer}")]
    UnexpectedCall { peer: PeerId, call: &'static str },

    #[error(transparent)]
    Transport(#[from] TransportError),
}
