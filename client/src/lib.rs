//! # Tether Client
//! An observing peer of a tether session. It forwards possession requests for
//! the Controllers it owns, mirrors the ownership values the Server commits
//! and applies the entity state the Server pushes when it joins.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

pub mod shared {
    pub use tether_shared::{
        ChannelClientTransport, EntityId, EntityKind, PeerId, SessionContext, Transform,
        WorldMutType, WorldRefType,
    };
}

mod client;
mod error;
mod events;

pub use client::{Client, ClientConfig};
pub use error::TetherClientError;
pub use events::{ConnectEvent, DisconnectEvent, ErrorEvent, Event, Events, StateAppliedEvent};
