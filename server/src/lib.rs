//! # Tether Server
//! The authoritative peer of a tether session. It commits every change to
//! the ownership of Controllers, replays current ownership to Clients that
//! join late, and pushes the full state of existing entities to them.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

pub mod shared {
    pub use tether_shared::{
        ChannelServerTransport, EntityId, EntityKind, PeerId, SessionContext, Transform,
        WorldMutType, WorldRefType,
    };
}

mod error;
mod events;
mod game_mode;
mod server;

pub use error::TetherServerError;
pub use events::{ConnectEvent, DisconnectEvent, ErrorEvent, Event, Events};
pub use game_mode::{error::SpawnError, GameMode, GameModeConfig, SpawnPoints};
pub use server::{Server, ServerConfig};
