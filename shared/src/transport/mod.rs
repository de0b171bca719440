pub mod channel;
pub mod error;

use crate::{
    messages::remote_call::{Recipient, RemoteCall},
    transport::error::TransportError,
    HostType, PeerId,
};

/// What the session layer hands to a peer, in delivery order
#[derive(Clone, Debug, PartialEq)]
pub enum TransportEvent {
    Connected(PeerId),
    Disconnected(PeerId),
    Call(PeerId, RemoteCall),
}

/// Session layer contract.
///
/// Remote calls are delivered at least once per session and in order per
/// sender. `receive()` never blocks, it returns `Ok(None)` once nothing is queued.
pub trait Transport {
    fn host_type(&self) -> HostType;

    fn local_peer(&self) -> PeerId;

    fn is_connected(&self) -> bool;

    fn send(&mut self, recipient: Recipient, call: &RemoteCall) -> Result<(), TransportError>;

    fn receive(&mut self) -> Result<Option<TransportEvent>, TransportError>;

    fn is_server(&self) -> bool {
        self.host_type().is_server()
    }
}
