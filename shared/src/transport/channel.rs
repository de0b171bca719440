use std::collections::BTreeMap;

use flume::{Receiver, Sender, TryRecvError};
use log::{info, warn};

use crate::{
    messages::remote_call::{Recipient, RemoteCall},
    transport::{error::TransportError, Transport, TransportEvent},
    HostType, PeerId,
};

enum ChannelPacket {
    Connect,
    Disconnect,
    Payload(Box<[u8]>),
}

fn encode(call: &RemoteCall) -> Result<Box<[u8]>, TransportError> {
    serde_json::to_vec(call)
        .map(Vec::into_boxed_slice)
        .map_err(|e| TransportError::Encode {
            reason: e.to_string(),
        })
}

fn decode(peer: PeerId, payload: &[u8]) -> Result<RemoteCall, TransportError> {
    serde_json::from_slice(payload).map_err(|e| TransportError::Decode {
        peer,
        reason: e.to_string(),
    })
}

// ChannelServerTransport
/// In-process session: the Server end of a set of unbounded channels.
/// Each connected Client gets its own outgoing channel; all Clients share one
/// incoming channel, which gives the Server a single arrival order.
pub struct ChannelServerTransport {
    incoming_sender: Sender<(PeerId, ChannelPacket)>,
    incoming: Receiver<(PeerId, ChannelPacket)>,
    peers: BTreeMap<PeerId, Sender<ChannelPacket>>,
    next_peer: u64,
}

impl ChannelServerTransport {
    pub fn new() -> Self {
        let (incoming_sender, incoming) = flume::unbounded();
        Self {
            incoming_sender,
            incoming,
            peers: BTreeMap::new(),
            next_peer: 1,
        }
    }

    /// Opens a connection for a new Client. The Server sees it as a
    /// `TransportEvent::Connected` on its next `receive()`.
    pub fn connect(&mut self) -> ChannelClientTransport {
        let peer = PeerId::new(self.next_peer);
        self.next_peer += 1;

        let (outgoing, client_incoming) = flume::unbounded();
        self.peers.insert(peer, outgoing);
        if self.incoming_sender.send((peer, ChannelPacket::Connect)).is_err() {
            warn!("Server channel closed while connecting {}", peer);
        }

        ChannelClientTransport {
            peer,
            outgoing: self.incoming_sender.clone(),
            incoming: client_incoming,
            connected: true,
            announced: false,
        }
    }

    /// Drops the connection to `peer` from the Server side
    pub fn kick(&mut self, peer: &PeerId) -> Result<(), TransportError> {
        if self.peers.remove(peer).is_none() {
            return Err(TransportError::UnknownPeer { peer: *peer });
        }
        info!("kicking {}", peer);
        // queued so the Server handles it in order with everything else
        let _ = self.incoming_sender.send((*peer, ChannelPacket::Disconnect));
        Ok(())
    }

    pub fn connected_peers(&self) -> Vec<PeerId> {
        self.peers.keys().copied().collect()
    }

    fn send_packet(&self, peer: &PeerId, payload: Box<[u8]>) -> Result<(), TransportError> {
        let Some(sender) = self.peers.get(peer) else {
            return Err(TransportError::UnknownPeer { peer: *peer });
        };
        sender
            .send(ChannelPacket::Payload(payload))
            .map_err(|_| TransportError::UnknownPeer { peer: *peer })
    }
}

impl Default for ChannelServerTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for ChannelServerTransport {
    fn host_type(&self) -> HostType {
        HostType::Server
    }

    fn local_peer(&self) -> PeerId {
        PeerId::SERVER
    }

    fn is_connected(&self) -> bool {
        true
    }

    fn send(&mut self, recipient: Recipient, call: &RemoteCall) -> Result<(), TransportError> {
        let payload = encode(call)?;
        match recipient {
            Recipient::Server => Err(TransportError::InvalidRecipient {
                host_type: "Server",
                recipient: "Server",
            }),
            Recipient::Peer(peer) => self.send_packet(&peer, payload),
            Recipient::All => {
                for peer in self.peers.keys() {
                    if let Err(error) = self.send_packet(peer, payload.clone()) {
                        warn!("Server Error: cannot broadcast {} to {}: {}", call.name(), peer, error);
                    }
                }
                Ok(())
            }
        }
    }

    fn receive(&mut self) -> Result<Option<TransportEvent>, TransportError> {
        loop {
            let (peer, packet) = match self.incoming.try_recv() {
                Ok(received) => received,
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => return Ok(None),
            };
            match packet {
                ChannelPacket::Connect => {
                    if self.peers.contains_key(&peer) {
                        return Ok(Some(TransportEvent::Connected(peer)));
                    }
                    // connected and dropped before the Server looked
                }
                ChannelPacket::Disconnect => {
                    self.peers.remove(&peer);
                    return Ok(Some(TransportEvent::Disconnected(peer)));
                }
                ChannelPacket::Payload(payload) => {
                    if !self.peers.contains_key(&peer) {
                        warn!("Server Error: dropping packet from unknown {}", peer);
                        continue;
                    }
                    let call = decode(peer, &payload)?;
                    return Ok(Some(TransportEvent::Call(peer, call)));
                }
            }
        }
    }
}

// ChannelClientTransport
/// The Client end of a `ChannelServerTransport` connection
pub struct ChannelClientTransport {
    peer: PeerId,
    outgoing: Sender<(PeerId, ChannelPacket)>,
    incoming: Receiver<ChannelPacket>,
    connected: bool,
    announced: bool,
}

impl ChannelClientTransport {
    /// Closes the connection from the Client side
    pub fn disconnect(&mut self) {
        if !self.connected {
            return;
        }
        self.connected = false;
        let _ = self.outgoing.send((self.peer, ChannelPacket::Disconnect));
    }
}

impl Transport for ChannelClientTransport {
    fn host_type(&self) -> HostType {
        HostType::Client
    }

    fn local_peer(&self) -> PeerId {
        self.peer
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn send(&mut self, recipient: Recipient, call: &RemoteCall) -> Result<(), TransportError> {
        if recipient != Recipient::Server {
            return Err(TransportError::InvalidRecipient {
                host_type: "Client",
                recipient: "another Client",
            });
        }
        if !self.connected {
            return Err(TransportError::Disconnected {
                operation: "send to the Server",
            });
        }
        let payload = encode(call)?;
        self.outgoing
            .send((self.peer, ChannelPacket::Payload(payload)))
            .map_err(|_| TransportError::Disconnected {
                operation: "send to the Server",
            })
    }

    fn receive(&mut self) -> Result<Option<TransportEvent>, TransportError> {
        if !self.connected {
            return Ok(None);
        }
        if !self.announced {
            self.announced = true;
            return Ok(Some(TransportEvent::Connected(PeerId::SERVER)));
        }
        loop {
            match self.incoming.try_recv() {
                Ok(ChannelPacket::Payload(payload)) => {
                    let call = decode(PeerId::SERVER, &payload)?;
                    return Ok(Some(TransportEvent::Call(PeerId::SERVER, call)));
                }
                Ok(ChannelPacket::Connect) | Ok(ChannelPacket::Disconnect) => continue,
                Err(TryRecvError::Empty) => return Ok(None),
                Err(TryRecvError::Disconnected) => {
                    self.connected = false;
                    return Ok(Some(TransportEvent::Disconnected(PeerId::SERVER)));
                }
            }
        }
    }
}
