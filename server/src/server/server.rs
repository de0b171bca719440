use std::{collections::BTreeSet, mem};

use log::{debug, info, trace, warn};

use tether_shared::{
    Controller, EntityId, EntityRegistry, EntityStateRef, OwnershipUpdate, PeerId,
    PossessionError, PossessionManager, Recipient, RemoteCall, SerializedObject, SessionContext,
    Transport, TransportError, TransportEvent, WorldRefType,
};

use crate::{Events, ServerConfig, TetherServerError};

/// The authoritative peer of a session.
///
/// It owns the authoritative copy of every Controller's ownership value, is
/// the only peer that commits changes to them, and runs the same reaction to
/// those changes as every Client does.
pub struct Server<T: Transport> {
    server_config: ServerConfig,
    context: SessionContext,
    transport: T,
    registry: EntityRegistry,
    possession: PossessionManager,
    connected_peers: BTreeSet<PeerId>,
    incoming_events: Events,
}

impl<T: Transport> Server<T> {
    /// Create a new Server
    ///
    /// # Panics
    ///
    /// Panics if `transport` is not the Server end of a session
    pub fn new(server_config: ServerConfig, context: SessionContext, transport: T) -> Self {
        if !transport.is_server() {
            panic!("Server must be created over a Server transport");
        }
        let local_peer = transport.local_peer();

        Self {
            server_config,
            possession: PossessionManager::new(context.host_type(), local_peer),
            context,
            transport,
            registry: EntityRegistry::new(),
            connected_peers: BTreeSet::new(),
            incoming_events: Events::new(),
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.server_config
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    pub fn possession(&self) -> &PossessionManager {
        &self.possession
    }

    pub fn controller(&self, controller: &EntityId) -> Option<&Controller> {
        self.possession.controller(controller)
    }

    /// Current authoritative ownership value of a Controller
    pub fn possessed_by(&self, controller: &EntityId) -> Option<EntityId> {
        self.possession.ownership_value(controller)
    }

    pub fn has_local_authority<W: WorldRefType>(&self, world: &W, entity: &EntityId) -> bool {
        self.possession.has_local_authority(world, entity)
    }

    pub fn connected_peers(&self) -> Vec<PeerId> {
        self.connected_peers.iter().copied().collect()
    }

    pub fn peer_exists(&self, peer: &PeerId) -> bool {
        self.connected_peers.contains(peer)
    }

    // Incoming

    /// Drain everything the transport has queued: connections, disconnections
    /// and possession requests
    pub fn receive_all<W: WorldRefType>(&mut self, world: &W) {
        loop {
            let event = match self.transport.receive() {
                Ok(Some(event)) => event,
                Ok(None) => break,
                Err(error) => {
                    warn!("Server Error: {}", error);
                    let recoverable = matches!(error, TransportError::Decode { .. });
                    self.incoming_events.push_error(error.into());
                    if recoverable {
                        continue;
                    }
                    break;
                }
            };

            match event {
                TransportEvent::Connected(peer) => self.handle_connect(&peer),
                TransportEvent::Disconnected(peer) => self.handle_disconnect(&peer),
                TransportEvent::Call(peer, call) => self.handle_call(world, &peer, call),
            }
        }
    }

    fn handle_connect(&mut self, peer: &PeerId) {
        if !self.connected_peers.insert(*peer) {
            warn!("Server Error: {} connected twice", peer);
            return;
        }
        info!("{} connected", peer);

        let replays = self.possession.replay_updates();
        debug!("replaying {} ownership values to {}", replays.len(), peer);
        for (controller, update) in replays {
            let call = RemoteCall::OwnershipReplay { controller, update };
            self.send(Recipient::Peer(*peer), &call);
        }

        self.incoming_events.push_connection(peer);
    }

    fn handle_disconnect(&mut self, peer: &PeerId) {
        if !self.connected_peers.remove(peer) {
            trace!("ignoring disconnect of unknown {}", peer);
            return;
        }
        info!("{} disconnected", peer);
        self.incoming_events.push_disconnection(peer);
    }

    fn handle_call<W: WorldRefType>(&mut self, world: &W, peer: &PeerId, call: RemoteCall) {
        if !self.connected_peers.contains(peer) {
            warn!("Server Error: {} from unknown {}, dropping", call.name(), peer);
            return;
        }

        let result = match call {
            RemoteCall::RequestPossess { controller, entity } => {
                self.commit_request(world, peer, &controller, Some(entity))
            }
            RemoteCall::RequestUnpossess { controller } => {
                self.commit_request(world, peer, &controller, None)
            }
            other => {
                let error = TetherServerError::UnexpectedCall {
                    peer: *peer,
                    call: other.name(),
                };
                warn!("Server Error: {}", error);
                self.incoming_events.push_error(error);
                return;
            }
        };

        if let Err(source) = result {
            // the requester is not notified, it observes the absence of a change
            let error = TetherServerError::RequestRejected {
                peer: *peer,
                source,
            };
            warn!("{}", error);
            self.incoming_events.push_error(error);
        }
    }

    fn commit_request<W: WorldRefType>(
        &mut self,
        world: &W,
        peer: &PeerId,
        controller: &EntityId,
        value: Option<EntityId>,
    ) -> Result<(), PossessionError> {
        if self.server_config.validate_owner_on_commit {
            self.possession.authorize(world, peer, controller)?;
        }
        match value {
            Some(entity) => self.possession.validate_possess(world, controller, &entity)?,
            None => self.possession.validate_unpossess(world, controller)?,
        }
        let committed = self.possession.commit_ownership(world, controller, value)?;
        self.broadcast(committed);
        Ok(())
    }

    // Possession

    /// Possess `entity` with `controller`, on behalf of the Server.
    ///
    /// If another Controller holds `entity` it is unpossessed in the same
    /// commit, ahead of this one.
    pub fn possess<W: WorldRefType>(
        &mut self,
        world: &W,
        controller: &EntityId,
        entity: &EntityId,
    ) -> Result<(), TetherServerError> {
        self.possession.validate_possess(world, controller, entity)?;
        let committed = self
            .possession
            .commit_ownership(world, controller, Some(*entity))?;
        self.broadcast(committed);
        Ok(())
    }

    /// Release whatever `controller` possesses, on behalf of the Server
    pub fn unpossess<W: WorldRefType>(
        &mut self,
        world: &W,
        controller: &EntityId,
    ) -> Result<(), TetherServerError> {
        self.possession.validate_unpossess(world, controller)?;
        let committed = self.possession.commit_ownership(world, controller, None)?;
        self.broadcast(committed);
        Ok(())
    }

    fn broadcast(&mut self, committed: Vec<(EntityId, OwnershipUpdate)>) {
        for (controller, update) in committed {
            let call = RemoteCall::OwnershipUpdate { controller, update };
            self.send(Recipient::All, &call);
        }
        let events = self.possession.take_events();
        self.incoming_events.push_possessions(events);
    }

    // Snapshots

    /// Serialize the full state of `entity` and send it to `peer` only
    pub fn send_state_to_peer<W: WorldRefType>(
        &mut self,
        world: &W,
        entity: &EntityId,
        peer: &PeerId,
    ) -> Result<(), TetherServerError> {
        if !self.connected_peers.contains(peer) {
            return Err(TransportError::UnknownPeer { peer: *peer }.into());
        }

        let payload = EntityStateRef::new(world, entity)
            .and_then(|state| state.serialize())
            .map_err(|source| TetherServerError::StatePush {
                entity: *entity,
                peer: *peer,
                source,
            })?;

        debug!("sending state of {} to {}", entity, peer);
        let call = RemoteCall::EntityState {
            entity: *entity,
            payload,
        };
        self.transport.send(Recipient::Peer(*peer), &call)?;
        Ok(())
    }

    // Tick

    /// Refresh the registry from the spawn list and publish what changed
    pub fn refresh_registry<W: WorldRefType>(&mut self, world: &W) {
        let changes = self.registry.poll(world);
        for event in changes.events() {
            self.context.registry_bus().publish(event);
            self.incoming_events.push_registry(event);
        }
        self.possession.sync_controllers(world, &self.registry);
        let events = self.possession.take_events();
        self.incoming_events.push_possessions(events);
    }

    /// Per-tick upkeep: refresh the registry and release possessions whose
    /// entity no longer exists
    pub fn tick<W: WorldRefType>(&mut self, world: &W) {
        self.refresh_registry(world);

        for controller in self.possession.controller_ids() {
            let Some(entity) = self.possession.ownership_value(&controller) else {
                continue;
            };
            if world.has_entity(&entity) {
                continue;
            }
            info!(
                "{} possessed by Controller {} despawned, releasing it",
                entity, controller
            );
            match self.possession.commit_ownership(world, &controller, None) {
                Ok(committed) => self.broadcast(committed),
                Err(error) => {
                    warn!("Server Error: {}", error);
                    self.incoming_events.push_error(error.into());
                }
            }
        }
    }

    // Events

    pub fn take_events(&mut self) -> Events {
        mem::replace(&mut self.incoming_events, Events::new())
    }

    pub(crate) fn push_error(&mut self, error: TetherServerError) {
        self.incoming_events.push_error(error);
    }

    fn send(&mut self, recipient: Recipient, call: &RemoteCall) {
        if let Err(error) = self.transport.send(recipient, call) {
            warn!("Server Error: cannot send {}: {}", call.name(), error);
            self.incoming_events.push_error(error.into());
        }
    }
}
