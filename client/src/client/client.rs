use std::mem;

use log::{debug, info, warn};

use tether_shared::{
    Controller, EntityId, EntityRegistry, EntityStateMut, OwnershipUpdate, PeerId,
    PossessionError, PossessionManager, PossessionState, Recipient, RemoteCall, SerializedObject,
    SessionContext, StatePayload, Transport, TransportError, TransportEvent, WorldMutType,
    WorldRefType,
};

use crate::{ClientConfig, Events, TetherClientError};

/// An observing peer of a session.
///
/// It mirrors the ownership values committed by the Server, runs the same
/// reaction to their changes as the Server does, and forwards possession
/// requests for the Controllers it owns.
pub struct Client<T: Transport> {
    client_config: ClientConfig,
    context: SessionContext,
    transport: T,
    registry: EntityRegistry,
    possession: PossessionManager,
    incoming_events: Events,
}

impl<T: Transport> Client<T> {
    /// Create a new Client
    ///
    /// # Panics
    ///
    /// Panics if `transport` is the Server end of a session
    pub fn new(client_config: ClientConfig, context: SessionContext, transport: T) -> Self {
        if transport.is_server() {
            panic!("Client must be created over a Client transport");
        }
        let local_peer = transport.local_peer();

        Self {
            client_config,
            possession: PossessionManager::new(context.host_type(), local_peer),
            context,
            transport,
            registry: EntityRegistry::new(),
            incoming_events: Events::new(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.client_config
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

    pub fn local_peer(&self) -> PeerId {
        self.transport.local_peer()
    }

    pub fn is_connected(&self) -> bool {
        self.transport.is_connected()
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

    pub fn possession_state(&self, controller: &EntityId) -> PossessionState {
        self.possession.state(controller)
    }

    /// Whether this Client is the owning peer of `controller`
    pub fn is_owning_peer<W: WorldRefType>(&self, world: &W, controller: &EntityId) -> bool {
        world.entity_owner(controller) == Some(self.transport.local_peer())
    }

    pub fn has_local_authority<W: WorldRefType>(&self, world: &W, entity: &EntityId) -> bool {
        self.possession.has_local_authority(world, entity)
    }

    // Requests

    /// Ask the Server to possess `entity` with `controller`.
    ///
    /// The outcome is only observed through the resulting ownership change,
    /// a request the Server turns down produces no answer.
    pub fn request_possess<W: WorldRefType>(
        &mut self,
        world: &W,
        controller: &EntityId,
        entity: &EntityId,
    ) -> Result<(), TetherClientError> {
        if self.client_config.validate_requests_locally {
            self.possession
                .validate_possess(world, controller, entity)
                .and_then(|_| self.authorize(world, controller))
                .map_err(|error| self.rejected(error))?;
        }

        let call = RemoteCall::RequestPossess {
            controller: *controller,
            entity: *entity,
        };
        debug!("requesting possession of {} for Controller {}", entity, controller);
        self.transport.send(Recipient::Server, &call)?;
        Ok(())
    }

    /// Ask the Server to release whatever `controller` possesses
    pub fn request_unpossess<W: WorldRefType>(
        &mut self,
        world: &W,
        controller: &EntityId,
    ) -> Result<(), TetherClientError> {
        if self.client_config.validate_requests_locally {
            self.possession
                .validate_unpossess(world, controller)
                .and_then(|_| self.authorize(world, controller))
                .map_err(|error| self.rejected(error))?;
        }

        let call = RemoteCall::RequestUnpossess {
            controller: *controller,
        };
        debug!("requesting release of Controller {}", controller);
        self.transport.send(Recipient::Server, &call)?;
        Ok(())
    }

    fn authorize<W: WorldRefType>(
        &self,
        world: &W,
        controller: &EntityId,
    ) -> Result<(), PossessionError> {
        self.possession
            .authorize(world, &self.transport.local_peer(), controller)
    }

    fn rejected(&self, error: PossessionError) -> TetherClientError {
        warn!("Client Error: {}", error);
        TetherClientError::Rejected(error)
    }

    // Incoming

    /// Drain everything the Server sent: ownership commits and replays, and
    /// pushed entity state
    pub fn receive_all<W: WorldMutType>(&mut self, world: &mut W) {
        loop {
            let event = match self.transport.receive() {
                Ok(Some(event)) => event,
                Ok(None) => break,
                Err(error) => {
                    warn!("Client Error: {}", error);
                    let recoverable = matches!(error, TransportError::Decode { .. });
                    self.incoming_events.push_error(error.into());
                    if recoverable {
                        continue;
                    }
                    break;
                }
            };

            match event {
                TransportEvent::Connected(server) => {
                    info!("connected to {}", server);
                    self.incoming_events.push_connection(&server);
                }
                TransportEvent::Disconnected(server) => {
                    info!("disconnected from {}", server);
                    self.incoming_events.push_disconnection(&server);
                }
                TransportEvent::Call(peer, call) => self.handle_call(world, &peer, call),
            }
        }

        let events = self.possession.take_events();
        self.incoming_events.push_possessions(events);
    }

    fn handle_call<W: WorldMutType>(&mut self, world: &mut W, peer: &PeerId, call: RemoteCall) {
        match call {
            RemoteCall::OwnershipUpdate { controller, update } => {
                self.receive_ownership(&*world, &controller, update, false);
            }
            RemoteCall::OwnershipReplay { controller, update } => {
                self.receive_ownership(&*world, &controller, update, true);
            }
            RemoteCall::EntityState { entity, payload } => {
                self.receive_state(world, &entity, &payload);
            }
            other => {
                let error = TetherClientError::UnexpectedCall {
                    peer: *peer,
                    call: other.name(),
                };
                warn!("Client Error: {}", error);
                self.incoming_events.push_error(error);
            }
        }
    }

    fn receive_ownership<W: WorldRefType>(
        &mut self,
        world: &W,
        controller: &EntityId,
        update: OwnershipUpdate,
        replay: bool,
    ) {
        let result = if replay {
            self.possession.receive_replay(world, controller, update)
        } else {
            self.possession.receive_update(world, controller, update)
        };
        if let Err(source) = result {
            let error = TetherClientError::Ownership {
                controller: *controller,
                source,
            };
            warn!("Client Error: {}", error);
            self.incoming_events.push_error(error);
        }
    }

    fn receive_state<W: WorldMutType>(
        &mut self,
        world: &mut W,
        entity: &EntityId,
        payload: &StatePayload,
    ) {
        let result =
            EntityStateMut::new(world, entity).and_then(|mut state| state.deserialize(payload));
        match result {
            Ok(()) => {
                debug!("applied pushed state of {}", entity);
                self.incoming_events.push_state(entity);
            }
            Err(source) => {
                let error = TetherClientError::StateApply {
                    entity: *entity,
                    source,
                };
                warn!("Client Error: {}", error);
                self.incoming_events.push_error(error);
            }
        }
    }

    // Tick

    /// Refresh the registry from the spawn list, or clear it while
    /// disconnected, and publish what changed
    pub fn tick<W: WorldRefType>(&mut self, world: &W) {
        let changes = if self.transport.is_connected() {
            self.registry.poll(world)
        } else {
            self.registry.poll_detached()
        };
        for event in changes.events() {
            self.context.registry_bus().publish(event);
            self.incoming_events.push_registry(event);
        }

        self.possession.sync_controllers(world, &self.registry);
        let events = self.possession.take_events();
        self.incoming_events.push_possessions(events);
    }

    // Events

    pub fn take_events(&mut self) -> Events {
        mem::replace(&mut self.incoming_events, Events::new())
    }
}
