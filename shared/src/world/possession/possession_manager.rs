use std::{collections::HashMap, mem};

use log::{debug, info, warn};

use crate::{
    world::{
        entity::{entity_id::EntityId, entity_kind::EntityKind},
        possession::{
            controller::{Controller, PossessionState},
            error::PossessionError,
            possession_event::PossessionEvent,
        },
        registry::entity_registry::EntityRegistry,
        replicated::{
            error::ReplicationError,
            replicated_value::{ValueChange, ValueUpdate},
        },
        world_type::WorldRefType,
    },
    HostType, PeerId,
};

pub type OwnershipUpdate = ValueUpdate<Option<EntityId>>;

/// Runs the possession state machine of one peer.
///
/// Every peer, the Server included, reacts to ownership changes through the
/// same `on_ownership_changed()` handler. Only the Server commits changes,
/// through `commit_ownership()`.
pub struct PossessionManager {
    host_type: HostType,
    local_peer: PeerId,
    controllers: HashMap<EntityId, Controller>,
    // possessed entity -> controller it is delegated to
    authority: HashMap<EntityId, EntityId>,
    events: Vec<PossessionEvent>,
}

impl PossessionManager {
    pub fn new(host_type: HostType, local_peer: PeerId) -> Self {
        Self {
            host_type,
            local_peer,
            controllers: HashMap::new(),
            authority: HashMap::new(),
            events: Vec::new(),
        }
    }

    pub fn host_type(&self) -> HostType {
        self.host_type
    }

    pub fn local_peer(&self) -> PeerId {
        self.local_peer
    }

    // Controllers

    pub fn controller(&self, controller: &EntityId) -> Option<&Controller> {
        self.controllers.get(controller)
    }

    pub fn controller_ids(&self) -> Vec<EntityId> {
        let mut ids: Vec<EntityId> = self.controllers.keys().copied().collect();
        ids.sort();
        ids
    }

    /// Bring the set of Controller records in line with the registry.
    /// Records of despawned Controllers are torn down locally.
    pub fn sync_controllers<W: WorldRefType>(&mut self, world: &W, registry: &EntityRegistry) {
        for controller in registry.controllers() {
            if !self.controllers.contains_key(controller) {
                debug!("tracking new Controller {}", controller);
                self.controllers
                    .insert(*controller, Controller::new(self.host_type, *controller));
            }
        }

        let mut despawned: Vec<EntityId> = self
            .controllers
            .keys()
            .filter(|controller| !world.has_entity(controller))
            .copied()
            .collect();
        despawned.sort();
        for controller in despawned {
            self.release_controller(&controller);
        }
    }

    /// Drop the record of a Controller that no longer exists, detaching from
    /// whatever it possessed
    pub fn release_controller(&mut self, controller: &EntityId) {
        let Some(mut record) = self.controllers.remove(controller) else {
            return;
        };
        debug!("releasing Controller {}", controller);
        if let Some(entity) = record.take_possessed() {
            self.revoke_authority(&entity, controller);
            self.events.push(PossessionEvent::Unpossessed {
                controller: *controller,
                entity,
            });
        }
    }

    fn ensure_controller<W: WorldRefType>(
        &mut self,
        world: &W,
        controller: &EntityId,
    ) -> Result<&mut Controller, PossessionError> {
        if !self.controllers.contains_key(controller) {
            check_controller(world, controller)?;
            debug!("tracking Controller {} ahead of registry poll", controller);
            self.controllers
                .insert(*controller, Controller::new(self.host_type, *controller));
        }
        self.controllers
            .get_mut(controller)
            .ok_or(PossessionError::ControllerNotFound {
                controller: *controller,
                context: "record vanished after insertion",
            })
    }

    // Queries

    pub fn state(&self, controller: &EntityId) -> PossessionState {
        self.controllers
            .get(controller)
            .map(Controller::state)
            .unwrap_or(PossessionState::Idle)
    }

    /// The replicated ownership value of a Controller as this peer knows it
    pub fn ownership_value(&self, controller: &EntityId) -> Option<EntityId> {
        self.controllers
            .get(controller)
            .and_then(|record| *record.ownership().value())
    }

    /// The Controller this peer has delegated authority over `entity` to
    pub fn authority_holder(&self, entity: &EntityId) -> Option<EntityId> {
        self.authority.get(entity).copied()
    }

    /// Whether this peer drives `entity`: its holder Controller belongs to the
    /// local peer (server-owned Controllers belong to the Server)
    pub fn has_local_authority<W: WorldRefType>(&self, world: &W, entity: &EntityId) -> bool {
        let Some(controller) = self.authority.get(entity) else {
            return false;
        };
        match world.entity_owner(controller) {
            Some(owner) => owner == self.local_peer,
            None => self.local_peer.is_server(),
        }
    }

    /// Which Controller's ownership value currently references `entity`
    pub fn holder_of(&self, entity: &EntityId) -> Option<EntityId> {
        let mut holders: Vec<EntityId> = self
            .controllers
            .values()
            .filter(|record| *record.ownership().value() == Some(*entity))
            .map(Controller::id)
            .collect();
        holders.sort();
        holders.into_iter().next()
    }

    // Validation

    /// Liveness and type checks for possessing `entity` with `controller`
    pub fn validate_possess<W: WorldRefType>(
        &self,
        world: &W,
        controller: &EntityId,
        entity: &EntityId,
    ) -> Result<(), PossessionError> {
        check_controller(world, controller)?;
        let Some(kind) = world.entity_kind(entity) else {
            return Err(PossessionError::EntityNotAlive { entity: *entity });
        };
        if !kind.is_possessable() {
            return Err(PossessionError::NotPossessable {
                entity: *entity,
                kind,
            });
        }
        Ok(())
    }

    pub fn validate_unpossess<W: WorldRefType>(
        &self,
        world: &W,
        controller: &EntityId,
    ) -> Result<(), PossessionError> {
        check_controller(world, controller)?;
        if self.ownership_value(controller).is_none() {
            return Err(PossessionError::NotPossessing {
                controller: *controller,
            });
        }
        Ok(())
    }

    /// The Server may always change possession; any other peer only for the
    /// Controllers it owns
    pub fn authorize<W: WorldRefType>(
        &self,
        world: &W,
        requester: &PeerId,
        controller: &EntityId,
    ) -> Result<(), PossessionError> {
        if requester.is_server() {
            return Ok(());
        }
        if world.entity_owner(controller) == Some(*requester) {
            return Ok(());
        }
        Err(PossessionError::Unauthorized {
            peer: *requester,
            controller: *controller,
        })
    }

    // Commits

    /// Write a Controller's authoritative ownership value, Server only.
    ///
    /// When `value` references an entity held by another Controller, that
    /// Controller is written to `None` first, in the same commit. Every change
    /// is applied locally right away and returned in commit order, to be
    /// broadcast to the Clients.
    pub fn commit_ownership<W: WorldRefType>(
        &mut self,
        world: &W,
        controller: &EntityId,
        value: Option<EntityId>,
    ) -> Result<Vec<(EntityId, OwnershipUpdate)>, PossessionError> {
        if !self.host_type.is_server() {
            return Err(ReplicationError::WriteNotPermitted {
                host_type: self.host_type.name(),
                operation: "commit ownership",
            }
            .into());
        }
        self.ensure_controller(world, controller)?;

        let mut committed = Vec::new();

        if let Some(entity) = value {
            if let Some(previous_holder) = self.holder_of(&entity) {
                if previous_holder != *controller {
                    info!(
                        "{} is held by Controller {}, force-unpossessing it for {}",
                        entity, previous_holder, controller
                    );
                    committed.push(self.commit_single(world, &previous_holder, None)?);
                }
            }
        }

        committed.push(self.commit_single(world, controller, value)?);

        Ok(committed.into_iter().flatten().collect())
    }

    fn commit_single<W: WorldRefType>(
        &mut self,
        world: &W,
        controller: &EntityId,
        value: Option<EntityId>,
    ) -> Result<Option<(EntityId, OwnershipUpdate)>, PossessionError> {
        let record = self.ensure_controller(world, controller)?;
        let Some(change) = record.ownership_mut().set(value)? else {
            return Ok(None);
        };
        let update = record.ownership().update();
        info!(
            "committed ownership of Controller {} #{}: {:?} -> {:?}",
            controller, change.sequence, change.previous, change.current
        );

        self.apply_change(world, controller, change);

        Ok(Some((*controller, update)))
    }

    /// Current ownership values of every Controller, for a late joiner
    pub fn replay_updates(&self) -> Vec<(EntityId, OwnershipUpdate)> {
        self.controller_ids()
            .into_iter()
            .filter_map(|controller| {
                self.controllers
                    .get(&controller)
                    .map(|record| (controller, record.ownership().update()))
            })
            .collect()
    }

    // Mirroring

    /// Apply a commit broadcast by the Server
    pub fn receive_update<W: WorldRefType>(
        &mut self,
        world: &W,
        controller: &EntityId,
        update: OwnershipUpdate,
    ) -> Result<(), PossessionError> {
        let record = self.ensure_controller(world, controller)?;
        if let Some(change) = record.ownership_mut().mirror(update)? {
            self.apply_change(world, controller, change);
        }
        Ok(())
    }

    /// Adopt the current value of a Controller once, right after attaching.
    /// A replay of a commit already received as a broadcast fires nothing.
    pub fn receive_replay<W: WorldRefType>(
        &mut self,
        world: &W,
        controller: &EntityId,
        update: OwnershipUpdate,
    ) -> Result<(), PossessionError> {
        let record = self.ensure_controller(world, controller)?;
        if let Some(change) = record.ownership_mut().replay(update)? {
            self.apply_change(world, controller, change);
        }
        Ok(())
    }

    fn apply_change<W: WorldRefType>(
        &mut self,
        world: &W,
        controller: &EntityId,
        change: ValueChange<Option<EntityId>>,
    ) {
        self.on_ownership_changed(world, controller, change.previous, change.current);
    }

    // Reaction

    /// The single reaction to an ownership change, run on every peer.
    ///
    /// Detaches from whatever was possessed, then attaches to `current` if it
    /// resolves to a live entity. Running it again with the value already in
    /// effect yields exactly one detach/attach pair.
    pub fn on_ownership_changed<W: WorldRefType>(
        &mut self,
        world: &W,
        controller: &EntityId,
        previous: Option<EntityId>,
        current: Option<EntityId>,
    ) {
        let Some(record) = self.controllers.get_mut(controller) else {
            warn!(
                "ownership change for unknown Controller {}, ignoring",
                controller
            );
            return;
        };

        // detach
        if let Some(tracked) = record.take_possessed() {
            if self.authority.get(&tracked) == Some(controller) {
                self.authority.remove(&tracked);
            }
            self.events.push(PossessionEvent::Unpossessed {
                controller: *controller,
                entity: tracked,
            });
        } else if let Some(previous) = previous {
            if world.has_entity(&previous) && self.authority.get(&previous) == Some(controller) {
                warn!(
                    "Controller {} was not tracking {} but still held authority over it, revoking",
                    controller, previous
                );
                self.authority.remove(&previous);
            }
        }

        // attach
        let Some(entity) = current else {
            return;
        };
        if !world.has_entity(&entity) {
            debug!(
                "Controller {} references {}, which is not alive here, staying idle",
                controller, entity
            );
            return;
        }

        if let Some(other) = self.authority.get(&entity).copied() {
            if other != *controller {
                warn!(
                    "{} was still attached to Controller {}, detaching it before {} attaches",
                    entity, other, controller
                );
                if let Some(other_record) = self.controllers.get_mut(&other) {
                    if other_record.possessed() == Some(entity) {
                        other_record.take_possessed();
                        self.events.push(PossessionEvent::Unpossessed {
                            controller: other,
                            entity,
                        });
                    }
                }
            }
        }

        let Some(record) = self.controllers.get_mut(controller) else {
            return;
        };
        record.set_possessed(entity);
        self.authority.insert(entity, *controller);
        self.events.push(PossessionEvent::Possessed {
            controller: *controller,
            entity,
        });
    }

    fn revoke_authority(&mut self, entity: &EntityId, controller: &EntityId) {
        if self.authority.get(entity) == Some(controller) {
            self.authority.remove(entity);
        }
    }

    // Events

    pub fn has_events(&self) -> bool {
        !self.events.is_empty()
    }

    pub fn take_events(&mut self) -> Vec<PossessionEvent> {
        mem::take(&mut self.events)
    }
}

fn check_controller<W: WorldRefType>(world: &W, controller: &EntityId) -> Result<(), PossessionError> {
    match world.entity_kind(controller) {
        None => Err(PossessionError::ControllerNotFound {
            controller: *controller,
            context: "controller entity is not alive",
        }),
        Some(EntityKind::Controller) => Ok(()),
        Some(kind) => Err(PossessionError::NotAController {
            entity: *controller,
            kind,
        }),
    }
}
