use std::collections::HashMap;

use log::{info, warn};

use tether_shared::{
    EntityError, EntityId, EntityKind, PeerId, SessionContext, Transform, Transport, WorldMutType,
};

use crate::{
    game_mode::{error::SpawnError, GameModeConfig, SpawnPoints},
    Server, TetherServerError,
};

/// Drives the lifecycle of connecting and disconnecting Clients on the Server:
/// a Controller per Client, an optional default Pawn, and the state push to
/// the new joiner.
pub struct GameMode {
    config: GameModeConfig,
    context: SessionContext,
    spawn_points: SpawnPoints,
    peer_controllers: HashMap<PeerId, Vec<EntityId>>,
}

impl GameMode {
    pub fn new(config: GameModeConfig, context: SessionContext, spawn_points: SpawnPoints) -> Self {
        Self {
            config,
            context,
            spawn_points,
            peer_controllers: HashMap::new(),
        }
    }

    pub fn config(&self) -> &GameModeConfig {
        &self.config
    }

    pub fn spawn_points(&self) -> &SpawnPoints {
        &self.spawn_points
    }

    pub fn spawn_points_mut(&mut self) -> &mut SpawnPoints {
        &mut self.spawn_points
    }

    /// Controllers spawned for `peer` by this GameMode
    pub fn peer_controllers(&self, peer: &PeerId) -> &[EntityId] {
        self.peer_controllers
            .get(peer)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    // Session

    /// Set up a newly connected Client and return its Controller.
    ///
    /// Only failing to spawn the Controller aborts. Trouble placing or
    /// possessing the default Pawn is reported as an `ErrorEvent`, and the
    /// joiner still receives the state of every existing entity.
    pub fn handle_connect<T: Transport, W: WorldMutType>(
        &mut self,
        server: &mut Server<T>,
        world: &mut W,
        peer: &PeerId,
    ) -> Result<EntityId, TetherServerError> {
        let controller = self.spawn_owned(world, EntityKind::Controller, peer)?;
        self.peer_controllers
            .entry(*peer)
            .or_default()
            .push(controller);

        if self.config.spawn_default_pawn {
            self.spawn_default_pawn(server, world, &controller);
        }

        server.refresh_registry(&*world);

        let mut actors: Vec<EntityId> = server
            .registry()
            .actors()
            .filter(|entity| {
                server
                    .registry()
                    .kind_of(entity)
                    .is_some_and(|kind| kind.is_serializable())
            })
            .copied()
            .collect();
        actors.sort();

        for actor in actors {
            if let Err(error) = server.send_state_to_peer(&*world, &actor, peer) {
                warn!("Cannot push state of {} to {}: {}", actor, peer, error);
                server.push_error(error);
            }
        }

        Ok(controller)
    }

    fn spawn_default_pawn<T: Transport, W: WorldMutType>(
        &self,
        server: &mut Server<T>,
        world: &mut W,
        controller: &EntityId,
    ) {
        let pawn = match self.spawn(world, EntityKind::Pawn) {
            Ok(pawn) => pawn,
            Err(error) => {
                warn!("Cannot spawn a Pawn for Controller {}: {}", controller, error);
                server.push_error(error.into());
                return;
            }
        };
        // an unplaced Pawn is still possessed
        if let Err(error) = self.respawn(world, &pawn) {
            warn!("Cannot place {}: {}", pawn, error);
            server.push_error(error.into());
        }
        if let Err(error) = server.possess(&*world, controller, &pawn) {
            warn!("Cannot possess {} with Controller {}: {}", pawn, controller, error);
            server.push_error(error);
        }
    }

    /// Release everything a disconnecting Client controlled.
    ///
    /// Every Controller of the peer is processed even when one of them fails,
    /// failures are reported as `ErrorEvent`s. Returns how many failed.
    pub fn handle_disconnect<T: Transport, W: WorldMutType>(
        &mut self,
        server: &mut Server<T>,
        world: &mut W,
        peer: &PeerId,
    ) -> usize {
        let mut controllers: Vec<EntityId> = world
            .entities()
            .into_iter()
            .filter(|entity| world.entity_kind(entity) == Some(EntityKind::Controller))
            .filter(|entity| world.entity_owner(entity) == Some(*peer))
            .collect();
        controllers.sort();

        let mut failures = 0;
        for controller in &controllers {
            if server.possessed_by(controller).is_some() {
                if let Err(error) = server.unpossess(&*world, controller) {
                    warn!("Cannot release Controller {} of {}: {}", controller, peer, error);
                    server.push_error(error);
                    failures += 1;
                }
            }
            if self.config.despawn_controller_on_disconnect {
                match world.despawn_entity(controller) {
                    Ok(()) => info!("despawned Controller {} of {}", controller, peer),
                    Err(error) => {
                        warn!("Cannot despawn Controller {} of {}: {}", controller, peer, error);
                        server.push_error(SpawnError::from(error).into());
                        failures += 1;
                    }
                }
            }
        }

        self.peer_controllers.remove(peer);
        server.refresh_registry(&*world);
        failures
    }

    // Spawning

    /// Spawn a server-owned entity
    pub fn spawn<W: WorldMutType>(
        &self,
        world: &mut W,
        kind: EntityKind,
    ) -> Result<EntityId, SpawnError> {
        self.check_server("spawn")?;
        let entity = world.spawn_entity(kind, None);
        info!("spawned {} {}", kind.name(), entity);
        Ok(entity)
    }

    /// Spawn a server-owned entity and place it at `transform`
    pub fn spawn_at_location<W: WorldMutType>(
        &self,
        world: &mut W,
        kind: EntityKind,
        transform: Transform,
    ) -> Result<EntityId, SpawnError> {
        let entity = self.spawn(world, kind)?;
        world.set_transform(&entity, transform)?;
        Ok(entity)
    }

    fn spawn_owned<W: WorldMutType>(
        &self,
        world: &mut W,
        kind: EntityKind,
        peer: &PeerId,
    ) -> Result<EntityId, SpawnError> {
        self.check_server("spawn an owned entity")?;
        let entity = world.spawn_entity(kind, Some(*peer));
        info!("spawned {} {} owned by {}", kind.name(), entity, peer);
        Ok(entity)
    }

    /// Place a Pawn at one of the spawn points
    pub fn respawn<W: WorldMutType>(&self, world: &mut W, pawn: &EntityId) -> Result<(), SpawnError> {
        self.check_server("respawn")?;
        match world.entity_kind(pawn) {
            Some(EntityKind::Pawn) => {}
            Some(kind) => return Err(SpawnError::NotAPawn { entity: *pawn, kind }),
            None => {
                return Err(EntityError::EntityNotFound {
                    entity: *pawn,
                    context: "respawn",
                }
                .into())
            }
        }

        let point = self
            .spawn_point()
            .ok_or(SpawnError::NoSpawnPoints { entity: *pawn })?;
        world.set_transform(pawn, point)?;
        Ok(())
    }

    /// Where the next Pawn would be placed
    pub fn spawn_point(&self) -> Option<Transform> {
        self.spawn_points.select()
    }

    fn check_server(&self, operation: &'static str) -> Result<(), SpawnError> {
        if !self.context.host_type().is_server() {
            return Err(SpawnError::NotServer { operation });
        }
        Ok(())
    }
}
