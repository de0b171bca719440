use log::{debug, warn};

use tether_client::{
    Client, ClientConfig, ConnectEvent as ClientConnectEvent,
    DisconnectEvent as ClientDisconnectEvent, ErrorEvent as ClientErrorEvent, StateAppliedEvent,
    TetherClientError,
};
use tether_server::{
    ConnectEvent, DisconnectEvent, ErrorEvent, GameMode, GameModeConfig, Server, ServerConfig,
    SpawnPoints, TetherServerError,
};
use tether_shared::{
    ChannelClientTransport, ChannelServerTransport, EntityId, HostType, PeerId, PossessionEvent,
    RegistryEvent, SessionContext, Transform, Vec3,
};

use crate::TestWorld;

/// Everything a peer reported since its log was last cleared
#[derive(Debug)]
pub struct PeerLog<E> {
    pub possessions: Vec<PossessionEvent>,
    pub registry: Vec<RegistryEvent>,
    pub errors: Vec<E>,
    pub connects: Vec<PeerId>,
    pub disconnects: Vec<PeerId>,
    pub states: Vec<EntityId>,
}

impl<E> PeerLog<E> {
    pub fn new() -> Self {
        Self {
            possessions: Vec::new(),
            registry: Vec::new(),
            errors: Vec::new(),
            connects: Vec::new(),
            disconnects: Vec::new(),
            states: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

pub struct TestClient {
    pub client: Client<ChannelClientTransport>,
    pub world: TestWorld,
    pub log: PeerLog<TetherClientError>,
}

impl TestClient {
    pub fn peer(&self) -> PeerId {
        self.client.local_peer()
    }
}

/// One Server, its GameMode and any number of Clients over in-process
/// channels. Spawns are replicated by copying the Server's spawn list into
/// every Client world between the Server and Client halves of a step.
pub struct TestSession {
    pub server: Server<ChannelServerTransport>,
    pub server_world: TestWorld,
    pub server_log: PeerLog<TetherServerError>,
    pub game_mode: GameMode,
    pub clients: Vec<TestClient>,
    auto_game_mode: bool,
}

impl TestSession {
    pub fn new() -> Self {
        Self::with_configs(ServerConfig::default(), GameModeConfig::default())
    }

    pub fn with_configs(server_config: ServerConfig, game_mode_config: GameModeConfig) -> Self {
        let context = SessionContext::new(HostType::Server);
        let server = Server::new(server_config, context.clone(), ChannelServerTransport::new());

        let mut spawn_points = SpawnPoints::with_seed(7);
        spawn_points.push(Transform::from_position(Vec3::new(10.0, 0.0, -4.5)));
        spawn_points.push(Transform::from_position(Vec3::new(-3.25, 1.0, 8.0)));
        let game_mode = GameMode::new(game_mode_config, context, spawn_points);

        Self {
            server,
            server_world: TestWorld::new(),
            server_log: PeerLog::new(),
            game_mode,
            clients: Vec::new(),
            auto_game_mode: true,
        }
    }

    /// Stop routing connects and disconnects through the GameMode
    pub fn without_game_mode(mut self) -> Self {
        self.auto_game_mode = false;
        self
    }

    // Clients

    pub fn connect_client(&mut self) -> usize {
        self.connect_client_with(ClientConfig::default())
    }

    /// Open a connection for a new Client. Everything already spawned on the
    /// Server shows up in its world with a default transform.
    pub fn connect_client_with(&mut self, config: ClientConfig) -> usize {
        let transport = self.server.transport_mut().connect();
        let mut world = TestWorld::new();
        world.mirror_spawns(&self.server_world, false);

        let client = Client::new(config, SessionContext::new(HostType::Client), transport);
        debug!("test client {} created", client.local_peer());
        self.clients.push(TestClient {
            client,
            world,
            log: PeerLog::new(),
        });
        self.clients.len() - 1
    }

    pub fn disconnect_client(&mut self, index: usize) {
        self.clients[index].client.transport_mut().disconnect();
    }

    pub fn client(&self, index: usize) -> &TestClient {
        &self.clients[index]
    }

    pub fn client_mut(&mut self, index: usize) -> &mut TestClient {
        &mut self.clients[index]
    }

    pub fn peer(&self, index: usize) -> PeerId {
        self.clients[index].peer()
    }

    /// The Controller the GameMode spawned for a Client
    pub fn controller_of(&self, index: usize) -> Option<EntityId> {
        self.game_mode
            .peer_controllers(&self.peer(index))
            .first()
            .copied()
    }

    pub fn clear_logs(&mut self) {
        self.server_log.clear();
        for client in &mut self.clients {
            client.log.clear();
        }
    }

    // Stepping

    /// One round trip: the Server drains and ticks, spawns are replicated,
    /// then every Client drains and ticks
    pub fn step(&mut self) {
        self.server.receive_all(&self.server_world);
        self.collect_server_events();
        self.server.tick(&self.server_world);
        self.collect_server_events();

        for client in &mut self.clients {
            if !client.client.is_connected() {
                continue;
            }
            client.world.mirror_spawns(&self.server_world, true);
        }

        for client in &mut self.clients {
            client.client.receive_all(&mut client.world);
            client.client.tick(&client.world);
            collect_client_events(client);
        }
    }

    pub fn run(&mut self, steps: usize) {
        for _ in 0..steps {
            self.step();
        }
    }

    /// Enough steps for a request to reach the Server and its commit to reach
    /// every Client
    pub fn settle(&mut self) {
        self.run(3);
    }

    fn collect_server_events(&mut self) {
        let mut events = self.server.take_events();

        let connects: Vec<PeerId> = events.read::<ConnectEvent>().collect();
        let disconnects: Vec<PeerId> = events.read::<DisconnectEvent>().collect();
        self.server_log.possessions.extend(events.read::<PossessionEvent>());
        self.server_log.registry.extend(events.read::<RegistryEvent>());
        self.server_log.errors.extend(events.read::<ErrorEvent>());
        drop(events);

        for peer in &connects {
            if self.auto_game_mode {
                if let Err(error) =
                    self.game_mode
                        .handle_connect(&mut self.server, &mut self.server_world, peer)
                {
                    warn!("GameMode failed to set up {}: {}", peer, error);
                }
            }
        }
        for peer in &disconnects {
            if self.auto_game_mode {
                let failures =
                    self.game_mode
                        .handle_disconnect(&mut self.server, &mut self.server_world, peer);
                if failures > 0 {
                    warn!("GameMode failed to tear down {} Controller(s) of {}", failures, peer);
                }
            }
        }
        self.server_log.connects.extend(connects);
        self.server_log.disconnects.extend(disconnects);

        // what the GameMode itself produced
        let mut events = self.server.take_events();
        self.server_log.possessions.extend(events.read::<PossessionEvent>());
        self.server_log.registry.extend(events.read::<RegistryEvent>());
        self.server_log.errors.extend(events.read::<ErrorEvent>());
    }
}

impl Default for TestSession {
    fn default() -> Self {
        Self::new()
    }
}

fn collect_client_events(client: &mut TestClient) {
    let mut events = client.client.take_events();
    let log = &mut client.log;
    log.connects.extend(events.read::<ClientConnectEvent>());
    log.disconnects.extend(events.read::<ClientDisconnectEvent>());
    log.possessions.extend(events.read::<PossessionEvent>());
    log.registry.extend(events.read::<RegistryEvent>());
    log.states.extend(events.read::<StateAppliedEvent>());
    log.errors.extend(events.read::<ClientErrorEvent>());
}
