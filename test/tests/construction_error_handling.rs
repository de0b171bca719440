//! Construction and GameMode misuse: wrong transport ends, spawning off the
//! Server, and respawning what cannot be respawned

use std::panic::{catch_unwind, AssertUnwindSafe};

use tether_client::{Client, ClientConfig};
use tether_server::{GameMode, GameModeConfig, Server, ServerConfig, SpawnError, SpawnPoints};
use tether_shared::{
    ChannelServerTransport, EntityError, EntityId, EntityKind, HostType, SessionContext, Transform,
    Vec3, WorldRefType,
};
use tether_test::TestWorld;

fn server_game_mode(spawn_points: SpawnPoints) -> GameMode {
    GameMode::new(
        GameModeConfig::default(),
        SessionContext::new(HostType::Server),
        spawn_points,
    )
}

#[test]
fn server_over_client_transport_panics() {
    let mut server_end = ChannelServerTransport::new();
    let client_end = server_end.connect();

    let result = catch_unwind(AssertUnwindSafe(|| {
        Server::new(
            ServerConfig::default(),
            SessionContext::new(HostType::Server),
            client_end,
        )
    }));
    assert!(result.is_err(), "Server::new should panic over a Client transport");
}

#[test]
fn client_over_server_transport_panics() {
    let result = catch_unwind(AssertUnwindSafe(|| {
        Client::new(
            ClientConfig::default(),
            SessionContext::new(HostType::Client),
            ChannelServerTransport::new(),
        )
    }));
    assert!(result.is_err(), "Client::new should panic over a Server transport");
}

#[test]
fn spawning_off_the_server_is_refused() {
    let game_mode = GameMode::new(
        GameModeConfig::default(),
        SessionContext::new(HostType::Client),
        SpawnPoints::new(),
    );
    let mut world = TestWorld::new();

    let result = game_mode.spawn(&mut world, EntityKind::Pawn);

    assert!(matches!(result, Err(SpawnError::NotServer { .. })));
    assert!(world.is_empty());
}

#[test]
fn respawn_without_spawn_points_fails() {
    let game_mode = server_game_mode(SpawnPoints::new());
    let mut world = TestWorld::new();
    let pawn = game_mode.spawn(&mut world, EntityKind::Pawn).unwrap();

    let result = game_mode.respawn(&mut world, &pawn);

    assert_eq!(result, Err(SpawnError::NoSpawnPoints { entity: pawn }));
    assert_eq!(world.transform(&pawn), Some(Transform::default()));
}

#[test]
fn respawn_places_pawn_on_a_spawn_point() {
    let point = Transform::from_position(Vec3::new(4.0, 0.5, -2.0));
    let game_mode = server_game_mode(SpawnPoints::from_points(vec![point]));
    let mut world = TestWorld::new();
    let pawn = game_mode.spawn(&mut world, EntityKind::Pawn).unwrap();

    game_mode.respawn(&mut world, &pawn).unwrap();

    assert_eq!(world.transform(&pawn), Some(point));
}

#[test]
fn respawn_rejects_non_pawns() {
    let point = Transform::from_position(Vec3::new(1.0, 1.0, 1.0));
    let game_mode = server_game_mode(SpawnPoints::from_points(vec![point]));
    let mut world = TestWorld::new();
    let actor = game_mode.spawn(&mut world, EntityKind::Actor).unwrap();

    let result = game_mode.respawn(&mut world, &actor);

    assert_eq!(
        result,
        Err(SpawnError::NotAPawn {
            entity: actor,
            kind: EntityKind::Actor
        })
    );
}

#[test]
fn respawn_of_missing_entity_fails() {
    let point = Transform::from_position(Vec3::new(1.0, 1.0, 1.0));
    let game_mode = server_game_mode(SpawnPoints::from_points(vec![point]));
    let mut world = TestWorld::new();
    let missing = EntityId::from_u64(99);

    let result = game_mode.respawn(&mut world, &missing);

    assert!(matches!(
        result,
        Err(SpawnError::Entity(EntityError::EntityNotFound { entity, .. })) if entity == missing
    ));
}
