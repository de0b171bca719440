//! Property tests: any sequence of Server commits leaves every Client with
//! the Server's ownership values and the same possession history

use std::collections::HashMap;

use proptest::prelude::*;

use tether_server::{GameModeConfig, ServerConfig, TetherServerError};
use tether_shared::{EntityId, EntityKind, PossessionError};
use tether_test::{assert_no_dead_possession, assert_ownership_synced, TestSession};

const CONTROLLERS: usize = 2;
const PAWNS: usize = 3;

#[derive(Clone, Debug)]
enum Op {
    Possess { controller: usize, pawn: usize },
    Unpossess { controller: usize },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..CONTROLLERS, 0..PAWNS).prop_map(|(controller, pawn)| Op::Possess { controller, pawn }),
        (0..CONTROLLERS).prop_map(|controller| Op::Unpossess { controller }),
    ]
}

struct Fixture {
    session: TestSession,
    controllers: Vec<EntityId>,
    pawns: Vec<EntityId>,
}

fn fixture() -> Fixture {
    let mut session = TestSession::with_configs(
        ServerConfig::default(),
        GameModeConfig {
            spawn_default_pawn: false,
            ..Default::default()
        },
    );
    session.connect_client();
    session.connect_client();
    session.settle();

    let mut controllers = Vec::new();
    for _ in 0..CONTROLLERS {
        controllers.push(
            session
                .game_mode
                .spawn(&mut session.server_world, EntityKind::Controller)
                .unwrap(),
        );
    }
    let mut pawns = Vec::new();
    for _ in 0..PAWNS {
        pawns.push(
            session
                .game_mode
                .spawn(&mut session.server_world, EntityKind::Pawn)
                .unwrap(),
        );
    }
    session.settle();
    session.clear_logs();

    Fixture {
        session,
        controllers,
        pawns,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_clients_converge_on_server_ownership(
        ops in prop::collection::vec((op_strategy(), any::<bool>()), 1..24)
    ) {
        let Fixture { mut session, controllers, pawns } = fixture();
        let mut model: HashMap<EntityId, Option<EntityId>> =
            controllers.iter().map(|controller| (*controller, None)).collect();

        for (op, step_after) in ops {
            match op {
                Op::Possess { controller, pawn } => {
                    let (controller, pawn) = (controllers[controller], pawns[pawn]);
                    session.server.possess(&session.server_world, &controller, &pawn).unwrap();
                    for value in model.values_mut() {
                        if *value == Some(pawn) {
                            *value = None;
                        }
                    }
                    model.insert(controller, Some(pawn));
                }
                Op::Unpossess { controller } => {
                    let controller = controllers[controller];
                    let result = session.server.unpossess(&session.server_world, &controller);
                    if model[&controller].is_none() {
                        let rejected = matches!(
                            result,
                            Err(TetherServerError::Possession(PossessionError::NotPossessing { .. }))
                        );
                        prop_assert!(rejected);
                    } else {
                        prop_assert!(result.is_ok());
                        model.insert(controller, None);
                    }
                }
            }
            if step_after {
                session.step();
            }
        }
        session.settle();

        // one Controller per Pawn at most
        let mut held: Vec<EntityId> = model.values().flatten().copied().collect();
        held.sort();
        held.dedup();
        prop_assert_eq!(held.len(), model.values().flatten().count());

        for controller in &controllers {
            prop_assert_eq!(session.server.possessed_by(controller), model[controller]);
            for client in &session.clients {
                assert_ownership_synced!(session.server, client.client, *controller);
                prop_assert_eq!(
                    client.client.possession_state(controller),
                    session.server.possession().state(controller)
                );
            }
        }
        for client in &session.clients {
            prop_assert_eq!(&client.log.possessions, &session.server_log.possessions);
            prop_assert!(client.log.errors.is_empty());
            assert_no_dead_possession!(client.client.possession(), client.world);
        }
        assert_no_dead_possession!(session.server.possession(), session.server_world);
    }
}
