/// Assert that a peer's possession manager shows `controller` possessing `entity`
#[macro_export]
macro_rules! assert_possessed {
    ($manager:expr, $controller:expr, $entity:expr) => {
        assert_eq!(
            $manager.state(&$controller),
            $crate::tether_shared::PossessionState::Possessed($entity),
            "Controller {} should possess {}",
            $controller,
            $entity
        );
    };
}

/// Assert that a peer's possession manager shows `controller` possessing nothing
#[macro_export]
macro_rules! assert_idle {
    ($manager:expr, $controller:expr) => {
        assert_eq!(
            $manager.state(&$controller),
            $crate::tether_shared::PossessionState::Idle,
            "Controller {} should be idle",
            $controller
        );
    };
}

/// Assert that no Controller of a peer is attached to an entity missing from its world
#[macro_export]
macro_rules! assert_no_dead_possession {
    ($manager:expr, $world:expr) => {
        for controller in $manager.controller_ids() {
            if let $crate::tether_shared::PossessionState::Possessed(entity) =
                $manager.state(&controller)
            {
                assert!(
                    $crate::tether_shared::WorldRefType::has_entity(&$world, &entity),
                    "Controller {} possesses dead entity {}",
                    controller,
                    entity
                );
            }
        }
    };
}

/// Assert that a peer mirrors the Server's ownership value of `controller`
#[macro_export]
macro_rules! assert_ownership_synced {
    ($server:expr, $client:expr, $controller:expr) => {
        assert_eq!(
            $client.possession().ownership_value(&$controller),
            $server.possession().ownership_value(&$controller),
            "Client ownership of Controller {} diverged from the Server",
            $controller
        );
    };
}
