use std::default::Default;

/// Contains Config properties which will be used by the GameMode
#[derive(Clone, Debug)]
pub struct GameModeConfig {
    /// Determines whether a Pawn is spawned, placed at a spawn point and
    /// possessed for every newly connected Client
    pub spawn_default_pawn: bool,
    /// Determines whether the Controllers of a disconnecting Client are
    /// despawned after being unpossessed
    pub despawn_controller_on_disconnect: bool,
}

impl Default for GameModeConfig {
    fn default() -> Self {
        Self {
            spawn_default_pawn: true,
            despawn_controller_on_disconnect: true,
        }
    }
}
