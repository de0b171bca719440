use serde::{Deserialize, Serialize};

use crate::world::entity::transform::{Quat, Transform, Vec3};

/// Full state of an Actor or Pawn, as pushed to late joiners and saved to disk
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ActorState {
    pub position: Vec3,
    pub rotation: Quat,
}

impl From<Transform> for ActorState {
    fn from(transform: Transform) -> Self {
        Self {
            position: transform.position,
            rotation: transform.rotation,
        }
    }
}

impl From<ActorState> for Transform {
    fn from(state: ActorState) -> Self {
        Transform::new(state.position, state.rotation)
    }
}
