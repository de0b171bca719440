use log::warn;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::world::snapshot::error::SnapshotError;

/// Opaque serialized state of one entity
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatePayload(String);

impl StatePayload {
    pub fn new(data: String) -> Self {
        Self(data)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Anything whose full state can be captured and restored.
///
/// The same accessor pair serves late-join synchronization and persistence.
/// Implementors must make `set_state(get_state()?)` a no-op on a quiescent object.
pub trait SerializedObject {
    type State: Serialize + DeserializeOwned;

    fn get_state(&self) -> Result<Self::State, SnapshotError>;

    fn set_state(&mut self, state: Self::State) -> Result<(), SnapshotError>;

    fn serialize(&self) -> Result<StatePayload, SnapshotError> {
        let state = self.get_state()?;
        let data = serde_json::to_string(&state).map_err(|e| SnapshotError::EncodeFailed {
            reason: e.to_string(),
        })?;
        Ok(StatePayload::new(data))
    }

    /// Decode and apply a payload. A payload that fails to decode is rejected
    /// as a whole and leaves the object untouched.
    fn deserialize(&mut self, payload: &StatePayload) -> Result<(), SnapshotError> {
        if payload.is_empty() {
            warn!("Serialized data is empty.");
            return Err(SnapshotError::EmptyPayload);
        }

        let state: Self::State = serde_json::from_str(payload.as_str()).map_err(|e| {
            warn!("Failed to deserialize data: {e}");
            SnapshotError::MalformedPayload {
                reason: e.to_string(),
            }
        })?;

        self.set_state(state)
    }
}
