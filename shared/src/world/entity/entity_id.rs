use std::fmt;

use log::warn;
use serde::{Deserialize, Serialize};

// EntityId
/// Process-wide unique identity of a networked entity.
/// Ids are allocated by the spawn mechanism and never reused.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(u64);

impl EntityId {
    pub fn to_u64(&self) -> u64 {
        self.0
    }

    pub fn from_u64(value: u64) -> Self {
        EntityId(value)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entity#{}", self.0)
    }
}

// EntityIdGenerator
/// Hands out strictly increasing ids, so a despawned id is never resurrected.
/// The id space ends at `u64::MAX`: once that id is handed out or observed,
/// the generator is exhausted and keeps returning it.
pub struct EntityIdGenerator {
    next: u64,
}

impl EntityIdGenerator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn generate(&mut self) -> EntityId {
        if self.is_exhausted() {
            warn!("entity id space exhausted, handing out {}", EntityId(u64::MAX));
            return EntityId(u64::MAX);
        }
        let id = EntityId(self.next);
        self.next += 1;
        id
    }

    pub fn is_exhausted(&self) -> bool {
        self.next == u64::MAX
    }

    /// Makes sure ids generated from now on are greater than `entity`.
    /// Used when an entity with a foreign id is inserted into a local world.
    pub fn observe(&mut self, entity: &EntityId) {
        if entity.0 >= self.next {
            self.next = entity.0.saturating_add(1);
        }
    }
}

impl Default for EntityIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
