use std::mem;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::{world::replicated::error::ReplicationError, CommitSequence, HostType};

/// Wire form of a committed value
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueUpdate<T> {
    pub sequence: CommitSequence,
    pub value: T,
}

/// A `(previous, current)` transition observed by a peer
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValueChange<T> {
    pub previous: T,
    pub current: T,
    pub sequence: CommitSequence,
}

/// A value that only the Server may write and every peer may read.
///
/// The Server commits writes with `set()`, which stamps each commit with a
/// strictly increasing sequence number. Clients apply broadcast commits with
/// `mirror()`, and a Client attaching after the value was set adopts the
/// current value once through `replay()`.
#[derive(Clone, Debug)]
pub struct ReplicatedValue<T: Clone + PartialEq + Default> {
    host_type: HostType,
    value: T,
    // 0 means nothing was ever committed or mirrored
    sequence: CommitSequence,
}

impl<T: Clone + PartialEq + Default> ReplicatedValue<T> {
    pub fn new(host_type: HostType) -> Self {
        Self {
            host_type,
            value: T::default(),
            sequence: 0,
        }
    }

    pub fn host_type(&self) -> HostType {
        self.host_type
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    /// Sequence number of the last commit this peer knows about
    pub fn sequence(&self) -> CommitSequence {
        self.sequence
    }

    /// The current value, as sent over the wire
    pub fn update(&self) -> ValueUpdate<T> {
        ValueUpdate {
            sequence: self.sequence,
            value: self.value.clone(),
        }
    }

    /// Commit a new value on the Server.
    ///
    /// Returns `Ok(None)` if `value` is already in effect, as that is not a
    /// commit and must not notify anyone.
    pub fn set(&mut self, value: T) -> Result<Option<ValueChange<T>>, ReplicationError> {
        if self.host_type != HostType::Server {
            return Err(ReplicationError::WriteNotPermitted {
                host_type: self.host_type.name(),
                operation: "set()",
            });
        }
        if self.value == value {
            trace!("ReplicatedValue write skipped, value already in effect");
            return Ok(None);
        }

        self.sequence += 1;
        let previous = mem::replace(&mut self.value, value);

        Ok(Some(ValueChange {
            previous,
            current: self.value.clone(),
            sequence: self.sequence,
        }))
    }

    /// Apply a commit broadcast by the Server.
    ///
    /// Commits that are not newer than the last applied one are redeliveries
    /// and are dropped with `Ok(None)`.
    pub fn mirror(&mut self, update: ValueUpdate<T>) -> Result<Option<ValueChange<T>>, ReplicationError> {
        if self.host_type == HostType::Server {
            return Err(ReplicationError::MirrorNotPermitted {
                operation: "mirror a remote update",
            });
        }
        if update.sequence <= self.sequence {
            trace!(
                "dropping redelivered commit {} (mirror is at {})",
                update.sequence,
                self.sequence
            );
            return Ok(None);
        }
        if update.sequence > self.sequence + 1 && self.sequence != 0 {
            debug!(
                "ReplicatedValue skipped from commit {} to {}",
                self.sequence, update.sequence
            );
        }

        self.sequence = update.sequence;
        let previous = mem::replace(&mut self.value, update.value);

        Ok(Some(ValueChange {
            previous,
            current: self.value.clone(),
            sequence: self.sequence,
        }))
    }

    /// Adopt the current value on a Client that attached after it was set.
    ///
    /// The returned change always reads `(default, current)`: the Client did not
    /// witness any of the earlier transitions. A replay of the commit already
    /// mirrored was witnessed as a broadcast and yields `Ok(None)`.
    pub fn replay(
        &mut self,
        update: ValueUpdate<T>,
    ) -> Result<Option<ValueChange<T>>, ReplicationError> {
        if self.host_type == HostType::Server {
            return Err(ReplicationError::MirrorNotPermitted {
                operation: "replay a remote value",
            });
        }
        if update.sequence < self.sequence {
            return Err(ReplicationError::StaleUpdate {
                received: update.sequence,
                current: self.sequence,
            });
        }
        if self.sequence != 0 && update.sequence == self.sequence {
            trace!("dropping replay of commit {}, already mirrored", update.sequence);
            return Ok(None);
        }

        self.sequence = update.sequence;
        self.value = update.value;

        Ok(Some(ValueChange {
            previous: T::default(),
            current: self.value.clone(),
            sequence: self.sequence,
        }))
    }
}
