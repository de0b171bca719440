use log::{error, trace};

/// Events a bus holds before it starts dropping new ones
pub const DEFAULT_BUS_CAPACITY: usize = 1024;

/// Process-wide event channel for consumers decoupled from the peer that
/// produces the events (UI, game rules, tooling).
///
/// The channel is bounded: once `capacity` events are waiting, `publish`
/// drops the newest event until a consumer drains. A bus nobody reads
/// therefore never holds more than `capacity` events.
///
/// Cloning the bus yields another handle onto the same channel.
#[derive(Debug, Clone)]
pub struct EventBus<T: Clone + Send + Sync + 'static> {
    sender: flume::Sender<T>,
    receiver: flume::Receiver<T>,
}

impl<T: Clone + Send + Sync + 'static> EventBus<T> {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_BUS_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, receiver) = flume::bounded(capacity);
        Self { sender, receiver }
    }

    pub fn publish(&self, event: T) {
        trace!("publishing event on bus");
        match self.sender.try_send(event) {
            Ok(()) => {}
            Err(flume::TrySendError::Full(_)) => {
                trace!(
                    "event bus full ({} pending), dropping event",
                    self.receiver.len()
                );
            }
            Err(flume::TrySendError::Disconnected(_)) => {
                error!("Failed to publish event: receiver disconnected.");
            }
        }
    }

    /// A sender other parts of the process can publish through. Sending on
    /// it blocks while the bus is full.
    pub fn sender(&self) -> flume::Sender<T> {
        self.sender.clone()
    }

    pub fn receiver(&self) -> &flume::Receiver<T> {
        &self.receiver
    }

    /// Events waiting to be drained
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }

    /// Takes every event published so far, without blocking
    pub fn drain(&self) -> Vec<T> {
        self.receiver.try_iter().collect()
    }
}

impl<T: Clone + Send + Sync + 'static> Default for EventBus<T> {
    fn default() -> Self {
        Self::new()
    }
}
