use crate::SessionChange;

use log::debug;
use tokio::sync::broadcast;

const DEFAULT_CAPACITY: usize = 16;

/// Broadcast fan-out for provider session changes.
#[derive(Debug, Clone)]
pub struct SessionChangeFeed {
    sender: broadcast::Sender<SessionChange>,
}

impl SessionChangeFeed {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionChange> {
        self.sender.subscribe()
    }

    /// Publishes a change, returning how many subscribers received it.
    pub fn publish(&self, change: SessionChange) -> usize {
        let event = change.event;
        match self.sender.send(change) {
            Ok(receiver_count) => {
                debug!("Session change {event:?} sent to {receiver_count} subscribers");
                receiver_count
            }
            Err(_) => {
                debug!("Session change {event:?} had no active subscribers");
                0
            }
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for SessionChangeFeed {
    fn default() -> Self {
        Self::new()
    }
}
