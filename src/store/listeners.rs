//! Listener registry
//!
//! Tracks everything observing the theme store. Two flavors:
//! - synchronous listeners, called in registration order right after each
//!   transition with that transition's snapshot
//! - a tokio broadcast channel for async consumers; slow receivers lag and
//!   skip intermediate states, keeping only the latest

use tokio::sync::broadcast;
use uuid::Uuid;

use super::engine::ThemeState;

/// Unique identifier for a registered listener
pub type ListenerId = String;

/// Default capacity of the broadcast channel
pub const DEFAULT_BROADCAST_CAPACITY: usize = 64;

/// Observer of store transitions
///
/// Called on the mutating thread with the transition's snapshot.
/// Calls back into the notifying store are refused.
pub trait StateListener: Send {
    fn on_state(&mut self, state: &ThemeState);
}

impl<F> StateListener for F
where
    F: FnMut(&ThemeState) + Send,
{
    fn on_state(&mut self, state: &ThemeState) {
        self(state)
    }
}

/// Registered listeners plus the broadcast channel
pub struct ListenerRegistry {
    listeners: Vec<(ListenerId, Box<dyn StateListener>)>,
    broadcast_tx: broadcast::Sender<ThemeState>,
}

impl Default for ListenerRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_BROADCAST_CAPACITY)
    }
}

impl ListenerRegistry {
    pub fn new(broadcast_capacity: usize) -> Self {
        let (broadcast_tx, _) = broadcast::channel(broadcast_capacity.max(1));

        Self {
            listeners: Vec::new(),
            broadcast_tx,
        }
    }

    /// Register a listener, returning its ID
    pub fn register(&mut self, listener: Box<dyn StateListener>) -> ListenerId {
        let id = Uuid::new_v4().to_string();
        self.listeners.push((id.clone(), listener));

        tracing::debug!(listener_id = %id, "Theme listener registered");
        id
    }

    /// Remove a listener; returns false if the ID was unknown
    pub fn unregister(&mut self, id: &str) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| existing != id);
        let removed = self.listeners.len() != before;

        if removed {
            tracing::debug!(listener_id = %id, "Theme listener removed");
        }
        removed
    }

    /// Handle on the broadcast channel
    pub fn sender(&self) -> broadcast::Sender<ThemeState> {
        self.broadcast_tx.clone()
    }

    /// Open a new broadcast receiver
    pub fn subscribe(&self) -> broadcast::Receiver<ThemeState> {
        self.broadcast_tx.subscribe()
    }

    /// Deliver a snapshot to every listener and broadcast receiver
    pub fn notify(&mut self, state: &ThemeState) {
        for (_, listener) in self.listeners.iter_mut() {
            listener.on_state(state);
        }

        // No receivers is not an error
        let _ = self.broadcast_tx.send(state.clone());

        tracing::trace!(
            revision = state.revision,
            listeners = self.listeners.len(),
            "Theme state delivered"
        );
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}
