//! Observable holder for the authentication state.
//!
//! One store per view model. Every mutation goes through [`AuthStateStore::update`],
//! which notifies all subscribers, so renderers can react to each field change.

use std::sync::Arc;

use tessera_domain::AuthState;
use tokio::sync::watch;

/// Owned, injectable holder of [`AuthState`] with change notification.
#[derive(Debug, Clone)]
pub struct AuthStateStore {
    sender: Arc<watch::Sender<AuthState>>,
}

impl AuthStateStore {
    /// Creates a store in the initial `Loading` state.
    #[must_use]
    pub fn new() -> Self {
        Self::with_state(AuthState::default())
    }

    /// Creates a store with a given state.
    #[must_use]
    pub fn with_state(state: AuthState) -> Self {
        let (sender, _) = watch::channel(state);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Returns a copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> AuthState {
        self.sender.borrow().clone()
    }

    /// Subscribes to state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.sender.subscribe()
    }

    /// Mutates the state and notifies subscribers.
    pub fn update(&self, mutate: impl FnOnce(&mut AuthState)) {
        self.sender.send_modify(mutate);
    }
}

impl Default for AuthStateStore {
    fn default() -> Self {
        Self::new()
    }
}
