//! Session state store: who is logged in, observable by every consumer.
//!
//! SYSTEM CONTEXT
//! ==============
//! One `SessionStore` exists per application session. It is created once and
//! cloned into every consumer; clones share the same state. Only the auth
//! gateway writes to it (`set_state` is crate-private).
//!
//! DESIGN
//! ======
//! Each subscriber owns an unbounded channel. `subscribe` seeds it with the
//! current state; `set_state` replaces the state and fans the new value out
//! to every live subscriber inside one critical section, so all subscribers
//! observe the same transition order. Closed channels are pruned on the next
//! transition.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc;

use crate::net::types::Identity;

// =============================================================================
// SESSION STATE
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Unauthenticated,
    Authenticated(Identity),
}

impl SessionState {
    #[must_use]
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Authenticated(identity) => Some(identity),
            Self::Unauthenticated => None,
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

// =============================================================================
// STORE
// =============================================================================

#[derive(Default)]
struct StoreInner {
    state: SessionState,
    subscribers: Vec<mpsc::UnboundedSender<SessionState>>,
}

/// Shared handle to the authoritative session state.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<Mutex<StoreInner>>,
}

impl SessionStore {
    /// A fresh store starts `Unauthenticated`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest state. Never waits on the network.
    #[must_use]
    pub fn current_state(&self) -> SessionState {
        self.lock().state.clone()
    }

    #[must_use]
    pub fn current_identity(&self) -> Option<Identity> {
        self.lock().state.identity().cloned()
    }

    /// Register an observer. The first item it yields is the current state.
    #[must_use]
    pub fn subscribe(&self) -> SessionSubscription {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut inner = self.lock();
        // Receiver is alive, so this cannot fail.
        let _ = tx.send(inner.state.clone());
        inner.subscribers.push(tx);
        SessionSubscription { rx }
    }

    /// Number of subscriptions that have not been dropped.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.lock()
            .subscribers
            .iter()
            .filter(|tx| !tx.is_closed())
            .count()
    }

    /// Replace the state and notify every subscriber, in order.
    pub(crate) fn set_state(&self, state: SessionState) {
        let mut inner = self.lock();
        inner.subscribers.retain(|tx| tx.send(state.clone()).is_ok());
        tracing::debug!(
            authenticated = state.is_authenticated(),
            subscribers = inner.subscribers.len(),
            "session state changed"
        );
        inner.state = state;
    }

    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.lock();
        f.debug_struct("SessionStore")
            .field("state", &inner.state)
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}

// =============================================================================
// SUBSCRIPTION
// =============================================================================

/// Ordered stream of session states for one observer.
#[derive(Debug)]
pub struct SessionSubscription {
    rx: mpsc::UnboundedReceiver<SessionState>,
}

impl SessionSubscription {
    /// Wait for the next state. `None` once every store handle is gone.
    pub async fn next(&mut self) -> Option<SessionState> {
        self.rx.recv().await
    }

    /// Next already-delivered state, without waiting.
    pub fn try_next(&mut self) -> Option<SessionState> {
        self.rx.try_recv().ok()
    }
}
