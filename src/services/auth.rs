//! Auth gateway: the four session operations and their state transitions.
//!
//! DESIGN
//! ======
//! Every operation issues exactly one `AuthApi` call and applies exactly one
//! store update after it settles. Nothing here retries, batches, or cancels.
//!
//! | operation      | success                  | failure                         |
//! |----------------|--------------------------|---------------------------------|
//! | `check_status` | Authenticated / Unauth.  | Unauthenticated, error absorbed |
//! | `login`        | Authenticated            | unchanged, error returned       |
//! | `register`     | Authenticated            | unchanged, error returned       |
//! | `logout`       | Unauthenticated          | Unauthenticated, error returned |
//!
//! TRADE-OFFS
//! ==========
//! `check_status` collapses "not logged in" and "could not tell" into
//! Unauthenticated. Logout clears local state even when the backend call
//! fails, so the client may believe it is logged out while the backend
//! session survives; that case is logged at warn level.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::Arc;

use crate::net::api::{AuthApi, AuthError};
use crate::net::types::{Identity, LoginRequest, RegisterRequest};
use crate::state::session::{SessionState, SessionStore};

/// Sole writer of the session store.
#[derive(Clone)]
pub struct AuthGateway {
    api: Arc<dyn AuthApi>,
    store: SessionStore,
}

impl AuthGateway {
    #[must_use]
    pub fn new(api: Arc<dyn AuthApi>, store: SessionStore) -> Self {
        Self { api, store }
    }

    /// Build the gateway and reconcile the store with the backend once.
    pub async fn connect(api: Arc<dyn AuthApi>, store: SessionStore) -> Self {
        let gateway = Self::new(api, store);
        gateway.check_status().await;
        gateway
    }

    #[must_use]
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Ask the backend whether a session exists. Never fails outwardly.
    pub async fn check_status(&self) -> Option<Identity> {
        match self.api.me().await {
            Ok(Some(identity)) => {
                self.authenticate(&identity);
                Some(identity)
            }
            Ok(None) => {
                self.store.set_state(SessionState::Unauthenticated);
                None
            }
            Err(e) => {
                tracing::debug!(error = %e, "status check failed; treating as no session");
                self.store.set_state(SessionState::Unauthenticated);
                None
            }
        }
    }

    /// Submit credentials. On failure the session state is left as it was.
    ///
    /// # Errors
    ///
    /// Returns the transport error when the backend rejects or cannot be reached.
    pub async fn login(&self, request: LoginRequest) -> Result<Identity, AuthError> {
        let identity = self.api.login(request).await?;
        self.authenticate(&identity);
        Ok(identity)
    }

    /// Create an account. Same contract as [`AuthGateway::login`].
    ///
    /// # Errors
    ///
    /// Returns the transport error when the backend rejects or cannot be reached.
    pub async fn register(&self, request: RegisterRequest) -> Result<Identity, AuthError> {
        let identity = self.api.register(request).await?;
        self.authenticate(&identity);
        Ok(identity)
    }

    /// End the session. Local state is cleared once the call settles, either way.
    ///
    /// # Errors
    ///
    /// Returns the transport error when the backend did not confirm the logout.
    pub async fn logout(&self) -> Result<(), AuthError> {
        let result = self.api.logout().await;
        if let Err(e) = &result {
            tracing::warn!(error = %e, "logout not confirmed by backend; clearing local session anyway");
        }
        self.store.set_state(SessionState::Unauthenticated);
        tracing::info!("session cleared");
        result
    }

    fn authenticate(&self, identity: &Identity) {
        tracing::info!(user_id = identity.id, role = %identity.role, "session authenticated");
        self.store.set_state(SessionState::Authenticated(identity.clone()));
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
