//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by route guards and user-aware components to coordinate login redirects
//! and identity-dependent rendering. `AuthContext` is provided once at the app
//! root; it owns the `SessionStore` and mirrors every store change into a
//! `RwSignal<AuthState>`.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::Arc;

use careerforge::backend::SimulatedBackend;
use careerforge::store::SubscriptionId;
use careerforge::{AuthConfig, AuthError, Collaborators, Identity, Session, SessionStore};
use leptos::prelude::*;

use crate::util::storage::BrowserStorage;
use crate::util::timer::TimerDelay;

/// Authentication state tracking the current user and loading status.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<Identity>,
    /// True until the persisted session has been restored.
    pub loading: bool,
    /// True while a login/signup/federated call is outstanding.
    pub busy: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self::from_session(&Session::default())
    }
}

impl AuthState {
    #[must_use]
    pub fn from_session(session: &Session) -> Self {
        Self { user: session.identity.clone(), loading: session.is_initializing, busy: session.busy }
    }

    #[must_use]
    pub fn session(&self) -> Session {
        Session { identity: self.user.clone(), is_initializing: self.loading, busy: self.busy }
    }
}

/// Handle to the page's session store plus its reactive mirror.
#[derive(Clone)]
pub struct AuthContext {
    store: Arc<SessionStore>,
    subscription: SubscriptionId,
    pub state: RwSignal<AuthState>,
}

impl AuthContext {
    /// Wrap `store`, keeping `state` in sync with it.
    pub fn new(store: Arc<SessionStore>) -> Self {
        let state = RwSignal::new(AuthState::from_session(&store.current_session()));
        let subscription = store.subscribe(move |session| {
            let _ = state.try_set(AuthState::from_session(session));
        });
        Self { store, subscription, state }
    }

    /// Store backed by `localStorage` and the simulated backend.
    pub fn browser() -> Self {
        let config = AuthConfig::default();
        let backend = SimulatedBackend::new(TimerDelay, &config);
        let store = SessionStore::new(config, Arc::new(BrowserStorage), Collaborators::from_backend(backend));
        Self::new(Arc::new(store))
    }

    /// Provide this context to descendants and detach from the store when
    /// the owning scope is disposed.
    pub fn provide(&self) {
        provide_context(self.clone());
        provide_context(self.state);
        let store = self.store.clone();
        let subscription = self.subscription;
        on_cleanup(move || store.unsubscribe(subscription));
    }

    #[must_use]
    pub fn config(&self) -> &AuthConfig {
        self.store.config()
    }

    #[must_use]
    pub fn session(&self) -> Session {
        self.store.current_session()
    }

    pub fn initialize(&self) {
        self.store.initialize();
    }

    /// # Errors
    ///
    /// See [`SessionStore::login`].
    pub async fn login(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        self.store.login(email, password).await
    }

    /// # Errors
    ///
    /// See [`SessionStore::signup`].
    pub async fn signup(&self, email: &str, password: &str, name: &str) -> Result<Identity, AuthError> {
        self.store.signup(email, password, name).await
    }

    /// # Errors
    ///
    /// See [`SessionStore::login_with_federated_provider`].
    pub async fn login_with_google(&self) -> Result<Identity, AuthError> {
        self.store.login_with_federated_provider().await
    }

    pub fn logout(&self) {
        self.store.logout();
    }

    /// Drop results of in-flight calls, e.g. when the initiating page unmounts.
    pub fn cancel_pending(&self) {
        self.store.cancel_pending();
    }
}
