//! Session store: single source of truth for who is signed in.
//!
//! ARCHITECTURE
//! ============
//! The store owns the `Session`, the durable storage handle, and the backing
//! collaborators. Consumers read snapshots through `current_session` or a
//! subscription; only the store's own operations mutate state.
//!
//! CONCURRENCY
//! ===========
//! Every session-mutating call takes a generation ticket before it suspends.
//! `logout`, `cancel_pending`, and any newer mutating call advance the
//! generation, so a completion holding an old ticket is discarded with
//! `AuthError::Superseded` instead of overwriting newer state. The state
//! mutex is never held across an `.await`.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::backend::{CredentialVerifier, FederatedExchange, SignupRegistrar};
use crate::config::AuthConfig;
use crate::error::{AuthError, BackendError};
use crate::identity::Identity;
use crate::session::Session;
use crate::storage::{self, SessionStorage};

type Listener = Arc<dyn Fn(&Session) + Send + Sync>;

/// Handle returned by [`SessionStore::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// The three backing collaborators, shared behind `Arc`s.
#[derive(Clone)]
pub struct Collaborators {
    pub verifier: Arc<dyn CredentialVerifier>,
    pub registrar: Arc<dyn SignupRegistrar>,
    pub federated: Arc<dyn FederatedExchange>,
}

impl Collaborators {
    /// Use one backend for all three roles.
    pub fn from_backend<B>(backend: B) -> Self
    where
        B: CredentialVerifier + SignupRegistrar + FederatedExchange + 'static,
    {
        let backend = Arc::new(backend);
        Self { verifier: backend.clone(), registrar: backend.clone(), federated: backend }
    }
}

struct StoreInner {
    session: Session,
    generation: u64,
    in_flight: usize,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

pub struct SessionStore {
    config: AuthConfig,
    storage: Arc<dyn SessionStorage>,
    collaborators: Collaborators,
    inner: Mutex<StoreInner>,
}

impl SessionStore {
    /// Create a store in the startup state (`is_initializing = true`).
    pub fn new(config: AuthConfig, storage: Arc<dyn SessionStorage>, collaborators: Collaborators) -> Self {
        Self {
            config,
            storage,
            collaborators,
            inner: Mutex::new(StoreInner {
                session: Session::default(),
                generation: 0,
                in_flight: 0,
                listeners: Vec::new(),
                next_subscription: 0,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Snapshot of the current session.
    #[must_use]
    pub fn current_session(&self) -> Session {
        self.lock().session.clone()
    }

    /// Restore any persisted identity. Runs once; later calls return the
    /// current snapshot unchanged.
    ///
    /// Missing, unreadable, or malformed records all restore as signed out.
    pub fn initialize(&self) -> Session {
        {
            let mut inner = self.lock();
            if !inner.session.is_initializing {
                return inner.session.clone();
            }
            let identity = match storage::load_identity(self.storage.as_ref(), &self.config.storage_key) {
                Ok(identity) => identity,
                Err(e) => {
                    tracing::warn!(error = %e, key = %self.config.storage_key, "discarding unreadable session record");
                    None
                }
            };
            tracing::info!(restored = identity.is_some(), "session initialized");
            inner.session.identity = identity;
            inner.session.is_initializing = false;
        }
        self.notify();
        self.current_session()
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// `AuthError::Authentication` when the verifier rejects the credentials,
    /// `AuthError::Superseded` when a newer change made this call stale.
    pub async fn login(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let pending = self.begin();
        let outcome = match self.collaborators.verifier.verify(email, password).await {
            Ok(()) => Identity::from_email(email).map_err(BackendError::from),
            Err(e) => Err(e),
        };
        self.finish(pending, outcome.map_err(AuthError::Authentication), "login")
    }

    /// Create an account with an explicit display name and sign in.
    ///
    /// # Errors
    ///
    /// `AuthError::Signup` when the registrar rejects the request,
    /// `AuthError::Superseded` when a newer change made this call stale.
    pub async fn signup(&self, email: &str, password: &str, name: &str) -> Result<Identity, AuthError> {
        let pending = self.begin();
        let outcome = match self.collaborators.registrar.register(email, password, name).await {
            Ok(()) => Identity::with_name(email, name).map_err(BackendError::from),
            Err(e) => Err(e),
        };
        self.finish(pending, outcome.map_err(AuthError::Signup), "signup")
    }

    /// Sign in through the federated identity provider.
    ///
    /// # Errors
    ///
    /// `AuthError::FederatedLogin` when the exchange fails or returns an
    /// invalid identity, `AuthError::Superseded` when made stale.
    pub async fn login_with_federated_provider(&self) -> Result<Identity, AuthError> {
        let pending = self.begin();
        let outcome = match self.collaborators.federated.exchange().await {
            Ok(identity) => identity.validate().map(|()| identity).map_err(BackendError::from),
            Err(e) => Err(e),
        };
        self.finish(pending, outcome.map_err(AuthError::FederatedLogin), "federated login")
    }

    /// Sign out. Always succeeds, even without a current session.
    pub fn logout(&self) {
        {
            let mut inner = self.lock();
            inner.generation += 1;
            inner.session.identity = None;
        }
        if let Err(e) = storage::clear_identity(self.storage.as_ref(), &self.config.storage_key) {
            tracing::warn!(error = %e, "failed to remove persisted session");
        }
        tracing::info!("logged out");
        self.notify();
    }

    /// Discard the result of every in-flight mutating call.
    pub fn cancel_pending(&self) {
        let mut inner = self.lock();
        inner.generation += 1;
        tracing::debug!(in_flight = inner.in_flight, "cancelled pending session changes");
    }

    /// Register `listener` to run after every session change.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&Session) + Send + Sync + 'static,
    {
        let mut inner = self.lock();
        let id = SubscriptionId(inner.next_subscription);
        inner.next_subscription += 1;
        inner.listeners.push((id, Arc::new(listener)));
        id
    }

    /// Remove a listener. Unknown ids are ignored.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.lock().listeners.retain(|(existing, _)| *existing != id);
    }

    // =========================================================================
    // INTERNALS
    // =========================================================================

    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run listeners on a fresh snapshot with the lock released, so a
    /// listener may read the store again.
    fn notify(&self) {
        let (session, listeners) = {
            let inner = self.lock();
            let listeners: Vec<Listener> = inner.listeners.iter().map(|(_, l)| l.clone()).collect();
            (inner.session.clone(), listeners)
        };
        for listener in listeners {
            listener(&session);
        }
    }

    fn begin(&self) -> Pending<'_> {
        let ticket = {
            let mut inner = self.lock();
            inner.generation += 1;
            inner.in_flight += 1;
            inner.session.busy = true;
            inner.generation
        };
        self.notify();
        Pending { store: self, ticket }
    }

    fn finish(&self, pending: Pending<'_>, outcome: Result<Identity, AuthError>, op: &'static str) -> Result<Identity, AuthError> {
        let result = {
            let mut inner = self.lock();
            if pending.ticket != inner.generation {
                Err(AuthError::Superseded)
            } else {
                if let Ok(identity) = &outcome {
                    inner.session.identity = Some(identity.clone());
                }
                outcome
            }
        };
        match &result {
            Ok(identity) => {
                if let Err(e) = storage::save_identity(self.storage.as_ref(), &self.config.storage_key, identity) {
                    tracing::warn!(error = %e, op, "failed to persist session");
                }
                tracing::info!(op, email = %identity.email, "session established");
            }
            Err(AuthError::Superseded) => tracing::debug!(op, "discarding stale completion"),
            Err(e) => tracing::warn!(op, error = %e, "session change rejected"),
        }
        // Dropping `pending` clears `busy` and notifies listeners.
        drop(pending);
        result
    }
}

/// In-flight marker for one mutating call. Dropping it (completion or an
/// abandoned future) releases the busy flag.
struct Pending<'a> {
    store: &'a SessionStore,
    ticket: u64,
}

impl Drop for Pending<'_> {
    fn drop(&mut self) {
        {
            let mut inner = self.store.lock();
            inner.in_flight = inner.in_flight.saturating_sub(1);
            inner.session.busy = inner.in_flight > 0;
        }
        self.store.notify();
    }
}
