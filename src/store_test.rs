use super::*;
use crate::backend::{NoDelay, RejectingBackend, SimulatedBackend};
use crate::error::IdentityError;
use crate::identity::avatar_for_seed;
use crate::storage::{DEFAULT_STORAGE_KEY, MemoryStorage};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Semaphore;

// =========================================================================
// Helpers
// =========================================================================

fn simulated() -> Collaborators {
    Collaborators::from_backend(SimulatedBackend::new(NoDelay, &AuthConfig::default()))
}

fn store_over(storage: &MemoryStorage, collaborators: Collaborators) -> SessionStore {
    SessionStore::new(AuthConfig::default(), Arc::new(storage.clone()), collaborators)
}

fn ready_store(storage: &MemoryStorage) -> SessionStore {
    let store = store_over(storage, simulated());
    store.initialize();
    store
}

/// Backend whose calls block until the test adds permits to `gate`.
struct GatedBackend {
    gate: Arc<Semaphore>,
}

impl GatedBackend {
    async fn pass(&self) -> Result<(), BackendError> {
        let permit = self
            .gate
            .acquire()
            .await
            .map_err(|e| BackendError::Rejected(e.to_string()))?;
        permit.forget();
        Ok(())
    }
}

#[async_trait::async_trait(?Send)]
impl CredentialVerifier for GatedBackend {
    async fn verify(&self, _email: &str, _password: &str) -> Result<(), BackendError> {
        self.pass().await
    }
}

#[async_trait::async_trait(?Send)]
impl SignupRegistrar for GatedBackend {
    async fn register(&self, _email: &str, _password: &str, _name: &str) -> Result<(), BackendError> {
        self.pass().await
    }
}

#[async_trait::async_trait(?Send)]
impl FederatedExchange for GatedBackend {
    async fn exchange(&self) -> Result<Identity, BackendError> {
        self.pass().await?;
        Ok(Identity::federated_placeholder())
    }
}

fn gated_store(storage: &MemoryStorage) -> (SessionStore, Arc<Semaphore>) {
    let gate = Arc::new(Semaphore::new(0));
    let store = store_over(storage, Collaborators::from_backend(GatedBackend { gate: gate.clone() }));
    store.initialize();
    (store, gate)
}

// =========================================================================
// initialize
// =========================================================================

#[test]
fn new_store_is_initializing_without_identity() {
    let store = store_over(&MemoryStorage::new(), simulated());
    let session = store.current_session();
    assert!(session.is_initializing);
    assert!(session.identity.is_none());
}

#[test]
fn initialize_without_record_is_anonymous_for_any_call_count() {
    let store = store_over(&MemoryStorage::new(), simulated());
    for _ in 0..3 {
        let session = store.initialize();
        assert!(!session.is_initializing);
        assert!(session.identity.is_none());
    }
}

#[test]
fn initialize_discards_non_json_record() {
    let storage = MemoryStorage::new();
    storage.set_item(DEFAULT_STORAGE_KEY, "{oops").unwrap();
    let session = store_over(&storage, simulated()).initialize();
    assert!(!session.is_initializing);
    assert!(session.identity.is_none());
}

#[test]
fn initialize_discards_record_with_empty_name() {
    let storage = MemoryStorage::new();
    storage
        .set_item(DEFAULT_STORAGE_KEY, r#"{"id":"1","email":"a@b.c","name":""}"#)
        .unwrap();
    assert!(store_over(&storage, simulated()).initialize().identity.is_none());
}

#[test]
fn initialize_restores_well_formed_record() {
    let storage = MemoryStorage::new();
    let identity = Identity::from_email("ada@example.com").unwrap();
    storage::save_identity(&storage, DEFAULT_STORAGE_KEY, &identity).unwrap();
    assert_eq!(store_over(&storage, simulated()).initialize().identity, Some(identity));
}

#[test]
fn initialize_runs_only_once() {
    let storage = MemoryStorage::new();
    let store = store_over(&storage, simulated());
    store.initialize();
    storage::save_identity(&storage, DEFAULT_STORAGE_KEY, &Identity::from_email("late@example.com").unwrap())
        .unwrap();
    assert!(store.initialize().identity.is_none());
}

#[test]
fn initialize_notifies_subscribers() {
    let store = store_over(&MemoryStorage::new(), simulated());
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    store.subscribe(move |session| sink.lock().unwrap().push(session.is_initializing));
    store.initialize();
    store.initialize();
    assert_eq!(*seen.lock().unwrap(), vec![false]);
}

// =========================================================================
// login / signup / federated
// =========================================================================

#[tokio::test]
async fn login_derives_identity_from_email() {
    let store = ready_store(&MemoryStorage::new());
    let identity = store.login("ada@example.com", "anything").await.unwrap();
    assert_eq!(identity.email, "ada@example.com");
    assert_eq!(identity.name, "ada");
    assert_eq!(identity.avatar, Some(avatar_for_seed("ada@example.com")));
    assert_eq!(store.current_session().identity, Some(identity));
}

#[tokio::test]
async fn signup_uses_explicit_name() {
    let store = ready_store(&MemoryStorage::new());
    store.signup("grace@example.com", "x", "Grace Hopper").await.unwrap();
    let identity = store.current_session().identity.unwrap();
    assert_eq!(identity.name, "Grace Hopper");
    assert_eq!(identity.email, "grace@example.com");
}

#[tokio::test]
async fn federated_login_sets_placeholder_identity() {
    let store = ready_store(&MemoryStorage::new());
    store.login_with_federated_provider().await.unwrap();
    assert_eq!(store.current_session().identity, Some(Identity::federated_placeholder()));
}

#[tokio::test]
async fn login_persists_across_reload() {
    let storage = MemoryStorage::new();
    let identity = ready_store(&storage).login("ada@example.com", "pw").await.unwrap();
    let reloaded = store_over(&storage, simulated()).initialize();
    assert_eq!(reloaded.identity, Some(identity));
}

#[tokio::test]
async fn signup_persists_across_reload() {
    let storage = MemoryStorage::new();
    let identity = ready_store(&storage).signup("grace@example.com", "x", "Grace Hopper").await.unwrap();
    assert_eq!(store_over(&storage, simulated()).initialize().identity, Some(identity));
}

#[tokio::test]
async fn rejected_login_surfaces_authentication_error() {
    let store = store_over(&MemoryStorage::new(), Collaborators::from_backend(RejectingBackend::new("bad password")));
    store.initialize();
    let err = store.login("ada@example.com", "wrong").await.unwrap_err();
    assert_eq!(err, AuthError::Authentication(BackendError::Rejected("bad password".to_owned())));
    assert!(store.current_session().identity.is_none());
}

#[tokio::test]
async fn rejected_signup_and_federated_use_their_own_errors() {
    let store = store_over(&MemoryStorage::new(), Collaborators::from_backend(RejectingBackend::new("down")));
    store.initialize();
    assert!(matches!(store.signup("a@b.c", "p", "A").await, Err(AuthError::Signup(_))));
    assert!(matches!(store.login_with_federated_provider().await, Err(AuthError::FederatedLogin(_))));
}

#[tokio::test]
async fn failed_login_keeps_existing_identity() {
    let storage = MemoryStorage::new();
    let rejecting = Arc::new(RejectingBackend::new("nope"));
    let simulated = Arc::new(SimulatedBackend::new(NoDelay, &AuthConfig::default()));
    let store = store_over(
        &storage,
        Collaborators { verifier: rejecting, registrar: simulated.clone(), federated: simulated },
    );
    store.initialize();
    let grace = store.signup("grace@example.com", "x", "Grace Hopper").await.unwrap();
    assert!(store.login("ada@example.com", "pw").await.is_err());
    assert_eq!(store.current_session().identity, Some(grace.clone()));
    assert_eq!(storage::load_identity(&storage, DEFAULT_STORAGE_KEY).unwrap(), Some(grace));
}

#[tokio::test]
async fn login_with_empty_email_fails_instead_of_creating_invalid_identity() {
    let store = ready_store(&MemoryStorage::new());
    let err = store.login("", "pw").await.unwrap_err();
    assert_eq!(err, AuthError::Authentication(BackendError::InvalidIdentity(IdentityError::EmptyField("email"))));
    assert!(store.current_session().identity.is_none());
}

#[tokio::test]
async fn signup_with_blank_name_fails() {
    let store = ready_store(&MemoryStorage::new());
    assert!(matches!(store.signup("a@b.c", "p", "").await, Err(AuthError::Signup(_))));
}

// =========================================================================
// logout
// =========================================================================

#[test]
fn logout_without_session_is_harmless() {
    let store = ready_store(&MemoryStorage::new());
    store.logout();
    assert!(store.current_session().identity.is_none());
}

#[tokio::test]
async fn logout_clears_identity_and_storage() {
    let storage = MemoryStorage::new();
    let store = ready_store(&storage);
    store.login("ada@example.com", "pw").await.unwrap();
    store.logout();
    assert!(store.current_session().identity.is_none());
    assert!(storage.get_item(DEFAULT_STORAGE_KEY).unwrap().is_none());
    assert!(store_over(&storage, simulated()).initialize().identity.is_none());
}

#[tokio::test]
async fn logout_notifies_subscribers() {
    let store = ready_store(&MemoryStorage::new());
    store.login("ada@example.com", "pw").await.unwrap();
    let signed_in = Arc::new(Mutex::new(Vec::new()));
    let sink = signed_in.clone();
    store.subscribe(move |session| sink.lock().unwrap().push(session.identity.is_some()));
    store.logout();
    assert_eq!(*signed_in.lock().unwrap(), vec![false]);
}

// =========================================================================
// busy flag and stale completions
// =========================================================================

#[tokio::test]
async fn busy_is_set_only_while_a_call_is_outstanding() {
    let (store, gate) = gated_store(&MemoryStorage::new());
    let (result, busy_during) = tokio::join!(store.login("ada@example.com", "pw"), async {
        let busy = store.current_session().busy;
        gate.add_permits(1);
        busy
    });
    assert!(result.is_ok());
    assert!(busy_during);
    assert!(!store.current_session().busy);
}

#[tokio::test]
async fn logout_during_login_discards_completion() {
    let storage = MemoryStorage::new();
    let (store, gate) = gated_store(&storage);
    let (result, ()) = tokio::join!(store.login("ada@example.com", "pw"), async {
        store.logout();
        gate.add_permits(1);
    });
    assert_eq!(result, Err(AuthError::Superseded));
    assert!(store.current_session().identity.is_none());
    assert!(storage.get_item(DEFAULT_STORAGE_KEY).unwrap().is_none());
}

#[tokio::test]
async fn cancel_pending_discards_completion() {
    let (store, gate) = gated_store(&MemoryStorage::new());
    let (result, ()) = tokio::join!(store.login_with_federated_provider(), async {
        store.cancel_pending();
        gate.add_permits(1);
    });
    assert_eq!(result, Err(AuthError::Superseded));
    assert!(store.current_session().identity.is_none());
}

#[tokio::test]
async fn newest_issued_call_wins_regardless_of_completion_order() {
    let storage = MemoryStorage::new();
    let (store, gate) = gated_store(&storage);
    let (first, second, ()) = tokio::join!(
        store.login("first@example.com", "pw"),
        store.signup("second@example.com", "pw", "Second"),
        async { gate.add_permits(2) }
    );
    assert_eq!(first, Err(AuthError::Superseded));
    let second = second.unwrap();
    assert_eq!(second.name, "Second");
    assert_eq!(store.current_session().identity, Some(second.clone()));
    assert_eq!(storage::load_identity(&storage, DEFAULT_STORAGE_KEY).unwrap(), Some(second));
    assert!(!store.current_session().busy);
}

#[tokio::test]
async fn abandoned_call_releases_busy_flag() {
    let (store, _gate) = gated_store(&MemoryStorage::new());
    let outcome = tokio::time::timeout(Duration::from_millis(5), store.login("ada@example.com", "pw")).await;
    assert!(outcome.is_err());
    assert!(!store.current_session().busy);
    assert!(store.current_session().identity.is_none());
}

// =========================================================================
// subscriptions
// =========================================================================

#[tokio::test]
async fn unsubscribe_stops_notifications() {
    let store = ready_store(&MemoryStorage::new());
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let id = store.subscribe(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    store.logout();
    store.unsubscribe(id);
    store.login("ada@example.com", "pw").await.unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn listener_may_read_store_without_deadlock() {
    let store = Arc::new(store_over(&MemoryStorage::new(), simulated()));
    let reader = Arc::downgrade(&store);
    let observed = Arc::new(Mutex::new(None));
    let sink = observed.clone();
    store.subscribe(move |_| {
        if let Some(store) = reader.upgrade() {
            *sink.lock().unwrap() = Some(store.current_session().is_initializing);
        }
    });
    store.initialize();
    assert_eq!(*observed.lock().unwrap(), Some(false));
}

// =========================================================================
// Storage failures
// =========================================================================

/// Storage whose every operation fails.
struct FailingStorage;

impl crate::storage::SessionStorage for FailingStorage {
    fn get_item(&self, _key: &str) -> Result<Option<String>, crate::error::StorageError> {
        Err(crate::error::StorageError::Operation("read denied".to_owned()))
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<(), crate::error::StorageError> {
        Err(crate::error::StorageError::Operation("quota exceeded".to_owned()))
    }

    fn remove_item(&self, _key: &str) -> Result<(), crate::error::StorageError> {
        Err(crate::error::StorageError::Unavailable)
    }
}

fn failing_store() -> SessionStore {
    SessionStore::new(AuthConfig::default(), Arc::new(FailingStorage), simulated())
}

#[test]
fn unreadable_storage_restores_as_anonymous() {
    let session = failing_store().initialize();
    assert!(session.identity.is_none());
    assert!(!session.is_initializing);
}

#[tokio::test]
async fn failed_write_still_signs_in() {
    let store = failing_store();
    store.initialize();
    let identity = store.login("ada@example.com", "pw").await.unwrap();
    assert_eq!(identity.email, "ada@example.com");
    assert_eq!(store.current_session().identity, Some(identity));
    assert!(!store.current_session().busy);
}

#[tokio::test]
async fn failed_remove_still_signs_out() {
    let store = failing_store();
    store.initialize();
    store.login("ada@example.com", "pw").await.unwrap();
    store.logout();
    assert!(store.current_session().identity.is_none());
}
