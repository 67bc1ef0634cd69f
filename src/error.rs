//! Error taxonomy for the session subsystem.
//!
//! ERROR HANDLING
//! ==============
//! Mutating operations surface `AuthError` to callers so pages can render a
//! user-facing message. Storage read failures are reported as
//! `StorageReadError` by the storage helpers but swallowed by
//! `SessionStore::initialize`: an unreadable session is a signed-out session.

/// Errors returned by session-mutating operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    Authentication(#[source] BackendError),
    #[error("Signup failed")]
    Signup(#[source] BackendError),
    #[error("Google login failed")]
    FederatedLogin(#[source] BackendError),
    /// A newer call, a logout, or a cancellation made this completion stale.
    #[error("session change superseded by a newer request")]
    Superseded,
}

/// Rejection reported by a backing collaborator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    #[error("rejected: {0}")]
    Rejected(String),
    #[error("invalid identity: {0}")]
    InvalidIdentity(#[from] IdentityError),
}

/// Identity invariant violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    #[error("identity field `{0}` must not be empty")]
    EmptyField(&'static str),
}

/// Failure of the underlying key-value storage.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("storage unavailable")]
    Unavailable,
    #[error("storage operation failed: {0}")]
    Operation(String),
}

/// Failure reading a persisted identity record.
#[derive(Debug, thiserror::Error)]
pub enum StorageReadError {
    #[error("storage read failed: {0}")]
    Unavailable(#[from] StorageError),
    #[error("malformed identity record: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("invalid identity record: {0}")]
    Invalid(#[from] IdentityError),
}

/// Failure writing a persisted identity record.
#[derive(Debug, thiserror::Error)]
pub enum StorageWriteError {
    #[error("storage write failed: {0}")]
    Storage(#[from] StorageError),
    #[error("identity serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}
