//! External collaborators consulted by the session store.
//!
//! SYSTEM CONTEXT
//! ==============
//! There is no real backend. `SimulatedBackend` stands in for the credential
//! verifier, signup registrar, and federated identity exchange by waiting a
//! fixed delay and then accepting. The delay itself is injected through
//! [`Delay`] so tests run instantly and the browser can use real timers.
//!
//! TRADE-OFFS
//! ==========
//! Traits are `?Send` because browser futures (timers, fetch) are not `Send`;
//! everything runs on one cooperative thread.

#[cfg(test)]
#[path = "backend_test.rs"]
mod backend_test;

use std::time::Duration;

use crate::config::AuthConfig;
use crate::error::BackendError;
use crate::identity::Identity;

/// Confirms or rejects an email/password pair.
#[async_trait::async_trait(?Send)]
pub trait CredentialVerifier: Send + Sync {
    async fn verify(&self, email: &str, password: &str) -> Result<(), BackendError>;
}

/// Registers a new account.
#[async_trait::async_trait(?Send)]
pub trait SignupRegistrar: Send + Sync {
    async fn register(&self, email: &str, password: &str, name: &str) -> Result<(), BackendError>;
}

/// Exchanges a federated provider login for a confirmed identity.
#[async_trait::async_trait(?Send)]
pub trait FederatedExchange: Send + Sync {
    async fn exchange(&self) -> Result<Identity, BackendError>;
}

/// Suspends the caller for a duration.
#[async_trait::async_trait(?Send)]
pub trait Delay: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Delay that returns immediately.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDelay;

#[async_trait::async_trait(?Send)]
impl Delay for NoDelay {
    async fn sleep(&self, _duration: Duration) {}
}

// =============================================================================
// SIMULATED BACKEND
// =============================================================================

/// Accept-everything backend with artificial latency.
#[derive(Clone, Debug)]
pub struct SimulatedBackend<D> {
    delay: D,
    login_delay: Duration,
    federated_delay: Duration,
}

impl<D: Delay> SimulatedBackend<D> {
    /// Backend using the delays from `config`.
    pub fn new(delay: D, config: &AuthConfig) -> Self {
        Self { delay, login_delay: config.login_delay, federated_delay: config.federated_delay }
    }

    #[must_use]
    pub fn login_delay(&self) -> Duration {
        self.login_delay
    }

    #[must_use]
    pub fn federated_delay(&self) -> Duration {
        self.federated_delay
    }
}

#[async_trait::async_trait(?Send)]
impl<D: Delay> CredentialVerifier for SimulatedBackend<D> {
    async fn verify(&self, email: &str, _password: &str) -> Result<(), BackendError> {
        tracing::debug!(%email, delay = ?self.login_delay, "simulating credential check");
        self.delay.sleep(self.login_delay).await;
        Ok(())
    }
}

#[async_trait::async_trait(?Send)]
impl<D: Delay> SignupRegistrar for SimulatedBackend<D> {
    async fn register(&self, email: &str, _password: &str, _name: &str) -> Result<(), BackendError> {
        tracing::debug!(%email, delay = ?self.login_delay, "simulating signup");
        self.delay.sleep(self.login_delay).await;
        Ok(())
    }
}

#[async_trait::async_trait(?Send)]
impl<D: Delay> FederatedExchange for SimulatedBackend<D> {
    async fn exchange(&self) -> Result<Identity, BackendError> {
        tracing::debug!(delay = ?self.federated_delay, "simulating federated exchange");
        self.delay.sleep(self.federated_delay).await;
        Ok(Identity::federated_placeholder())
    }
}

// =============================================================================
// REJECTING BACKEND
// =============================================================================

/// Backend that rejects every request with `reason`.
#[derive(Clone, Debug)]
pub struct RejectingBackend {
    reason: String,
}

impl RejectingBackend {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }

    fn reject(&self) -> BackendError {
        BackendError::Rejected(self.reason.clone())
    }
}

#[async_trait::async_trait(?Send)]
impl CredentialVerifier for RejectingBackend {
    async fn verify(&self, _email: &str, _password: &str) -> Result<(), BackendError> {
        Err(self.reject())
    }
}

#[async_trait::async_trait(?Send)]
impl SignupRegistrar for RejectingBackend {
    async fn register(&self, _email: &str, _password: &str, _name: &str) -> Result<(), BackendError> {
        Err(self.reject())
    }
}

#[async_trait::async_trait(?Send)]
impl FederatedExchange for RejectingBackend {
    async fn exchange(&self) -> Result<Identity, BackendError> {
        Err(self.reject())
    }
}
