//! Session subsystem configuration.

use std::time::Duration;

use crate::storage::DEFAULT_STORAGE_KEY;

/// Path of the authentication entry point.
pub const DEFAULT_AUTH_PATH: &str = "/auth";
/// Path callers navigate to after a successful sign-in.
pub const DEFAULT_HOME_PATH: &str = "/dashboard";
pub const DEFAULT_LOGIN_DELAY_MS: u64 = 1000;
pub const DEFAULT_FEDERATED_DELAY_MS: u64 = 1500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    /// Storage key holding the persisted identity.
    pub storage_key: String,
    /// Redirect target for unauthenticated viewers.
    pub auth_path: String,
    /// Landing path after login/signup.
    pub home_path: String,
    /// Simulated latency for login and signup.
    pub login_delay: Duration,
    /// Simulated latency for the federated exchange.
    pub federated_delay: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
            auth_path: DEFAULT_AUTH_PATH.to_owned(),
            home_path: DEFAULT_HOME_PATH.to_owned(),
            login_delay: Duration::from_millis(DEFAULT_LOGIN_DELAY_MS),
            federated_delay: Duration::from_millis(DEFAULT_FEDERATED_DELAY_MS),
        }
    }
}
