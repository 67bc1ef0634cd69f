//! Identity model for the authenticated principal.
//!
//! DESIGN
//! ======
//! `Identity` is the only record persisted to durable storage. Every
//! constructor funnels through `Identity::new` so the non-empty invariant on
//! `id`, `email`, and `name` holds for any value the store hands out.

#[cfg(test)]
#[path = "identity_test.rs"]
mod identity_test;

use serde::{Deserialize, Serialize};

use crate::error::IdentityError;

/// Avatar service used for deterministic placeholder avatars.
pub const AVATAR_BASE_URL: &str = "https://api.dicebear.com/7.x/avataaars/svg";

/// Identifier assigned to every email/password identity.
pub const LOCAL_IDENTITY_ID: &str = "1";

/// Federated placeholder account.
pub const FEDERATED_IDENTITY_ID: &str = "google_1";
pub const FEDERATED_EMAIL: &str = "user@gmail.com";
pub const FEDERATED_NAME: &str = "Google User";
pub const FEDERATED_AVATAR_SEED: &str = "google";

/// The authenticated principal's profile data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Unique identifier.
    pub id: String,
    /// Email address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Avatar image URL, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl Identity {
    /// Build an identity, rejecting empty `id`, `email`, or `name`.
    ///
    /// # Errors
    ///
    /// Returns the first empty field as an [`IdentityError`].
    pub fn new(
        id: impl Into<String>,
        email: impl Into<String>,
        name: impl Into<String>,
        avatar: Option<String>,
    ) -> Result<Self, IdentityError> {
        let identity = Self { id: id.into(), email: email.into(), name: name.into(), avatar };
        identity.validate()?;
        Ok(identity)
    }

    /// Identity for an email/password login: name from the email local part.
    ///
    /// # Errors
    ///
    /// Returns an error when `email` is empty.
    pub fn from_email(email: &str) -> Result<Self, IdentityError> {
        Self::new(LOCAL_IDENTITY_ID, email, display_name_from_email(email), Some(avatar_for_seed(email)))
    }

    /// Identity for a signup with an explicit display name.
    ///
    /// # Errors
    ///
    /// Returns an error when `email` or `name` is empty.
    pub fn with_name(email: &str, name: &str) -> Result<Self, IdentityError> {
        Self::new(LOCAL_IDENTITY_ID, email, name, Some(avatar_for_seed(email)))
    }

    /// The fixed account returned by the simulated federated exchange.
    #[must_use]
    pub fn federated_placeholder() -> Self {
        Self {
            id: FEDERATED_IDENTITY_ID.to_owned(),
            email: FEDERATED_EMAIL.to_owned(),
            name: FEDERATED_NAME.to_owned(),
            avatar: Some(avatar_for_seed(FEDERATED_AVATAR_SEED)),
        }
    }

    /// Check the non-empty invariant. Used on records read back from storage.
    ///
    /// # Errors
    ///
    /// Returns the first empty field as an [`IdentityError`].
    pub fn validate(&self) -> Result<(), IdentityError> {
        if self.id.trim().is_empty() {
            return Err(IdentityError::EmptyField("id"));
        }
        if self.email.trim().is_empty() {
            return Err(IdentityError::EmptyField("email"));
        }
        if self.name.trim().is_empty() {
            return Err(IdentityError::EmptyField("name"));
        }
        Ok(())
    }
}

/// Display name derived from the part of `email` before the first `@`.
///
/// Falls back to the whole address when the local part is empty.
#[must_use]
pub fn display_name_from_email(email: &str) -> String {
    match email.split('@').next() {
        Some(local) if !local.is_empty() => local.to_owned(),
        _ => email.to_owned(),
    }
}

/// Deterministic avatar URL for `seed`. The seed is embedded verbatim.
#[must_use]
pub fn avatar_for_seed(seed: &str) -> String {
    format!("{AVATAR_BASE_URL}?seed={seed}")
}
