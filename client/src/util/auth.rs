//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route components should apply identical unauthenticated redirect behavior,
//! so every page goes through the core `RouteGuard`.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use careerforge::guard::{GuardDecision, RouteGuard, decide};
use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::state::auth::AuthState;

/// Guard decision for the current auth state.
#[must_use]
pub fn guard_decision(state: &AuthState, auth_path: &str) -> GuardDecision {
    decide(&state.session(), auth_path)
}

/// Whether the guard would send this viewer to the auth page.
#[must_use]
pub fn should_redirect_unauth(state: &AuthState, auth_path: &str) -> bool {
    matches!(guard_decision(state, auth_path), GuardDecision::Redirect(_))
}

/// Redirect to `auth_path` whenever auth has loaded and no user is present.
///
/// Re-runs on every auth change and navigates once per transition into the
/// signed-out state.
pub fn install_unauth_redirect<F>(auth: RwSignal<AuthState>, auth_path: &str, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    let mut guard = RouteGuard::new(move |path: &str| navigate(path, NavigateOptions::default()), auth_path);
    Effect::new(move || {
        let state = auth.get();
        guard.observe(&state.session());
    });
}
