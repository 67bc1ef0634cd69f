//! Route guard gating protected content on session state.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages wrap protected content in the guard. While the store is still
//! restoring, the guard shows a loading affordance and never redirects;
//! afterwards it redirects anonymous viewers to the auth entry point and
//! passes authenticated viewers through. Ambiguous states render nothing.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use std::sync::{Arc, Mutex, PoisonError};

use crate::session::{Session, SessionStatus};
use crate::store::{SessionStore, SubscriptionId};

/// What a guarded view should do for a given session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Restoration pending: show the loading affordance only.
    Loading,
    /// No identity: render nothing and navigate to the contained path.
    Redirect(String),
    /// Identity present: render the wrapped content.
    Render,
}

impl GuardDecision {
    #[must_use]
    pub fn renders_content(&self) -> bool {
        matches!(self, Self::Render)
    }
}

/// Pure guard decision for `session`.
#[must_use]
pub fn decide(session: &Session, auth_path: &str) -> GuardDecision {
    match session.status() {
        SessionStatus::Initializing => GuardDecision::Loading,
        SessionStatus::Authenticated => GuardDecision::Render,
        SessionStatus::Anonymous => GuardDecision::Redirect(auth_path.to_owned()),
    }
}

/// Client-side navigation service.
pub trait Navigator {
    fn navigate(&self, path: &str);
}

impl<F> Navigator for F
where
    F: Fn(&str),
{
    fn navigate(&self, path: &str) {
        self(path);
    }
}

/// Stateful guard: navigates once for each transition into `Redirect`.
pub struct RouteGuard<N> {
    navigator: Arc<N>,
    auth_path: String,
    last: Option<GuardDecision>,
}

impl<N: Navigator> RouteGuard<N> {
    pub fn new(navigator: N, auth_path: impl Into<String>) -> Self {
        Self { navigator: Arc::new(navigator), auth_path: auth_path.into(), last: None }
    }

    /// Evaluate `session`, redirecting if this is a fresh transition to
    /// the anonymous state.
    pub fn observe(&mut self, session: &Session) -> GuardDecision {
        let (decision, redirect) = self.advance(session);
        if let Some(path) = redirect {
            redirect_to(self.navigator.as_ref(), &path);
        }
        decision
    }

    /// Last decision, `None` before the first observation.
    #[must_use]
    pub fn last_decision(&self) -> Option<&GuardDecision> {
        self.last.as_ref()
    }

    /// Record the decision for `session` and return the path to navigate
    /// to, if any, without navigating.
    fn advance(&mut self, session: &Session) -> (GuardDecision, Option<String>) {
        let decision = decide(session, &self.auth_path);
        let redirect = match &decision {
            GuardDecision::Redirect(path) if !matches!(self.last, Some(GuardDecision::Redirect(_))) => {
                Some(path.clone())
            }
            _ => None,
        };
        self.last = Some(decision.clone());
        (decision, redirect)
    }
}

fn redirect_to<N: Navigator + ?Sized>(navigator: &N, path: &str) {
    tracing::debug!(%path, "redirecting unauthenticated viewer");
    navigator.navigate(path);
}

impl<N: Navigator + Send + Sync + 'static> RouteGuard<N> {
    /// Run the guard on the store's current snapshot and on every change.
    /// Dropping the handle detaches it.
    ///
    /// The navigator is called with the guard unlocked, so it may change the
    /// session synchronously (for example by calling `logout`).
    pub fn attach(self, store: &Arc<SessionStore>) -> GuardHandle<N> {
        let navigator = self.navigator.clone();
        let guard = Arc::new(Mutex::new(self));
        step(&guard, navigator.as_ref(), &store.current_session());

        let observer = guard.clone();
        let subscription = store.subscribe(move |session| step(&observer, navigator.as_ref(), session));
        GuardHandle { store: store.clone(), subscription, guard }
    }
}

fn step<N: Navigator>(guard: &Mutex<RouteGuard<N>>, navigator: &N, session: &Session) {
    let (_, redirect) = guard.lock().unwrap_or_else(PoisonError::into_inner).advance(session);
    if let Some(path) = redirect {
        redirect_to(navigator, &path);
    }
}

/// Live attachment of a [`RouteGuard`] to a [`SessionStore`].
pub struct GuardHandle<N> {
    store: Arc<SessionStore>,
    subscription: SubscriptionId,
    guard: Arc<Mutex<RouteGuard<N>>>,
}

impl<N: Navigator> GuardHandle<N> {
    /// Decision for the most recent snapshot.
    #[must_use]
    pub fn decision(&self) -> Option<GuardDecision> {
        self.guard
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last_decision()
            .cloned()
    }
}

impl<N> Drop for GuardHandle<N> {
    fn drop(&mut self) {
        self.store.unsubscribe(self.subscription);
    }
}
