//! Route guard component wrapping protected page content.
//!
//! SYSTEM CONTEXT
//! ==============
//! While the session is restoring this shows the loading screen and never
//! redirects. Signed-out viewers get nothing rendered and are sent to the
//! auth page; signed-in viewers see the children unchanged.

use careerforge::GuardDecision;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::state::auth::AuthContext;
use crate::util::auth::{guard_decision, install_unauth_redirect};

/// Render `children` only for an active session.
#[component]
pub fn ProtectedRoute(children: ChildrenFn) -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let state = auth.state;
    let auth_path = auth.config().auth_path.clone();

    install_unauth_redirect(state, &auth_path, use_navigate());

    move || match guard_decision(&state.get(), &auth_path) {
        GuardDecision::Loading => view! { <LoadingScreen/> }.into_any(),
        GuardDecision::Redirect(_) => ().into_any(),
        GuardDecision::Render => children().into_any(),
    }
}

#[component]
fn LoadingScreen() -> impl IntoView {
    view! {
        <div class="loading-screen">
            <div class="loading-screen__spinner"></div>
            <p class="loading-screen__text">"Loading CareerForge AI..."</p>
        </div>
    }
}
