//! Dashboard page for the signed-in user.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the authenticated landing route. It is always mounted inside
//! `ProtectedRoute`, so a logout here revokes rendering and redirects at once.

use leptos::prelude::*;

use crate::components::user_badge::UserBadge;
use crate::state::auth::AuthContext;

/// Dashboard page: greeting plus the user badge.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let state = auth.state;

    view! {
        <div class="dashboard-page">
            {move || {
                state
                    .get()
                    .user
                    .map(|user| {
                        let greeting = format!("Welcome back, {}", user.name);
                        view! {
                            <header class="dashboard-header">
                                <h1>{greeting}</h1>
                                <UserBadge user=user/>
                            </header>
                        }
                    })
            }}
        </div>
    }
}
