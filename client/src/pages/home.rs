//! Public landing route.
//!
//! Shows the user badge when a session is active and a sign-in link
//! otherwise. Not guarded.

use leptos::prelude::*;

use crate::components::user_badge::UserBadge;
use crate::state::auth::AuthContext;

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let state = auth.state;
    let auth_path = auth.config().auth_path.clone();
    let home_path = auth.config().home_path.clone();

    view! {
        <div class="home-page">
            <h1>"CareerForge AI"</h1>
            {move || match state.get().user {
                Some(user) => view! {
                    <UserBadge user=user/>
                    <a class="home-page__cta" href=home_path.clone()>"Go to dashboard"</a>
                }
                    .into_any(),
                None => view! { <a class="home-page__cta" href=auth_path.clone()>"Get started"</a> }.into_any(),
            }}
        </div>
    }
}
