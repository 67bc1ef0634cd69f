//! Avatar + name badge for the signed-in user, with a logout action.

#[cfg(test)]
#[path = "user_badge_test.rs"]
mod user_badge_test;

use careerforge::Identity;
use leptos::prelude::*;

use crate::state::auth::AuthContext;

/// Fallback avatar text: the first letter of the name, uppercased.
#[must_use]
pub fn avatar_initial(name: &str) -> String {
    name.chars().next().map(|c| c.to_uppercase().collect()).unwrap_or_default()
}

#[component]
pub fn UserBadge(user: Identity) -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let initial = avatar_initial(&user.name);
    let avatar = user.avatar.clone();
    let alt = user.name.clone();

    view! {
        <div class="user-badge">
            {match avatar {
                Some(src) => view! { <img class="user-badge__avatar" src=src alt=alt/> }.into_any(),
                None => view! { <span class="user-badge__avatar user-badge__avatar--initial">{initial}</span> }
                    .into_any(),
            }}
            <div class="user-badge__text">
                <p class="user-badge__name">{user.name}</p>
                <p class="user-badge__email">{user.email}</p>
            </div>
            <button class="btn user-badge__logout" on:click=move |_| auth.logout()>
                "Log out"
            </button>
        </div>
    }
}
