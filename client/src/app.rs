//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::protected_route::ProtectedRoute;
use crate::pages::{auth::AuthPage, dashboard::DashboardPage, home::HomePage};
use crate::state::auth::AuthContext;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Owns the single session store for the page and restores the persisted
/// identity once the app mounts in the browser.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = AuthContext::browser();
    auth.provide();

    // Effects only run in the browser, so SSR always renders the
    // initializing state and the client restores from localStorage.
    let restore = auth.clone();
    Effect::new(move || {
        restore.initialize();
    });

    view! {
        <Stylesheet id="leptos" href="/pkg/careerforge.css"/>
        <Title text="CareerForge AI"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=HomePage/>
                <Route path=StaticSegment("auth") view=AuthPage/>
                <Route
                    path=StaticSegment("dashboard")
                    view=|| view! { <ProtectedRoute><DashboardPage/></ProtectedRoute> }
                />
            </Routes>
        </Router>
    }
}
