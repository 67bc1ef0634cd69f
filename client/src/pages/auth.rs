//! Auth page supporting email login, signup, and Google sign-in.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the unauthenticated entry point the route guard redirects to. Each
//! form calls one session operation and navigates to the dashboard on
//! success. In-flight calls are cancelled if the page unmounts first.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use careerforge::AuthError;
use leptos::prelude::*;
#[cfg(feature = "hydrate")]
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::auth::AuthContext;

const LOGIN_FAILED: &str = "Invalid email or password";
const SIGNUP_FAILED: &str = "Signup failed. Please try again.";
const GOOGLE_FAILED: &str = "Google login failed. Please try again.";

/// Which form the auth page shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthTab {
    Login,
    Signup,
}

/// User-facing message for a failed session operation, `None` when the
/// failure should stay silent.
#[must_use]
pub fn error_message(err: &AuthError) -> Option<&'static str> {
    match err {
        AuthError::Authentication(_) => Some(LOGIN_FAILED),
        AuthError::Signup(_) => Some(SIGNUP_FAILED),
        AuthError::FederatedLogin(_) => Some(GOOGLE_FAILED),
        AuthError::Superseded => None,
    }
}

/// Trim and require both login fields.
///
/// # Errors
///
/// Returns the message to display when a field is blank.
pub fn validate_login_input(email: &str, password: &str) -> Result<(String, String), &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err("Enter your email and password.");
    }
    Ok((email.to_owned(), password.to_owned()))
}

/// Trim and require all signup fields.
///
/// # Errors
///
/// Returns the message to display when a field is blank.
pub fn validate_signup_input(name: &str, email: &str, password: &str) -> Result<(String, String, String), &'static str> {
    let name = name.trim();
    let email = email.trim();
    if name.is_empty() || email.is_empty() || password.is_empty() {
        return Err("Enter your name, email, and password.");
    }
    Ok((name.to_owned(), email.to_owned(), password.to_owned()))
}

/// Login tab fields. Kept apart from the signup fields so switching tabs
/// never carries input across.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    /// # Errors
    ///
    /// Returns the message to display when a field is blank.
    pub fn validate(&self) -> Result<(String, String), &'static str> {
        validate_login_input(&self.email, &self.password)
    }
}

/// Signup tab fields.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl SignupForm {
    /// # Errors
    ///
    /// Returns the message to display when a field is blank.
    pub fn validate(&self) -> Result<(String, String, String), &'static str> {
        validate_signup_input(&self.name, &self.email, &self.password)
    }
}

#[component]
pub fn AuthPage() -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let navigate = use_navigate();

    let tab = RwSignal::new(AuthTab::Login);
    let login_form = RwSignal::new(LoginForm::default());
    let signup_form = RwSignal::new(SignupForm::default());
    let show_password = RwSignal::new(false);
    let error = RwSignal::new(String::new());
    let state = auth.state;
    let busy = Memo::new(move |_| state.get().busy);

    let teardown = auth.clone();
    on_cleanup(move || teardown.cancel_pending());

    let login_ctx = auth.clone();
    let login_nav = navigate.clone();
    let on_login = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let (email_value, password_value) = match login_form.with_untracked(LoginForm::validate) {
            Ok(values) => values,
            Err(msg) => {
                error.set(msg.to_owned());
                return;
            }
        };
        error.set(String::new());

        #[cfg(feature = "hydrate")]
        {
            let ctx = login_ctx.clone();
            let nav = login_nav.clone();
            leptos::task::spawn_local(async move {
                match ctx.login(&email_value, &password_value).await {
                    Ok(_) => nav(&ctx.config().home_path, NavigateOptions::default()),
                    Err(e) => report(error, &e),
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&login_ctx, &login_nav, email_value, password_value);
        }
    };

    let signup_ctx = auth.clone();
    let signup_nav = navigate.clone();
    let on_signup = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let (name_value, email_value, password_value) = match signup_form.with_untracked(SignupForm::validate) {
            Ok(values) => values,
            Err(msg) => {
                error.set(msg.to_owned());
                return;
            }
        };
        error.set(String::new());

        #[cfg(feature = "hydrate")]
        {
            let ctx = signup_ctx.clone();
            let nav = signup_nav.clone();
            leptos::task::spawn_local(async move {
                match ctx.signup(&email_value, &password_value, &name_value).await {
                    Ok(_) => nav(&ctx.config().home_path, NavigateOptions::default()),
                    Err(e) => report(error, &e),
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&signup_ctx, &signup_nav, name_value, email_value, password_value);
        }
    };

    let google_ctx = auth.clone();
    let on_google = move |_| {
        if busy.get_untracked() {
            return;
        }
        error.set(String::new());

        #[cfg(feature = "hydrate")]
        {
            let ctx = google_ctx.clone();
            let nav = navigate.clone();
            leptos::task::spawn_local(async move {
                match ctx.login_with_google().await {
                    Ok(_) => nav(&ctx.config().home_path, NavigateOptions::default()),
                    Err(e) => report(error, &e),
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&google_ctx, &navigate);
        }
    };

    let password_type = move || if show_password.get() { "text" } else { "password" };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <a href="/" class="auth-card__back">"← Back"</a>
                <h1>"CareerForge AI"</h1>
                <p class="auth-card__subtitle">"Sign in to analyze your resume"</p>

                <div class="auth-tabs">
                    <button
                        class="auth-tabs__tab"
                        class=("auth-tabs__tab--active", move || tab.get() == AuthTab::Login)
                        on:click=move |_| tab.set(AuthTab::Login)
                    >
                        "Login"
                    </button>
                    <button
                        class="auth-tabs__tab"
                        class=("auth-tabs__tab--active", move || tab.get() == AuthTab::Signup)
                        on:click=move |_| tab.set(AuthTab::Signup)
                    >
                        "Sign Up"
                    </button>
                </div>

                <Show
                    when=move || tab.get() == AuthTab::Login
                    fallback=move || {
                        view! {
                            <form class="auth-form" on:submit=on_signup.clone()>
                                <input
                                    class="auth-input"
                                    type="text"
                                    placeholder="Full name"
                                    prop:value=move || signup_form.with(|f| f.name.clone())
                                    on:input=move |ev| signup_form.update(|f| f.name = event_target_value(&ev))
                                />
                                <input
                                    class="auth-input"
                                    type="email"
                                    placeholder="you@example.com"
                                    prop:value=move || signup_form.with(|f| f.email.clone())
                                    on:input=move |ev| signup_form.update(|f| f.email = event_target_value(&ev))
                                />
                                <input
                                    class="auth-input"
                                    type=password_type
                                    placeholder="Password"
                                    prop:value=move || signup_form.with(|f| f.password.clone())
                                    on:input=move |ev| signup_form.update(|f| f.password = event_target_value(&ev))
                                />
                                <button class="auth-button" type="submit" disabled=move || busy.get()>
                                    {move || if busy.get() { "Creating account..." } else { "Create Account" }}
                                </button>
                            </form>
                        }
                    }
                >
                    <form class="auth-form" on:submit=on_login.clone()>
                        <input
                            class="auth-input"
                            type="email"
                            placeholder="you@example.com"
                            prop:value=move || login_form.with(|f| f.email.clone())
                            on:input=move |ev| login_form.update(|f| f.email = event_target_value(&ev))
                        />
                        <input
                            class="auth-input"
                            type=password_type
                            placeholder="Password"
                            prop:value=move || login_form.with(|f| f.password.clone())
                            on:input=move |ev| login_form.update(|f| f.password = event_target_value(&ev))
                        />
                        <button class="auth-button" type="submit" disabled=move || busy.get()>
                            {move || if busy.get() { "Signing in..." } else { "Sign In" }}
                        </button>
                    </form>
                </Show>

                <label class="auth-toggle">
                    <input
                        type="checkbox"
                        prop:checked=move || show_password.get()
                        on:change=move |_| show_password.update(|v| *v = !*v)
                    />
                    "Show password"
                </label>

                <Show when=move || !error.get().is_empty()>
                    <p class="auth-message auth-message--error">{move || error.get()}</p>
                </Show>

                <div class="auth-divider"></div>
                <button class="auth-button auth-button--google" disabled=move || busy.get() on:click=on_google>
                    "Continue with Google"
                </button>
            </div>
        </div>
    }
}

#[cfg(feature = "hydrate")]
fn report(error: RwSignal<String>, err: &AuthError) {
    if let Some(msg) = error_message(err) {
        log::warn!("auth failed: {err}");
        error.set(msg.to_owned());
    }
}
