//! # client
//!
//! Leptos + WASM front end for CareerForge AI.
//!
//! This crate wires the `careerforge` session core into the browser: the
//! auth context provided at the app root, the `ProtectedRoute` guard
//! component, the auth and dashboard pages, and the `localStorage` and timer
//! adapters the store runs on.

pub mod app;
pub mod components;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install panic/log hooks and hydrate the SSR markup.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
