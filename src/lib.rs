//! # careerforge
//!
//! Session core for the CareerForge web app: the persisted identity, the
//! session store that restores and mutates it, and the route guard that
//! gates protected pages on it.
//!
//! This crate is UI-framework agnostic. The Leptos front end in `client/`
//! wires it to browser storage, timers, and router navigation.

pub mod backend;
pub mod config;
pub mod error;
pub mod guard;
pub mod identity;
pub mod session;
pub mod storage;
pub mod store;

pub use config::AuthConfig;
pub use error::AuthError;
pub use guard::{GuardDecision, Navigator, RouteGuard};
pub use identity::Identity;
pub use session::{Session, SessionStatus};
pub use storage::{MemoryStorage, SessionStorage};
pub use store::{Collaborators, SessionStore};
