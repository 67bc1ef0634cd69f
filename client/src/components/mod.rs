//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components read the session from the `AuthContext` provided at the app
//! root and never mutate it except through the context's operations.

pub mod protected_route;
pub mod user_badge;
