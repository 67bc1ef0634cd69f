//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! The session store lives in the `careerforge` crate; this layer mirrors it
//! into reactive signals so components re-render on session changes.

pub mod auth;
