//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! `session` owns durable persistence, `auth` owns the in-memory state
//! machine built on top of it. Neither depends on Leptos.

pub mod auth;
pub mod session;
