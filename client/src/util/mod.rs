//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `guard` is the pure route-authorization decision; `auth` binds it and the
//! auth controller to Leptos signals, context and navigation.

pub mod auth;
pub mod guard;
