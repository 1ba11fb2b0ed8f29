//! Networking modules for the backend auth API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` performs the REST calls and `types` defines the shared wire schema
//! also used by the host server.

pub mod api;
pub mod types;
