//! Domain services used by the HTTP layer.

pub mod accounts;
