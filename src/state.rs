//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the account registry; clones share it.

use crate::services::accounts::AccountStore;

#[derive(Clone)]
pub struct AppState {
    pub accounts: AccountStore,
}

impl AppState {
    #[must_use]
    pub fn new() -> Self {
        Self { accounts: AccountStore::new() }
    }
}
