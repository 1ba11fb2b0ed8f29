//! Durable token + role persistence.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser keeps two string entries in `localStorage`: the bearer token
//! and the role tag. Both are written together on login and removed together
//! on logout.
//!
//! TRADE-OFFS
//! ==========
//! Persistence is best-effort. Without a browser (SSR, native tests) or when
//! storage access is denied, reads return `None` and writes silently no-op,
//! which the controller treats as "no session".

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::auth::Role;

/// Storage key for the bearer token.
pub const TOKEN_KEY: &str = "auth_token";

/// Storage key for the role tag.
pub const ROLE_KEY: &str = "user_type";

/// Minimal string key/value backend the session store persists through.
pub trait SessionStorage {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str);
    fn remove_item(&self, key: &str);
}

/// `window.localStorage`, available only in the hydrated browser build.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl SessionStorage for BrowserStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            None
        }
    }

    fn set_item(&self, key: &str, value: &str) {
        #[cfg(feature = "hydrate")]
        {
            let Some(storage) = local_storage() else {
                log::warn!("localStorage unavailable; {key} not persisted");
                return;
            };
            if storage.set_item(key, value).is_err() {
                log::warn!("localStorage rejected write for {key}");
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (key, value);
        }
    }

    fn remove_item(&self, key: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.remove_item(key);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
        }
    }
}

/// In-process storage. Clones share the same entries, so a second store
/// built from a clone sees what the first one wrote (a simulated reload).
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.lock().ok()?.get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        if let Ok(mut items) = self.items.lock() {
            items.insert(key.to_owned(), value.to_owned());
        }
    }

    fn remove_item(&self, key: &str) {
        if let Ok(mut items) = self.items.lock() {
            items.remove(key);
        }
    }
}

/// A complete persisted session: both halves present.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionRecord {
    pub token: String,
    pub role: Role,
}

/// Typed accessors over a `SessionStorage` backend.
#[derive(Clone, Debug, Default)]
pub struct SessionStore<S> {
    storage: S,
}

impl SessionStore<BrowserStorage> {
    pub fn browser() -> Self {
        Self::new(BrowserStorage)
    }
}

impl<S: SessionStorage> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn set_token(&self, token: &str) {
        self.storage.set_item(TOKEN_KEY, token);
    }

    /// Stored token. An empty string counts as absent.
    pub fn get_token(&self) -> Option<String> {
        self.storage.get_item(TOKEN_KEY).filter(|token| !token.is_empty())
    }

    pub fn set_role(&self, role: Role) {
        self.storage.set_item(ROLE_KEY, role.tag());
    }

    /// Stored role. Unknown tags count as absent.
    pub fn get_role(&self) -> Option<Role> {
        self.storage.get_item(ROLE_KEY).as_deref().and_then(Role::from_tag)
    }

    pub fn clear(&self) {
        self.storage.remove_item(TOKEN_KEY);
        self.storage.remove_item(ROLE_KEY);
    }

    /// Read the session back. Returns `None` unless both token and role are present.
    pub fn load(&self) -> Option<SessionRecord> {
        let token = self.get_token()?;
        let role = self.get_role()?;
        Some(SessionRecord { token, role })
    }

    /// Writes the role before the token; `load` needs both.
    pub fn save(&self, record: &SessionRecord) {
        self.set_role(record.role);
        self.set_token(&record.token);
    }
}
