//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by route guards and role-aware components to coordinate login
//! redirects and role-dependent rendering.
//!
//! DESIGN
//! ======
//! `AuthController` is the only writer of the persisted session. It is plain
//! Rust with no reactive types so the state machine can be driven from unit
//! tests; `util::auth::AuthContext` mirrors its state into a signal.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::fmt;

use serde::{Deserialize, Serialize};

use super::session::{SessionRecord, SessionStorage, SessionStore};

/// Path of the login view. Logout and unauthenticated redirects land here.
pub const LOGIN_PATH: &str = "/auth/login";

/// Path of the signup view.
pub const SIGNUP_PATH: &str = "/auth/signup";

/// Portal role of the signed-in account.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "user")]
    Patient,
    #[serde(rename = "doctor")]
    Practitioner,
    #[serde(rename = "admin")]
    Administrator,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Patient, Role::Practitioner, Role::Administrator];

    /// Tag persisted in client storage and used in `?role=` query params.
    pub fn tag(self) -> &'static str {
        match self {
            Role::Patient => "user",
            Role::Practitioner => "doctor",
            Role::Administrator => "admin",
        }
    }

    /// Parse a persisted tag. Unknown tags yield `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.tag() == tag)
    }

    /// Path segment used by the backend auth API (`/api/auth/{segment}/login`).
    pub fn api_segment(self) -> &'static str {
        match self {
            Role::Patient => "patient",
            Role::Practitioner => "doctor",
            Role::Administrator => "admin",
        }
    }

    pub fn from_api_segment(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.api_segment() == segment)
    }

    /// Default landing view for this role.
    pub fn dashboard_path(self) -> &'static str {
        match self {
            Role::Patient => "/user",
            Role::Practitioner => "/doctor",
            Role::Administrator => "/admin",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::Patient => "Patient",
            Role::Practitioner => "Practitioner",
            Role::Administrator => "Administrator",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Authentication state exposed to guards and views.
///
/// `Initializing` is only ever observed before the persisted session has
/// been read; once left it never comes back.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthState {
    #[default]
    Initializing,
    Authenticated {
        role: Role,
    },
    Unauthenticated,
}

impl AuthState {
    pub fn is_loading(self) -> bool {
        matches!(self, AuthState::Initializing)
    }

    pub fn is_authenticated(self) -> bool {
        matches!(self, AuthState::Authenticated { .. })
    }

    pub fn role(self) -> Option<Role> {
        match self {
            AuthState::Authenticated { role } => Some(role),
            AuthState::Initializing | AuthState::Unauthenticated => None,
        }
    }
}

/// Single writer of the persisted session and owner of `AuthState`.
#[derive(Clone, Debug)]
pub struct AuthController<S> {
    session: SessionStore<S>,
    state: AuthState,
}

impl<S: SessionStorage> AuthController<S> {
    /// Create a controller in the `Initializing` state. Nothing is read yet.
    pub fn new(session: SessionStore<S>) -> Self {
        Self { session, state: AuthState::Initializing }
    }

    /// Adopt the persisted session, if complete. Only the first call reads
    /// storage; later calls return the current state unchanged.
    pub fn initialize(&mut self) -> AuthState {
        if self.state.is_loading() {
            self.state = match self.session.load() {
                Some(record) => AuthState::Authenticated { role: record.role },
                None => AuthState::Unauthenticated,
            };
        }
        self.state
    }

    /// Persist `token` + `role` and switch to `Authenticated`.
    ///
    /// The token comes from the backend login call and is stored as-is.
    pub fn login(&mut self, token: &str, role: Role) -> AuthState {
        self.session.save(&SessionRecord { token: token.to_owned(), role });
        self.state = AuthState::Authenticated { role };
        self.state
    }

    /// Clear the persisted session and return the path to navigate to.
    pub fn logout(&mut self) -> &'static str {
        self.session.clear();
        self.state = AuthState::Unauthenticated;
        LOGIN_PATH
    }

    pub fn state(&self) -> AuthState {
        self.state
    }

    pub fn session(&self) -> &SessionStore<S> {
        &self.session
    }
}
