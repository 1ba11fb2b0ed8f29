//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` creates one `AuthContext` and provides it to the tree. Route
//! components take it from context and hand it to `use_auth_guard`, which
//! applies the guard decision for the current path.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};

use crate::state::auth::{AuthController, AuthState, LOGIN_PATH, Role};
use crate::state::session::{BrowserStorage, SessionStore};
use crate::util::guard::{GuardDecision, evaluate, redirect_target};

/// Reactive handle over the auth controller.
///
/// Copyable; every copy refers to the same signal and controller.
#[derive(Clone, Copy)]
pub struct AuthContext {
    state: RwSignal<AuthState>,
    controller: StoredValue<AuthController<BrowserStorage>>,
}

impl AuthContext {
    pub fn new() -> Self {
        Self {
            state: RwSignal::new(AuthState::Initializing),
            controller: StoredValue::new(AuthController::new(SessionStore::browser())),
        }
    }

    /// Current state, read-only for consumers.
    pub fn state(&self) -> ReadSignal<AuthState> {
        self.state.read_only()
    }

    /// Read the persisted session. Later calls are no-ops.
    pub fn initialize(&self) {
        let mut next = AuthState::Initializing;
        self.controller.update_value(|controller| next = controller.initialize());
        self.state.set(next);
    }

    /// Record a successful backend login.
    pub fn login(&self, token: &str, role: Role) {
        let mut next = AuthState::Initializing;
        self.controller.update_value(|controller| next = controller.login(token, role));
        #[cfg(feature = "hydrate")]
        log::info!("signed in as {role}");
        self.state.set(next);
    }

    /// Clear the session and navigate to the login view.
    ///
    /// Navigation happens before the state flips, so a guard mounted on the
    /// page being left already sees the login path and does not redirect again.
    pub fn logout<F>(&self, navigate: &F)
    where
        F: Fn(&str, NavigateOptions),
    {
        #[cfg(feature = "hydrate")]
        if let Some(token) = self.controller.with_value(|controller| controller.session().get_token()) {
            leptos::task::spawn_local(async move {
                if let Err(message) = crate::net::api::logout(&token).await {
                    log::warn!("session revoke failed: {message}");
                }
            });
        }

        let mut target = LOGIN_PATH;
        self.controller.update_value(|controller| target = controller.logout());
        #[cfg(feature = "hydrate")]
        log::info!("signed out");
        navigate(target, NavigateOptions::default());
        self.state.set(AuthState::Unauthenticated);
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Create the app-wide `AuthContext`, provide it, and schedule the initial
/// storage read. The read runs in an effect, so it only happens in the
/// browser after hydration.
pub fn provide_auth() -> AuthContext {
    let auth = AuthContext::new();
    provide_context(auth);
    Effect::new(move || auth.initialize());
    auth
}

/// The `AuthContext` provided by `App`.
pub fn use_auth() -> AuthContext {
    expect_context::<AuthContext>()
}

/// Memoized guard decision for `path` under `state`. Router-free.
pub fn guard_decision(
    state: ReadSignal<AuthState>,
    path: Signal<String>,
    allowed: Option<Vec<Role>>,
) -> Memo<GuardDecision> {
    Memo::new(move |_| {
        let current = state.get();
        path.with(|path| evaluate(current, path, allowed.as_deref()))
    })
}

/// Evaluate the route guard for the current path and redirect on demand.
///
/// The effect only navigates when the decision changes to a redirect whose
/// target is not the current path.
pub fn use_auth_guard(auth: AuthContext, allowed: Option<Vec<Role>>) -> Memo<GuardDecision> {
    let location = use_location();
    let navigate = use_navigate();
    let pathname = location.pathname;
    let decision = guard_decision(auth.state(), pathname.into(), allowed);

    Effect::new(move |previous: Option<GuardDecision>| {
        let next = decision.get();
        let target = pathname.with_untracked(|path| redirect_target(previous, next, path));
        if let Some(to) = target {
            #[cfg(feature = "hydrate")]
            log::debug!("route guard redirect to {to}");
            navigate(to, NavigateOptions::default());
        }
        next
    });

    decision
}
