//! Route authorization decision.
//!
//! Checks run in a fixed order and the first match wins:
//!
//! 1. still initializing: wait
//! 2. signed out outside `/auth`: go to login
//! 3. signed in with a role the view does not allow: go to own dashboard
//! 4. signed in inside `/auth`: go to own dashboard
//! 5. otherwise: allow
//!
//! `evaluate` has no side effects; `util::auth::use_auth_guard` applies the
//! redirect through `redirect_target`.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use crate::state::auth::{AuthState, LOGIN_PATH, Role};

/// Path segment of the area reachable while signed out (login + signup).
const AUTH_AREA: &str = "/auth";

/// Outcome of one guard evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session not read yet; render a loading placeholder.
    Pending,
    /// The view may render.
    Allow,
    /// Navigate to this path instead of rendering the view.
    Redirect(&'static str),
}

fn strip_query(path: &str) -> &str {
    path.split(['?', '#']).next().unwrap_or_default()
}

/// Whether `path` lies in the signed-out area (`/auth` or below it).
pub fn is_auth_area(path: &str) -> bool {
    strip_query(path)
        .strip_prefix(AUTH_AREA)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

/// Decide whether the view at `path` may render for `state`.
///
/// `allowed` of `None` means any signed-in role may view the path.
pub fn evaluate(state: AuthState, path: &str, allowed: Option<&[Role]>) -> GuardDecision {
    match state {
        AuthState::Initializing => GuardDecision::Pending,
        AuthState::Unauthenticated => {
            if is_auth_area(path) {
                GuardDecision::Allow
            } else {
                GuardDecision::Redirect(LOGIN_PATH)
            }
        }
        AuthState::Authenticated { role } => {
            if allowed.is_some_and(|roles| !roles.contains(&role)) || is_auth_area(path) {
                GuardDecision::Redirect(role.dashboard_path())
            } else {
                GuardDecision::Allow
            }
        }
    }
}

/// Navigation to issue when the decision moves from `previous` to `next`.
///
/// Navigates only when the decision changed and the target differs from
/// `current_path`, so a redirect already performed elsewhere (logout) is not
/// pushed a second time.
pub fn redirect_target(previous: Option<GuardDecision>, next: GuardDecision, current_path: &str) -> Option<&'static str> {
    match next {
        GuardDecision::Redirect(to) if previous != Some(next) && strip_query(current_path) != to => Some(to),
        _ => None,
    }
}
