//! Route wrapper that defers rendering to the auth guard.
//!
//! The wrapped view only renders on `GuardDecision::Allow`. While the session
//! is still loading, or while a redirect is in flight, the loading placeholder
//! stands in so protected content never flashes before navigation.

#[cfg(test)]
#[path = "protected_route_test.rs"]
mod protected_route_test;

use leptos::prelude::*;

use crate::state::auth::Role;
use crate::util::auth::{use_auth, use_auth_guard};
use crate::util::guard::GuardDecision;

/// Wrap a route view with role-based access control.
///
/// Omit `allowed` to admit any signed-in role.
#[component]
pub fn ProtectedRoute(#[prop(optional)] allowed: Option<Vec<Role>>, children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    let decision = use_auth_guard(auth, allowed);
    gated(decision.into(), children)
}

/// Render `children` only while `decision` is `Allow`.
pub fn gated(decision: Signal<GuardDecision>, children: ChildrenFn) -> impl IntoView {
    move || match decision.get() {
        GuardDecision::Allow => children().into_any(),
        GuardDecision::Pending | GuardDecision::Redirect(_) => view! { <LoadingScreen/> }.into_any(),
    }
}

/// Full-page loading placeholder.
#[component]
pub fn LoadingScreen() -> impl IntoView {
    view! {
        <div class="loading-screen" role="status">
            <div class="loading-screen__spinner"></div>
            <p class="loading-screen__label">"Loading..."</p>
        </div>
    }
}
