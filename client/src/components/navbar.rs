//! Top navigation bar with role-aware links and logout.
//!
//! SYSTEM CONTEXT
//! ==============
//! Rendered on every route. Reads auth state only; logout goes through
//! `AuthContext::logout`, which owns the redirect to the login view.

#[cfg(test)]
#[path = "navbar_test.rs"]
mod navbar_test;

use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_navigate};

use crate::state::auth::{AuthState, LOGIN_PATH, Role, SIGNUP_PATH};
use crate::util::auth::use_auth;

/// A single portal link.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub href: &'static str,
}

const PATIENT_NAV: &[NavItem] = &[
    NavItem { label: "Dashboard", href: "/user" },
    NavItem { label: "Food Scan", href: "/user/scan" },
    NavItem { label: "Analytics", href: "/user/analytics" },
    NavItem { label: "Sessions", href: "/user/sessions" },
    NavItem { label: "Messages", href: "/user/chat" },
];

const PRACTITIONER_NAV: &[NavItem] = &[
    NavItem { label: "Dashboard", href: "/doctor" },
    NavItem { label: "Patients", href: "/doctor/patients" },
    NavItem { label: "Diet Plans", href: "/doctor/plans" },
    NavItem { label: "Messages", href: "/doctor/chat" },
];

const ADMINISTRATOR_NAV: &[NavItem] = &[
    NavItem { label: "Dashboard", href: "/admin" },
    NavItem { label: "Doctors", href: "/admin/doctors" },
    NavItem { label: "Users", href: "/admin/users" },
];

/// Portal links for `role`. The first entry is always the dashboard.
pub fn nav_items(role: Role) -> &'static [NavItem] {
    match role {
        Role::Patient => PATIENT_NAV,
        Role::Practitioner => PRACTITIONER_NAV,
        Role::Administrator => ADMINISTRATOR_NAV,
    }
}

/// Where the brand link points for `state`.
pub fn home_link(state: AuthState) -> &'static str {
    state.role().map_or("/", Role::dashboard_path)
}

#[component]
pub fn Navbar() -> impl IntoView {
    let auth = use_auth();
    let state = auth.state();
    let location = use_location();
    let navigate = use_navigate();

    let on_logout = move |_: leptos::ev::MouseEvent| auth.logout(&navigate);

    view! {
        <nav class="navbar">
            <a class="navbar__brand" href=move || home_link(state.get())>
                <span class="navbar__title">"Ayudhra"</span>
            </a>
            <div class="navbar__links">
                {move || {
                    let role = state.get().role()?;
                    let current = location.pathname.get();
                    Some(
                        nav_items(role)
                            .iter()
                            .map(|item| {
                                let class = if current == item.href { "navbar__link navbar__link--active" } else { "navbar__link" };
                                view! {
                                    <a class=class href=item.href>
                                        {item.label}
                                    </a>
                                }
                            })
                            .collect_view(),
                    )
                }}
            </div>
            <div class="navbar__actions">
                <Show
                    when=move || state.get().is_authenticated()
                    fallback=move || {
                        view! {
                            <a class="navbar__link" href=LOGIN_PATH>"Sign In"</a>
                            <a class="navbar__button" href=SIGNUP_PATH>"Sign Up"</a>
                        }
                    }
                >
                    <span class="navbar__role">{move || state.get().role().map(Role::label)}</span>
                    <button class="navbar__button" on:click=on_logout.clone()>"Logout"</button>
                </Show>
            </div>
        </nav>
    }
}
