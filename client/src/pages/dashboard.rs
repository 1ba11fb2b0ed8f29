//! Role dashboards and portal section views.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each route-level component here declares the roles allowed to see it by
//! wrapping itself in `ProtectedRoute`. Section bodies are placeholders; the
//! clinical screens live elsewhere.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;

use crate::components::navbar::{NavItem, nav_items};
use crate::components::protected_route::ProtectedRoute;
use crate::state::auth::Role;

/// Dashboard cards for `role`: every nav item except the dashboard itself.
pub fn section_cards(role: Role) -> &'static [NavItem] {
    nav_items(role).get(1..).unwrap_or_default()
}

pub fn greeting(role: Role) -> &'static str {
    match role {
        Role::Patient => "Namaste! Welcome to your wellness journey",
        Role::Practitioner => "Your practice at a glance",
        Role::Administrator => "Platform overview",
    }
}

#[component]
fn Dashboard(role: Role) -> impl IntoView {
    view! {
        <div class="dashboard">
            <header class="dashboard__header">
                <h1>{format!("{} Dashboard", role.label())}</h1>
                <p class="dashboard__subtitle">{greeting(role)}</p>
            </header>
            <div class="dashboard__grid">
                {section_cards(role)
                    .iter()
                    .map(|item| {
                        view! {
                            <a class="dashboard-card" href=item.href>
                                <span class="dashboard-card__title">{item.label}</span>
                            </a>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}

/// `/user`: patients only.
#[component]
pub fn PatientDashboard() -> impl IntoView {
    view! {
        <ProtectedRoute allowed=vec![Role::Patient]>
            <Dashboard role=Role::Patient/>
        </ProtectedRoute>
    }
}

/// `/doctor`: practitioners only.
#[component]
pub fn PractitionerDashboard() -> impl IntoView {
    view! {
        <ProtectedRoute allowed=vec![Role::Practitioner]>
            <Dashboard role=Role::Practitioner/>
        </ProtectedRoute>
    }
}

/// `/admin`: administrators only.
#[component]
pub fn AdminDashboard() -> impl IntoView {
    view! {
        <ProtectedRoute allowed=vec![Role::Administrator]>
            <Dashboard role=Role::Administrator/>
        </ProtectedRoute>
    }
}

/// A portal section restricted to `role`.
#[component]
pub fn PortalSection(role: Role, title: &'static str) -> impl IntoView {
    view! {
        <ProtectedRoute allowed=vec![role]>
            <div class="dashboard">
                <header class="dashboard__header">
                    <a class="dashboard__back" href=role.dashboard_path()>"← Dashboard"</a>
                    <h1>{title}</h1>
                </header>
                <p class="dashboard__empty">"Nothing to show yet."</p>
            </div>
        </ProtectedRoute>
    }
}
