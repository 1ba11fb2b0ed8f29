//! Root application component with routing and the auth context.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::navbar::Navbar;
use crate::components::protected_route::ProtectedRoute;
use crate::pages::dashboard::{AdminDashboard, PatientDashboard, PortalSection, PractitionerDashboard};
use crate::pages::home::HomePage;
use crate::pages::login::LoginPage;
use crate::pages::signup::SignupPage;
use crate::state::auth::Role;
use crate::util::auth::provide_auth;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Owns the single `AuthContext` for the page and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    provide_auth();

    view! {
        <Stylesheet id="leptos" href="/pkg/ayudhra.css"/>
        <Title text="Ayudhra - Practice Management & Nutrient Analysis"/>

        <Router>
            <Navbar/>
            <main>
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("") view=HomePage/>
                    <Route
                        path=(StaticSegment("auth"), StaticSegment("login"))
                        view=|| view! { <ProtectedRoute><LoginPage/></ProtectedRoute> }
                    />
                    <Route
                        path=(StaticSegment("auth"), StaticSegment("signup"))
                        view=|| view! { <ProtectedRoute><SignupPage/></ProtectedRoute> }
                    />

                    <Route path=StaticSegment("user") view=PatientDashboard/>
                    <Route
                        path=(StaticSegment("user"), StaticSegment("scan"))
                        view=|| view! { <PortalSection role=Role::Patient title="Food Scan"/> }
                    />
                    <Route
                        path=(StaticSegment("user"), StaticSegment("analytics"))
                        view=|| view! { <PortalSection role=Role::Patient title="Analytics"/> }
                    />
                    <Route
                        path=(StaticSegment("user"), StaticSegment("sessions"))
                        view=|| view! { <PortalSection role=Role::Patient title="Sessions"/> }
                    />
                    <Route
                        path=(StaticSegment("user"), StaticSegment("chat"))
                        view=|| view! { <PortalSection role=Role::Patient title="Messages"/> }
                    />

                    <Route path=StaticSegment("doctor") view=PractitionerDashboard/>
                    <Route
                        path=(StaticSegment("doctor"), StaticSegment("patients"))
                        view=|| view! { <PortalSection role=Role::Practitioner title="Patients"/> }
                    />
                    <Route
                        path=(StaticSegment("doctor"), StaticSegment("plans"))
                        view=|| view! { <PortalSection role=Role::Practitioner title="Diet Plans"/> }
                    />
                    <Route
                        path=(StaticSegment("doctor"), StaticSegment("chat"))
                        view=|| view! { <PortalSection role=Role::Practitioner title="Messages"/> }
                    />

                    <Route path=StaticSegment("admin") view=AdminDashboard/>
                    <Route
                        path=(StaticSegment("admin"), StaticSegment("doctors"))
                        view=|| view! { <PortalSection role=Role::Administrator title="Doctors"/> }
                    />
                    <Route
                        path=(StaticSegment("admin"), StaticSegment("users"))
                        view=|| view! { <PortalSection role=Role::Administrator title="Users"/> }
                    />
                </Routes>
            </main>
        </Router>
    }
}
