//! Public landing page. Not guarded.

use leptos::prelude::*;

use crate::pages::login::login_path_for;
use crate::state::auth::{Role, SIGNUP_PATH};

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="home">
            <section class="home__hero">
                <h1>"Ayudhra"</h1>
                <p class="home__tagline">"Ayurveda-focused diet plans and practice management"</p>
                <a class="login-button" href=SIGNUP_PATH>"Get Started"</a>
            </section>
            <section class="home__portals">
                {Role::ALL
                    .into_iter()
                    .map(|role| {
                        view! {
                            <a class="dashboard-card" href=login_path_for(role)>
                                <span class="dashboard-card__title">{format!("{} Portal", role.label())}</span>
                            </a>
                        }
                    })
                    .collect_view()}
            </section>
        </div>
    }
}
