//! Login page with a role selector and email + password auth.
//!
//! SYSTEM CONTEXT
//! ==============
//! The page sits inside `ProtectedRoute` with no role restriction, so once
//! `AuthContext::login` flips the state the guard moves the user to their
//! dashboard. The page itself never navigates.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use crate::net::types::LoginRequest;
use crate::state::auth::{LOGIN_PATH, Role, SIGNUP_PATH};
use crate::util::auth::use_auth;

/// Login URL that preselects `role`.
pub fn login_path_for(role: Role) -> String {
    format!("{LOGIN_PATH}?role={}", role.tag())
}

/// Role preselected from the `?role=` query param. Defaults to patient.
pub fn initial_role(tag: Option<&str>) -> Role {
    tag.and_then(Role::from_tag).unwrap_or(Role::Patient)
}

/// Trim and check the login form.
///
/// # Errors
///
/// Returns the message to show when a field is missing or the email is malformed.
pub fn validate_login_input(email: &str, password: &str) -> Result<LoginRequest, &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err("Enter your email and password.");
    }
    if !email.contains('@') {
        return Err("Please enter a valid email address");
    }
    Ok(LoginRequest { email: email.to_owned(), password: password.to_owned() })
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let query = use_query_map();

    let role = RwSignal::new(query.with_untracked(|q| initial_role(q.get("role").as_deref())));
    let signup_success = query.with_untracked(|q| q.get("signup").as_deref() == Some("success"));
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let request = match validate_login_input(&email.get(), &password.get()) {
            Ok(request) => request,
            Err(message) => {
                error.set(Some(message.to_owned()));
                return;
            }
        };
        let selected = role.get();
        busy.set(true);
        error.set(None);

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::login(selected, &request).await {
                Ok(token) => auth.login(&token, selected),
                Err(message) => {
                    log::warn!("login as {selected} failed: {message}");
                    error.set(Some(message));
                }
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (auth, request, selected);
            busy.set(false);
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Welcome Back"</h1>
                <p class="login-card__subtitle">"Sign in to your Ayudhra account"</p>
                <Show when=move || signup_success>
                    <p class="login-message login-message--success">
                        "Account created successfully! Please sign in with your credentials."
                    </p>
                </Show>
                <div class="role-picker">
                    {Role::ALL
                        .into_iter()
                        .map(|option| {
                            view! {
                                <button
                                    type="button"
                                    class=move || {
                                        if role.get() == option {
                                            "role-picker__option role-picker__option--active"
                                        } else {
                                            "role-picker__option"
                                        }
                                    }
                                    on:click=move |_| role.set(option)
                                >
                                    {option.label()}
                                </button>
                            }
                        })
                        .collect_view()}
                </div>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="email"
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| {
                            error.set(None);
                            email.set(event_target_value(&ev));
                        }
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| {
                            error.set(None);
                            password.set(event_target_value(&ev));
                        }
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Signing in..." } else { "Sign In" }}
                    </button>
                </form>
                <Show when=move || error.get().is_some()>
                    <p class="login-message login-message--error">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <Show when=move || role.get() != Role::Administrator>
                    <p class="login-card__footer">
                        "New here? "
                        <a href=move || format!("{SIGNUP_PATH}?role={}", role.get().tag())>"Create an account"</a>
                    </p>
                </Show>
            </div>
        </div>
    }
}
