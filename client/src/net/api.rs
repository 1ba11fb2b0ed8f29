//! REST helpers for the backend auth API.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning an error since login and signup are
//! only ever submitted from the browser.
//!
//! ERROR HANDLING
//! ==============
//! Failures come back as display-ready strings. The backend's `message` field
//! is preferred; anything unparseable collapses to a generic message.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::types::{ErrorResponse, LoginRequest, PatientSignupRequest, PractitionerSignupRequest};
use crate::state::auth::Role;

const AUTH_API_PREFIX: &str = "/api/auth";

/// `POST` target that revokes the caller's bearer token.
pub const LOGOUT_ENDPOINT: &str = "/api/auth/logout";

/// Fallback shown when the backend gives no usable message.
pub const AUTH_FAILED_MESSAGE: &str = "Authentication failed";

/// `POST` target for logging in as `role`.
pub fn login_endpoint(role: Role) -> String {
    format!("{AUTH_API_PREFIX}/{}/login", role.api_segment())
}

/// `POST` target for signing up as `role`. Administrators cannot sign up.
pub fn signup_endpoint(role: Role) -> Option<String> {
    match role {
        Role::Patient | Role::Practitioner => Some(format!("{AUTH_API_PREFIX}/{}/signup", role.api_segment())),
        Role::Administrator => None,
    }
}

/// `Authorization` header value for `token`.
pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// Extract a display message from a failed response body.
pub fn auth_error_message(body: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .map(|e| e.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| AUTH_FAILED_MESSAGE.to_owned())
}

#[cfg(feature = "hydrate")]
async fn post_json<T: serde::Serialize>(url: &str, payload: &T) -> Result<gloo_net::http::Response, String> {
    let resp = gloo_net::http::Request::post(url)
        .json(payload)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if resp.ok() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(auth_error_message(&body))
}

/// Log in as `role`, returning the bearer token.
///
/// # Errors
///
/// Returns the backend's message (or a generic one) when the request fails.
pub async fn login(role: Role, credentials: &LoginRequest) -> Result<String, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = post_json(&login_endpoint(role), credentials).await?;
        let body: super::types::AuthResponse = resp.json().await.map_err(|e| e.to_string())?;
        if body.token.is_empty() {
            return Err(AUTH_FAILED_MESSAGE.to_owned());
        }
        Ok(body.token)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (role, credentials);
        Err("not available on server".to_owned())
    }
}

/// Register a patient account.
///
/// # Errors
///
/// Returns the backend's message (or a generic one) when the request fails.
pub async fn signup_patient(request: &PatientSignupRequest) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let url = signup_endpoint(Role::Patient).ok_or_else(|| AUTH_FAILED_MESSAGE.to_owned())?;
        post_json(&url, request).await.map(|_| ())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = request;
        Err("not available on server".to_owned())
    }
}

/// Register a practitioner account.
///
/// # Errors
///
/// Returns the backend's message (or a generic one) when the request fails.
pub async fn signup_practitioner(request: &PractitionerSignupRequest) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let url = signup_endpoint(Role::Practitioner).ok_or_else(|| AUTH_FAILED_MESSAGE.to_owned())?;
        post_json(&url, request).await.map(|_| ())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = request;
        Err("not available on server".to_owned())
    }
}

/// Revoke `token` on the backend. The local session is cleared regardless.
///
/// # Errors
///
/// Returns the transport error or the backend's message.
pub async fn logout(token: &str) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post(LOGOUT_ENDPOINT)
            .header("Authorization", &bearer(token))
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if resp.ok() {
            return Ok(());
        }
        let body = resp.text().await.unwrap_or_default();
        Err(auth_error_message(&body))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = token;
        Err("not available on server".to_owned())
    }
}
