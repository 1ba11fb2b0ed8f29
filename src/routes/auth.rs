//! Auth routes: per-role login and self-registration.
//!
//! The role travels in the path (`patient`, `doctor`, `admin`) so the client
//! can pick the endpoint from the role selector alone.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Json, Response};
use client::net::types::{
    ApiStatus, AuthResponse, ErrorResponse, LoginRequest, MeResponse, PatientSignupRequest,
    PractitionerSignupRequest, SignupResponse,
};
use client::state::auth::Role;

use crate::services::accounts::AccountError;
use crate::state::AppState;

fn fail(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorResponse::fail(message))).into_response()
}

fn unknown_role(segment: &str) -> Response {
    fail(StatusCode::NOT_FOUND, format!("Unknown role: {segment}"))
}

pub(crate) fn account_error_status(err: &AccountError) -> StatusCode {
    match err {
        AccountError::Invalid(_) => StatusCode::BAD_REQUEST,
        AccountError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        AccountError::SignupNotAllowed(_) => StatusCode::FORBIDDEN,
        AccountError::DuplicateEmail => StatusCode::CONFLICT,
    }
}

fn account_error_response(err: &AccountError) -> Response {
    fail(account_error_status(err), err.to_string())
}

/// Decode a JSON body, answering in the `fail` shape instead of axum's plain-text rejection.
fn parse_body<T: serde::de::DeserializeOwned>(body: &[u8], what: &'static str) -> Result<T, Response> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::debug!(error = %e, "{what} payload rejected");
        fail(StatusCode::BAD_REQUEST, format!("Missing or invalid {what} fields"))
    })
}

/// Token from an `Authorization: Bearer <token>` header.
pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

fn missing_session() -> Response {
    fail(StatusCode::UNAUTHORIZED, "Not signed in")
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `POST /api/auth/{role}/login`: verify credentials and issue a bearer token.
pub async fn login(
    State(state): State<AppState>,
    Path(segment): Path<String>,
    body: Bytes,
) -> Response {
    let Some(role) = Role::from_api_segment(&segment) else {
        return unknown_role(&segment);
    };
    let req: LoginRequest = match parse_body(&body, "login") {
        Ok(req) => req,
        Err(resp) => return resp,
    };

    match state.accounts.authenticate(role, &req.email, &req.password).await {
        Ok(token) => Json(AuthResponse { status: ApiStatus::Success, token }).into_response(),
        Err(e) => {
            tracing::info!(role = role.tag(), error = %e, "login rejected");
            account_error_response(&e)
        }
    }
}

/// `POST /api/auth/{role}/signup`: register a patient or practitioner.
///
/// The body shape depends on the role, so it is decoded after the role is known.
pub async fn signup(
    State(state): State<AppState>,
    Path(segment): Path<String>,
    body: Bytes,
) -> Response {
    let Some(role) = Role::from_api_segment(&segment) else {
        return unknown_role(&segment);
    };

    let result = match role {
        Role::Patient => match parse_body::<PatientSignupRequest>(&body, "signup") {
            Ok(req) => state.accounts.register_patient(&req).await,
            Err(resp) => return resp,
        },
        Role::Practitioner => match parse_body::<PractitionerSignupRequest>(&body, "signup") {
            Ok(req) => state.accounts.register_practitioner(&req).await,
            Err(resp) => return resp,
        },
        Role::Administrator => Err(AccountError::SignupNotAllowed(role)),
    };

    match result {
        Ok(_) => (StatusCode::CREATED, Json(SignupResponse { status: ApiStatus::Success })).into_response(),
        Err(e) => {
            tracing::info!(role = role.tag(), error = %e, "signup rejected");
            account_error_response(&e)
        }
    }
}

/// `GET /api/auth/me`: the account behind the bearer token.
pub async fn me(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let Some(token) = bearer_token(&headers) else {
        return missing_session();
    };
    let Some((id, role)) = state.accounts.resolve(token).await else {
        return missing_session();
    };
    let Some(account) = state.accounts.account(id).await else {
        return missing_session();
    };

    Json(MeResponse {
        status: ApiStatus::Success,
        role,
        full_name: account.full_name,
        email: account.email,
        phone: account.phone,
    })
    .into_response()
}

/// `POST /api/auth/logout`: revoke the bearer token. Unknown tokens are not an error.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let Some(token) = bearer_token(&headers) else {
        return missing_session();
    };
    state.accounts.revoke(token).await;
    StatusCode::NO_CONTENT.into_response()
}
