//! Shared wire DTOs for the auth API boundary.
//!
//! DESIGN
//! ======
//! The host server deserializes the same types it hands back, so field names
//! (camelCase) and status tags stay in one place.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

use crate::state::auth::Role;

/// Envelope status used by every auth API response.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiStatus {
    Success,
    /// Client-side problem (validation, bad credentials).
    Fail,
    /// Server-side problem.
    Error,
}

/// Email + password credentials for any role.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login. `token` is opaque to the client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub status: ApiStatus,
    pub token: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientSignupRequest {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abha_id: Option<String>,
    pub dob: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub known_allergies: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub medical_history: Vec<String>,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PractitionerSignupRequest {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    /// Health Professional Registry id.
    pub hpr_id: String,
    pub qualifications: Vec<String>,
    pub specialization: String,
    /// Years of practice.
    pub experience: u32,
    pub consultation_fees: u32,
    pub clinic_address: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupResponse {
    pub status: ApiStatus,
}

/// Account behind a bearer token, returned by `GET /api/auth/me`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub status: ApiStatus,
    pub role: Role,
    pub full_name: String,
    pub email: String,
    pub phone: String,
}

/// Failure body: `{"status": "fail", "message": "..."}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: ApiStatus,
    pub message: String,
}

impl ErrorResponse {
    pub fn fail(message: impl Into<String>) -> Self {
        Self { status: ApiStatus::Fail, message: message.into() }
    }
}
