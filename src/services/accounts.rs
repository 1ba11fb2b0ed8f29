//! In-memory account registry and bearer-token issuance.
//!
//! SYSTEM CONTEXT
//! ==============
//! Stands in for the practice backend that the portal talks to. Accounts are
//! scoped per role: the same email may hold a patient and a practitioner
//! account, each with its own password.
//!
//! TRADE-OFFS
//! ==========
//! Nothing is persisted and issued tokens never expire; they are dropped on
//! logout. Restarting the server invalidates every session the browser still
//! holds, which the client treats like any other opaque token until it is used.

#[cfg(test)]
#[path = "accounts_test.rs"]
mod accounts_test;

use std::collections::HashMap;
use std::fmt::Write;
use std::sync::Arc;

use client::net::types::{PatientSignupRequest, PractitionerSignupRequest};
use client::state::auth::Role;
use rand::Rng;
use sha2::{Digest, Sha256};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::config::ServerConfig;

const MIN_PASSWORD_LEN: usize = 6;

pub const DEMO_PATIENT_EMAIL: &str = "patient@demo.ayudhra.in";
pub const DEMO_PRACTITIONER_EMAIL: &str = "doctor@demo.ayudhra.in";
pub const DEMO_PASSWORD: &str = "demo1234";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AccountError {
    /// Profile failed validation; the message is shown to the user as-is.
    #[error("{0}")]
    Invalid(&'static str),
    /// An account with this email already exists for the role.
    #[error("An account with this email already exists")]
    DuplicateEmail,
    /// Unknown email or wrong password.
    #[error("Invalid email or password")]
    InvalidCredentials,
    /// The role cannot self-register.
    #[error("{0} accounts cannot be created through signup")]
    SignupNotAllowed(Role),
}

// =============================================================================
// TOKENS & DIGESTS
// =============================================================================

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a cryptographically random 32-byte hex token.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

fn generate_salt() -> String {
    let bytes: [u8; 16] = rand::rng().random();
    bytes_to_hex(&bytes)
}

#[must_use]
pub(crate) fn password_digest(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    bytes_to_hex(&hasher.finalize())
}

#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

/// Check the fields every self-registered profile shares.
///
/// # Errors
///
/// Returns the first failing rule, in the same order the signup form checks them.
pub fn validate_profile(full_name: &str, email: &str, phone: &str, password: &str) -> Result<(), AccountError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AccountError::Invalid("Password must be at least 6 characters long"));
    }
    if !email.contains('@') {
        return Err(AccountError::Invalid("Please enter a valid email address"));
    }
    if phone.trim().is_empty() {
        return Err(AccountError::Invalid("Phone number is required"));
    }
    if full_name.trim().is_empty() {
        return Err(AccountError::Invalid("Full name is required"));
    }
    Ok(())
}

// =============================================================================
// ACCOUNT STORE
// =============================================================================

/// Stored account. The password is kept only as a salted digest.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: Uuid,
    pub role: Role,
    pub email: String,
    pub full_name: String,
    pub phone: String,
    salt: String,
    digest: String,
}

impl Account {
    fn new(role: Role, email: &str, full_name: &str, phone: &str, password: &str) -> Self {
        let salt = generate_salt();
        let digest = password_digest(&salt, password);
        Self {
            id: Uuid::new_v4(),
            role,
            email: normalize_email(email),
            full_name: full_name.trim().to_owned(),
            phone: phone.trim().to_owned(),
            salt,
            digest,
        }
    }

    fn verify(&self, password: &str) -> bool {
        digests_match(&password_digest(&self.salt, password), &self.digest)
    }
}

/// Compare two digests without short-circuiting on the first differing byte.
pub(crate) fn digests_match(a: &str, b: &str) -> bool {
    a.len() == b.len() && a.bytes().zip(b.bytes()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[derive(Default)]
struct Registry {
    accounts: HashMap<Uuid, Account>,
    by_email: HashMap<(Role, String), Uuid>,
    tokens: HashMap<String, (Uuid, Role)>,
}

/// Shared handle to the account registry. Clones see the same accounts.
#[derive(Clone, Default)]
pub struct AccountStore {
    inner: Arc<RwLock<Registry>>,
}

impl AccountStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    async fn insert(&self, account: Account) -> Result<Uuid, AccountError> {
        let mut registry = self.inner.write().await;
        let key = (account.role, account.email.clone());
        if registry.by_email.contains_key(&key) {
            return Err(AccountError::DuplicateEmail);
        }
        let id = account.id;
        tracing::info!(%id, role = account.role.tag(), "account registered");
        registry.by_email.insert(key, id);
        registry.accounts.insert(id, account);
        Ok(id)
    }

    /// Register a patient account.
    ///
    /// # Errors
    ///
    /// Validation failures and duplicate emails.
    pub async fn register_patient(&self, req: &PatientSignupRequest) -> Result<Uuid, AccountError> {
        validate_profile(&req.full_name, &req.email, &req.phone, &req.password)?;
        self.insert(Account::new(Role::Patient, &req.email, &req.full_name, &req.phone, &req.password))
            .await
    }

    /// Register a practitioner account.
    ///
    /// # Errors
    ///
    /// Validation failures and duplicate emails.
    pub async fn register_practitioner(&self, req: &PractitionerSignupRequest) -> Result<Uuid, AccountError> {
        validate_profile(&req.full_name, &req.email, &req.phone, &req.password)?;
        if req.hpr_id.trim().is_empty() {
            return Err(AccountError::Invalid("HPR ID is required"));
        }
        self.insert(Account::new(Role::Practitioner, &req.email, &req.full_name, &req.phone, &req.password))
            .await
    }

    /// Register an administrator. Only reachable from startup seeding.
    ///
    /// # Errors
    ///
    /// Short password, malformed email or duplicate email.
    pub async fn register_administrator(&self, email: &str, password: &str) -> Result<Uuid, AccountError> {
        validate_profile("Administrator", email, "-", password)?;
        self.insert(Account::new(Role::Administrator, email, "Administrator", "", password))
            .await
    }

    /// Check credentials for `role` and issue a fresh bearer token.
    ///
    /// # Errors
    ///
    /// `InvalidCredentials` for an unknown account or a wrong password alike.
    pub async fn authenticate(&self, role: Role, email: &str, password: &str) -> Result<String, AccountError> {
        let mut registry = self.inner.write().await;
        let id = registry
            .by_email
            .get(&(role, normalize_email(email)))
            .and_then(|id| registry.accounts.get(id))
            .filter(|account| account.verify(password))
            .map(|account| account.id)
            .ok_or(AccountError::InvalidCredentials)?;

        let token = generate_token();
        registry.tokens.insert(token.clone(), (id, role));
        tracing::info!(%id, role = role.tag(), "session issued");
        Ok(token)
    }

    /// Look up the account id and role behind an issued token.
    pub async fn resolve(&self, token: &str) -> Option<(Uuid, Role)> {
        self.inner.read().await.tokens.get(token).copied()
    }

    /// Fetch an account by id.
    pub async fn account(&self, id: Uuid) -> Option<Account> {
        self.inner.read().await.accounts.get(&id).cloned()
    }

    /// Forget an issued token. Returns whether it was live.
    pub async fn revoke(&self, token: &str) -> bool {
        let revoked = self.inner.write().await.tokens.remove(token);
        if let Some((id, role)) = revoked {
            tracing::info!(%id, role = role.tag(), "session revoked");
        }
        revoked.is_some()
    }
}

// =============================================================================
// SEEDING
// =============================================================================

/// Create the configured administrator and, if enabled, the demo accounts.
///
/// # Errors
///
/// Returns the first registration that fails.
pub async fn seed(store: &AccountStore, config: &ServerConfig) -> Result<(), AccountError> {
    if let Some(admin) = &config.admin {
        store.register_administrator(&admin.email, &admin.password).await?;
        tracing::info!(email = %normalize_email(&admin.email), "administrator seeded");
    }

    if config.seed_demo_accounts {
        store.register_patient(&demo_patient()).await?;
        store.register_practitioner(&demo_practitioner()).await?;
        tracing::info!("demo accounts seeded");
    }

    Ok(())
}

fn demo_patient() -> PatientSignupRequest {
    PatientSignupRequest {
        full_name: "Demo Patient".to_owned(),
        email: DEMO_PATIENT_EMAIL.to_owned(),
        phone: "9000000001".to_owned(),
        abha_id: None,
        dob: "1990-01-01".to_owned(),
        gender: None,
        height: None,
        weight: None,
        known_allergies: Vec::new(),
        medical_history: Vec::new(),
        password: DEMO_PASSWORD.to_owned(),
    }
}

fn demo_practitioner() -> PractitionerSignupRequest {
    PractitionerSignupRequest {
        full_name: "Dr. Demo".to_owned(),
        email: DEMO_PRACTITIONER_EMAIL.to_owned(),
        phone: "9000000002".to_owned(),
        hpr_id: "HPR-DEMO-0001".to_owned(),
        qualifications: vec!["MBBS".to_owned()],
        specialization: "General Medicine".to_owned(),
        experience: 5,
        consultation_fees: 500,
        clinic_address: "Demo Clinic".to_owned(),
        password: DEMO_PASSWORD.to_owned(),
    }
}
