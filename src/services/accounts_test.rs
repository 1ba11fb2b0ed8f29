use super::*;
use crate::config::AdminSeed;

fn patient(email: &str, password: &str) -> PatientSignupRequest {
    PatientSignupRequest { email: email.to_owned(), password: password.to_owned(), ..demo_patient() }
}

fn practitioner(email: &str, password: &str) -> PractitionerSignupRequest {
    PractitionerSignupRequest { email: email.to_owned(), password: password.to_owned(), ..demo_practitioner() }
}

// =============================================================================
// helpers
// =============================================================================

#[test]
fn bytes_to_hex_formats_lowercase_pairs() {
    assert_eq!(bytes_to_hex(&[0x00, 0x0f, 0xab, 0xff]), "000fabff");
    assert_eq!(bytes_to_hex(&[]), "");
}

#[test]
fn generate_token_is_64_hex_chars_and_unique() {
    let a = generate_token();
    let b = generate_token();
    assert_eq!(a.len(), 64);
    assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    assert_ne!(a, b);
}

#[test]
fn password_digest_depends_on_salt() {
    let one = password_digest("aa", "secret1");
    assert_eq!(one, password_digest("aa", "secret1"));
    assert_ne!(one, password_digest("bb", "secret1"));
    assert_eq!(one.len(), 64);
}

#[test]
fn digests_match_compares_whole_strings() {
    let digest = password_digest("aa", "secret1");
    assert!(digests_match(&digest, &digest.clone()));
    assert!(!digests_match(&digest, &password_digest("aa", "secret2")));
    assert!(!digests_match(&digest, &digest[..63]));
    assert!(!digests_match("", "00"));
}

#[test]
fn normalize_email_trims_and_lowercases() {
    assert_eq!(normalize_email("  Asha@Clinic.IN "), "asha@clinic.in");
}

#[test]
fn validate_profile_order_matches_signup_form() {
    assert_eq!(
        validate_profile("", "bad", "", "123"),
        Err(AccountError::Invalid("Password must be at least 6 characters long"))
    );
    assert_eq!(
        validate_profile("", "bad", "", "123456"),
        Err(AccountError::Invalid("Please enter a valid email address"))
    );
    assert_eq!(validate_profile("", "a@b.in", " ", "123456"), Err(AccountError::Invalid("Phone number is required")));
    assert_eq!(validate_profile(" ", "a@b.in", "98", "123456"), Err(AccountError::Invalid("Full name is required")));
    assert_eq!(validate_profile("Asha", "a@b.in", "98", "123456"), Ok(()));
}

// =============================================================================
// AccountStore
// =============================================================================

#[tokio::test]
async fn register_then_authenticate_patient() {
    let store = AccountStore::new();
    let id = store.register_patient(&patient("asha@clinic.in", "secret1")).await.unwrap();

    let token = store.authenticate(Role::Patient, "ASHA@clinic.in", "secret1").await.unwrap();
    assert_eq!(store.resolve(&token).await, Some((id, Role::Patient)));
}

#[tokio::test]
async fn wrong_password_and_unknown_account_look_the_same() {
    let store = AccountStore::new();
    store.register_patient(&patient("asha@clinic.in", "secret1")).await.unwrap();

    assert_eq!(
        store.authenticate(Role::Patient, "asha@clinic.in", "wrong-pass").await,
        Err(AccountError::InvalidCredentials)
    );
    assert_eq!(
        store.authenticate(Role::Patient, "nobody@clinic.in", "secret1").await,
        Err(AccountError::InvalidCredentials)
    );
}

#[tokio::test]
async fn accounts_are_scoped_per_role() {
    let store = AccountStore::new();
    store.register_patient(&patient("asha@clinic.in", "secret1")).await.unwrap();

    assert_eq!(
        store.authenticate(Role::Practitioner, "asha@clinic.in", "secret1").await,
        Err(AccountError::InvalidCredentials)
    );

    store.register_practitioner(&practitioner("asha@clinic.in", "other-pass")).await.unwrap();
    let token = store.authenticate(Role::Practitioner, "asha@clinic.in", "other-pass").await.unwrap();
    assert_eq!(store.resolve(&token).await.map(|(_, role)| role), Some(Role::Practitioner));
}

#[tokio::test]
async fn duplicate_email_is_rejected_case_insensitively() {
    let store = AccountStore::new();
    store.register_patient(&patient("asha@clinic.in", "secret1")).await.unwrap();
    assert_eq!(
        store.register_patient(&patient(" Asha@Clinic.in", "secret2")).await,
        Err(AccountError::DuplicateEmail)
    );
}

#[tokio::test]
async fn invalid_profile_is_not_stored() {
    let store = AccountStore::new();
    assert_eq!(
        store.register_patient(&patient("asha@clinic.in", "123")).await,
        Err(AccountError::Invalid("Password must be at least 6 characters long"))
    );
    assert_eq!(
        store.authenticate(Role::Patient, "asha@clinic.in", "123").await,
        Err(AccountError::InvalidCredentials)
    );
}

#[tokio::test]
async fn practitioner_requires_hpr_id() {
    let store = AccountStore::new();
    let req = PractitionerSignupRequest { hpr_id: "  ".to_owned(), ..practitioner("dr@clinic.in", "secret1") };
    assert_eq!(store.register_practitioner(&req).await, Err(AccountError::Invalid("HPR ID is required")));
}

#[tokio::test]
async fn stored_account_keeps_no_plaintext_password() {
    let store = AccountStore::new();
    let id = store.register_patient(&patient("asha@clinic.in", "secret1")).await.unwrap();
    let account = store.account(id).await.unwrap();
    assert!(!format!("{account:?}").contains("secret1"));
    assert_eq!(account.full_name, "Demo Patient");
}

#[tokio::test]
async fn each_login_issues_a_new_token() {
    let store = AccountStore::new();
    store.register_patient(&patient("asha@clinic.in", "secret1")).await.unwrap();
    let first = store.authenticate(Role::Patient, "asha@clinic.in", "secret1").await.unwrap();
    let second = store.authenticate(Role::Patient, "asha@clinic.in", "secret1").await.unwrap();
    assert_ne!(first, second);
    assert!(store.resolve(&first).await.is_some());
    assert!(store.resolve(&second).await.is_some());
}

#[tokio::test]
async fn revoke_forgets_token_and_reports_liveness() {
    let store = AccountStore::new();
    let id = store.register_patient(&patient("asha@clinic.in", "secret1")).await.unwrap();
    let token = store.authenticate(Role::Patient, "asha@clinic.in", "secret1").await.unwrap();

    assert!(store.revoke(&token).await);
    assert_eq!(store.resolve(&token).await, None);
    assert!(!store.revoke(&token).await);
    assert!(store.account(id).await.is_some());
}

#[tokio::test]
async fn repeated_login_logout_leaves_no_live_tokens() {
    let store = AccountStore::new();
    store.register_patient(&patient("asha@clinic.in", "secret1")).await.unwrap();

    let mut issued = Vec::new();
    for _ in 0..100 {
        let token = store.authenticate(Role::Patient, "asha@clinic.in", "secret1").await.unwrap();
        assert!(store.revoke(&token).await);
        issued.push(token);
    }
    for token in &issued {
        assert_eq!(store.resolve(token).await, None);
    }
}

#[tokio::test]
async fn account_lookup_by_resolved_id() {
    let store = AccountStore::new();
    store.register_patient(&patient("asha@clinic.in", "secret1")).await.unwrap();
    let token = store.authenticate(Role::Patient, "asha@clinic.in", "secret1").await.unwrap();

    let (id, role) = store.resolve(&token).await.unwrap();
    let account = store.account(id).await.unwrap();
    assert_eq!(role, Role::Patient);
    assert_eq!(account.email, "asha@clinic.in");
    assert_eq!(account.phone, "9000000001");
}

#[tokio::test]
async fn resolve_unknown_token_is_none() {
    assert_eq!(AccountStore::new().resolve("deadbeef").await, None);
}

#[tokio::test]
async fn clones_share_accounts() {
    let store = AccountStore::new();
    let clone = store.clone();
    clone.register_patient(&patient("asha@clinic.in", "secret1")).await.unwrap();
    assert!(store.authenticate(Role::Patient, "asha@clinic.in", "secret1").await.is_ok());
}

// =============================================================================
// seed
// =============================================================================

#[tokio::test]
async fn seed_creates_admin_and_demo_accounts() {
    let store = AccountStore::new();
    let config = ServerConfig {
        port: 3000,
        admin: Some(AdminSeed { email: "root@ayudhra.in".to_owned(), password: "rootpass".to_owned() }),
        seed_demo_accounts: true,
    };
    seed(&store, &config).await.unwrap();

    assert!(store.authenticate(Role::Administrator, "root@ayudhra.in", "rootpass").await.is_ok());
    assert!(store.authenticate(Role::Patient, DEMO_PATIENT_EMAIL, DEMO_PASSWORD).await.is_ok());
    assert!(store.authenticate(Role::Practitioner, DEMO_PRACTITIONER_EMAIL, DEMO_PASSWORD).await.is_ok());
}

#[tokio::test]
async fn seed_with_defaults_creates_nothing() {
    let store = AccountStore::new();
    let config = ServerConfig { port: 3000, admin: None, seed_demo_accounts: false };
    seed(&store, &config).await.unwrap();
    assert_eq!(
        store.authenticate(Role::Patient, DEMO_PATIENT_EMAIL, DEMO_PASSWORD).await,
        Err(AccountError::InvalidCredentials)
    );
}

#[tokio::test]
async fn seed_rejects_short_admin_password() {
    let store = AccountStore::new();
    let config = ServerConfig {
        port: 3000,
        admin: Some(AdminSeed { email: "root@ayudhra.in".to_owned(), password: "abc".to_owned() }),
        seed_demo_accounts: false,
    };
    assert!(matches!(seed(&store, &config).await, Err(AccountError::Invalid(_))));
}
