use super::*;
use crate::state::session::{MemoryStorage, ROLE_KEY, SessionStorage, TOKEN_KEY};

fn controller(storage: &MemoryStorage) -> AuthController<MemoryStorage> {
    AuthController::new(SessionStore::new(storage.clone()))
}

// =============================================================
// Role
// =============================================================

#[test]
fn role_tags_round_trip() {
    for role in Role::ALL {
        assert_eq!(Role::from_tag(role.tag()), Some(role));
        assert_eq!(Role::from_api_segment(role.api_segment()), Some(role));
    }
    assert_eq!(Role::from_tag("patient"), None);
    assert_eq!(Role::from_api_segment("user"), None);
}

#[test]
fn role_dashboards_are_distinct() {
    assert_eq!(Role::Patient.dashboard_path(), "/user");
    assert_eq!(Role::Practitioner.dashboard_path(), "/doctor");
    assert_eq!(Role::Administrator.dashboard_path(), "/admin");
}

#[test]
fn role_serializes_as_tag() {
    assert_eq!(serde_json::to_string(&Role::Practitioner).unwrap(), "\"doctor\"");
    let parsed: Role = serde_json::from_str("\"admin\"").unwrap();
    assert_eq!(parsed, Role::Administrator);
}

// =============================================================
// AuthState
// =============================================================

#[test]
fn auth_state_default_is_loading() {
    let state = AuthState::default();
    assert!(state.is_loading());
    assert!(!state.is_authenticated());
    assert_eq!(state.role(), None);
}

#[test]
fn auth_state_accessors() {
    let state = AuthState::Authenticated { role: Role::Patient };
    assert!(!state.is_loading());
    assert!(state.is_authenticated());
    assert_eq!(state.role(), Some(Role::Patient));

    let state = AuthState::Unauthenticated;
    assert!(!state.is_loading());
    assert!(!state.is_authenticated());
    assert_eq!(state.role(), None);
}

// =============================================================
// AuthController
// =============================================================

#[test]
fn new_controller_starts_initializing() {
    let storage = MemoryStorage::new();
    assert_eq!(controller(&storage).state(), AuthState::Initializing);
}

#[test]
fn initialize_with_empty_storage_is_unauthenticated() {
    let storage = MemoryStorage::new();
    let mut auth = controller(&storage);
    let state = auth.initialize();
    assert_eq!(state, AuthState::Unauthenticated);
    assert!(!state.is_authenticated());
    assert_eq!(state.role(), None);
    assert!(!state.is_loading());
}

#[test]
fn initialize_adopts_complete_session() {
    let storage = MemoryStorage::new();
    storage.set_item(TOKEN_KEY, "tok");
    storage.set_item(ROLE_KEY, "admin");
    let mut auth = controller(&storage);
    assert_eq!(auth.initialize(), AuthState::Authenticated { role: Role::Administrator });
}

#[test]
fn initialize_with_token_only_is_unauthenticated() {
    let storage = MemoryStorage::new();
    storage.set_item(TOKEN_KEY, "tok");
    let mut auth = controller(&storage);
    assert_eq!(auth.initialize(), AuthState::Unauthenticated);
}

#[test]
fn initialize_with_invalid_role_is_unauthenticated() {
    let storage = MemoryStorage::new();
    storage.set_item(TOKEN_KEY, "tok");
    storage.set_item(ROLE_KEY, "superuser");
    let mut auth = controller(&storage);
    assert_eq!(auth.initialize(), AuthState::Unauthenticated);
}

#[test]
fn initialize_only_reads_storage_once() {
    let storage = MemoryStorage::new();
    let mut auth = controller(&storage);
    auth.initialize();
    storage.set_item(TOKEN_KEY, "late");
    storage.set_item(ROLE_KEY, "user");
    assert_eq!(auth.initialize(), AuthState::Unauthenticated);
}

#[test]
fn login_authenticates_every_role() {
    for role in Role::ALL {
        let storage = MemoryStorage::new();
        let mut auth = controller(&storage);
        auth.initialize();
        let state = auth.login("tok", role);
        assert!(state.is_authenticated());
        assert_eq!(state.role(), Some(role));
        assert_eq!(auth.state(), state);
    }
}

#[test]
fn login_persists_token_and_role() {
    let storage = MemoryStorage::new();
    let mut auth = controller(&storage);
    auth.initialize();
    auth.login("tok123", Role::Patient);
    assert_eq!(auth.session().get_token(), Some("tok123".to_owned()));
    assert_eq!(auth.session().get_role(), Some(Role::Patient));
}

#[test]
fn login_survives_reload() {
    let storage = MemoryStorage::new();
    let mut first = controller(&storage);
    first.initialize();
    first.login("tok", Role::Practitioner);

    let mut reloaded = controller(&storage);
    assert!(reloaded.state().is_loading());
    assert_eq!(reloaded.initialize(), AuthState::Authenticated { role: Role::Practitioner });
}

#[test]
fn login_replaces_existing_session() {
    let storage = MemoryStorage::new();
    let mut auth = controller(&storage);
    auth.initialize();
    auth.login("a", Role::Patient);
    auth.login("b", Role::Administrator);
    assert_eq!(auth.state().role(), Some(Role::Administrator));
    assert_eq!(auth.session().get_token(), Some("b".to_owned()));
}

#[test]
fn logout_clears_state_and_storage_and_targets_login() {
    let storage = MemoryStorage::new();
    let mut auth = controller(&storage);
    auth.initialize();
    auth.login("tok", Role::Patient);

    assert_eq!(auth.logout(), LOGIN_PATH);
    assert_eq!(auth.state(), AuthState::Unauthenticated);
    assert_eq!(auth.state().role(), None);
    assert_eq!(storage.get_item(TOKEN_KEY), None);
    assert_eq!(storage.get_item(ROLE_KEY), None);
}

#[test]
fn logout_is_idempotent() {
    let storage = MemoryStorage::new();
    let mut auth = controller(&storage);
    auth.initialize();
    auth.login("tok", Role::Administrator);

    assert_eq!(auth.logout(), LOGIN_PATH);
    let after_first = auth.state();
    assert_eq!(auth.logout(), LOGIN_PATH);
    assert_eq!(auth.state(), after_first);
}

#[test]
fn logout_when_never_logged_in_still_targets_login() {
    let storage = MemoryStorage::new();
    let mut auth = controller(&storage);
    auth.initialize();
    assert_eq!(auth.logout(), LOGIN_PATH);
    assert_eq!(auth.state(), AuthState::Unauthenticated);
}

#[test]
fn logout_then_reload_is_unauthenticated() {
    let storage = MemoryStorage::new();
    let mut auth = controller(&storage);
    auth.initialize();
    auth.login("tok", Role::Patient);
    auth.logout();

    let mut reloaded = controller(&storage);
    assert_eq!(reloaded.initialize(), AuthState::Unauthenticated);
}
