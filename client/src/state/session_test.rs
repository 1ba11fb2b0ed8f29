use super::*;

// =============================================================
// MemoryStorage
// =============================================================

#[test]
fn memory_storage_clones_share_entries() {
    let storage = MemoryStorage::new();
    let other = storage.clone();
    storage.set_item("k", "v");
    assert_eq!(other.get_item("k"), Some("v".to_owned()));
    other.remove_item("k");
    assert_eq!(storage.get_item("k"), None);
}

// =============================================================
// SessionStore
// =============================================================

#[test]
fn token_and_role_round_trip_through_storage() {
    let store = SessionStore::new(MemoryStorage::new());
    store.set_token("tok123");
    store.set_role(Role::Patient);
    assert_eq!(store.get_token(), Some("tok123".to_owned()));
    assert_eq!(store.get_role(), Some(Role::Patient));
}

#[test]
fn role_is_persisted_under_its_tag() {
    let storage = MemoryStorage::new();
    let store = SessionStore::new(storage.clone());
    store.set_role(Role::Practitioner);
    assert_eq!(storage.get_item(ROLE_KEY), Some("doctor".to_owned()));
}

#[test]
fn unknown_role_tag_reads_as_absent() {
    let storage = MemoryStorage::new();
    storage.set_item(ROLE_KEY, "nurse");
    let store = SessionStore::new(storage);
    assert_eq!(store.get_role(), None);
}

#[test]
fn empty_token_reads_as_absent() {
    let storage = MemoryStorage::new();
    storage.set_item(TOKEN_KEY, "");
    let store = SessionStore::new(storage);
    assert_eq!(store.get_token(), None);
}

#[test]
fn load_requires_both_token_and_role() {
    let storage = MemoryStorage::new();
    let store = SessionStore::new(storage.clone());

    store.set_token("tok");
    assert_eq!(store.load(), None);

    storage.remove_item(TOKEN_KEY);
    store.set_role(Role::Administrator);
    assert_eq!(store.load(), None);

    store.set_token("tok");
    assert_eq!(
        store.load(),
        Some(SessionRecord { token: "tok".to_owned(), role: Role::Administrator })
    );
}

#[test]
fn clear_removes_both_entries() {
    let storage = MemoryStorage::new();
    let store = SessionStore::new(storage.clone());
    store.save(&SessionRecord { token: "tok".to_owned(), role: Role::Patient });
    store.clear();
    assert_eq!(storage.get_item(TOKEN_KEY), None);
    assert_eq!(storage.get_item(ROLE_KEY), None);
    assert_eq!(store.load(), None);
}

#[test]
fn clear_on_empty_storage_is_noop() {
    let store = SessionStore::new(MemoryStorage::new());
    store.clear();
    assert_eq!(store.load(), None);
}

// =============================================================
// BrowserStorage outside the browser
// =============================================================

#[cfg(not(feature = "hydrate"))]
#[test]
fn browser_storage_without_window_reads_none_and_ignores_writes() {
    let store = SessionStore::browser();
    store.set_token("tok");
    store.set_role(Role::Patient);
    assert_eq!(store.get_token(), None);
    assert_eq!(store.get_role(), None);
    assert_eq!(store.load(), None);
    store.clear();
}
