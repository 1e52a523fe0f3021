//! Integration tests for session storage.
//!
//! Tests the file-backed store on a temp directory, corrupt-file handling,
//! age and JWT expiry, and credential lookup from the store.

mod common;

use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{Duration, Utc};
use tempfile::TempDir;

use fa_api::CredentialProvider;
use fa_core::config::SessionConfig;
use fa_models::Session;
use fa_services::session::{
    FileSessionStore, SessionCredentials, SessionPolicy, SessionStore,
};

fn file_store(dir: &TempDir, policy: SessionPolicy) -> FileSessionStore {
    FileSessionStore::new(dir.path().join("nested").join("session.json"), policy)
}

fn jwt(exp: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256"}"#);
    let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"exp":{exp}}}"#));
    format!("{header}.{payload}.sig")
}

// ---- File store ----

#[test]
fn file_store_save_load_clear() {
    let dir = TempDir::new().unwrap();
    let store = file_store(&dir, SessionPolicy::unlimited());
    assert!(store.get_session().is_none());

    let session = common::admin_session();
    store.save(&session).unwrap();
    assert!(store.path().exists());

    let loaded = store.get_session().unwrap();
    assert_eq!(loaded, session);
    assert_eq!(loaded.user.unwrap().display_name(), "Amina Hassan");

    store.clear().unwrap();
    assert!(store.get_session().is_none());
    // clearing twice is fine
    store.clear().unwrap();
}

#[cfg(unix)]
#[test]
fn session_file_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let store = file_store(&dir, SessionPolicy::unlimited());
    store.save(&common::admin_session()).unwrap();
    let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
    assert_eq!(mode & 0o077, 0, "session file mode {mode:o}");

    // An existing world-readable file is tightened on the next save.
    std::fs::set_permissions(store.path(), std::fs::Permissions::from_mode(0o644)).unwrap();
    store.save(&common::admin_session()).unwrap();
    let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
    assert_eq!(mode & 0o077, 0, "session file mode {mode:o}");
}

#[test]
fn file_store_uses_camel_case_on_disk() {
    let dir = TempDir::new().unwrap();
    let store = file_store(&dir, SessionPolicy::unlimited());
    store.save(&common::admin_session()).unwrap();

    let raw = std::fs::read_to_string(store.path()).unwrap();
    assert!(raw.contains("\"storedAt\""));
    assert!(raw.contains("\"adminApproved\": true"));
}

#[test]
fn corrupt_session_file_reads_as_absent() {
    let dir = TempDir::new().unwrap();
    let store = file_store(&dir, SessionPolicy::unlimited());
    std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
    std::fs::write(store.path(), "{ not json").unwrap();

    assert!(store.get_session().is_none());
    assert!(store.read_raw().is_err());
}

// ---- Expiry ----

#[test]
fn old_session_reads_as_absent() {
    let dir = TempDir::new().unwrap();
    let policy = SessionPolicy::from_config(&SessionConfig {
        path: String::new(),
        max_age_hours: 24,
    });
    let store = file_store(&dir, policy);

    let mut session = common::admin_session();
    session.stored_at = Utc::now() - Duration::hours(25);
    store.save(&session).unwrap();

    assert!(store.get_session().is_none());
    assert!(store.read_raw().unwrap().is_some());
}

#[test]
fn expired_jwt_reads_as_absent() {
    let dir = TempDir::new().unwrap();
    let store = file_store(&dir, SessionPolicy::unlimited());

    let expired = Session::new(jwt(Utc::now().timestamp() - 10), None);
    store.save(&expired).unwrap();
    assert!(store.get_session().is_none());

    let live = Session::new(jwt(Utc::now().timestamp() + 600), None);
    store.save(&live).unwrap();
    assert!(store.get_session().is_some());
}

// ---- Credentials ----

#[test]
fn credentials_follow_the_store() {
    let dir = TempDir::new().unwrap();
    let store: Arc<dyn SessionStore> = Arc::new(file_store(&dir, SessionPolicy::unlimited()));
    let credentials = SessionCredentials::new(store.clone());

    assert!(credentials.bearer_token().is_none());
    store.save(&Session::new("abc123", None)).unwrap();
    assert_eq!(credentials.bearer_token().as_deref(), Some("abc123"));
    store.clear().unwrap();
    assert!(credentials.bearer_token().is_none());
}
