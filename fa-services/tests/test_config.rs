//! Integration tests for application configuration.
//!
//! Tests TOML loading with defaults, file round trips, and how config
//! sections feed the route guard and session policy.

mod common;

use chrono::Duration;
use tempfile::TempDir;

use fa_core::config::{AppConfig, ConfigHandle};
use fa_models::Role;
use fa_services::guard::RouteGuard;
use fa_services::session::SessionPolicy;

// ---- Defaults ----

#[test]
fn default_config_has_expected_api_defaults() {
    let config = AppConfig::default();
    assert_eq!(config.api.base_url, "http://localhost:5000/api");
    assert_eq!(config.api.timeout_ms, 30_000);
    assert!(!config.api.accept_invalid_certs);
    assert!(config.api.custom_headers.is_empty());
}

#[test]
fn default_config_has_expected_sms_defaults() {
    let config = AppConfig::default();
    assert_eq!(config.sms.max_message_length, 918);
    assert!(config.sms.sender_id.is_none());
}

// ---- Loading ----

#[test]
fn config_toml_missing_sections_use_defaults() {
    let config: AppConfig = toml::from_str(
        r#"
        [api]
        base_url = "https://api.fundi.example.co.ke/api"
        "#,
    )
    .unwrap();
    assert_eq!(config.api.base_url, "https://api.fundi.example.co.ke/api");
    assert_eq!(config.session.max_age_hours, 24);
    assert_eq!(config.guard.fallback_path, "/login");
}

#[test]
fn config_load_sanitizes_base_url() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[api]\nbase_url = \"api.fundi.example.co.ke/api/\"\n").unwrap();

    let config = AppConfig::load_from_file(&path).unwrap();
    assert_eq!(config.api.base_url, "https://api.fundi.example.co.ke/api");
}

#[test]
fn config_save_and_load_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sub").join("config.toml");

    let mut config = common::create_test_config();
    config.guard.allowed_roles = vec!["SUPER_ADMIN".into()];
    config.session.max_age_hours = 8;
    config.save_to_file(&path).unwrap();

    let loaded = AppConfig::load_from_file(&path).unwrap();
    assert_eq!(loaded.guard.allowed_roles, vec!["SUPER_ADMIN"]);
    assert_eq!(loaded.session.max_age_hours, 8);
}

#[test]
fn config_load_invalid_toml_returns_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "[api\nbase_url = ").unwrap();
    assert!(AppConfig::load_from_file(&path).is_err());
}

// ---- Sections feeding services ----

#[test]
fn guard_config_builds_route_guard() {
    let config: AppConfig = toml::from_str(
        r#"
        [guard]
        allowed_roles = ["SUPER_ADMIN"]
        require_admin_approved = false
        "#,
    )
    .unwrap();
    let guard = RouteGuard::from_config(&config.guard).unwrap();
    assert_eq!(guard.allowed_roles, vec![Role::SuperAdmin]);
    assert!(!guard.require_admin_approved);
    assert_eq!(guard.approval_fallback_path, "/pending-approval");
}

#[test]
fn session_config_builds_policy() {
    let config = common::create_test_config();
    let policy = SessionPolicy::from_config(&config.session);
    assert_eq!(policy.max_age, Some(Duration::hours(24)));
}

#[tokio::test]
async fn config_handle_write_updates_values() {
    let handle = common::create_test_config_handle();
    {
        let mut cfg = handle.write().await;
        cfg.api.base_url = "https://staging.example.co.ke/api".into();
    }
    let other: ConfigHandle = handle.clone();
    assert_eq!(other.read().await.api.base_url, "https://staging.example.co.ke/api");
}
