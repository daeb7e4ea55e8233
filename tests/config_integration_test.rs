//! Integration tests for configuration loading and validation
//!
//! Note: Tests that modify environment variables should be run with --test-threads=1
//! to avoid interference between tests.

use doajsync::config::load_config;
use secrecy::ExposeSecret;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn cleanup_env_vars() {
    std::env::remove_var("DOAJSYNC_APPLICATION_LOG_LEVEL");
    std::env::remove_var("DOAJSYNC_APPLICATION_DRY_RUN");
    std::env::remove_var("DOAJSYNC_DOAJ_BASE_URL");
    std::env::remove_var("DOAJSYNC_DOAJ_API_TOKEN");
    std::env::remove_var("DOAJSYNC_DOAJ_PAGE_SIZE");
    std::env::remove_var("TEST_DOAJ_TOKEN");
}

fn write_config(contents: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(contents.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

#[test]
fn test_load_complete_config() {
    let _guard = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let temp_file = write_config(
        r#"
[application]
log_level = "debug"
dry_run = true

[doaj]
base_url = "https://testdoaj.cottagelabs.com/api"
api_version = "v1"
api_token = "test-token-12345"
connect_timeout_seconds = 3
timeout_seconds = 20
page_size = 25
throttle_ms = 100
push_enabled = false
recreate_on_immutable_change = true

[doaj.retry]
max_attempts = 5
backoff_ms = 500

[logging]
file_enabled = false
file_path = "/tmp/doajsync"
file_rotation = "hourly"
"#,
    );

    let config = load_config(temp_file.path()).expect("Failed to load config");

    assert_eq!(config.application.log_level, "debug");
    assert!(config.application.dry_run);
    assert_eq!(config.doaj.base_url, "https://testdoaj.cottagelabs.com/api");
    assert_eq!(config.doaj.api_version, "v1");
    assert_eq!(config.doaj.api_token.expose_secret().as_ref(), "test-token-12345");
    assert_eq!(config.doaj.connect_timeout_seconds, 3);
    assert_eq!(config.doaj.timeout_seconds, 20);
    assert_eq!(config.doaj.page_size, 25);
    assert_eq!(config.doaj.throttle_ms, 100);
    assert!(!config.doaj.push_enabled);
    assert!(config.doaj.recreate_on_immutable_change);
    assert_eq!(config.doaj.retry.max_attempts, 5);
    assert_eq!(config.doaj.retry.backoff_ms, 500);
    assert_eq!(config.logging.file_rotation, "hourly");
}

#[test]
fn test_load_minimal_config_applies_defaults() {
    let _guard = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let temp_file = write_config(
        r#"
[doaj]
api_token = "tok"
"#,
    );

    let config = load_config(temp_file.path()).expect("Failed to load config");

    assert_eq!(config.application.log_level, "info");
    assert!(!config.application.dry_run);
    assert_eq!(config.doaj.base_url, "https://doaj.org/api");
    assert_eq!(config.doaj.api_version, "v2");
    assert_eq!(config.doaj.page_size, 50);
    assert_eq!(config.doaj.retry.max_attempts, 3);
    assert!(config.doaj.push_enabled);
    assert!(!config.logging.file_enabled);
}

#[test]
fn test_env_var_substitution_in_token() {
    let _guard = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("TEST_DOAJ_TOKEN", "substituted-secret");

    let temp_file = write_config(
        r#"
[doaj]
api_token = "${TEST_DOAJ_TOKEN}"
"#,
    );

    let config = load_config(temp_file.path()).expect("Failed to load config");
    assert_eq!(config.doaj.api_token.expose_secret().as_ref(), "substituted-secret");

    cleanup_env_vars();
}

#[test]
fn test_missing_env_var_is_an_error() {
    let _guard = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let temp_file = write_config(
        r#"
[doaj]
api_token = "${TEST_DOAJ_TOKEN}"
"#,
    );

    let err = load_config(temp_file.path()).unwrap_err();
    assert!(err.to_string().contains("TEST_DOAJ_TOKEN"));
}

#[test]
fn test_env_overrides_take_precedence() {
    let _guard = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("DOAJSYNC_APPLICATION_LOG_LEVEL", "trace");
    std::env::set_var("DOAJSYNC_DOAJ_BASE_URL", "https://override.example.org/api");
    std::env::set_var("DOAJSYNC_DOAJ_PAGE_SIZE", "10");

    let temp_file = write_config(
        r#"
[application]
log_level = "info"

[doaj]
base_url = "https://doaj.org/api"
api_token = "tok"
page_size = 50
"#,
    );

    let config = load_config(temp_file.path()).expect("Failed to load config");
    assert_eq!(config.application.log_level, "trace");
    assert_eq!(config.doaj.base_url, "https://override.example.org/api");
    assert_eq!(config.doaj.page_size, 10);

    cleanup_env_vars();
}

#[test]
fn test_invalid_config_is_rejected() {
    let _guard = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let temp_file = write_config(
        r#"
[doaj]
api_token = "tok"
page_size = 0
"#,
    );

    assert!(load_config(temp_file.path()).is_err());
}

#[test]
fn test_secret_token_is_not_debug_printed() {
    let _guard = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let temp_file = write_config(
        r#"
[doaj]
api_token = "super-secret-token"
"#,
    );

    let config = load_config(temp_file.path()).expect("Failed to load config");
    let debug_output = format!("{:?}", config);
    assert!(!debug_output.contains("super-secret-token"));
}
