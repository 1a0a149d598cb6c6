//! Integration tests for configuration loading and validation
//!
//! Every test that loads configuration holds `ENV_MUTEX`, since overrides
//! are read from the process environment.

use mismo_anon::config::{load_config, load_config_or_default, MismoAnonConfig};
use std::io::Write;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

const OVERRIDE_VARS: &[&str] = &[
    "MISMO_ANON_APPLICATION_LOG_LEVEL",
    "MISMO_ANON_ANONYMIZATION_DRY_RUN",
    "MISMO_ANON_ANONYMIZATION_REALISTIC_EMAILS",
    "MISMO_ANON_AUDIT_ENABLED",
    "MISMO_ANON_AUDIT_LOG_PATH",
    "MISMO_ANON_AUDIT_JSON_FORMAT",
    "MISMO_ANON_AUDIT_HASH_KEY",
    "MISMO_ANON_BATCH_OUTPUT_SUBFOLDER",
    "MISMO_ANON_BATCH_MAX_PARALLEL_FILES",
    "MISMO_ANON_BATCH_OVERWRITE",
    "MISMO_ANON_LOGGING_LOCAL_ENABLED",
    "MISMO_ANON_LOGGING_LOCAL_PATH",
    "MISMO_ANON_LOGGING_LOCAL_ROTATION",
    "TEST_MISMO_AUDIT_DIR",
];

/// Take the environment lock and start from a clean slate
fn lock_env() -> MutexGuard<'static, ()> {
    let guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    for var in OVERRIDE_VARS {
        std::env::remove_var(var);
    }
    guard
}

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write config");
    file.flush().expect("Failed to flush config");
    file
}

#[test]
fn test_load_complete_config() {
    let _env = lock_env();
    let file = config_file(
        r#"
[application]
log_level = "debug"

[anonymization]
dry_run = true
realistic_emails = true

[anonymization.audit]
enabled = true
log_path = "/var/log/mismo/audit.log"
json_format = false

[batch]
output_subfolder = "scrubbed"
max_parallel_files = 8
overwrite = false

[logging]
local_enabled = true
local_path = "/var/log/mismo"
local_rotation = "hourly"
"#,
    );

    let config = load_config(file.path()).expect("Failed to load config");

    assert_eq!(config.application.log_level, "debug");
    assert!(config.anonymization.dry_run);
    assert!(config.anonymization.realistic_emails);
    assert!(config.anonymization.audit.enabled);
    assert_eq!(
        config.anonymization.audit.log_path,
        Path::new("/var/log/mismo/audit.log")
    );
    assert!(!config.anonymization.audit.json_format);
    assert_eq!(config.batch.output_subfolder, "scrubbed");
    assert_eq!(config.batch.max_parallel_files, 8);
    assert!(!config.batch.overwrite);
    assert!(config.logging.local_enabled);
    assert_eq!(config.logging.local_rotation, "hourly");
}

#[test]
fn test_empty_file_uses_defaults() {
    let _env = lock_env();
    let file = config_file("");

    let config = load_config(file.path()).expect("Failed to load config");
    let defaults = MismoAnonConfig::default();

    assert_eq!(config.application.log_level, defaults.application.log_level);
    assert_eq!(config.batch.output_subfolder, "anon");
    assert_eq!(config.batch.max_parallel_files, 4);
    assert!(config.batch.overwrite);
    assert!(!config.anonymization.dry_run);
    assert!(!config.anonymization.realistic_emails);
    assert!(!config.anonymization.audit.enabled);
    assert!(!config.logging.local_enabled);
}

#[test]
fn test_env_var_substitution() {
    let _env = lock_env();
    std::env::set_var("TEST_MISMO_AUDIT_DIR", "/srv/audit");
    let file = config_file(
        r#"
[anonymization.audit]
enabled = true
log_path = "${TEST_MISMO_AUDIT_DIR}/anon.log"
"#,
    );

    let config = load_config(file.path()).expect("Failed to load config");
    assert_eq!(
        config.anonymization.audit.log_path,
        Path::new("/srv/audit/anon.log")
    );
    std::env::remove_var("TEST_MISMO_AUDIT_DIR");
}

#[test]
fn test_missing_substitution_variable_fails() {
    let _env = lock_env();
    let file = config_file("[logging]\nlocal_path = \"${TEST_MISMO_AUDIT_DIR}\"\n");

    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("TEST_MISMO_AUDIT_DIR"));
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn test_env_overrides_take_precedence() {
    let _env = lock_env();
    std::env::set_var("MISMO_ANON_APPLICATION_LOG_LEVEL", "warn");
    std::env::set_var("MISMO_ANON_ANONYMIZATION_DRY_RUN", "true");
    std::env::set_var("MISMO_ANON_BATCH_MAX_PARALLEL_FILES", "2");
    std::env::set_var("MISMO_ANON_BATCH_OUTPUT_SUBFOLDER", "masked");
    let file = config_file("[application]\nlog_level = \"debug\"\n[batch]\nmax_parallel_files = 16\n");

    let config = load_config(file.path()).expect("Failed to load config");

    assert_eq!(config.application.log_level, "warn");
    assert!(config.anonymization.dry_run);
    assert_eq!(config.batch.max_parallel_files, 2);
    assert_eq!(config.batch.output_subfolder, "masked");

    for var in OVERRIDE_VARS {
        std::env::remove_var(var);
    }
}

#[test]
fn test_invalid_env_override_fails() {
    let _env = lock_env();
    std::env::set_var("MISMO_ANON_BATCH_MAX_PARALLEL_FILES", "many");
    let file = config_file("");

    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("MISMO_ANON_BATCH_MAX_PARALLEL_FILES"));

    std::env::remove_var("MISMO_ANON_BATCH_MAX_PARALLEL_FILES");
}

#[test]
fn test_missing_file_is_configuration_error() {
    let _env = lock_env();
    let err = load_config("/nonexistent/mismo-anon.toml").unwrap_err();

    assert!(err.to_string().contains("Configuration file not found"));
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn test_explicit_missing_path_is_not_defaulted() {
    let _env = lock_env();
    let result = load_config_or_default(Some(Path::new("/nonexistent/mismo-anon.toml")));
    assert!(result.is_err());
}

#[test]
fn test_malformed_toml_fails() {
    let _env = lock_env();
    let file = config_file("[batch\noutput_subfolder = ");

    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("Failed to parse TOML"));
}

#[test]
fn test_validation_rejects_bad_values() {
    let _env = lock_env();

    let file = config_file("[batch]\noutput_subfolder = \"../escape\"\n");
    assert!(load_config(file.path()).is_err());

    let file = config_file("[batch]\nmax_parallel_files = 0\n");
    assert!(load_config(file.path()).is_err());

    let file = config_file("[application]\nlog_level = \"verbose\"\n");
    assert!(load_config(file.path()).is_err());

    let file = config_file("[logging]\nlocal_rotation = \"weekly\"\n");
    assert!(load_config(file.path()).is_err());
}

#[test]
fn test_audit_hash_key_from_environment() {
    use secrecy::ExposeSecret;

    let _env = lock_env();
    std::env::set_var("MISMO_ANON_AUDIT_HASH_KEY", "env-audit-key");

    let file = config_file("[anonymization.audit]\nenabled = false\n");
    let config = load_config(file.path()).expect("Failed to load config");

    std::env::remove_var("MISMO_ANON_AUDIT_HASH_KEY");

    let key = config.anonymization.audit.hash_key.expect("hash key set");
    assert_eq!(key.expose_secret().as_ref(), "env-audit-key");
}
