use crate::config::Config;
use std::env;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::OnceLock;
use std::time::Duration;

// Global lock to prevent race conditions when modifying environment variables in tests
static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn get_env_lock() -> &'static Mutex<()> {
    ENV_LOCK.get_or_init(|| Mutex::new(()))
}

fn set(key: &str, value: &str) {
    // SAFETY: every test touching the environment holds ENV_LOCK
    unsafe { env::set_var(key, value) };
}

fn unset(key: &str) {
    // SAFETY: every test touching the environment holds ENV_LOCK
    unsafe { env::remove_var(key) };
}

#[test]
fn test_model_dir_and_path_overrides() {
    let _guard = get_env_lock().lock().unwrap();
    set("MODEL_DIR", "/opt/ridewise");
    set("HOUR_FEATURES_PATH", "/tmp/legacy_hour_features.txt");

    let config = Config::from_env().unwrap();

    assert_eq!(
        config.models.day_model_path,
        PathBuf::from("/opt/ridewise/day_model.bin")
    );
    assert_eq!(
        config.models.hour_features_path,
        PathBuf::from("/tmp/legacy_hour_features.txt")
    );

    // Cleanup
    unset("MODEL_DIR");
    unset("HOUR_FEATURES_PATH");
}

#[test]
fn test_invalid_numbers_fall_back_to_defaults() {
    let _guard = get_env_lock().lock().unwrap();
    set("SERVER_PORT", "eighty");
    set("LLM_TIMEOUT_SECS", "-3");

    let config = Config::from_env().unwrap();
    assert_eq!(config.server.port, 8000);
    assert_eq!(config.llm.timeout, Duration::from_secs(20));

    unset("SERVER_PORT");
    unset("LLM_TIMEOUT_SECS");
}

#[test]
fn test_blank_api_key_counts_as_missing() {
    let _guard = get_env_lock().lock().unwrap();
    set("GEMINI_API_KEY", "   ");

    let config = Config::from_env().unwrap();
    assert!(config.llm.api_key.is_none());

    unset("GEMINI_API_KEY");
}

#[test]
fn test_unparseable_bind_address_fails() {
    let _guard = get_env_lock().lock().unwrap();
    set("SERVER_BIND_ADDRESS", "256.1.1.1");

    assert!(Config::from_env().is_err());

    unset("SERVER_BIND_ADDRESS");
}
