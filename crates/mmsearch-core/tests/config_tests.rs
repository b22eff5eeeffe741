use std::env;
use std::ffi::OsString;
use std::fs;
use std::sync::Mutex;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;

use mmsearch_core::config::{expand_path, normalize_base_url, ClientConfig, DEFAULT_BACKEND_URL};
use mmsearch_core::error::Error;

static ENV_LOCK: Mutex<()> = Mutex::new(());

fn snapshot_env(vars: &[&'static str]) -> Vec<(&'static str, Option<OsString>)> {
    vars.iter().map(|&name| (name, env::var_os(name))).collect()
}

fn restore_env(vars: Vec<(&'static str, Option<OsString>)>) {
    for (name, value) in vars {
        match value {
            Some(val) => env::set_var(name, val),
            None => env::remove_var(name),
        }
    }
}

fn defaults() -> Figment { Figment::from(Serialized::defaults(ClientConfig::default())) }

#[test]
fn defaults_apply_without_sources() {
    let config = ClientConfig::from_figment(defaults()).expect("defaults");
    assert_eq!(config.backend_url, DEFAULT_BACKEND_URL);
    assert_eq!(config.log_level, "warn");
}

#[test]
fn toml_overrides_defaults_and_trailing_slash_is_stripped() {
    let figment = defaults().merge(Toml::string("backend_url = \"https://vision.internal:9000/\"\nlog_level = \"debug\""));
    let config = ClientConfig::from_figment(figment).expect("toml");
    assert_eq!(config.backend_url, "https://vision.internal:9000");
    assert_eq!(config.log_level, "debug");
}

#[test]
fn env_overrides_toml() {
    let _guard = ENV_LOCK.lock().expect("env lock");
    std::env::set_var("APP_BACKEND_URL", "http://from-env:1234/");
    let figment = defaults()
        .merge(Toml::string("backend_url = \"http://from-toml:1\""))
        .merge(Env::prefixed("APP_"));
    let result = ClientConfig::from_figment(figment);
    std::env::remove_var("APP_BACKEND_URL");
    assert_eq!(result.expect("env").backend_url, "http://from-env:1234");
}

#[test]
fn relative_backend_url_is_rejected() {
    let figment = defaults().merge(Toml::string("backend_url = \"\""));
    assert!(matches!(ClientConfig::from_figment(figment), Err(Error::Config(_))));
    let err = ClientConfig::default().with_backend_url("localhost:8000").unwrap_err();
    assert!(err.to_string().contains("absolute"));
}

#[test]
fn only_one_trailing_slash_is_removed() {
    assert_eq!(normalize_base_url("http://h/api/"), "http://h/api");
    assert_eq!(normalize_base_url("http://h//"), "http://h/");
    assert_eq!(normalize_base_url("http://h"), "http://h");
}

#[test]
fn expand_path_resolves_env_vars() {
    let _guard = ENV_LOCK.lock().expect("env lock");
    std::env::set_var("MMSEARCH_TEST_DIR", "/tmp/imgs");
    let p = expand_path("$MMSEARCH_TEST_DIR/cat.jpg");
    std::env::remove_var("MMSEARCH_TEST_DIR");
    assert_eq!(p, std::path::PathBuf::from("/tmp/imgs/cat.jpg"));
}

#[test]
fn load_layers_config_file_then_rust_env_file_then_app_env() {
    let _guard = ENV_LOCK.lock().expect("env lock");
    let env_snapshot = snapshot_env(&["RUST_ENV", "APP_BACKEND_URL", "APP_LOG_LEVEL"]);
    let original_dir = env::current_dir().expect("capture current dir");

    let workspace = tempfile::TempDir::new().expect("temp workspace");
    fs::write(workspace.path().join("config.toml"), "backend_url = \"http://base:1\"\nlog_level = \"info\"\n")
        .expect("write config.toml");
    fs::write(workspace.path().join("config.test.toml"), "backend_url = \"http://test-env:2/\"\n")
        .expect("write config.test.toml");
    env::set_current_dir(workspace.path()).expect("change to workspace");
    env::remove_var("APP_BACKEND_URL");
    env::remove_var("APP_LOG_LEVEL");

    // no config.prod.toml present: only config.toml applies
    env::set_var("RUST_ENV", "prod");
    let base = ClientConfig::load();

    env::set_var("RUST_ENV", "test");
    let env_file = ClientConfig::load();

    env::set_var("APP_BACKEND_URL", "http://from-env:3");
    let from_env = ClientConfig::load();

    env::set_current_dir(original_dir).expect("restore current dir");
    restore_env(env_snapshot);

    let base = base.expect("base layer");
    assert_eq!(base.backend_url, "http://base:1");
    assert_eq!(base.log_level, "info");

    let env_file = env_file.expect("RUST_ENV layer");
    assert_eq!(env_file.backend_url, "http://test-env:2");
    assert_eq!(env_file.log_level, "info", "keys absent from the env file fall through");

    assert_eq!(from_env.expect("APP_ layer").backend_url, "http://from-env:3");
}
