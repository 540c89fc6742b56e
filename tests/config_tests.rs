// Config loading, defaults, env overrides and validation

use homedash::config::{AppConfig, ContainerBackend};
use std::collections::HashMap;

const VALID_CONFIG: &str = r#"
[server]
port = 9000
host = "127.0.0.1"

[auth]
token = "s3cret"

[services]
names = ["nginx", "docker", "ssh"]

[weather]
city = "Hamburg"
latitude = 53.55
longitude = 9.99

[probes]
cpu_sample_ms = 250
command_timeout_ms = 3000
top_processes = 8
container_backend = "api"

[logs]
paths = ["/tmp/app.log"]
lines = 50
"#;

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_config_loads_from_str() {
    let config = AppConfig::load_from_str(VALID_CONFIG).expect("load_from_str");
    assert_eq!(config.server.port, 9000);
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.auth.token.as_deref(), Some("s3cret"));
    assert_eq!(config.services.names, vec!["nginx", "docker", "ssh"]);
    assert_eq!(config.weather.city, "Hamburg");
    assert_eq!(config.weather.latitude, Some(53.55));
    assert_eq!(config.probes.cpu_sample_ms, 250);
    assert_eq!(config.probes.top_processes, 8);
    assert_eq!(config.probes.container_backend, ContainerBackend::Api);
    assert_eq!(config.logs.lines, 50);
}

#[test]
fn test_empty_config_uses_defaults() {
    let config = AppConfig::load_from_str("").expect("defaults");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.server.host, "0.0.0.0");
    assert!(config.auth.token.is_none());
    assert!(config.services.names.is_empty());
    assert_eq!(config.weather.city, "Berlin");
    assert!(config.weather.latitude.is_none());
    assert_eq!(config.probes.cpu_sample_ms, 500);
    assert_eq!(config.probes.command_timeout_ms, 2000);
    assert_eq!(config.probes.top_processes, 5);
    assert_eq!(config.probes.service_manager, "systemctl");
    assert_eq!(config.probes.container_runtime, "docker");
    assert_eq!(config.probes.container_backend, ContainerBackend::Cli);
    assert_eq!(config.logs.lines, 20);
    assert_eq!(config.logs.paths.len(), 2);
}

#[test]
fn test_partial_section_keeps_other_defaults() {
    let config = AppConfig::load_from_str("[probes]\ntop_processes = 3\n").expect("partial");
    assert_eq!(config.probes.top_processes, 3);
    assert_eq!(config.probes.cpu_sample_ms, 500);
}

#[test]
fn test_env_overrides_port_host_and_token() {
    let mut config = AppConfig::load_from_str(VALID_CONFIG).unwrap();
    config
        .apply_env(env(&[
            ("PORT", "7001"),
            ("DASHBOARD_HOST", "10.0.0.1"),
            ("DASHBOARD_TOKEN", "other"),
        ]))
        .unwrap();
    assert_eq!(config.server.port, 7001);
    assert_eq!(config.server.host, "10.0.0.1");
    assert_eq!(config.auth.token.as_deref(), Some("other"));
}

#[test]
fn test_bare_host_variable_is_ignored() {
    // zsh exports HOST as the machine's hostname.
    let mut config = AppConfig::default();
    config.apply_env(env(&[("HOST", "workstation")])).unwrap();
    assert_eq!(config.server.host, "0.0.0.0");
}

#[test]
fn test_empty_token_disables_auth() {
    let mut config = AppConfig::load_from_str(VALID_CONFIG).unwrap();
    config.apply_env(env(&[("DASHBOARD_TOKEN", "")])).unwrap();
    assert!(config.auth.token.is_none());
}

#[test]
fn test_env_rejects_bad_port() {
    let mut config = AppConfig::default();
    let err = config.apply_env(env(&[("PORT", "http")])).unwrap_err();
    assert!(err.to_string().contains("PORT"));
}

#[test]
fn test_config_validation_rejects_invalid_port() {
    let bad = VALID_CONFIG.replace("port = 9000", "port = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("server.port"));
}

#[test]
fn test_config_validation_rejects_short_cpu_sample() {
    let bad = VALID_CONFIG.replace("cpu_sample_ms = 250", "cpu_sample_ms = 10");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("cpu_sample_ms"));
}

#[test]
fn test_config_validation_rejects_zero_timeout() {
    let bad = VALID_CONFIG.replace("command_timeout_ms = 3000", "command_timeout_ms = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("command_timeout_ms"));
}

#[test]
fn test_config_validation_rejects_zero_top_processes() {
    let bad = VALID_CONFIG.replace("top_processes = 8", "top_processes = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("top_processes"));
}

#[test]
fn test_config_validation_rejects_empty_log_paths() {
    let bad = VALID_CONFIG.replace("paths = [\"/tmp/app.log\"]", "paths = []");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("logs.paths"));
}

#[test]
fn test_config_validation_rejects_out_of_range_latitude() {
    let bad = VALID_CONFIG.replace("latitude = 53.55", "latitude = 123.0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("weather.latitude"));
}

#[test]
fn test_config_rejects_unknown_backend() {
    let bad = VALID_CONFIG.replace("container_backend = \"api\"", "container_backend = \"podman\"");
    assert!(AppConfig::load_from_str(&bad).is_err());
}

#[test]
fn test_config_validation_rejects_invalid_toml() {
    let err = AppConfig::load_from_str("not valid toml [[[").unwrap_err();
    assert!(!err.to_string().is_empty());
}

// Single test touches CONFIG_FILE so parallel tests never race on it.
#[test]
fn test_config_load_from_file_via_env() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, VALID_CONFIG).unwrap();

    unsafe { std::env::set_var("CONFIG_FILE", path.to_str().unwrap()) };
    let from_file = AppConfig::load();
    unsafe { std::env::set_var("CONFIG_FILE", dir.path().join("absent.toml")) };
    let missing = AppConfig::load();
    let bad_path = dir.path().join("bad.toml");
    std::fs::write(&bad_path, "[server\nport = ").unwrap();
    unsafe { std::env::set_var("CONFIG_FILE", &bad_path) };
    let malformed = AppConfig::load();
    unsafe { std::env::remove_var("CONFIG_FILE") };

    let config = from_file.expect("load from CONFIG_FILE");
    assert_eq!(config.services.names, vec!["nginx", "docker", "ssh"]);
    let config = missing.expect("missing file falls back to defaults");
    assert!(config.services.names.is_empty());
    assert!(malformed.is_err());
}
