//! Integration tests for config loading and validation through real files

use std::fs;
use std::time::Duration;
use tempfile::TempDir;
use uptimey::config::Config;

/// Temporary `uptimey/config.toml` path
fn setup_temp_config() -> (TempDir, std::path::PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_dir = temp_dir.path().join("uptimey");
    fs::create_dir_all(&config_dir).expect("Failed to create config dir");
    let config_path = config_dir.join("config.toml");
    (temp_dir, config_path)
}

fn error_chain(err: &color_eyre::eyre::Report) -> String {
    err.chain()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(": ")
}

#[test]
fn test_full_config_loads() {
    let (_temp, config_path) = setup_temp_config();

    let toml_content = r#"
[settings]
endpoint = "https://status.example.org/script/ajax.php"
geo_url = "https://geo.example.org/json/{ip}"
sun_url = "https://sun.example.org/json?lat={lat}&lng={lon}&formatted=1"
refresh_interval_secs = 30
animation_ms = 250
busy_ms = 1500
request_timeout_secs = 5
log_level = "debug"

[share]
url = "https://status.example.org"
target = "https://social.example/share"
hashtags = ["uptime"]
"#;
    fs::write(&config_path, toml_content).expect("Failed to write TOML");

    let loaded = Config::load_from_path(&config_path).expect("Failed to load config");

    let s = &loaded.settings;
    assert_eq!(s.endpoint, "https://status.example.org/script/ajax.php");
    assert_eq!(s.geo_url, "https://geo.example.org/json/{ip}");
    assert_eq!(s.refresh_interval, Some(Duration::from_secs(30)));
    assert_eq!(s.animation, Duration::from_millis(250));
    assert_eq!(s.busy, Duration::from_millis(1500));
    assert_eq!(s.request_timeout, Duration::from_secs(5));
    assert_eq!(s.log_level, "debug");

    assert_eq!(loaded.share.url, "https://status.example.org");
    assert_eq!(loaded.share.target, "https://social.example/share");
    assert_eq!(loaded.share.hashtags, vec!["uptime"]);
}

#[test]
fn test_partial_config_fills_defaults() {
    let (_temp, config_path) = setup_temp_config();
    fs::write(
        &config_path,
        "[settings]\nendpoint = \"http://10.0.0.5/ajax.php\"\n",
    )
    .unwrap();

    let loaded = Config::load_from_path(&config_path).unwrap();
    let defaults = Config::default();

    assert_eq!(loaded.settings.endpoint, "http://10.0.0.5/ajax.php");
    assert_eq!(loaded.settings.sun_url, defaults.settings.sun_url);
    assert_eq!(loaded.settings.busy, Duration::from_secs(1));
    assert_eq!(loaded.share, defaults.share);
}

#[test]
fn test_invalid_sun_url_is_rejected() {
    let (_temp, config_path) = setup_temp_config();
    fs::write(
        &config_path,
        "[settings]\nsun_url = \"https://sun.example.org/json\"\n",
    )
    .unwrap();

    let err = Config::load_from_path(&config_path).unwrap_err();
    let chain = error_chain(&err);
    assert!(chain.contains("Invalid config"), "{chain}");
    assert!(chain.contains("sun_url"), "{chain}");
}

#[test]
fn test_malformed_toml_is_rejected() {
    let (_temp, config_path) = setup_temp_config();
    fs::write(&config_path, "[settings\nendpoint = ").unwrap();

    let err = Config::load_from_path(&config_path).unwrap_err();
    assert!(error_chain(&err).contains("Failed to parse TOML"));
}

#[test]
fn test_missing_file_is_reported() {
    let (_temp, config_path) = setup_temp_config();
    let err = Config::load_from_path(&config_path).unwrap_err();
    assert!(error_chain(&err).contains("Failed to read config"));
}
