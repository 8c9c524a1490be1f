//! Tests for config module

use festivos_cli::config::ResolvedConfig;
use festivos_cli::models::ScraperKind;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_config_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("festivos.toml");

    let config_content = r#"
cache_dir = "state/cache"
output_dir = "state/out"
discovery_timeout_secs = 3
fetch_timeout_secs = 45
validation_timeout_secs = 10
user_agent = "festivos-test"
auto_discovery = false
"#;

    fs::write(&config_path, config_content).unwrap();

    let config = ResolvedConfig::from_toml_file(&config_path).unwrap();

    assert_eq!(config.cache_dir, PathBuf::from("state/cache"));
    assert_eq!(config.output_dir, PathBuf::from("state/out"));
    assert_eq!(config.discovery_timeout(), Duration::from_secs(3));
    assert_eq!(config.fetch_timeout(), Duration::from_secs(45));
    assert_eq!(config.validation_timeout(), Duration::from_secs(10));
    assert_eq!(config.user_agent, "festivos-test");
    assert!(!config.auto_discovery);
    assert_eq!(
        config.cache_path(ScraperKind::National),
        PathBuf::from("state/cache/boe_urls_cache.json")
    );
}

#[test]
fn test_config_empty_file_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("festivos.toml");
    fs::write(&config_path, "").unwrap();

    let config = ResolvedConfig::from_toml_file(&config_path).unwrap();
    let defaults = ResolvedConfig::default();

    assert_eq!(config.cache_dir, defaults.cache_dir);
    assert_eq!(config.output_dir, defaults.output_dir);
    assert_eq!(config.discovery_timeout_secs, 5);
    assert_eq!(config.validation_timeout_secs, 30);
    assert!(config.auto_discovery);
}

#[test]
fn test_config_rejects_wrong_types() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("festivos.toml");
    fs::write(&config_path, "auto_discovery = \"yes\"\n").unwrap();

    let err = ResolvedConfig::from_toml_file(&config_path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config"));
}
