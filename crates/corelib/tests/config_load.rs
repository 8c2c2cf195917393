use std::fs;

use b3session_corelib::config::{Config, DEFAULT_CHUNK_SIZE};
use b3session_corelib::errors::ConfigError;
use tempfile::tempdir;

#[test]
fn loads_config_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("b3sess.toml");
    fs::write(&path, "chunk_size = 4096\nuppercase = true\n").unwrap();

    let cfg = Config::load(&path).unwrap();
    assert_eq!(
        cfg,
        Config {
            chunk_size: 4096,
            uppercase: true
        }
    );
}

#[test]
fn missing_file_reports_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent.toml");
    match Config::load(&path) {
        Err(ConfigError::Io { path: p, .. }) => assert_eq!(p, path),
        other => panic!("expected io error, got {other:?}"),
    }
}

#[test]
fn malformed_toml_is_parse_error() {
    let err = Config::from_toml_str("chunk_size = \"big\"").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
    assert_eq!(Config::default().chunk_size, DEFAULT_CHUNK_SIZE);
}
