//! File-level tests for syntak-config.

use syntak_config::{Backend, ConfigError, SampleByteOrder, SynthConfig};
use tempfile::TempDir;

#[test]
fn save_then_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");

    let mut config = SynthConfig::default();
    config.audio.backend = Backend::Raw;
    config.audio.raw_path = "out.pcm".into();
    config.audio.byte_order = SampleByteOrder::Little;
    config.scope.samples = 1024;
    config.log.filter = "syntak_io=debug".into();
    config.save(&path).unwrap();

    let loaded = SynthConfig::load(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn save_creates_parent_dirs() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("deeper").join("config.toml");

    SynthConfig::default().save(&path).unwrap();
    assert!(path.is_file());
}

#[test]
fn load_missing_file_is_read_error() {
    let dir = TempDir::new().unwrap();
    let err = SynthConfig::load(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::ReadFile { .. }));
}

#[test]
fn load_or_default_with_explicit_missing_path_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");
    assert!(SynthConfig::load_or_default(Some(&path)).is_err());
}

#[test]
fn load_or_default_with_explicit_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[scope]\nrefresh_hz = 30\n").unwrap();

    let config = SynthConfig::load_or_default(Some(&path)).unwrap();
    assert_eq!(config.scope.refresh_hz, 30);
    assert_eq!(config.audio.block_size, 2048);
}

#[test]
fn load_rejects_invalid_values() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[audio]\nblock_size = 100000\n").unwrap();

    let err = SynthConfig::load(&path).unwrap_err();
    assert!(err.to_string().contains("audio.block_size"), "got: {err}");
}

#[test]
fn load_rejects_malformed_toml() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[audio\nblock_size = ").unwrap();
    assert!(matches!(
        SynthConfig::load(&path),
        Err(ConfigError::TomlParse(_))
    ));
}
