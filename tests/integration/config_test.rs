use sysward::EngineConfig;
use tempfile::TempDir;

#[test]
fn test_save_and_load_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.json");

    let config = EngineConfig {
        sample_interval_ms: 250,
        retention_days: 7,
        background_sampling: false,
        ..EngineConfig::default()
    }
    .with_data_dir(dir.path().join("data"));
    config.save_to(&path).unwrap();

    let loaded = EngineConfig::load_from(&path).unwrap();
    assert_eq!(loaded, config);
    assert_eq!(loaded.history_db_path(), dir.path().join("data").join("history.db"));
}

#[test]
fn test_missing_file_gives_defaults() {
    let dir = TempDir::new().unwrap();
    let loaded = EngineConfig::load_from(&dir.path().join("absent.json")).unwrap();
    assert_eq!(loaded, EngineConfig::default());
}

#[test]
fn test_corrupt_file_is_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = EngineConfig::load_from(&path).unwrap_err();
    assert!(matches!(err, sysward::SyswardError::Config(_)));
}
