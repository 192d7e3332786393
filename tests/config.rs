//! Configuration system tests

use flatdb::config::FlatDbConfig;
use flatdb::config_paths;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

// ========================================================================
// Config Paths Tests
// ========================================================================

#[test]
fn test_config_file_ends_with_yaml() {
    if let Some(path) = config_paths::config_file() {
        assert!(path.to_string_lossy().ends_with("config.yaml"));
        assert!(path.to_string_lossy().contains("flatdb"));
    }
}

#[test]
fn test_logs_dir_is_subdir_of_config() {
    if let (Some(config), Some(logs)) = (config_paths::config_dir(), config_paths::logs_dir()) {
        assert!(logs.starts_with(&config));
    }
}

// ========================================================================
// FlatDbConfig Tests
// ========================================================================

#[test]
fn test_default_config() {
    let config = FlatDbConfig::default();
    assert_eq!(config.max_column_width, 40);
    assert!(config.mark_key);
    assert!(config.data_dir.is_none());
}

#[test]
fn test_partial_yaml_uses_defaults() {
    let config: FlatDbConfig = serde_yaml::from_str("mark_key: false\n").unwrap();
    assert!(!config.mark_key);
    assert_eq!(config.max_column_width, 40);
}

#[test]
fn test_serialized_config_loads_back() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    let config = FlatDbConfig {
        data_dir: Some(PathBuf::from("/srv/tables")),
        max_column_width: 12,
        mark_key: false,
    };

    std::fs::write(&path, serde_yaml::to_string(&config).unwrap()).unwrap();
    assert_eq!(FlatDbConfig::load_from(&path), config);
}

#[test]
fn test_missing_or_invalid_file_gives_defaults() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing.yaml");
    assert_eq!(FlatDbConfig::load_from(&missing), FlatDbConfig::default());

    let invalid = dir.path().join("invalid.yaml");
    std::fs::write(&invalid, "max_column_width: [not a number").unwrap();
    assert_eq!(FlatDbConfig::load_from(&invalid), FlatDbConfig::default());
}

#[test]
fn test_resolve_table_path() {
    let config = FlatDbConfig {
        data_dir: Some(PathBuf::from("/data")),
        ..FlatDbConfig::default()
    };

    assert_eq!(
        config.resolve_table_path(Path::new("users")),
        PathBuf::from("/data/users.mdb")
    );
    assert_eq!(
        config.resolve_table_path(Path::new("/abs/users.dbt")),
        PathBuf::from("/abs/users.dbt")
    );
}

#[test]
fn test_print_options_follow_config() {
    let config = FlatDbConfig {
        max_column_width: 7,
        mark_key: false,
        ..FlatDbConfig::default()
    };
    let options = config.print_options();
    assert_eq!(options.max_column_width, Some(7));
    assert!(!options.mark_key);
}
