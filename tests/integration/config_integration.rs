//! Integration tests for layered configuration loading

use crate::integration::test_utils::with_xdg_env;
use sealdir::config::{global_config_path, ConfigLoader};
use sealdir::tree::hasher::HashAlgorithm;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_defaults_without_any_file() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, &[], || {
        let config = ConfigLoader::load().unwrap();
        assert_eq!(config.hash.algorithm, "sha256");
        assert_eq!(config.hash.block_size, 4096);
        assert!(!config.tree.directory_metadata);
        assert!(config.validate().is_ok());
    });
}

#[test]
fn test_global_file_is_read() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, &[], || {
        let path = global_config_path().unwrap();
        assert!(path.starts_with(test_dir.path()));
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "[hash]\nblock_size = 8192\n\n[tree]\ndirectory_metadata = true\n").unwrap();

        let config = ConfigLoader::load().unwrap();
        assert_eq!(config.hash.block_size, 8192);
        assert!(config.tree.directory_metadata);
        assert_eq!(config.hash.algorithm, "sha256");
    });
}

#[test]
fn test_environment_overrides_file() {
    let test_dir = TempDir::new().unwrap();
    let extra = [
        ("SEALDIR__HASH__ALGORITHM", "blake3"),
        ("SEALDIR__HASH__BLOCK_SIZE", "512"),
    ];
    with_xdg_env(&test_dir, &extra, || {
        let path = global_config_path().unwrap();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "[hash]\nalgorithm = \"sha256\"\nblock_size = 8192\n").unwrap();

        let config = ConfigLoader::load().unwrap();
        assert_eq!(config.hash.algorithm, "blake3");
        assert_eq!(config.hash.block_size, 512);

        let options = config.seal_options().unwrap();
        assert_eq!(options.algorithm, HashAlgorithm::Blake3);
    });
}

#[test]
fn test_explicit_file_replaces_global_file() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, &[], || {
        let global = global_config_path().unwrap();
        fs::create_dir_all(global.parent().unwrap()).unwrap();
        fs::write(&global, "[hash]\nblock_size = 8192\n").unwrap();

        let explicit = test_dir.path().join("explicit.toml");
        fs::write(&explicit, "[tree]\ndirectory_metadata = true\n").unwrap();

        let config = ConfigLoader::load_from_file(&explicit).unwrap();
        assert_eq!(config.hash.block_size, 4096);
        assert!(config.tree.directory_metadata);
    });
}

#[test]
fn test_malformed_file_is_error() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, &[], || {
        let path = global_config_path().unwrap();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "[hash\nalgorithm = ").unwrap();

        assert!(ConfigLoader::load().is_err());
    });
}
