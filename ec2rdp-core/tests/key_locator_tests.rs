//! Unit tests for private key path resolution
//!
//! Covers precedence (explicit path over config entry), missing files,
//! profile section naming, and malformed config handling.

use ec2rdp_core::config::KeyLocator;
use ec2rdp_core::error::{ConfigError, Ec2RdpError};
use std::path::PathBuf;
use tempfile::tempdir;

fn write_config(contents: &str) -> (tempfile::TempDir, PathBuf) {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("config");
    std::fs::write(&path, contents).unwrap();
    (temp_dir, path)
}

#[test]
fn test_explicit_path_wins_over_config() {
    let (_guard, config_path) = write_config("[default]\nec2rdp_key = /from/config.pem\n");
    let locator = KeyLocator::with_config_path(None, config_path);

    let resolved = locator
        .resolve(Some(PathBuf::from("/explicit/key.pem")))
        .unwrap();

    assert_eq!(resolved, Some(PathBuf::from("/explicit/key.pem")));
}

#[test]
fn test_explicit_path_needs_no_config_file() {
    let locator =
        KeyLocator::with_config_path(None, PathBuf::from("/nonexistent/aws/config"));

    let resolved = locator
        .resolve(Some(PathBuf::from("/explicit/key.pem")))
        .unwrap();

    assert_eq!(resolved, Some(PathBuf::from("/explicit/key.pem")));
}

#[test]
fn test_missing_config_file_yields_no_key() {
    let locator =
        KeyLocator::with_config_path(None, PathBuf::from("/nonexistent/aws/config"));

    assert_eq!(locator.resolve(None).unwrap(), None);
}

#[test]
fn test_default_profile_entry_found() {
    let (_guard, config_path) =
        write_config("[default]\nregion = us-east-1\nec2rdp_key = ~/.ssh/default.pem\n");
    let locator = KeyLocator::with_config_path(None, config_path);

    assert_eq!(
        locator.resolve(None).unwrap(),
        Some(PathBuf::from("~/.ssh/default.pem"))
    );
}

#[test]
fn test_named_profile_uses_profile_section() {
    let config = "[default]\n\
                  ec2rdp_key = /default.pem\n\
                  [profile dev]\n\
                  ec2rdp_key = /dev.pem\n";
    let (_guard, config_path) = write_config(config);
    let locator = KeyLocator::with_config_path(Some("dev".to_string()), config_path);

    assert_eq!(locator.resolve(None).unwrap(), Some(PathBuf::from("/dev.pem")));
}

#[test]
fn test_missing_entry_yields_no_key() {
    let (_guard, config_path) = write_config("[default]\nregion = us-east-1\n");
    let locator = KeyLocator::with_config_path(None, config_path);

    assert_eq!(locator.resolve(None).unwrap(), None);
}

#[test]
fn test_missing_profile_section_yields_no_key() {
    let (_guard, config_path) = write_config("[default]\nec2rdp_key = /default.pem\n");
    let locator = KeyLocator::with_config_path(Some("staging".to_string()), config_path);

    assert_eq!(locator.resolve(None).unwrap(), None);
}

#[test]
fn test_malformed_config_is_an_error() {
    let (_guard, config_path) = write_config("[profile dev\nec2rdp_key = /dev.pem\n");
    let locator = KeyLocator::with_config_path(Some("dev".to_string()), config_path);

    let err = locator.resolve(None).unwrap_err();
    assert!(matches!(
        err,
        Ec2RdpError::Config(ConfigError::Malformed { .. })
    ));
}
