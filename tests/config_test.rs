//! Integration tests for Settings layered loading.
//!
//! Note: these tests run without a global config (temp directories only),
//! so they exercise the local `.bookcat.toml` layer over compiled defaults.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use bookcat::application::ErrorKind;
use bookcat::config::{local_config_path, LogMode, Settings};

#[test]
fn given_no_local_config_when_load_then_defaults() {
    let dir = TempDir::new().unwrap();

    let settings = Settings::load(Some(dir.path())).expect("load settings");

    assert_eq!(settings.catalog_path, PathBuf::from("catalog.xml"));
    assert_eq!(settings.log.mode, LogMode::Console);
    assert_eq!(settings.log.file, PathBuf::from("log.txt"));
}

#[test]
fn given_local_config_when_load_then_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    let local = r#"
catalog_path = "books/lab6.xml"

[log]
mode = "file"
file = "errors.log"
"#;
    fs::write(local_config_path(dir.path()), local).unwrap();

    let settings = Settings::load(Some(dir.path())).expect("load settings");

    assert_eq!(settings.catalog_path, PathBuf::from("books/lab6.xml"));
    assert_eq!(settings.log.mode, LogMode::File);
    assert_eq!(settings.log.file, PathBuf::from("errors.log"));
}

#[test]
fn given_partial_local_config_when_load_then_inherits_rest() {
    let dir = TempDir::new().unwrap();
    fs::write(local_config_path(dir.path()), "[log]\nmode = \"file\"\n").unwrap();

    let settings = Settings::load(Some(dir.path())).expect("load settings");

    assert_eq!(settings.catalog_path, PathBuf::from("catalog.xml"));
    assert_eq!(settings.log.mode, LogMode::File);
    assert_eq!(settings.log.file, PathBuf::from("log.txt"));
}

#[test]
fn given_invalid_toml_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    fs::write(local_config_path(dir.path()), "catalog_path = [unterminated").unwrap();

    let err = Settings::load(Some(dir.path())).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Config);
    assert!(err.to_string().contains(".bookcat.toml"));
}

#[test]
fn given_unknown_log_mode_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    fs::write(local_config_path(dir.path()), "[log]\nmode = \"syslog\"\n").unwrap();

    let err = Settings::load(Some(dir.path())).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Config);
}

#[test]
fn given_tilde_in_local_config_when_load_then_expanded() {
    let dir = TempDir::new().unwrap();
    fs::write(
        local_config_path(dir.path()),
        "catalog_path = \"~/books/catalog.xml\"\n",
    )
    .unwrap();

    let settings = Settings::load(Some(dir.path())).expect("load settings");

    let home = std::env::var("HOME").expect("HOME should be set");
    assert!(settings.catalog_path.starts_with(&home));
    assert!(settings.catalog_path.ends_with("books/catalog.xml"));
}
