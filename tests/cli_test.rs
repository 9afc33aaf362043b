//! Integration tests for the bookcat binary

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use bookcat::domain::SAMPLE_CATALOG;

/// Command isolated from user config: runs in `dir`, XDG config points inside it.
fn bookcat(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("bookcat").unwrap();
    cmd.current_dir(dir.path())
        .env("XDG_CONFIG_HOME", dir.path().join("xdg"))
        .env_remove("BOOKCAT_CATALOG_PATH")
        .env_remove("BOOKCAT_LOG__MODE")
        .env_remove("BOOKCAT_LOG__FILE")
        .env("NO_COLOR", "1");
    cmd
}

fn sample(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("lab6.xml");
    fs::write(&path, SAMPLE_CATALOG).unwrap();
    path
}

#[test]
fn given_help_flag_when_running_then_lists_commands() {
    let dir = TempDir::new().unwrap();
    bookcat(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("delete"))
        .stdout(predicate::str::contains("by-year"))
        .stdout(predicate::str::contains("demo"));
}

#[test]
fn given_catalog_when_show_then_prints_root_without_declaration() {
    let dir = TempDir::new().unwrap();
    let path = sample(&dir);

    bookcat(&dir)
        .arg("-f")
        .arg(&path)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<catalog>"))
        .stdout(predicate::str::contains("<?xml").not())
        .stdout(predicate::str::contains("<title>title_3</title>"));
}

#[test]
fn given_catalog_when_add_then_book_listed_and_saved() {
    let dir = TempDir::new().unwrap();
    let path = sample(&dir);

    bookcat(&dir)
        .arg("-f")
        .arg(&path)
        .args(["add", "--id", "4", "--title", "title_4", "--author", "name_4", "--year", "2025"])
        .assert()
        .success()
        .stdout(predicate::str::contains("added book 4"));

    let on_disk = fs::read_to_string(&path).unwrap();
    assert!(on_disk.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<catalog>"));
    assert!(on_disk.contains(
        "<book id=\"4\"><title>title_4</title><author>name_4</author><year>2025</year></book>"
    ));

    bookcat(&dir)
        .arg("-f")
        .arg(&path)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("4: title_4 by name_4 (2025)"));
}

#[test]
fn given_catalog_when_delete_then_book_gone() {
    let dir = TempDir::new().unwrap();
    let path = sample(&dir);

    bookcat(&dir)
        .arg("-f")
        .arg(&path)
        .args(["delete", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("deleted book 2"));

    let on_disk = fs::read_to_string(&path).unwrap();
    assert!(!on_disk.contains("id=\"2\""));
    assert!(on_disk.contains("id=\"1\"") && on_disk.contains("id=\"3\""));
}

#[test]
fn given_unknown_id_when_delete_then_warns_and_file_untouched() {
    let dir = TempDir::new().unwrap();
    let path = sample(&dir);

    bookcat(&dir)
        .arg("-f")
        .arg(&path)
        .args(["delete", "999"])
        .assert()
        .success()
        .stderr(predicate::str::contains("no book with id 999"));

    assert_eq!(fs::read_to_string(&path).unwrap(), SAMPLE_CATALOG);
}

#[test]
fn given_missing_file_when_show_then_logged_and_exit_noinput() {
    let dir = TempDir::new().unwrap();

    bookcat(&dir)
        .args(["-f", "absent.xml", "show"])
        .assert()
        .code(66)
        .stderr(predicate::str::contains(
            "ERROR - An exception occurred: File 'absent.xml' does not exist",
        ));
}

#[test]
fn given_corrupt_file_when_show_then_exit_dataerr() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.xml");
    fs::write(&path, "<catalog><book id=\"1\">").unwrap();

    bookcat(&dir)
        .arg("-f")
        .arg(&path)
        .arg("show")
        .assert()
        .code(65)
        .stderr(predicate::str::contains(
            "The XML file is corrupted or in an invalid format.",
        ));
}

#[test]
fn given_file_log_mode_when_open_fails_then_line_appended_to_log_file() {
    let dir = TempDir::new().unwrap();

    bookcat(&dir)
        .env("BOOKCAT_LOG__MODE", "file")
        .env("BOOKCAT_LOG__FILE", "errors.log")
        .args(["-f", "absent.xml", "list"])
        .assert()
        .code(66)
        .stderr(predicate::str::contains("An exception occurred").not());

    let log = fs::read_to_string(dir.path().join("errors.log")).unwrap();
    assert_eq!(log.lines().count(), 1);
    assert!(log.ends_with("An exception occurred: File 'absent.xml' does not exist\n"));
}

#[test]
fn given_local_config_when_no_file_flag_then_uses_configured_catalog() {
    let dir = TempDir::new().unwrap();
    sample(&dir);
    fs::write(dir.path().join(".bookcat.toml"), "catalog_path = \"lab6.xml\"\n").unwrap();

    bookcat(&dir)
        .arg("by-year")
        .assert()
        .success()
        .stdout(predicate::str::contains("Year 1991:"))
        .stdout(predicate::str::contains("- title_1"));
}

#[test]
fn given_empty_dir_when_demo_with_seed_then_runs_full_walkthrough() {
    let dir = TempDir::new().unwrap();

    bookcat(&dir)
        .args(["-f", "lab6.xml", "demo", "--seed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("----INITIAL CONTENT"))
        .stdout(predicate::str::contains("----ADDING NEW BOOK"))
        .stdout(predicate::str::contains("----DELETING BOOK ID = 3"))
        .stdout(predicate::str::contains("Year 2025:\n- title_4"))
        .stdout(predicate::str::contains("Year 2010:").not());

    let on_disk = fs::read_to_string(dir.path().join("lab6.xml")).unwrap();
    assert!(on_disk.contains("id=\"4\""));
    assert!(!on_disk.contains("id=\"3\""));
}

#[test]
fn given_config_init_when_run_twice_then_second_fails_with_usage() {
    let dir = TempDir::new().unwrap();

    bookcat(&dir)
        .args(["config", "init"])
        .assert()
        .success();
    assert!(dir.path().join(".bookcat.toml").exists());

    bookcat(&dir)
        .args(["config", "init"])
        .assert()
        .code(64)
        .stderr(predicate::str::contains("config already exists"));
}
