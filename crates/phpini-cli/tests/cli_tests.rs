use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const TEMPLATE: &str = ";extension=php_mbstring.dll\n;date.timezone =\n";

fn write_config(dir: &Path, paths: &[String]) -> std::path::PathBuf {
    let path = dir.join("configure.json");
    let config = format!(
        r#"{{
    "paths": {paths:?},
    "base": ["php.ini-development"],
    "settings": {{"date.timezone": "UTC"}},
    "extensions": ["mbstring"]
}}"#
    );
    fs::write(&path, config).unwrap();
    path
}

#[test]
fn test_help_output() {
    let mut cmd = Command::cargo_bin("phpini").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("configure"))
        .stdout(predicate::str::contains("--dry-run"));
}

#[test]
fn test_version_output() {
    let mut cmd = Command::cargo_bin("phpini").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1.0"));
}

#[test]
fn test_configure_help_shows_default_config() {
    let mut cmd = Command::cargo_bin("phpini").unwrap();
    cmd.args(["configure", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("configure.json"));
}

#[test]
fn test_default_config_path_is_relative_to_cwd() {
    let tmp = TempDir::new().unwrap();

    let mut cmd = Command::cargo_bin("phpini").unwrap();
    cmd.current_dir(tmp.path())
        .arg("configure")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read config file"))
        .stderr(predicate::str::contains("configure.json"));
}

#[test]
fn test_malformed_config() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("broken.json");
    fs::write(&config, "{ not json").unwrap();

    let mut cmd = Command::cargo_bin("phpini").unwrap();
    cmd.arg("configure")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config file"));
}

#[test]
fn test_missing_config_key() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("configure.json");
    fs::write(&config, r#"{"paths": [], "base": [], "settings": {}}"#).unwrap();

    let mut cmd = Command::cargo_bin("phpini").unwrap();
    cmd.arg("configure")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Missing required configuration key 'extensions'",
        ));
}

#[test]
fn test_setting_value_with_trailing_space_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("configure.json");
    fs::write(
        &config,
        r#"{"paths": [], "base": [], "settings": {"date.timezone": "UTC "}, "extensions": []}"#,
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("phpini").unwrap();
    cmd.arg("configure")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("would not read back unchanged"));
}

#[test]
fn test_no_matching_installations_succeeds() {
    let tmp = TempDir::new().unwrap();
    let config = write_config(tmp.path(), &[format!("{}/none-*", tmp.path().display())]);

    let mut cmd = Command::cargo_bin("phpini").unwrap();
    cmd.arg("configure")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Installations:   0"));
}

#[test]
fn test_installation_without_php_fails() {
    let tmp = TempDir::new().unwrap();
    let install = tmp.path().join("php-8.2");
    fs::create_dir(&install).unwrap();
    fs::write(install.join("php.ini"), TEMPLATE).unwrap();
    let config = write_config(tmp.path(), &[format!("{}/php-*", tmp.path().display())]);

    let mut cmd = Command::cargo_bin("phpini").unwrap();
    cmd.arg("configure")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to configure"));

    assert_eq!(fs::read_to_string(install.join("php.ini")).unwrap(), TEMPLATE);
}

#[test]
fn test_unknown_subcommand() {
    let mut cmd = Command::cargo_bin("phpini").unwrap();
    cmd.arg("unknown")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_no_subcommand() {
    let mut cmd = Command::cargo_bin("phpini").unwrap();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[cfg(unix)]
mod with_fake_php {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    fn fake_install(root: &Path, name: &str) -> std::path::PathBuf {
        let dir = root.join(name);
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("php.ini-development"), TEMPLATE).unwrap();

        let php = dir.join("php");
        fs::write(&php, "#!/bin/sh\necho 8.3.4\n").unwrap();
        fs::set_permissions(&php, fs::Permissions::from_mode(0o755)).unwrap();
        dir
    }

    #[test]
    fn test_configure_end_to_end() {
        let tmp = TempDir::new().unwrap();
        let install = fake_install(tmp.path(), "php-8.3");
        let config = write_config(tmp.path(), &[format!("{}/php-*", tmp.path().display())]);

        let mut cmd = Command::cargo_bin("phpini").unwrap();
        cmd.arg("configure")
            .arg(&config)
            .assert()
            .success()
            .stdout(predicate::str::contains("(PHP 8.3.4): updated"))
            .stdout(predicate::str::contains("Bootstrapped:    1"));

        assert_eq!(
            fs::read_to_string(install.join("php.ini")).unwrap(),
            "extension=php_mbstring.dll\n;date.timezone =\ndate.timezone = UTC\n"
        );
    }

    #[test]
    fn test_configure_dry_run() {
        let tmp = TempDir::new().unwrap();
        let install = fake_install(tmp.path(), "php-8.3");
        let config = write_config(tmp.path(), &[format!("{}/php-*", tmp.path().display())]);

        let mut cmd = Command::cargo_bin("phpini").unwrap();
        cmd.args(["--dry-run", "configure"])
            .arg(&config)
            .assert()
            .success()
            .stdout(predicate::str::contains("would update"))
            .stdout(predicate::str::contains("Would bootstrap: 1"))
            .stderr(predicate::str::contains("[DRY RUN] Would update"));

        assert!(!install.join("php.ini").exists());
    }
}
