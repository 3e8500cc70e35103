use assert_cmd::Command;
use assert_cmd::cargo;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn zvm(root: &Path) -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("zvm"));
    cmd.arg("--root").arg(root).env_remove("ZVM_PATH");
    cmd
}

#[test]
fn test_use_installed_version_creates_bin_link() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("0.11.0")).unwrap();

    zvm(dir.path())
        .args(["use", "0.11.0"])
        .assert()
        .success()
        .stdout(predicates::str::contains("Now using 0.11.0"));

    assert_eq!(
        fs::read_link(dir.path().join("bin")).unwrap(),
        dir.path().join("0.11.0")
    );
}

#[test]
fn test_use_switches_between_versions() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("0.11.0")).unwrap();
    fs::create_dir(dir.path().join("0.12.0")).unwrap();

    zvm(dir.path()).args(["use", "0.11.0"]).assert().success();
    zvm(dir.path()).args(["use", "0.12.0"]).assert().success();

    assert_eq!(
        fs::read_link(dir.path().join("bin")).unwrap(),
        dir.path().join("0.12.0")
    );

    zvm(dir.path())
        .arg("ls")
        .assert()
        .success()
        .stdout(predicates::str::contains("* 0.12.0"))
        .stdout(predicates::str::contains("  0.11.0"));
}

#[test]
fn test_declined_install_reports_not_installed() {
    let dir = tempdir().unwrap();

    zvm(dir.path())
        .args(["use", "0.12.0"])
        .write_stdin("n\n")
        .assert()
        .failure()
        .stdout(predicates::str::contains("isn't installed"))
        .stderr(predicates::str::contains("version 0.12.0 is not installed"));

    assert!(fs::symlink_metadata(dir.path().join("bin")).is_err());
}

#[test]
fn test_accepted_install_without_installer_fails() {
    let dir = tempdir().unwrap();

    zvm(dir.path())
        .args(["use", "0.12.0"])
        .write_stdin("yes\n")
        .assert()
        .failure()
        .stderr(predicates::str::contains("failed to install version 0.12.0"));

    assert!(fs::symlink_metadata(dir.path().join("bin")).is_err());
}

#[test]
fn test_use_mach_alias_sets_version_map() {
    let dir = tempdir().unwrap();

    zvm(dir.path()).args(["use", "mach"]).assert().success();

    let settings = fs::read_to_string(dir.path().join("settings.json")).unwrap();
    assert!(settings.contains("https://machengine.org/zig/index.json"));
}

#[test]
fn test_use_mach_alias_recovers_when_settings_are_corrupt() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("settings.json"), "not json").unwrap();

    zvm(dir.path())
        .args(["use", "mach"])
        .assert()
        .success()
        .stderr(predicates::str::contains("zvm vmu default"));

    assert_eq!(
        fs::read_link(dir.path().join("bin")).unwrap(),
        dir.path().join("mach")
    );
}

#[test]
fn test_use_default_alias_fails_when_settings_are_corrupt() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("settings.json"), "not json").unwrap();

    zvm(dir.path())
        .args(["use", "default"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("failed to reset the version map"));

    assert!(fs::symlink_metadata(dir.path().join("bin")).is_err());
}

#[test]
fn test_vmu_sets_and_resets_url() {
    let dir = tempdir().unwrap();

    zvm(dir.path())
        .args(["vmu", "https://example.com/index.json"])
        .assert()
        .success()
        .stdout(predicates::str::contains("https://example.com/index.json"));

    zvm(dir.path())
        .args(["vmu", "default"])
        .assert()
        .success()
        .stdout(predicates::str::contains(
            "https://ziglang.org/download/index.json",
        ));
}

#[test]
fn test_vmu_rejects_non_http_url() {
    let dir = tempdir().unwrap();

    zvm(dir.path())
        .args(["vmu", "file:///tmp/index.json"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("http or https"));

    assert!(!dir.path().join("settings.json").exists());
}

#[test]
fn test_use_rejects_path_like_version() {
    let dir = tempdir().unwrap();

    zvm(dir.path())
        .args(["use", "../outside"])
        .assert()
        .failure()
        .stderr(predicates::str::contains("invalid version"));
}

#[test]
fn test_ls_with_nothing_installed() {
    let dir = tempdir().unwrap();

    zvm(&dir.path().join("fresh"))
        .arg("ls")
        .assert()
        .success()
        .stdout(predicates::str::contains("No versions installed."));
}

#[test]
fn test_root_from_environment() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("0.11.0")).unwrap();

    Command::new(cargo::cargo_bin!("zvm"))
        .env("ZVM_PATH", dir.path())
        .args(["use", "0.11.0"])
        .assert()
        .success();

    assert!(fs::symlink_metadata(dir.path().join("bin")).is_ok());
}
