//! Error handling integration tests for chunkcp CLI.
//!
//! Configuration and open failures must be reported before any data
//! moves, with a typed error code and the right exit status.

#[path = "../common/mod.rs"]
mod common;

use assert_cmd::cargo::cargo_bin_cmd;
use common::TestFixture;
use predicates::prelude::*;
use std::fs;

/// Zero workers is rejected before the destination is created.
#[test]
fn test_zero_jobs_is_invalid_configuration() {
    let fx = TestFixture::new();
    let src = fx.write_source("src.txt", b"content");
    let dst = fx.path("dst.txt");

    let mut cmd = cargo_bin_cmd!("chunkcp");
    cmd.arg("-j")
        .arg("0")
        .arg(&src)
        .arg(&dst)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("error[invalid_configuration]"));

    assert!(!dst.exists(), "destination must not be created");
}

/// An existing destination is left untouched when the configuration is invalid.
#[test]
fn test_zero_jobs_does_not_truncate_destination() {
    let fx = TestFixture::new();
    let src = fx.write_source("src.txt", b"content");
    let dst = fx.write_source("dst.txt", b"keep me");

    let mut cmd = cargo_bin_cmd!("chunkcp");
    cmd.arg("-j").arg("0").arg(&src).arg(&dst).assert().failure();

    assert_eq!(fs::read(&dst).unwrap(), b"keep me");
}

#[test]
fn test_source_not_found() {
    let fx = TestFixture::new();
    let dst = fx.path("dst.txt");

    let mut cmd = cargo_bin_cmd!("chunkcp");
    cmd.arg(fx.path("missing.txt"))
        .arg(&dst)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error[source_open]"))
        .stderr(predicate::str::contains("Failed to open source file"));

    assert!(!dst.exists());
}

#[test]
fn test_source_is_directory() {
    let fx = TestFixture::new();
    let src = fx.path("subdir");
    fs::create_dir(&src).unwrap();

    let mut cmd = cargo_bin_cmd!("chunkcp");
    cmd.arg(&src)
        .arg(fx.path("dst.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a regular file"));
}

#[test]
fn test_destination_directory_missing() {
    let fx = TestFixture::new();
    let src = fx.write_source("src.txt", b"content");

    let mut cmd = cargo_bin_cmd!("chunkcp");
    cmd.arg(&src)
        .arg(fx.path("no/such/dir/dst.txt"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error[destination_open]"));
}

#[test]
fn test_destination_is_directory() {
    let fx = TestFixture::new();
    let src = fx.write_source("src.txt", b"content");
    let dst = fx.path("existing_dir");
    fs::create_dir(&dst).unwrap();

    let mut cmd = cargo_bin_cmd!("chunkcp");
    cmd.arg(&src)
        .arg(&dst)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open destination file"));

    assert!(dst.is_dir());
}

/// Copying a file onto itself would truncate the source.
#[test]
fn test_same_source_and_destination() {
    let fx = TestFixture::new();
    let src = fx.write_source("precious.txt", b"precious data");

    let mut cmd = cargo_bin_cmd!("chunkcp");
    cmd.arg(&src)
        .arg(&src)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("same file"));

    assert_eq!(fs::read(&src).unwrap(), b"precious data");
}

#[cfg(unix)]
#[test]
fn test_unreadable_source() {
    use std::os::unix::fs::PermissionsExt;

    let fx = TestFixture::new();
    let src = fx.write_source("secret.txt", b"secret");
    fs::set_permissions(&src, fs::Permissions::from_mode(0o000)).unwrap();

    // Root ignores file permissions
    if fs::File::open(&src).is_ok() {
        return;
    }

    let mut cmd = cargo_bin_cmd!("chunkcp");
    cmd.arg(&src)
        .arg(fx.path("dst.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[permission_denied]"));
}

#[test]
fn test_invalid_jobs_value() {
    let fx = TestFixture::new();
    let src = fx.write_source("src.txt", b"content");

    let mut cmd = cargo_bin_cmd!("chunkcp");
    cmd.arg("-j")
        .arg("many")
        .arg(&src)
        .arg(fx.path("dst.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
