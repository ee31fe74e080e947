//! Smoke tests for the demo binary.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn writes_a_png_composite() {
    let dir = tempfile::tempdir().expect("temp dir");
    let output = dir.path().join("out.png");

    Command::cargo_bin("slate")
        .expect("binary built")
        .args(["--width", "64", "--height", "64"])
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let header = std::fs::read(&output).expect("output file");
    assert_eq!(&header[..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn rejects_unreadable_profile_file() {
    Command::cargo_bin("slate")
        .expect("binary built")
        .args(["--profiles", "/nonexistent/profiles.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("reading profiles"));
}

#[test]
fn loads_profiles_from_toml() {
    let dir = tempfile::tempdir().expect("temp dir");
    let profiles = dir.path().join("pens.toml");
    std::fs::write(
        &profiles,
        r#"
        [[profiles]]
        kind = "marker"
        width = 12.0
        "#,
    )
    .unwrap();
    let output = dir.path().join("out.png");

    Command::cargo_bin("slate")
        .expect("binary built")
        .args(["--width", "64", "--height", "64"])
        .arg("--profiles")
        .arg(&profiles)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    assert!(output.exists());
}
