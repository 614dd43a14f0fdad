//! CLI tests for apk-sign that need no signing tools installed
//!
//! The fallback path is driven by a stub `jarsigner` placed at the front of
//! PATH with no `apksigner` or Android SDK in sight.

use assert_cmd::Command;
use predicates::prelude::*;

#[cfg(unix)]
fn stub_tool(dir: &std::path::Path, name: &str, script: &str) {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, script).unwrap();
    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();
}

#[test]
fn rejects_missing_apk() {
    let dir = tempfile::tempdir().unwrap();
    let keystore = dir.path().join("release.keystore");
    std::fs::write(&keystore, b"ks").unwrap();

    Command::cargo_bin("apk-sign")
        .unwrap()
        .arg(dir.path().join("missing.apk"))
        .arg("--keystore")
        .arg(&keystore)
        .args(["--alias", "upload", "--no-color"])
        .current_dir(dir.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn missing_keystore_prints_keytool_hint() {
    let dir = tempfile::tempdir().unwrap();
    let apk = dir.path().join("app-release-unsigned.apk");
    std::fs::write(&apk, b"apk").unwrap();

    Command::cargo_bin("apk-sign")
        .unwrap()
        .arg(&apk)
        .arg("--keystore")
        .arg(dir.path().join("missing.keystore"))
        .args(["--alias", "upload", "--no-color"])
        .current_dir(dir.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Keystore not found"))
        .stderr(predicate::str::contains("keytool"));
}

#[test]
#[cfg(unix)]
fn falls_back_to_jarsigner_and_derives_signed_output() {
    let dir = tempfile::tempdir().unwrap();
    let bin_dir = dir.path().join("bin");
    std::fs::create_dir(&bin_dir).unwrap();

    // jarsigner signs in place, so succeeding without touching the input
    // is enough; the orchestrator copies it to the output path
    stub_tool(&bin_dir, "jarsigner", "#!/bin/sh\nexit 0\n");

    let apk = dir.path().join("app-release-unsigned.apk");
    std::fs::write(&apk, b"apk").unwrap();
    let keystore = dir.path().join("release.keystore");
    std::fs::write(&keystore, b"ks").unwrap();

    Command::cargo_bin("apk-sign")
        .unwrap()
        .arg(&apk)
        .arg("--keystore")
        .arg(&keystore)
        .args(["--alias", "upload", "--no-verify", "--no-color"])
        .env("PATH", &bin_dir)
        .env_remove("ANDROID_HOME")
        .env_remove("ANDROID_SDK_ROOT")
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("jarsigner"));

    // Default output path: input stem + "-signed.apk" in the same directory
    assert!(dir.path().join("app-release-unsigned-signed.apk").is_file());
}

#[test]
fn requires_keystore_flag_or_config() {
    let dir = tempfile::tempdir().unwrap();
    let apk = dir.path().join("app.apk");
    std::fs::write(&apk, b"apk").unwrap();

    Command::cargo_bin("apk-sign")
        .unwrap()
        .arg(&apk)
        .args(["--alias", "upload", "--no-color"])
        .current_dir(dir.path())
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("--keystore"));
}
