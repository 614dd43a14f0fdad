//! CLI tests for env-check
//!
//! Required tools are stubbed on PATH so the aggregate outcome is decided
//! entirely by the Android SDK variables.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

#[cfg(unix)]
fn stub_required_tools(bin_dir: &Path) {
    use std::os::unix::fs::PermissionsExt;

    for name in ["node", "npm", "cordova", "java"] {
        let path = bin_dir.join(name);
        std::fs::write(&path, "#!/bin/sh\necho \"1.0.0\"\n").unwrap();
        let mut perms = std::fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).unwrap();
    }
}

#[test]
#[cfg(unix)]
fn unset_sdk_variable_alone_forces_failure() {
    let dir = tempfile::tempdir().unwrap();
    let bin_dir = dir.path().join("bin");
    std::fs::create_dir(&bin_dir).unwrap();
    stub_required_tools(&bin_dir);

    // Every required tool passes; only the SDK variable is missing
    Command::cargo_bin("env-check")
        .unwrap()
        .arg("--no-color")
        .env("PATH", &bin_dir)
        .env_remove("ANDROID_HOME")
        .env_remove("ANDROID_SDK_ROOT")
        .current_dir(dir.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("ANDROID_HOME is not set"));
}

#[test]
#[cfg(unix)]
fn passes_when_required_tools_and_sdk_are_present() {
    let dir = tempfile::tempdir().unwrap();
    let bin_dir = dir.path().join("bin");
    std::fs::create_dir(&bin_dir).unwrap();
    stub_required_tools(&bin_dir);

    let sdk_dir = dir.path().join("sdk");
    std::fs::create_dir(&sdk_dir).unwrap();

    // gradle and adb stay missing; optional tools never fail the check
    Command::cargo_bin("env-check")
        .unwrap()
        .arg("--no-color")
        .env("PATH", &bin_dir)
        .env("ANDROID_HOME", &sdk_dir)
        .env_remove("ANDROID_SDK_ROOT")
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Environment is ready for Cordova Android builds",
        ));
}

#[test]
#[cfg(unix)]
fn sdk_variable_pointing_nowhere_is_a_distinct_failure() {
    let dir = tempfile::tempdir().unwrap();
    let bin_dir = dir.path().join("bin");
    std::fs::create_dir(&bin_dir).unwrap();
    stub_required_tools(&bin_dir);

    Command::cargo_bin("env-check")
        .unwrap()
        .arg("--no-color")
        .env("PATH", &bin_dir)
        .env("ANDROID_HOME", dir.path().join("no-such-sdk"))
        .env_remove("ANDROID_SDK_ROOT")
        .current_dir(dir.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Android SDK directory not found"));
}
