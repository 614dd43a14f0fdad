//! Android SDK discovery
//!
//! Resolves the SDK location from ANDROID_HOME / ANDROID_SDK_ROOT and
//! locates build tools (`apksigner`, `zipalign`). Tools on PATH win;
//! otherwise the newest `build-tools/<version>/` directory is probed.

use cordova_core::health::SdkCheck;
use cordova_core::process::which_command;
use std::path::{Path, PathBuf};

/// Resolve the Android SDK directory, requiring it to exist
pub fn sdk_dir() -> Option<PathBuf> {
    SdkCheck::sdk_dir_from_env().filter(|dir| dir.is_dir())
}

/// Find the newest build-tools directory under an SDK root
pub fn newest_build_tools_dir(sdk: &Path) -> Option<PathBuf> {
    let build_tools = sdk.join("build-tools");

    let mut versions: Vec<(Vec<u32>, PathBuf)> = std::fs::read_dir(&build_tools)
        .ok()?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().to_string();
            let key: Vec<u32> = name
                .split('.')
                .map(|part| part.parse().ok())
                .collect::<Option<_>>()?;
            Some((key, entry.path()))
        })
        .collect();

    versions.sort();
    versions.pop().map(|(_, path)| path)
}

/// Locate a build tool by name, preferring PATH over the SDK
pub fn find_build_tool(name: &str) -> Option<PathBuf> {
    if let Some(path) = which_command(name) {
        return Some(path);
    }

    let candidate = newest_build_tools_dir(&sdk_dir()?)?.join(name);
    candidate.is_file().then_some(candidate)
}
