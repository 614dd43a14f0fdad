//! Cordova CLI integration
//!
//! Provides wrappers for the `cordova` commands the build pipeline uses.
//! Every wrapper captures output and leaves exit-code inspection to the
//! caller.

use crate::project::Variant;
use cordova_core::error::Result;
use cordova_core::process::{command_exists, run_command, run_command_in_dir, CommandResult};
use std::path::Path;

/// Check if the Cordova CLI is available
pub fn has_cordova() -> bool {
    command_exists("cordova")
}

/// Get the Cordova CLI version
pub fn version() -> Result<String> {
    let result = run_command("cordova", &["--version"])?;
    Ok(result.stdout.trim().to_string())
}

/// Run the Cordova environment requirements check for a project
pub fn requirements(project_dir: &Path) -> Result<CommandResult> {
    run_command_in_dir("cordova", &["requirements"], project_dir)
}

/// Clean Android build artifacts
pub fn clean(project_dir: &Path) -> Result<CommandResult> {
    run_command_in_dir("cordova", &["clean", "android"], project_dir)
}

/// Build the Android platform for a variant
pub fn build(project_dir: &Path, variant: Variant) -> Result<CommandResult> {
    run_command_in_dir(
        "cordova",
        &["build", "android", variant.build_flag()],
        project_dir,
    )
}
