//! Cordova APK build orchestrator
//!
//! Validates the project and toolchain, runs the requirements check, then
//! cleans and builds via the Cordova CLI and reports the produced APK.

use anyhow::Result;
use clap::Parser;
use cordova_android::cordova;
use cordova_android::project::{CordovaProject, Variant};
use cordova_cli::output::{format_size, Status};
use cordova_core::config::Config;
use cordova_core::error::exit_codes;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "apk-build")]
#[command(about = "Build a Cordova Android APK")]
#[command(version)]
struct Cli {
    /// Cordova project directory
    #[arg(default_value = ".")]
    project_dir: PathBuf,

    /// Build the release APK instead of debug
    #[arg(long)]
    release: bool,

    /// Clean build artifacts before building
    #[arg(long)]
    clean: bool,

    /// Skip the Cordova environment requirements check
    #[arg(long)]
    skip_checks: bool,

    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        owo_colors::set_override(false);
    }

    let config = Config::load(cli.config.as_deref().and_then(|p| p.to_str()))?;

    std::process::exit(run(&cli, &config));
}

fn run(cli: &Cli, config: &Config) -> i32 {
    let variant = if cli.release {
        Variant::Release
    } else {
        Variant::Debug
    };

    Status::header("Cordova APK Builder");

    // Validate project
    let project = match CordovaProject::open(&cli.project_dir) {
        Ok(p) => {
            Status::success(&format!("Found Cordova project at {}", p.dir().display()));
            p
        }
        Err(e) => {
            Status::error(&e.to_string());
            return exit_codes::FAILURE;
        }
    };

    // Validate toolchain
    if !cordova::has_cordova() {
        Status::error("Cordova CLI not installed");
        Status::info("Install with: npm install -g cordova");
        return exit_codes::FAILURE;
    }
    match cordova::version() {
        Ok(version) => Status::success(&format!("Cordova CLI installed: {}", version)),
        Err(e) => {
            Status::error(&format!("Cordova CLI not invocable: {}", e));
            return exit_codes::FAILURE;
        }
    }

    // Requirements check, unless skipped by flag or config
    if cli.skip_checks || config.schema.build.skip_checks {
        Status::info("Skipping requirements check");
    } else {
        Status::info("Checking build requirements...");
        match cordova::requirements(project.dir()) {
            Ok(result) if result.success => {
                Status::success("All Cordova requirements met");
            }
            Ok(result) => {
                println!("{}", result.stdout);
                eprintln!("{}", result.stderr);
                Status::error("Some requirements are not met");
                Status::info("Fix the environment, or re-run with --skip-checks (build may fail)");
                return exit_codes::FAILURE;
            }
            Err(e) => {
                Status::error(&format!("Requirements check error: {}", e));
                return exit_codes::FAILURE;
            }
        }
    }

    // Clean, opt-in
    if cli.clean {
        Status::info("Cleaning previous build...");
        match cordova::clean(project.dir()) {
            Ok(result) if result.success => Status::success("Clean complete"),
            Ok(result) => {
                eprintln!("{}", result.stderr);
                Status::error("Clean failed");
                return nonzero_or_failure(result.exit_code);
            }
            Err(e) => {
                Status::error(&format!("Clean error: {}", e));
                return exit_codes::FAILURE;
            }
        }
    }

    // Build
    Status::info(&format!("Building {} APK...", variant));
    match cordova::build(project.dir(), variant) {
        Ok(result) if result.success => {
            // Cordova emits warnings on stderr even for successful builds
            if !result.stderr.is_empty() {
                eprintln!("{}", result.stderr);
            }
        }
        Ok(result) => {
            println!("{}", result.stdout);
            eprintln!("{}", result.stderr);
            Status::error("Build failed");
            return nonzero_or_failure(result.exit_code);
        }
        Err(e) => {
            Status::error(&format!("Build error: {}", e));
            return exit_codes::FAILURE;
        }
    }

    // Locate artifact; a missing APK after a successful build is its own
    // failure, never silent success
    let artifact = match project.locate_apk(variant) {
        Ok(a) => a,
        Err(e) => {
            Status::error(&e.to_string());
            return exit_codes::FAILURE;
        }
    };

    Status::success(&format!("{} APK built successfully", variant));
    Status::info(&format!("Location: {}", artifact.path.display()));
    Status::info(&format!("Size: {}", format_size(artifact.size_bytes)));

    if variant == Variant::Release {
        Status::warning("This APK is unsigned and needs to be signed before distribution");
        Status::info(&format!(
            "Sign it with: apk-sign {} --keystore <keystore> --alias <alias>",
            artifact.path.display()
        ));
    }

    Status::success("Build complete");
    exit_codes::SUCCESS
}

/// Propagate a tool's exit code, treating signal deaths as plain failure
fn nonzero_or_failure(code: i32) -> i32 {
    if code > 0 {
        code
    } else {
        exit_codes::FAILURE
    }
}
