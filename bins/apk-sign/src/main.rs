//! Cordova APK signing orchestrator
//!
//! Validates the APK and keystore, optionally aligns with zipalign, signs
//! with apksigner (falling back to jarsigner), and verifies the result.
//! Verification is advisory: a failed verification is reported but never
//! changes the exit code.

use anyhow::Result;
use clap::Parser;
use cordova_android::signing::{
    self, AlignOutcome, SignOutcome, SignTool, SigningRequest, VerifyOutcome,
};
use cordova_cli::output::{format_size, Status};
use cordova_core::config::Config;
use cordova_core::error::exit_codes;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "apk-sign")]
#[command(about = "Sign an Android APK for release distribution")]
#[command(version)]
struct Cli {
    /// Path to the unsigned APK file
    apk: PathBuf,

    /// Path to the keystore file (or [signing] keystore in config)
    #[arg(long)]
    keystore: Option<PathBuf>,

    /// Key alias in the keystore (or [signing] alias in config)
    #[arg(long)]
    alias: Option<String>,

    /// Output path for the signed APK (default: <apk>-signed.apk)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Optimize the APK with zipalign before signing
    #[arg(long)]
    zipalign: bool,

    /// Skip signature verification after signing
    #[arg(long)]
    no_verify: bool,

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
    Status::header("APK Signing Tool");

    let Some(keystore) = cli
        .keystore
        .clone()
        .or_else(|| config.schema.signing.keystore.clone().map(PathBuf::from))
    else {
        Status::error("No keystore given: pass --keystore or set [signing] keystore in config");
        return exit_codes::VALIDATION_ERROR;
    };
    let Some(alias) = cli
        .alias
        .clone()
        .or_else(|| config.schema.signing.alias.clone())
    else {
        Status::error("No key alias given: pass --alias or set [signing] alias in config");
        return exit_codes::VALIDATION_ERROR;
    };

    let request = SigningRequest {
        apk: cli.apk.clone(),
        keystore,
        alias,
        output: cli.output.clone(),
        zipalign: cli.zipalign,
        verify: !cli.no_verify,
    };

    // Validate inputs before any tool runs
    if let Err(e) = request.validate() {
        Status::error(&e.to_string());
        return exit_codes::FAILURE;
    }
    Status::success(&format!("Found APK: {}", request.apk.display()));
    Status::success(&format!("Found keystore: {}", request.keystore.display()));

    // Optional alignment; failure here degrades, never aborts
    let input = if request.zipalign {
        Status::info("Optimizing APK with zipalign...");
        match signing::zipalign(&request.apk, &request.aligned_path()) {
            AlignOutcome::Aligned { path } => {
                Status::success(&format!("Optimized APK created: {}", path.display()));
                path
            }
            AlignOutcome::Skipped { reason } => {
                Status::warning(&format!("{}, skipping optimization", reason));
                request.apk.clone()
            }
        }
    } else {
        request.apk.clone()
    };

    // Sign, with ordered fallback
    Status::info("Signing APK...");
    let outcome = match signing::sign(&request, &input) {
        Ok(outcome) => outcome,
        Err(e) => {
            Status::error(&e.to_string());
            return exit_codes::COMMAND_NOT_FOUND;
        }
    };

    let (output, size_bytes) = match outcome {
        SignOutcome::Signed {
            tool,
            output,
            size_bytes,
            fell_back,
        } => {
            if fell_back && tool == SignTool::Jarsigner {
                Status::warning("apksigner unavailable or failed, fell back to jarsigner");
            }
            Status::success(&format!(
                "Signed APK created with {}: {}",
                tool.name(),
                output.display()
            ));
            (output, size_bytes)
        }
        SignOutcome::Failed {
            tool,
            exit_code,
            stderr,
        } => {
            eprintln!("{}", stderr);
            Status::error(&format!(
                "Signing failed: {} exited with code {}",
                tool.name(),
                exit_code
            ));
            return if exit_code > 0 {
                exit_code
            } else {
                exit_codes::FAILURE
            };
        }
    };

    // Advisory verification: report the outcome, keep exit code 0
    if request.verify {
        Status::info("Verifying APK signature...");
        match signing::verify(&output) {
            VerifyOutcome::Verified { tool } => {
                Status::success(&format!("APK signature verified with {}", tool.name()));
            }
            VerifyOutcome::Failed { .. } => {
                Status::error("APK signature verification failed");
            }
            VerifyOutcome::Unavailable => {
                Status::warning("No verification tool available, skipping verification");
            }
        }
    }

    Status::info(&format!("Signed APK size: {}", format_size(size_bytes)));
    Status::success("APK signed successfully");
    Status::info("You can now distribute this APK or upload it to Google Play Store");
    exit_codes::SUCCESS
}
