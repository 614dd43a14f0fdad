//! Cordova Android environment checker
//!
//! Probes every tool a Cordova Android build needs and prints a pass/fail
//! summary. The exit code reflects the aggregate outcome so the checker
//! composes in automation pipelines.

use anyhow::Result;
use clap::Parser;
use cordova_cli::output::Status;
use cordova_core::error::exit_codes;
use cordova_core::health::{HealthChecker, HealthReport, HealthStatus};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "env-check")]
#[command(about = "Check the Cordova Android build environment")]
#[command(version)]
struct Cli {
    /// Cordova project directory, for a deep `cordova requirements` check
    #[arg(long)]
    project_dir: Option<PathBuf>,

    /// Output the report as JSON
    #[arg(long)]
    json: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        owo_colors::set_override(false);
    }

    let mut checker = HealthChecker::new().with_android_build_checks();
    if let Some(ref project_dir) = cli.project_dir {
        checker = checker.with_project_requirements(project_dir.clone());
    }

    let report = checker.run();

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    let code = if report.is_healthy() {
        exit_codes::SUCCESS
    } else {
        exit_codes::FAILURE
    };
    std::process::exit(code);
}

fn print_report(report: &HealthReport) {
    Status::header("Cordova Android Build Environment Check");

    for check in &report.checks {
        match check.status {
            HealthStatus::Healthy => {
                if let Some(version) = check.details.get("version") {
                    Status::success(&format!("{}: {}", check.name, version));
                } else if let Some(path) = check.details.get("path") {
                    Status::success(&format!("{}: {}", check.name, path));
                } else {
                    Status::success(&format!("{}: ok", check.name));
                }
            }
            HealthStatus::Degraded => {
                Status::warning(check.message.as_deref().unwrap_or(&check.name));
            }
            HealthStatus::Unhealthy => {
                Status::error(check.message.as_deref().unwrap_or(&check.name));
            }
        }
    }

    Status::header("Summary");
    for check in &report.checks {
        match check.status {
            HealthStatus::Healthy => Status::success(&check.name),
            HealthStatus::Degraded => Status::warning(&format!("{} (optional)", check.name)),
            HealthStatus::Unhealthy => Status::error(&check.name),
        }
    }

    println!();
    if report.is_healthy() {
        Status::success("Environment is ready for Cordova Android builds");
    } else {
        Status::error("Some requirements are missing. Please install them and try again");
    }
}
