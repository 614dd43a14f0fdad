//! Health check system for verifying the Android build toolchain
//!
//! Provides checks for:
//! - Required tools (node, npm, cordova, java)
//! - The Android SDK location
//! - Optional tools (gradle, adb)
//! - A project-scoped `cordova requirements` deep check

use crate::process::{command_exists, run_command, run_command_in_dir};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Health check status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// All checks passed
    Healthy,
    /// Some optional checks failed
    Degraded,
    /// Required checks failed
    Unhealthy,
}

impl HealthStatus {
    /// Returns true if status is healthy
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        matches!(self, HealthStatus::Healthy)
    }

    /// Returns true if status is healthy or degraded (still operational)
    #[must_use]
    pub fn is_operational(&self) -> bool {
        matches!(self, HealthStatus::Healthy | HealthStatus::Degraded)
    }
}

/// Individual health check result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    /// Name of the check
    pub name: String,
    /// Status of the check
    pub status: HealthStatus,
    /// Optional message with details
    pub message: Option<String>,
    /// Duration of the check in milliseconds
    pub duration_ms: u64,
    /// Additional details as key-value pairs
    pub details: HashMap<String, String>,
}

impl CheckResult {
    /// Create a healthy check result
    pub fn healthy(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: HealthStatus::Healthy,
            message: None,
            duration_ms: 0,
            details: HashMap::new(),
        }
    }

    /// Create an unhealthy check result with a message
    pub fn unhealthy(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: HealthStatus::Unhealthy,
            message: Some(message.into()),
            duration_ms: 0,
            details: HashMap::new(),
        }
    }

    /// Create a degraded check result with a message
    pub fn degraded(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: HealthStatus::Degraded,
            message: Some(message.into()),
            duration_ms: 0,
            details: HashMap::new(),
        }
    }

    /// Set the duration of the check
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration_ms = duration.as_millis() as u64;
        self
    }

    /// Add a detail key-value pair
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

/// Overall health report containing all check results
///
/// Checks are stored in execution order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    /// Overall status based on all checks
    pub status: HealthStatus,
    /// Individual check results, in execution order
    pub checks: Vec<CheckResult>,
    /// Total duration of all checks in milliseconds
    pub total_duration_ms: u64,
    /// Timestamp when the report was generated
    pub timestamp: String,
    /// Version of the tool
    pub version: String,
}

impl HealthReport {
    /// Create a new health report from check results
    #[must_use]
    pub fn new(checks: Vec<CheckResult>, duration: Duration) -> Self {
        let status = if checks.iter().any(|c| c.status == HealthStatus::Unhealthy) {
            HealthStatus::Unhealthy
        } else if checks.iter().all(|c| c.status == HealthStatus::Healthy) {
            HealthStatus::Healthy
        } else {
            HealthStatus::Degraded
        };

        Self {
            status,
            checks,
            total_duration_ms: duration.as_millis() as u64,
            timestamp: chrono::Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Returns true if no required check failed
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        // Degraded means only optional tools are missing; builds still work
        self.status.is_operational()
    }

    /// Get all checks that did not pass cleanly
    #[must_use]
    pub fn failed_checks(&self) -> Vec<&CheckResult> {
        self.checks
            .iter()
            .filter(|c| !c.status.is_healthy())
            .collect()
    }
}

/// Health checker with configurable checks
pub struct HealthChecker {
    checks: Vec<Box<dyn HealthCheck>>,
}

impl Default for HealthChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl HealthChecker {
    /// Create a new health checker with no checks
    #[must_use]
    pub fn new() -> Self {
        Self { checks: Vec::new() }
    }

    /// Add a health check
    pub fn add_check(mut self, check: impl HealthCheck + 'static) -> Self {
        self.checks.push(Box::new(check));
        self
    }

    /// Add the standard checks for Cordova Android builds
    #[must_use]
    pub fn with_android_build_checks(self) -> Self {
        self.add_check(CommandCheck::new("node", Some("--version")))
            .add_check(CommandCheck::new("npm", Some("--version")))
            .add_check(
                CommandCheck::new("cordova", Some("--version"))
                    .with_install_hint("npm install -g cordova"),
            )
            .add_check(CommandCheck::new("java", Some("-version")))
            .add_check(EnvVarCheck::optional("JAVA_HOME"))
            .add_check(SdkCheck)
            .add_check(CommandCheck::optional("gradle", Some("--version")))
            .add_check(CommandCheck::optional("adb", Some("--version")))
    }

    /// Add a project-scoped `cordova requirements` deep check
    #[must_use]
    pub fn with_project_requirements(self, project_dir: impl Into<PathBuf>) -> Self {
        self.add_check(CordovaRequirementsCheck {
            project_dir: project_dir.into(),
        })
    }

    /// Run all health checks, in insertion order
    #[must_use]
    pub fn run(&self) -> HealthReport {
        let start = Instant::now();
        let mut results = Vec::new();

        for check in &self.checks {
            let check_start = Instant::now();
            let mut result = check.check();
            result.duration_ms = check_start.elapsed().as_millis() as u64;
            results.push(result);
        }

        HealthReport::new(results, start.elapsed())
    }
}

/// Trait for implementing health checks
pub trait HealthCheck: Send + Sync {
    /// Perform the health check and return a result
    fn check(&self) -> CheckResult;
}

/// Check if a command is available, probing its version when possible
pub struct CommandCheck {
    command: String,
    version_arg: Option<String>,
    install_hint: Option<String>,
    required: bool,
}

impl CommandCheck {
    /// Create a required command check
    pub fn new(command: impl Into<String>, version_arg: Option<&str>) -> Self {
        Self {
            command: command.into(),
            version_arg: version_arg.map(String::from),
            install_hint: None,
            required: true,
        }
    }

    /// Create an optional command check (degraded if missing, not unhealthy)
    pub fn optional(command: impl Into<String>, version_arg: Option<&str>) -> Self {
        Self {
            command: command.into(),
            version_arg: version_arg.map(String::from),
            install_hint: None,
            required: false,
        }
    }

    /// Attach an install hint shown when the command is missing
    #[must_use]
    pub fn with_install_hint(mut self, hint: impl Into<String>) -> Self {
        self.install_hint = Some(hint.into());
        self
    }
}

impl HealthCheck for CommandCheck {
    fn check(&self) -> CheckResult {
        if !command_exists(&self.command) {
            let mut message = format!("{} is not installed", self.command);
            if let Some(ref hint) = self.install_hint {
                message.push_str(&format!(" (install with: {})", hint));
            }
            return if self.required {
                CheckResult::unhealthy(&self.command, message)
            } else {
                CheckResult::degraded(&self.command, format!("{} (optional)", message))
            };
        }

        let Some(ref arg) = self.version_arg else {
            return CheckResult::healthy(&self.command);
        };

        match run_command(&self.command, &[arg]) {
            Ok(output) => {
                // java prints its version to stderr
                let version = output
                    .stdout
                    .lines()
                    .chain(output.stderr.lines())
                    .map(str::trim)
                    .find(|l| !l.is_empty())
                    .unwrap_or("")
                    .to_string();

                if version.is_empty() {
                    // Present but not telling us its version; tolerated
                    CheckResult::healthy(&self.command).with_detail("version", "unknown")
                } else {
                    CheckResult::healthy(&self.command).with_detail("version", version)
                }
            }
            Err(_) => CheckResult::healthy(&self.command).with_detail("version", "unknown"),
        }
    }
}

/// Check if an environment variable is set; absence degrades the report
/// rather than failing it
pub struct EnvVarCheck {
    var_name: String,
}

impl EnvVarCheck {
    /// Create an optional environment variable check
    pub fn optional(var_name: impl Into<String>) -> Self {
        Self {
            var_name: var_name.into(),
        }
    }
}

impl HealthCheck for EnvVarCheck {
    fn check(&self) -> CheckResult {
        match std::env::var(&self.var_name) {
            Ok(value) => CheckResult::healthy(&self.var_name).with_detail("value", value),
            Err(_) => CheckResult::degraded(
                &self.var_name,
                format!("{} is not set (may cause issues)", self.var_name),
            ),
        }
    }
}

/// Check for the Android SDK via ANDROID_HOME / ANDROID_SDK_ROOT
///
/// "Variable unset" and "directory missing" are reported as distinct
/// failures.
pub struct SdkCheck;

/// Environment variables naming the Android SDK location, in probe order
pub const SDK_ENV_VARS: [&str; 2] = ["ANDROID_HOME", "ANDROID_SDK_ROOT"];

impl SdkCheck {
    /// Resolve the SDK location from the environment, unchecked for existence
    pub fn sdk_dir_from_env() -> Option<PathBuf> {
        SDK_ENV_VARS
            .iter()
            .find_map(|var| std::env::var(var).ok())
            .map(PathBuf::from)
    }
}

impl HealthCheck for SdkCheck {
    fn check(&self) -> CheckResult {
        let Some(sdk_dir) = Self::sdk_dir_from_env() else {
            return CheckResult::unhealthy(
                "android-sdk",
                "ANDROID_HOME is not set (example: export ANDROID_HOME=$HOME/Android/Sdk)",
            );
        };

        if !sdk_dir.is_dir() {
            return CheckResult::unhealthy(
                "android-sdk",
                format!(
                    "Android SDK directory not found: {}",
                    sdk_dir.display()
                ),
            )
            .with_detail("path", sdk_dir.display().to_string());
        }

        CheckResult::healthy("android-sdk").with_detail("path", sdk_dir.display().to_string())
    }
}

/// Run `cordova requirements` inside a project directory
pub struct CordovaRequirementsCheck {
    /// Cordova project directory
    pub project_dir: PathBuf,
}

impl HealthCheck for CordovaRequirementsCheck {
    fn check(&self) -> CheckResult {
        if !Path::new(&self.project_dir).is_dir() {
            return CheckResult::unhealthy(
                "cordova-requirements",
                format!(
                    "Project directory not found: {}",
                    self.project_dir.display()
                ),
            );
        }

        match run_command_in_dir("cordova", &["requirements"], &self.project_dir) {
            Ok(output) if output.success => {
                CheckResult::healthy("cordova-requirements").with_detail("output", output.stdout)
            }
            Ok(output) => CheckResult::unhealthy(
                "cordova-requirements",
                format!("Some Cordova requirements not met:\n{}", output.combined_output()),
            ),
            Err(e) => CheckResult::unhealthy("cordova-requirements", e.to_string()),
        }
    }
}
