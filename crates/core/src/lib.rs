//! Core utilities for the Cordova APK build tools
//!
//! This crate provides shared functionality used by every binary in the
//! workspace:
//!
//! - **Error handling**: structured errors with codes, context, and recovery
//!   suggestions
//! - **Process execution**: command execution with captured output and
//!   explicit exit-code inspection
//! - **Health checks**: verify the Android build toolchain and environment
//! - **Configuration**: optional TOML configuration with defaults
//!
//! # Example
//!
//! ```rust,no_run
//! use cordova_core::health::HealthChecker;
//!
//! let report = HealthChecker::new()
//!     .with_android_build_checks()
//!     .run();
//!
//! if !report.is_healthy() {
//!     eprintln!("Environment issues detected!");
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod health;
pub mod process;

pub use error::{Error, ErrorCode, Result, ResultExt};
