//! CLI utilities for the Cordova APK build tools
//!
//! Provides shared terminal output formatting: status messages, headers,
//! and size formatting for artifact reporting.

#![warn(missing_docs)]

pub mod output;
