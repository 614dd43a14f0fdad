//! Cordova Android integration
//!
//! This crate provides the Android-specific functionality of the workspace:
//! - Cordova project validation and artifact location
//! - Cordova CLI integration (clean, build, requirements)
//! - Android SDK and build-tools discovery
//! - APK signing, alignment, and verification

#![warn(missing_docs)]

pub mod cordova;
pub mod project;
pub mod sdk;
pub mod signing;
