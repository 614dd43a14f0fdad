//! Cordova project validation and artifact location
//!
//! A directory is a Cordova project iff it contains a `config.xml` at its
//! root. Built APKs land at fixed locations under `platforms/android`
//! depending on the build variant.

use cordova_core::error::{Error, Result};
use std::fmt;
use std::path::{Path, PathBuf};

/// Project descriptor file that marks a Cordova project root
pub const PROJECT_DESCRIPTOR: &str = "config.xml";

/// Build variant selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Debug build, signed with the development key by the build itself
    Debug,
    /// Release build, produced unsigned and requiring `apk-sign`
    Release,
}

impl Variant {
    /// Get the `cordova build android` flag for this variant
    pub fn build_flag(&self) -> &'static str {
        match self {
            Variant::Debug => "--debug",
            Variant::Release => "--release",
        }
    }

    /// Get the fixed APK output location relative to the project root
    pub fn apk_relative_path(&self) -> &'static str {
        match self {
            Variant::Debug => "platforms/android/app/build/outputs/apk/debug/app-debug.apk",
            Variant::Release => {
                "platforms/android/app/build/outputs/apk/release/app-release-unsigned.apk"
            }
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Debug => write!(f, "debug"),
            Variant::Release => write!(f, "release"),
        }
    }
}

/// A built APK found on disk
#[derive(Debug, Clone)]
pub struct Artifact {
    /// Absolute path to the APK
    pub path: PathBuf,
    /// File size in bytes
    pub size_bytes: u64,
}

/// A validated Cordova project directory
#[derive(Debug, Clone)]
pub struct CordovaProject {
    dir: PathBuf,
}

impl CordovaProject {
    /// Open and validate a project directory
    ///
    /// Fails when the directory lacks the `config.xml` descriptor; in that
    /// case no build command must ever be invoked.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.join(PROJECT_DESCRIPTOR).is_file() {
            return Err(Error::not_a_cordova_project(dir));
        }

        // Absolute path so reported artifact locations are unambiguous
        let dir = std::fs::canonicalize(dir)
            .map_err(|e| Error::io(format!("Cannot resolve {}: {}", dir.display(), e)))?;

        Ok(Self { dir })
    }

    /// The resolved project root
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Expected APK path for a variant, whether or not it exists yet
    pub fn expected_apk(&self, variant: Variant) -> PathBuf {
        self.dir.join(variant.apk_relative_path())
    }

    /// Locate the built APK for a variant
    ///
    /// Called after a successful build; an absent artifact here means the
    /// build tool reported success but the output path assumption was wrong,
    /// which is reported distinctly from a build failure.
    pub fn locate_apk(&self, variant: Variant) -> Result<Artifact> {
        let path = self.expected_apk(variant);
        let metadata =
            std::fs::metadata(&path).map_err(|_| Error::missing_output(&path))?;

        Ok(Artifact {
            path,
            size_bytes: metadata.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cordova_core::error::ErrorCode;

    #[test]
    fn test_variant_build_flags() {
        assert_eq!(Variant::Debug.build_flag(), "--debug");
        assert_eq!(Variant::Release.build_flag(), "--release");
    }

    #[test]
    fn test_variant_apk_paths() {
        assert_eq!(
            Variant::Debug.apk_relative_path(),
            "platforms/android/app/build/outputs/apk/debug/app-debug.apk"
        );
        assert_eq!(
            Variant::Release.apk_relative_path(),
            "platforms/android/app/build/outputs/apk/release/app-release-unsigned.apk"
        );
    }

    #[test]
    fn test_open_rejects_non_cordova_dir() {
        let dir = tempfile::tempdir().unwrap();
        let err = CordovaProject::open(dir.path()).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotACordovaProject);
    }

    #[test]
    fn test_open_accepts_cordova_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.xml"), "<widget/>").unwrap();

        let project = CordovaProject::open(dir.path()).unwrap();
        assert!(project.dir().is_absolute());
    }

    #[test]
    fn test_expected_apk_matches_fixed_location() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.xml"), "<widget/>").unwrap();
        let project = CordovaProject::open(dir.path()).unwrap();

        let expected = project.dir().join(Variant::Debug.apk_relative_path());
        assert_eq!(project.expected_apk(Variant::Debug), expected);
    }

    #[test]
    fn test_locate_apk_missing_is_missing_output() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.xml"), "<widget/>").unwrap();
        let project = CordovaProject::open(dir.path()).unwrap();

        let err = project.locate_apk(Variant::Release).unwrap_err();
        assert_eq!(err.code, ErrorCode::MissingOutput);
    }

    #[test]
    fn test_locate_apk_reports_size() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.xml"), "<widget/>").unwrap();
        let project = CordovaProject::open(dir.path()).unwrap();

        let apk = project.expected_apk(Variant::Debug);
        std::fs::create_dir_all(apk.parent().unwrap()).unwrap();
        std::fs::write(&apk, vec![0u8; 1234]).unwrap();

        let artifact = project.locate_apk(Variant::Debug).unwrap();
        assert_eq!(artifact.size_bytes, 1234);
        assert_eq!(artifact.path, apk);
    }
}
