//! APK signing, alignment, and verification
//!
//! Signing tries an ordered list of tools and short-circuits on the first
//! success: `apksigner` (signs to an explicit output path) first, then
//! `jarsigner` (signs in place, after which the result is copied to the
//! requested output). Alignment and verification degrade instead of
//! failing: a missing or failing `zipalign` is skipped, and a verification
//! failure is advisory.

use crate::sdk;
use cordova_core::error::{Error, Result};
use cordova_core::process::{run_command, which_command, CommandResult};
use std::path::{Path, PathBuf};

/// Suffix appended to the input file stem for the default output path
pub const SIGNED_SUFFIX: &str = "-signed";

/// Suffix appended to the input file stem for the aligned intermediate
pub const ALIGNED_SUFFIX: &str = "-aligned";

/// A fully specified signing request, validated before use
#[derive(Debug, Clone)]
pub struct SigningRequest {
    /// Unsigned APK to sign
    pub apk: PathBuf,
    /// Keystore holding the signing key
    pub keystore: PathBuf,
    /// Key alias within the keystore
    pub alias: String,
    /// Explicit output path; derived from the input when absent
    pub output: Option<PathBuf>,
    /// Run zipalign before signing
    pub zipalign: bool,
    /// Verify the signature after signing
    pub verify: bool,
}

impl SigningRequest {
    /// Validate that the APK and keystore exist on disk
    pub fn validate(&self) -> Result<()> {
        if !self.apk.is_file() {
            return Err(Error::file_not_found(&self.apk).with_context("Unsigned APK"));
        }
        if !self.keystore.is_file() {
            return Err(Error::keystore_not_found(&self.keystore));
        }
        Ok(())
    }

    /// Resolve the output path, deriving `<stem>-signed.apk` next to the
    /// input when no explicit output was given
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| sibling_with_suffix(&self.apk, SIGNED_SUFFIX))
    }

    /// Path for the zipalign intermediate, next to the input
    pub fn aligned_path(&self) -> PathBuf {
        sibling_with_suffix(&self.apk, ALIGNED_SUFFIX)
    }
}

/// Derive `<stem><suffix>.apk` in the same directory as `path`
fn sibling_with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    path.with_file_name(format!("{}{}.apk", stem, suffix))
}

/// Outcome of the optional alignment stage
#[derive(Debug, Clone)]
pub enum AlignOutcome {
    /// Alignment produced a new APK to sign
    Aligned {
        /// The aligned APK
        path: PathBuf,
    },
    /// Alignment was skipped; the original APK is used downstream
    Skipped {
        /// Why alignment did not happen
        reason: String,
    },
}

/// Align an APK with `zipalign -v 4`
///
/// Tool absence and tool failure are both non-fatal; the caller proceeds
/// with the original APK.
pub fn zipalign(apk: &Path, aligned: &Path) -> AlignOutcome {
    let Some(tool) = sdk::find_build_tool("zipalign") else {
        return AlignOutcome::Skipped {
            reason: "zipalign not found".to_string(),
        };
    };

    let result = run_command(
        &tool.to_string_lossy(),
        &[
            "-v",
            "4",
            &apk.to_string_lossy(),
            &aligned.to_string_lossy(),
        ],
    );

    match result {
        Ok(r) if r.success => AlignOutcome::Aligned {
            path: aligned.to_path_buf(),
        },
        Ok(r) => AlignOutcome::Skipped {
            reason: format!("zipalign exited with code {}", r.exit_code),
        },
        Err(e) => AlignOutcome::Skipped {
            reason: e.to_string(),
        },
    }
}

/// Signing tools, in preference order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignTool {
    /// Modern Android signing tool; signs to an explicit output path
    Apksigner,
    /// Legacy JDK signing tool; signs in place
    Jarsigner,
}

/// Ordered signer strategies; first success short-circuits
pub const SIGN_TOOLS: [SignTool; 2] = [SignTool::Apksigner, SignTool::Jarsigner];

impl SignTool {
    /// Tool name as invoked
    pub fn name(&self) -> &'static str {
        match self {
            SignTool::Apksigner => "apksigner",
            SignTool::Jarsigner => "jarsigner",
        }
    }

    /// Locate the tool executable
    fn locate(&self) -> Option<PathBuf> {
        match self {
            // apksigner ships with the SDK build-tools, often not on PATH
            SignTool::Apksigner => sdk::find_build_tool("apksigner"),
            SignTool::Jarsigner => which_command("jarsigner"),
        }
    }

    /// Invoke the tool; both tools take the same keystore and alias
    fn run(
        &self,
        tool: &Path,
        request: &SigningRequest,
        input: &Path,
        output: &Path,
    ) -> Result<CommandResult> {
        let tool = tool.to_string_lossy();
        let keystore = request.keystore.to_string_lossy();
        let input_str = input.to_string_lossy();
        let output_str = output.to_string_lossy();

        match self {
            SignTool::Apksigner => run_command(
                &tool,
                &[
                    "sign",
                    "--ks",
                    &keystore,
                    "--ks-key-alias",
                    &request.alias,
                    "--out",
                    &output_str,
                    &input_str,
                ],
            ),
            SignTool::Jarsigner => {
                let result = run_command(
                    &tool,
                    &[
                        "-verbose",
                        "-sigalg",
                        "SHA256withRSA",
                        "-digestalg",
                        "SHA-256",
                        "-keystore",
                        &keystore,
                        &input_str,
                        &request.alias,
                    ],
                )?;

                // jarsigner signs in place; honor the requested output path
                if result.success && input != output {
                    std::fs::copy(input, output).map_err(|e| {
                        Error::io(format!(
                            "Failed to copy signed APK to {}: {}",
                            output.display(),
                            e
                        ))
                    })?;
                }

                Ok(result)
            }
        }
    }
}

/// Outcome of the signing stage
#[derive(Debug, Clone)]
pub enum SignOutcome {
    /// An available tool signed the APK
    Signed {
        /// Which tool succeeded
        tool: SignTool,
        /// Signed APK location
        output: PathBuf,
        /// Signed APK size in bytes
        size_bytes: u64,
        /// Whether the preferred tool was bypassed
        fell_back: bool,
    },
    /// Every available tool was tried and the last one failed
    Failed {
        /// The last tool attempted
        tool: SignTool,
        /// Its exit code, mirrored by the caller
        exit_code: i32,
        /// Its captured stderr
        stderr: String,
    },
}

/// Sign an APK, trying each tool in [`SIGN_TOOLS`] order
///
/// Returns `Err` only when no signing tool is available at all.
pub fn sign(request: &SigningRequest, input: &Path) -> Result<SignOutcome> {
    let output = request.output_path();
    let mut last_failure: Option<(SignTool, CommandResult)> = None;
    let mut fell_back = false;

    for sign_tool in SIGN_TOOLS {
        let Some(tool_path) = sign_tool.locate() else {
            fell_back = true;
            continue;
        };

        let result = match sign_tool.run(&tool_path, request, input, &output) {
            Ok(r) => r,
            Err(_) => {
                fell_back = true;
                continue;
            }
        };

        if result.success {
            let size_bytes = std::fs::metadata(&output).map(|m| m.len()).unwrap_or(0);
            return Ok(SignOutcome::Signed {
                tool: sign_tool,
                output,
                size_bytes,
                fell_back,
            });
        }

        fell_back = true;
        last_failure = Some((sign_tool, result));
    }

    match last_failure {
        Some((tool, result)) => Ok(SignOutcome::Failed {
            tool,
            exit_code: result.exit_code,
            stderr: result.stderr,
        }),
        None => Err(Error::signing("No signing tool available")
            .with_suggestion("Install the Android SDK build-tools (apksigner) or a JDK (jarsigner)")),
    }
}

/// Outcome of the advisory verification stage
#[derive(Debug, Clone)]
pub enum VerifyOutcome {
    /// A tool confirmed the signature
    Verified {
        /// Which tool confirmed it
        tool: SignTool,
    },
    /// Every available tool rejected the signature
    Failed {
        /// The last tool attempted
        tool: SignTool,
    },
    /// No verification tool was available
    Unavailable,
}

/// Verify an APK signature, trying `apksigner verify` then
/// `jarsigner -verify`
///
/// Verification never fails the process; the outcome is reported and the
/// caller decides what to do with it.
pub fn verify(apk: &Path) -> VerifyOutcome {
    let apk_str = apk.to_string_lossy();
    let mut last_attempt: Option<SignTool> = None;

    for tool in SIGN_TOOLS {
        let Some(tool_path) = tool.locate() else {
            continue;
        };
        let tool_path = tool_path.to_string_lossy().to_string();

        let result = match tool {
            SignTool::Apksigner => run_command(&tool_path, &["verify", "-v", &apk_str]),
            SignTool::Jarsigner => {
                run_command(&tool_path, &["-verify", "-verbose", "-certs", &apk_str])
            }
        };

        match result {
            Ok(r) if r.success => return VerifyOutcome::Verified { tool },
            Ok(_) => last_attempt = Some(tool),
            Err(_) => {}
        }
    }

    match last_attempt {
        Some(tool) => VerifyOutcome::Failed { tool },
        None => VerifyOutcome::Unavailable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cordova_core::error::ErrorCode;

    fn request(apk: &Path, keystore: &Path) -> SigningRequest {
        SigningRequest {
            apk: apk.to_path_buf(),
            keystore: keystore.to_path_buf(),
            alias: "my-key-alias".to_string(),
            output: None,
            zipalign: false,
            verify: true,
        }
    }

    #[test]
    fn test_default_output_derivation() {
        let req = request(
            Path::new("/tmp/build/app-release-unsigned.apk"),
            Path::new("/tmp/release.keystore"),
        );
        assert_eq!(
            req.output_path(),
            PathBuf::from("/tmp/build/app-release-unsigned-signed.apk")
        );
    }

    #[test]
    fn test_explicit_output_wins() {
        let mut req = request(Path::new("/tmp/in.apk"), Path::new("/tmp/ks"));
        req.output = Some(PathBuf::from("/out/final.apk"));
        assert_eq!(req.output_path(), PathBuf::from("/out/final.apk"));
    }

    #[test]
    fn test_aligned_path_derivation() {
        let req = request(Path::new("/tmp/app.apk"), Path::new("/tmp/ks"));
        assert_eq!(req.aligned_path(), PathBuf::from("/tmp/app-aligned.apk"));
    }

    #[test]
    fn test_validate_missing_apk() {
        let dir = tempfile::tempdir().unwrap();
        let keystore = dir.path().join("release.keystore");
        std::fs::write(&keystore, b"ks").unwrap();

        let req = request(&dir.path().join("missing.apk"), &keystore);
        let err = req.validate().unwrap_err();
        assert_eq!(err.code, ErrorCode::FileNotFound);
    }

    #[test]
    fn test_validate_missing_keystore_has_hint() {
        let dir = tempfile::tempdir().unwrap();
        let apk = dir.path().join("app.apk");
        std::fs::write(&apk, b"apk").unwrap();

        let req = request(&apk, &dir.path().join("missing.keystore"));
        let err = req.validate().unwrap_err();
        assert_eq!(err.code, ErrorCode::KeystoreNotFound);
        assert!(err.suggestion.unwrap().contains("keytool"));
    }

    #[test]
    fn test_sign_tool_preference_order() {
        assert_eq!(SIGN_TOOLS[0], SignTool::Apksigner);
        assert_eq!(SIGN_TOOLS[1], SignTool::Jarsigner);
    }

    #[test]
    fn test_zipalign_skips_when_tool_missing() {
        // The test environment has no Android build-tools on PATH
        if sdk::find_build_tool("zipalign").is_some() {
            return;
        }
        let outcome = zipalign(Path::new("/tmp/in.apk"), Path::new("/tmp/out.apk"));
        assert!(matches!(outcome, AlignOutcome::Skipped { .. }));
    }
}
