//! The packaging backend
//!
//! Only one backend exists today (PyInstaller), but the seam between "what
//! tools the backend needs" and "the installer that provides them" is kept
//! explicit: the backend declares its pip requirements here and the
//! installer provides them sight-unseen.

use camino::Utf8Path;

use crate::config::AppConfig;
use crate::errors::{DistError, DistResult};

pub mod pyinstaller;

/// The pip requirement specs for the tools the backend needs installed
/// before it can run.
///
/// These never come from the app's requirements manifest: the backend is a
/// build tool, and pinning it happens here (via config), not in the app's
/// dependency set.
pub fn backend_pip_specs(config: &AppConfig) -> Vec<String> {
    let spec = match &config.pyinstaller_version {
        Some(version) => format!("pyinstaller=={version}"),
        None => "pyinstaller".to_owned(),
    };
    vec![spec]
}

/// Check that the backend actually produced the artifact it claimed to.
///
/// PyInstaller can exit 0 while leaving something other than what we asked
/// for (wrong name, console build), so we check for the artifact itself.
pub(crate) fn check_artifact(artifact_path: &Utf8Path) -> DistResult<()> {
    if artifact_path.exists() {
        Ok(())
    } else {
        Err(DistError::MissingArtifact {
            artifact_path: artifact_path.to_owned(),
        })
    }
}
