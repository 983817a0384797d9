//! Installing dependencies into the virtualenv
//!
//! Three installs happen, strictly in this order: pip upgrades itself (an
//! old pip can fail to resolve current wheels), then the app's manifest,
//! then the packaging backend's own tools. The backend is installed
//! separately from the manifest on purpose: it's a build tool, not an app
//! dependency, and it must not drift with the app's pins.

use axoprocess::Cmd;
use camino::Utf8Path;

use crate::env::Environment;
use crate::errors::{DistError, DistResult};

/// Upgrade pip itself inside the virtualenv.
pub fn upgrade_pip(env: &Environment) -> DistResult<()> {
    let mut cmd = Cmd::new(env.python(), "upgrade pip in the virtualenv");
    cmd.arg("-m").arg("pip").arg("install").arg("--upgrade").arg("pip");
    cmd.stdout_to_stderr();
    cmd.run()?;
    Ok(())
}

/// Check that the requirements manifest is where it should be.
///
/// This runs before any pip process spawns, so a missing manifest can
/// never leave the venv half-updated.
pub fn require_manifest(manifest_path: &Utf8Path) -> DistResult<()> {
    if manifest_path.exists() {
        Ok(())
    } else {
        Err(DistError::ManifestMissing {
            manifest_path: manifest_path.to_owned(),
        })
    }
}

/// Install everything the requirements manifest lists.
pub fn install_requirements(env: &Environment, manifest_path: &Utf8Path) -> DistResult<()> {
    require_manifest(manifest_path)?;
    let mut cmd = Cmd::new(env.python(), "install the app's dependencies");
    cmd.arg("-m").arg("pip").arg("install").arg("-r").arg(manifest_path);
    cmd.stdout_to_stderr();
    cmd.run()?;
    Ok(())
}

/// Install the packaging backend's pip requirements.
///
/// `specs` comes from the backend itself (see [`crate::build`][]); the
/// installer doesn't know or care which backend it's setting up.
pub fn install_backend(env: &Environment, specs: &[String]) -> DistResult<()> {
    let mut cmd = Cmd::new(env.python(), "install the packaging backend");
    cmd.arg("-m").arg("pip").arg("install");
    for spec in specs {
        cmd.arg(spec);
    }
    cmd.stdout_to_stderr();
    cmd.run()?;
    Ok(())
}
