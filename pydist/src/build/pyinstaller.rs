//! Running PyInstaller

use axoasset::LocalAsset;
use axoprocess::Cmd;
use camino::Utf8Path;

use crate::errors::DistResult;
use crate::tasks::{BuildGraph, PyinstallerStep};

/// Package the app with PyInstaller.
///
/// Runs with the working root as cwd so `dist/` and `build/` land there
/// regardless of where pydist itself was invoked from.
pub fn build_app(graph: &BuildGraph, step: &PyinstallerStep) -> DistResult<()> {
    init_artifact_dir(&step.artifact_root)?;

    let mut cmd = Cmd::new(graph.env.python(), "package the app with PyInstaller");
    cmd.arg("-m").arg("PyInstaller");
    cmd.arg("--clean").arg("--noconfirm");
    cmd.arg("--name").arg(&step.app_name);
    cmd.arg("--windowed");
    cmd.arg("--icon").arg(&step.icon);
    cmd.arg(&step.entry_point);
    cmd.current_dir(&graph.root);
    cmd.stdout_to_stderr();
    cmd.run()?;

    super::check_artifact(&step.artifact_path)?;
    Ok(())
}

/// Clear out any artifact a previous build left behind.
///
/// `--clean` only wipes PyInstaller's own caches; the output tree is ours
/// to manage, and a stale one could mix old files into the new artifact.
pub(crate) fn init_artifact_dir(artifact_root: &Utf8Path) -> DistResult<()> {
    if artifact_root.is_file() {
        tracing::info!("removing stale file at {artifact_root}");
        LocalAsset::remove_file(artifact_root)?;
    } else if artifact_root.is_dir() {
        tracing::info!("removing stale artifact at {artifact_root}");
        LocalAsset::remove_dir_all(artifact_root)?;
    }
    Ok(())
}
