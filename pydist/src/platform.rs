//! The platforms we can package for, and their filesystem conventions
//!
//! Everything platform-conditional in the pipeline funnels through here:
//! where a virtualenv keeps its executables, what the icon file is called,
//! and where PyInstaller leaves the final artifact.

use camino::Utf8PathBuf;
use pydist_schema::ArtifactKind;
use serde::{Deserialize, Serialize};

use crate::errors::{DistError, DistResult};

/// A platform pydist can package the app for.
///
/// This is picked explicitly at invocation time (or detected from the host
/// as a convenience); nothing downstream ever re-sniffs the OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Platform {
    /// Windows: the artifact is a directory of loose files containing
    /// `<name>.exe`.
    Windows,
    /// macOS: the artifact is a `<name>.app` bundle.
    Mac,
}

impl Platform {
    /// Detect the platform pydist itself is running on.
    pub fn host() -> DistResult<Platform> {
        if cfg!(windows) {
            Ok(Platform::Windows)
        } else if cfg!(target_os = "macos") {
            Ok(Platform::Mac)
        } else {
            Err(DistError::UnsupportedHostPlatform {
                host: std::env::consts::OS.to_owned(),
            })
        }
    }

    /// The directory inside a virtualenv where executables live.
    pub fn venv_bin_dir(self) -> &'static str {
        match self {
            Platform::Windows => "Scripts",
            Platform::Mac => "bin",
        }
    }

    /// The name of the python executable inside a virtualenv.
    pub fn venv_python_name(self) -> &'static str {
        match self {
            Platform::Windows => "python.exe",
            Platform::Mac => "python",
        }
    }

    /// The icon file the packaging wants, as a name relative to the
    /// working root.
    pub fn default_icon_name(self) -> &'static str {
        match self {
            Platform::Windows => "icon.ico",
            Platform::Mac => "icon.icns",
        }
    }

    /// The kind of artifact this platform's packaging produces.
    pub fn artifact_kind(self) -> ArtifactKind {
        match self {
            Platform::Windows => ArtifactKind::ExecutableDir,
            Platform::Mac => ArtifactKind::AppBundle,
        }
    }

    /// The file name of the artifact itself (`MidiPiano.exe`, `MidiPiano.app`).
    pub fn artifact_file_name(self, app_name: &str) -> String {
        match self {
            Platform::Windows => format!("{app_name}.exe"),
            Platform::Mac => format!("{app_name}.app"),
        }
    }

    /// Where the artifact lands, relative to the working root.
    ///
    /// On Windows the executable sits inside a directory of support files,
    /// on macOS the bundle is the whole artifact.
    pub fn artifact_rel_path(self, app_name: &str) -> Utf8PathBuf {
        match self {
            Platform::Windows => {
                Utf8PathBuf::from(format!("dist/{app_name}/{app_name}.exe"))
            }
            Platform::Mac => Utf8PathBuf::from(format!("dist/{app_name}.app")),
        }
    }

    /// The directory tree that IS the artifact, relative to the working root.
    ///
    /// This is what gets removed before a rebuild: on Windows the whole
    /// `dist/<name>/` tree, on macOS the `.app` bundle itself.
    pub fn artifact_root_rel_path(self, app_name: &str) -> Utf8PathBuf {
        match self {
            Platform::Windows => Utf8PathBuf::from(format!("dist/{app_name}")),
            Platform::Mac => Utf8PathBuf::from(format!("dist/{app_name}.app")),
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let string = match self {
            Platform::Windows => "windows",
            Platform::Mac => "mac",
        };
        string.fmt(f)
    }
}
