//! Config types for pydist
//!
//! Configuration comes from an optional `pydist.toml` next to the app's
//! sources. Every key is optional; anything unset falls back to the
//! defaults the app has always shipped with. [`AppConfig::resolve`][]
//! applies the defaults and joins all the relative paths onto the working
//! root so the rest of the pipeline never has to think about either.

use axoasset::SourceFile;
use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

use crate::errors::DistResult;
use crate::platform::Platform;

/// The file name we read config from, in the working root
pub const CONFIG_FILE_NAME: &str = "pydist.toml";

const DEFAULT_APP_NAME: &str = "MidiPiano";
const DEFAULT_ENTRY_POINT: &str = "main.py";
const DEFAULT_REQUIREMENTS: &str = "requirements.txt";
const DEFAULT_VENV_DIR: &str = "venv";

/// The raw contents of a `pydist.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TomlLayer {
    /// The app's display name, which also names the artifact
    pub app_name: Option<String>,
    /// The app's own version (only reported, never interpreted)
    pub app_version: Option<String>,
    /// Path to the entry-point `.py` file, relative to the working root
    pub entry_point: Option<Utf8PathBuf>,
    /// Path to the pip requirements manifest, relative to the working root
    pub requirements: Option<Utf8PathBuf>,
    /// Name of the virtualenv directory, relative to the working root
    pub venv_dir: Option<Utf8PathBuf>,
    /// Icon to use when packaging for Windows (defaults to `icon.ico`)
    pub windows_icon: Option<Utf8PathBuf>,
    /// Icon to use when packaging for macOS (defaults to `icon.icns`)
    pub mac_icon: Option<Utf8PathBuf>,
    /// Exact version of PyInstaller to install (pinned with `==`)
    ///
    /// If unset, pip installs whatever the latest release is.
    pub pyinstaller_version: Option<String>,
}

impl TomlLayer {
    /// Load the `pydist.toml` in the working root, if there is one.
    ///
    /// A missing file just means "all defaults"; a file that exists but
    /// doesn't parse is an error we report with the offending span.
    pub fn load(root: &Utf8Path) -> DistResult<TomlLayer> {
        let path = root.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Ok(TomlLayer::default());
        }
        let src = SourceFile::load_local(path)?;
        Ok(src.deserialize_toml()?)
    }
}

/// Fully-resolved configuration for one invocation.
///
/// All paths in here are absolute (joined onto the working root), and the
/// icon has already been picked for the platform we're packaging for.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// The app's display name
    pub app_name: String,
    /// The app's own version, if configured
    pub app_version: Option<String>,
    /// The entry-point `.py` file PyInstaller starts from
    pub entry_point: Utf8PathBuf,
    /// The pip requirements manifest
    pub requirements: Utf8PathBuf,
    /// The virtualenv directory
    pub venv_dir: Utf8PathBuf,
    /// The icon to embed in the artifact
    pub icon: Utf8PathBuf,
    /// Exact version of PyInstaller to install, if pinned
    pub pyinstaller_version: Option<String>,
}

impl AppConfig {
    /// Apply defaults to a raw config layer and root all its paths.
    pub fn resolve(root: &Utf8Path, platform: Platform, layer: TomlLayer) -> AppConfig {
        let TomlLayer {
            app_name,
            app_version,
            entry_point,
            requirements,
            venv_dir,
            windows_icon,
            mac_icon,
            pyinstaller_version,
        } = layer;

        let icon = match platform {
            Platform::Windows => windows_icon,
            Platform::Mac => mac_icon,
        }
        .unwrap_or_else(|| platform.default_icon_name().into());

        AppConfig {
            app_name: app_name.unwrap_or_else(|| DEFAULT_APP_NAME.to_owned()),
            app_version,
            entry_point: root.join(entry_point.unwrap_or_else(|| DEFAULT_ENTRY_POINT.into())),
            requirements: root.join(requirements.unwrap_or_else(|| DEFAULT_REQUIREMENTS.into())),
            venv_dir: root.join(venv_dir.unwrap_or_else(|| DEFAULT_VENV_DIR.into())),
            icon: root.join(icon),
            pyinstaller_version,
        }
    }
}
