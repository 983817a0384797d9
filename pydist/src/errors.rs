//! Errors!
//!
//! Errors are constructed at the point of failure and carry enough context
//! to say which stage of the pipeline died. Process failures come through
//! [`axoprocess`][] with the command's own summary attached, so we mostly
//! just forward those.

use camino::Utf8PathBuf;
use miette::Diagnostic;
use thiserror::Error;

/// An alias for the common Result type of this crate
pub type DistResult<T> = std::result::Result<T, DistError>;

/// Errors pydist can have
#[derive(Debug, Error, Diagnostic)]
pub enum DistError {
    /// random i/o error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// random axoasset error
    #[error(transparent)]
    #[diagnostic(transparent)]
    Asset(#[from] axoasset::AxoassetError),

    /// random axoprocess error
    #[error(transparent)]
    #[diagnostic(transparent)]
    Cmd(#[from] axoprocess::AxoprocessError),

    /// No usable Python interpreter was found on the system
    #[error("failed to find a Python interpreter to create {venv_dir} with")]
    #[diagnostic(help("install Python 3 and make sure it's on your PATH (we tried: {tried})"))]
    PythonNotFound {
        /// The virtualenv we wanted to create
        venv_dir: Utf8PathBuf,
        /// The interpreter names we probed for
        tried: String,
    },

    /// The requirements manifest doesn't exist
    #[error("couldn't find the requirements manifest at {manifest_path}")]
    #[diagnostic(help(
        "pip needs this file to know what to install; put one next to the app's entry point"
    ))]
    ManifestMissing {
        /// Where we looked for it
        manifest_path: Utf8PathBuf,
    },

    /// pydist is running somewhere it can't package for
    #[error("pydist doesn't know how to package apps for {host}")]
    #[diagnostic(help("pass --platform to pick one of the supported platforms: windows, mac"))]
    UnsupportedHostPlatform {
        /// The OS we detected
        host: String,
    },

    /// The packaging backend claimed success but the artifact isn't there
    #[error("PyInstaller reported success but {artifact_path} doesn't exist")]
    #[diagnostic(help(
        "this usually means the entry point or app name disagrees with what PyInstaller produced; rerun with --verbose=debug to see the full invocation"
    ))]
    MissingArtifact {
        /// Where the platform's layout says the artifact should be
        artifact_path: Utf8PathBuf,
    },

    /// We got a path that isn't utf8 and everything is ruined
    #[error("the path to the pydist executable isn't utf8: {}", path.display())]
    #[diagnostic(help("move the executable somewhere with a utf8 path, or pass --root explicitly"))]
    NonUtf8Path {
        /// The offending path
        path: std::path::PathBuf,
    },
}
