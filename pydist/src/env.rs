//! Provisioning the app's virtualenv
//!
//! The virtualenv is the only piece of state the pipeline keeps between
//! runs. Provisioning is idempotent: if the directory exists we take it
//! as-is and never touch the system interpreter; dependency installs later
//! in the pipeline are what bring an old venv up to date.

use axoprocess::Cmd;
use camino::Utf8PathBuf;

use crate::errors::{DistError, DistResult};
use crate::platform::Platform;
use crate::tasks::{Tool, PYTHON_CANDIDATES};

/// The app's virtualenv, which may or may not exist on disk yet.
#[derive(Debug, Clone)]
pub struct Environment {
    /// Absolute path of the virtualenv directory
    pub venv_dir: Utf8PathBuf,
    /// The platform whose venv layout applies
    pub platform: Platform,
}

impl Environment {
    /// Describe the virtualenv at `venv_dir` (without touching the disk).
    pub fn new(venv_dir: Utf8PathBuf, platform: Platform) -> Environment {
        Environment { venv_dir, platform }
    }

    /// Whether the virtualenv directory exists.
    ///
    /// Directory existence is the entire check. A half-created or broken
    /// venv counts as existing; the first pip invocation against it is
    /// what surfaces that.
    pub fn exists(&self) -> bool {
        self.venv_dir.exists()
    }

    /// Absolute path of the python inside the virtualenv.
    ///
    /// Every pip and PyInstaller invocation goes through this executable,
    /// never the system one, so installs can't leak outside the venv.
    pub fn python(&self) -> Utf8PathBuf {
        self.venv_dir
            .join(self.platform.venv_bin_dir())
            .join(self.platform.venv_python_name())
    }

    /// Make sure the virtualenv exists, creating it if it doesn't.
    ///
    /// Returns whether a venv was actually created. `python` is the system
    /// interpreter to create it with; it's only required (and only probed
    /// for) when creation actually happens, so an already-provisioned root
    /// builds fine on a machine with no `python3` on PATH.
    pub fn ensure(&self, python: Option<&Tool>) -> DistResult<bool> {
        if self.exists() {
            tracing::info!("virtualenv already exists at {}, reusing it", self.venv_dir);
            return Ok(false);
        }
        let Some(python) = python else {
            return Err(DistError::PythonNotFound {
                venv_dir: self.venv_dir.clone(),
                tried: PYTHON_CANDIDATES.join(", "),
            });
        };

        let mut cmd = Cmd::new(&python.cmd, "create the app's virtualenv");
        cmd.arg("-m").arg("venv").arg(&self.venv_dir);
        cmd.stdout_to_stderr();
        cmd.run()?;
        Ok(true)
    }
}
