//! Code for computing what a pydist invocation is going to do
//!
//! The main entrypoint is [`gather_work`][], which takes the cli-level
//! [`Config`][] and computes a [`BuildGraph`][]: the resolved working root,
//! app config, tool probe results, and the ordered list of
//! [`BuildStep`][]s. Gathering only reads the filesystem; every side effect
//! lives in the step runners, so `plan` can report the graph without
//! touching anything.

use camino::{Utf8Path, Utf8PathBuf};
use pydist_schema::{PipelineState, StepKind};

use crate::build;
use crate::config::{AppConfig, TomlLayer};
use crate::env::Environment;
use crate::errors::{DistError, DistResult};
use crate::platform::Platform;

/// Global config for a pydist invocation (the cli-level knobs)
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// The platform to package for (None = detect the host)
    pub platform: Option<Platform>,
    /// The working root to build in (None = the pydist executable's dir)
    pub root: Option<Utf8PathBuf>,
}

/// The interpreter names we probe for, in order
pub(crate) const PYTHON_CANDIDATES: &[&str] = &["python3", "python"];

/// Various tools we have found installed on the system
#[derive(Debug, Clone, Default)]
pub struct Tools {
    /// A system Python 3, needed only if the virtualenv doesn't exist yet
    pub python: Option<Tool>,
}

/// A tool we have found installed on the system
#[derive(Debug, Clone, Default)]
pub struct Tool {
    /// The string to pass to Cmd::new
    pub cmd: String,
    /// The version the tool reported
    pub version: String,
}

/// Everything this pydist invocation is going to do
#[derive(Debug)]
pub struct BuildGraph {
    /// The working root every input and output path hangs off of
    pub root: Utf8PathBuf,
    /// The platform we're packaging for
    pub platform: Platform,
    /// Resolved app config
    pub config: AppConfig,
    /// Tools we found on the system
    pub tools: Tools,
    /// The app's virtualenv (possibly not created yet)
    pub env: Environment,
    /// The steps to run, in order
    pub steps: Vec<BuildStep>,
    /// Where the artifact will land (absolute)
    pub artifact_path: Utf8PathBuf,
}

/// A build step we would like to perform
#[derive(Debug)]
pub enum BuildStep {
    /// Make sure the virtualenv exists, creating it if needed
    EnsureVenv(VenvStep),
    /// Upgrade pip inside the virtualenv
    UpgradePip,
    /// Install the dependencies the requirements manifest lists
    InstallRequirements(RequirementsStep),
    /// Install the packaging backend's own tools
    InstallBackend(BackendStep),
    /// Run PyInstaller to produce the artifact
    Pyinstaller(PyinstallerStep),
}

/// Provision the virtualenv
#[derive(Debug)]
pub struct VenvStep {
    /// Absolute path of the virtualenv directory
    pub venv_dir: Utf8PathBuf,
    /// Whether the venv was absent at gather time (so a build would create it)
    pub will_create: bool,
}

/// Install the requirements manifest
#[derive(Debug)]
pub struct RequirementsStep {
    /// Absolute path of the manifest to install from
    pub manifest_path: Utf8PathBuf,
}

/// Install the packaging backend
#[derive(Debug)]
pub struct BackendStep {
    /// pip requirement specs, verbatim
    pub pip_specs: Vec<String>,
}

/// Run PyInstaller
#[derive(Debug)]
pub struct PyinstallerStep {
    /// The app name (names the artifact)
    pub app_name: String,
    /// Absolute path of the entry-point `.py` file
    pub entry_point: Utf8PathBuf,
    /// Absolute path of the icon to embed
    pub icon: Utf8PathBuf,
    /// The directory tree to clear before building (absolute)
    pub artifact_root: Utf8PathBuf,
    /// Where the artifact itself will land (absolute)
    pub artifact_path: Utf8PathBuf,
}

impl BuildStep {
    /// The schema kind of this step (for reports)
    pub fn kind(&self) -> StepKind {
        match self {
            BuildStep::EnsureVenv(_) => StepKind::EnsureVenv,
            BuildStep::UpgradePip => StepKind::UpgradePip,
            BuildStep::InstallRequirements(_) => StepKind::InstallRequirements,
            BuildStep::InstallBackend(_) => StepKind::InstallBackend,
            BuildStep::Pyinstaller(_) => StepKind::Pyinstaller,
        }
    }

    /// A one-line human description of the step
    pub fn summary(&self) -> String {
        match self {
            BuildStep::EnsureVenv(step) => {
                if step.will_create {
                    format!("create virtualenv at {}", step.venv_dir)
                } else {
                    format!("reuse virtualenv at {}", step.venv_dir)
                }
            }
            BuildStep::UpgradePip => "upgrade pip in the virtualenv".to_owned(),
            BuildStep::InstallRequirements(step) => {
                format!("install dependencies from {}", step.manifest_path)
            }
            BuildStep::InstallBackend(step) => {
                format!("install the packaging backend ({})", step.pip_specs.join(", "))
            }
            BuildStep::Pyinstaller(step) => {
                format!("package {} with PyInstaller", step.app_name)
            }
        }
    }

    /// The pipeline state reached once this step succeeds, if it
    /// completes one.
    ///
    /// The install steps share a state: `DependenciesReady` means pip, the
    /// manifest, and the backend are all in place, so only the last of the
    /// three completes it.
    pub fn completes(&self) -> Option<PipelineState> {
        match self {
            BuildStep::EnsureVenv(_) => Some(PipelineState::EnvironmentReady),
            BuildStep::UpgradePip | BuildStep::InstallRequirements(_) => None,
            BuildStep::InstallBackend(_) => Some(PipelineState::DependenciesReady),
            BuildStep::Pyinstaller(_) => Some(PipelineState::Built),
        }
    }
}

/// Compute everything the invocation is going to do.
pub fn gather_work(cfg: &Config) -> DistResult<BuildGraph> {
    let root = resolve_root(cfg.root.as_deref())?;
    tracing::info!("working root resolved to {root}");
    let platform = match cfg.platform {
        Some(platform) => platform,
        None => Platform::host()?,
    };
    let layer = TomlLayer::load(&root)?;
    let config = AppConfig::resolve(&root, platform, layer);
    let tools = tool_info();
    let env = Environment::new(config.venv_dir.clone(), platform);

    let artifact_root = root.join(platform.artifact_root_rel_path(&config.app_name));
    let artifact_path = root.join(platform.artifact_rel_path(&config.app_name));

    let steps = vec![
        BuildStep::EnsureVenv(VenvStep {
            venv_dir: env.venv_dir.clone(),
            will_create: !env.exists(),
        }),
        BuildStep::UpgradePip,
        BuildStep::InstallRequirements(RequirementsStep {
            manifest_path: config.requirements.clone(),
        }),
        BuildStep::InstallBackend(BackendStep {
            pip_specs: build::backend_pip_specs(&config),
        }),
        BuildStep::Pyinstaller(PyinstallerStep {
            app_name: config.app_name.clone(),
            entry_point: config.entry_point.clone(),
            icon: config.icon.clone(),
            artifact_root,
            artifact_path: artifact_path.clone(),
        }),
    ];

    Ok(BuildGraph {
        root,
        platform,
        config,
        tools,
        env,
        steps,
        artifact_path,
    })
}

/// Resolve the working root for this invocation.
///
/// With no override this is the directory the pydist executable lives in,
/// never the caller's cwd: running the tool from anywhere must behave
/// identically to double-clicking it next to the app's sources.
pub fn resolve_root(explicit: Option<&Utf8Path>) -> DistResult<Utf8PathBuf> {
    if let Some(root) = explicit {
        return Ok(root.to_owned());
    }
    let exe = std::env::current_exe()?;
    let exe = Utf8PathBuf::from_path_buf(exe).map_err(|path| DistError::NonUtf8Path { path })?;
    let root = exe.parent().unwrap_or(Utf8Path::new(".")).to_owned();
    Ok(root)
}

/// Probe the system for the tools we might need.
pub(crate) fn tool_info() -> Tools {
    Tools {
        python: find_python(),
    }
}

fn find_python() -> Option<Tool> {
    PYTHON_CANDIDATES.iter().find_map(|name| find_tool(name))
}

fn find_tool(name: &str) -> Option<Tool> {
    let output = std::process::Command::new(name).arg("--version").output().ok()?;
    if !output.status.success() {
        return None;
    }
    let string_output = String::from_utf8(output.stdout).ok()?;
    // Python 2 reports its version on stderr, so it gets filtered out here
    let version = string_output.lines().next()?;
    Some(Tool {
        cmd: name.to_owned(),
        version: version.to_owned(),
    })
}
