#![deny(missing_docs)]

//! # pydist-schema
//!
//! This crate exists to serialize and deserialize the build-report.json
//! produced by pydist. The root type of the schema is [`BuildReport`][].
//!
//! The types in here are intentionally loose: a report written by one
//! version of pydist should deserialize under another, so unknown step and
//! artifact kinds fold into `Unknown` instead of failing the parse.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A local system path on the machine pydist was run on.
///
/// This is a String and not a PathBuf because the report may be read on a
/// different OS than the one that wrote it, with different path formats.
pub type LocalPath = String;

/// A report of what a pydist build did, or what it would do.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BuildReport {
    /// The version of pydist that produced this report.
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pydist_version: Option<String>,
    /// The display name of the app being packaged.
    pub app_name: String,
    /// The app's own version, if one was configured.
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_version: Option<String>,
    /// The platform the artifact is packaged for ("windows" or "mac").
    pub platform: String,
    /// Where the pipeline ended up.
    pub state: PipelineState,
    /// The system tools the invocation found while planning.
    #[serde(default)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolInfo>,
    /// The pipeline steps, in the order they run.
    #[serde(default)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<StepSummary>,
    /// The artifacts the build produces.
    #[serde(default)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub artifacts: Vec<Artifact>,
}

impl BuildReport {
    /// Get the JSON Schema for a BuildReport
    pub fn json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(BuildReport)
    }
}

/// A tool found on the system while planning.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ToolInfo {
    /// The command the tool answers to (e.g. `python3`).
    pub cmd: String,
    /// The version line the tool reported.
    pub version: String,
}

/// One step of the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct StepSummary {
    /// The kind of step.
    #[serde(flatten)]
    pub kind: StepKind,
    /// A one-line human description of the step.
    pub summary: String,
}

/// The kind of a pipeline step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind")]
#[non_exhaustive]
pub enum StepKind {
    /// Create the app's virtualenv, or reuse the existing one.
    #[serde(rename = "ensure-venv")]
    EnsureVenv,
    /// Upgrade pip inside the virtualenv.
    #[serde(rename = "upgrade-pip")]
    UpgradePip,
    /// Install the dependencies the requirements manifest lists.
    #[serde(rename = "install-requirements")]
    InstallRequirements,
    /// Install the packaging backend's own tools.
    #[serde(rename = "install-backend")]
    InstallBackend,
    /// Run PyInstaller to produce the artifact.
    #[serde(rename = "pyinstaller")]
    Pyinstaller,
    /// A step kind this version of the schema doesn't know about.
    #[serde(other)]
    #[serde(rename = "unknown")]
    Unknown,
}

/// An artifact the build produces.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Artifact {
    /// The file (or bundle) name of the artifact, e.g. `MidiPiano.app`.
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// The kind of artifact.
    #[serde(flatten)]
    pub kind: ArtifactKind,
    /// Where the artifact lands on the local system, if known.
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<LocalPath>,
}

/// The kind of an artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind")]
#[non_exhaustive]
pub enum ArtifactKind {
    /// A directory of loose files with the app's executable at its root
    /// (the Windows layout, `dist/<name>/<name>.exe`).
    #[serde(rename = "executable-dir")]
    ExecutableDir,
    /// A macOS `.app` bundle (`dist/<name>.app`).
    #[serde(rename = "app-bundle")]
    AppBundle,
    /// An artifact kind this version of the schema doesn't know about.
    #[serde(other)]
    #[serde(rename = "unknown")]
    Unknown,
}

/// The discrete states the pipeline moves through.
///
/// States only ever advance: `Init` -> `EnvironmentReady` ->
/// `DependenciesReady` -> `Built`. Any state before `Built` may instead
/// transition to `Failed`. `Built` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum PipelineState {
    /// Nothing has been checked or run yet.
    Init,
    /// The virtualenv exists on disk.
    EnvironmentReady,
    /// pip, the manifest's dependencies, and the packaging backend are all
    /// installed in the virtualenv.
    DependenciesReady,
    /// The artifact was produced and is in place.
    Built,
    /// A step failed and the pipeline stopped.
    Failed,
}

impl PipelineState {
    /// Whether moving from this state to `next` is a legal transition.
    pub fn can_transition_to(self, next: PipelineState) -> bool {
        use PipelineState::*;
        matches!(
            (self, next),
            (Init, EnvironmentReady)
                | (EnvironmentReady, DependenciesReady)
                | (DependenciesReady, Built)
                | (Init | EnvironmentReady | DependenciesReady, Failed)
        )
    }

    /// Whether the pipeline can make no further progress from this state.
    pub fn is_terminal(self) -> bool {
        matches!(self, PipelineState::Built | PipelineState::Failed)
    }
}

impl std::fmt::Display for PipelineState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let string = match self {
            PipelineState::Init => "init",
            PipelineState::EnvironmentReady => "environment-ready",
            PipelineState::DependenciesReady => "dependencies-ready",
            PipelineState::Built => "built",
            PipelineState::Failed => "failed",
        };
        string.fmt(f)
    }
}
