#![deny(missing_docs)]
#![allow(clippy::result_large_err)]

//! # pydist
//!
//! This is the library at the heart of the pydist cli, which packages the
//! MidiPiano desktop app into a double-clickable artifact. One invocation
//! provisions a virtualenv next to the app's sources, installs pip, the
//! app's requirements, and PyInstaller into it, then drives PyInstaller to
//! produce a Windows executable tree or a macOS `.app` bundle.
//!
//! The pipeline is strictly linear and fail-fast: steps run in a fixed
//! order and the first failure stops the run. pydist takes no lock on the
//! working root; two invocations building in the same root at once will
//! race on the virtualenv and `dist/`, and that's on the operator.

use pydist_schema::{Artifact, BuildReport, PipelineState, StepSummary, ToolInfo};
use tracing::info;

use errors::*;
pub use tasks::*;

pub mod build;
pub mod config;
pub mod env;
pub mod errors;
pub mod install;
pub mod platform;
pub mod tasks;
#[cfg(test)]
mod tests;

/// pydist build -- run the whole pipeline and produce the artifact
pub fn do_build(cfg: &Config) -> DistResult<BuildReport> {
    let graph = gather_work(cfg)?;

    eprintln!("packaging {} for {}:", graph.config.app_name, graph.platform);
    let mut state = PipelineState::Init;
    for step in &graph.steps {
        eprintln!("  {}", step.summary());
        if let Err(cause) = run_step(&graph, step) {
            transition(&mut state, PipelineState::Failed);
            return Err(cause);
        }
        if let Some(next) = step.completes() {
            transition(&mut state, next);
        }
    }
    eprintln!("packaged {} to {}", graph.config.app_name, graph.artifact_path);

    Ok(build_report(&graph, state))
}

/// pydist plan -- report what a build would do, without doing any of it
pub fn do_plan(cfg: &Config) -> DistResult<BuildReport> {
    let graph = gather_work(cfg)?;
    Ok(build_report(&graph, PipelineState::Init))
}

/// Run a single build step.
fn run_step(graph: &BuildGraph, step: &BuildStep) -> DistResult<()> {
    match step {
        BuildStep::EnsureVenv(_) => {
            graph.env.ensure(graph.tools.python.as_ref())?;
            Ok(())
        }
        BuildStep::UpgradePip => install::upgrade_pip(&graph.env),
        BuildStep::InstallRequirements(step) => {
            install::install_requirements(&graph.env, &step.manifest_path)
        }
        BuildStep::InstallBackend(step) => install::install_backend(&graph.env, &step.pip_specs),
        BuildStep::Pyinstaller(step) => build::pyinstaller::build_app(graph, step),
    }
}

/// Advance the pipeline's state machine.
fn transition(state: &mut PipelineState, next: PipelineState) {
    debug_assert!(
        state.can_transition_to(next),
        "illegal pipeline transition {state} -> {next}"
    );
    info!("pipeline state: {state} -> {next}");
    *state = next;
}

/// Turn a graph (and wherever the pipeline ended up) into a report.
fn build_report(graph: &BuildGraph, state: PipelineState) -> BuildReport {
    let tools = graph
        .tools
        .python
        .iter()
        .map(|tool| ToolInfo {
            cmd: tool.cmd.clone(),
            version: tool.version.clone(),
        })
        .collect();
    let steps = graph
        .steps
        .iter()
        .map(|step| StepSummary {
            kind: step.kind(),
            summary: step.summary(),
        })
        .collect();
    let artifacts = vec![Artifact {
        name: Some(graph.platform.artifact_file_name(&graph.config.app_name)),
        kind: graph.platform.artifact_kind(),
        path: Some(graph.artifact_path.to_string()),
    }];
    BuildReport {
        pydist_version: Some(env!("CARGO_PKG_VERSION").to_owned()),
        app_name: graph.config.app_name.clone(),
        app_version: graph.config.app_version.clone(),
        platform: graph.platform.to_string(),
        state,
        tools,
        steps,
        artifacts,
    }
}
