//! Tests for work-graph gathering and the individual step runners

use axoasset::LocalAsset;
use camino::Utf8PathBuf;
use pydist_schema::StepKind;
use temp_dir::TempDir;

use crate::build::pyinstaller::init_artifact_dir;
use crate::env::Environment;
use crate::errors::DistError;
use crate::install;
use crate::platform::Platform;
use crate::tasks::{self, BuildStep, Config};

fn utf8_path(dir: &TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap()
}

fn config_for(root: &Utf8PathBuf, platform: Platform) -> Config {
    Config {
        platform: Some(platform),
        root: Some(root.clone()),
    }
}

#[test]
fn steps_run_in_pipeline_order() {
    let tmp = TempDir::new().unwrap();
    let root = utf8_path(&tmp);

    let graph = tasks::gather_work(&config_for(&root, Platform::Mac)).unwrap();
    let kinds = graph.steps.iter().map(|step| step.kind()).collect::<Vec<_>>();
    assert_eq!(
        kinds,
        vec![
            StepKind::EnsureVenv,
            StepKind::UpgradePip,
            StepKind::InstallRequirements,
            StepKind::InstallBackend,
            StepKind::Pyinstaller,
        ]
    );
}

#[test]
fn windows_artifact_is_an_exe_in_its_tree() {
    let tmp = TempDir::new().unwrap();
    let root = utf8_path(&tmp);
    LocalAsset::write_new("app-name = \"Piano\"\n", root.join("pydist.toml")).unwrap();

    let graph = tasks::gather_work(&config_for(&root, Platform::Windows)).unwrap();
    assert_eq!(graph.artifact_path, root.join("dist/Piano/Piano.exe"));

    let Some(BuildStep::Pyinstaller(step)) = graph.steps.last() else {
        panic!("last step should be pyinstaller");
    };
    assert_eq!(step.artifact_root, root.join("dist/Piano"));
    assert_eq!(step.artifact_path, graph.artifact_path);
}

#[test]
fn mac_artifact_is_an_app_bundle() {
    let tmp = TempDir::new().unwrap();
    let root = utf8_path(&tmp);
    LocalAsset::write_new("app-name = \"Piano\"\n", root.join("pydist.toml")).unwrap();

    let graph = tasks::gather_work(&config_for(&root, Platform::Mac)).unwrap();
    assert_eq!(graph.artifact_path, root.join("dist/Piano.app"));

    let Some(BuildStep::Pyinstaller(step)) = graph.steps.last() else {
        panic!("last step should be pyinstaller");
    };
    // the bundle is the whole artifact, so it's also the tree we clear
    assert_eq!(step.artifact_root, graph.artifact_path);
}

#[test]
fn venv_reuse_is_visible_in_the_plan() {
    let tmp = TempDir::new().unwrap();
    let root = utf8_path(&tmp);

    let graph = tasks::gather_work(&config_for(&root, Platform::Mac)).unwrap();
    let Some(BuildStep::EnsureVenv(step)) = graph.steps.first() else {
        panic!("first step should be ensure-venv");
    };
    assert!(step.will_create);

    LocalAsset::create_dir_all(root.join("venv")).unwrap();
    let graph = tasks::gather_work(&config_for(&root, Platform::Mac)).unwrap();
    let Some(BuildStep::EnsureVenv(step)) = graph.steps.first() else {
        panic!("first step should be ensure-venv");
    };
    assert!(!step.will_create);
}

#[test]
fn gathering_work_never_writes() {
    let tmp = TempDir::new().unwrap();
    let root = utf8_path(&tmp);

    tasks::gather_work(&config_for(&root, Platform::Windows)).unwrap();
    let leftovers = std::fs::read_dir(&root).unwrap().count();
    assert_eq!(leftovers, 0);
}

#[test]
fn plan_reports_without_building() {
    let tmp = TempDir::new().unwrap();
    let root = utf8_path(&tmp);

    let report = crate::do_plan(&config_for(&root, Platform::Mac)).unwrap();
    assert_eq!(report.app_name, "MidiPiano");
    assert_eq!(report.platform, "mac");
    assert_eq!(report.state, pydist_schema::PipelineState::Init);
    assert_eq!(report.steps.len(), 5);
    assert_eq!(
        report.artifacts[0].path.as_deref(),
        Some(root.join("dist/MidiPiano.app").as_str())
    );

    // nothing was created: no venv, no dist
    let leftovers = std::fs::read_dir(&root).unwrap().count();
    assert_eq!(leftovers, 0);
}

#[test]
fn ensure_reuses_an_existing_venv() {
    let tmp = TempDir::new().unwrap();
    let root = utf8_path(&tmp);
    let venv_dir = root.join("venv");
    LocalAsset::create_dir_all(&venv_dir).unwrap();

    // no interpreter is available (None), so this can only pass by reusing
    let env = Environment::new(venv_dir.clone(), Platform::Mac);
    let created = env.ensure(None).unwrap();
    assert!(!created);
    assert!(venv_dir.exists());
}

#[test]
fn ensure_needs_an_interpreter_to_create() {
    let tmp = TempDir::new().unwrap();
    let root = utf8_path(&tmp);

    let env = Environment::new(root.join("venv"), Platform::Mac);
    let err = env.ensure(None).unwrap_err();
    assert!(matches!(err, DistError::PythonNotFound { .. }));
}

#[test]
fn venv_python_follows_platform_layout() {
    let windows = Environment::new("C:/app/venv".into(), Platform::Windows);
    assert_eq!(windows.python(), "C:/app/venv/Scripts/python.exe");

    let mac = Environment::new("/app/venv".into(), Platform::Mac);
    assert_eq!(mac.python(), "/app/venv/bin/python");
}

#[test]
fn missing_manifest_fails_before_pip_runs() {
    let tmp = TempDir::new().unwrap();
    let root = utf8_path(&tmp);

    // the venv python doesn't exist either; if pip were spawned we'd see
    // an exec failure instead of the manifest error
    let env = Environment::new(root.join("venv"), Platform::Mac);
    let err = install::install_requirements(&env, &root.join("requirements.txt")).unwrap_err();
    assert!(matches!(err, DistError::ManifestMissing { .. }));
}

#[test]
fn require_manifest_accepts_an_existing_file() {
    let tmp = TempDir::new().unwrap();
    let root = utf8_path(&tmp);
    let manifest = root.join("requirements.txt");
    LocalAsset::write_new("mido==1.3.2\n", &manifest).unwrap();

    install::require_manifest(&manifest).unwrap();
}

#[test]
fn stale_artifact_trees_are_removed() {
    let tmp = TempDir::new().unwrap();
    let root = utf8_path(&tmp);
    let artifact_root = root.join("dist/Piano");
    LocalAsset::create_dir_all(&artifact_root).unwrap();
    LocalAsset::write_new("stale", artifact_root.join("stray.txt")).unwrap();

    init_artifact_dir(&artifact_root).unwrap();
    assert!(!artifact_root.exists());
}

#[test]
fn stale_artifact_files_are_removed() {
    let tmp = TempDir::new().unwrap();
    let root = utf8_path(&tmp);
    LocalAsset::create_dir_all(root.join("dist")).unwrap();
    // something left a file where the bundle dir should go
    let artifact_root = root.join("dist/Piano.app");
    LocalAsset::write_new("not a bundle", &artifact_root).unwrap();

    init_artifact_dir(&artifact_root).unwrap();
    assert!(!artifact_root.exists());
}

#[test]
fn clearing_a_missing_artifact_is_fine() {
    let tmp = TempDir::new().unwrap();
    let root = utf8_path(&tmp);

    init_artifact_dir(&root.join("dist/Piano")).unwrap();
}

#[test]
fn explicit_root_wins_over_exe_location() {
    let tmp = TempDir::new().unwrap();
    let root = utf8_path(&tmp);

    let resolved = tasks::resolve_root(Some(root.as_path())).unwrap();
    assert_eq!(resolved, root);
}

#[test]
fn summaries_name_what_they_touch() {
    let tmp = TempDir::new().unwrap();
    let root = utf8_path(&tmp);

    let graph = tasks::gather_work(&config_for(&root, Platform::Mac)).unwrap();
    let summaries = graph
        .steps
        .iter()
        .map(|step| step.summary())
        .collect::<Vec<_>>();
    assert!(summaries[0].contains("create virtualenv"));
    assert!(summaries[2].contains("requirements.txt"));
    assert!(summaries[3].contains("pyinstaller"));
    assert!(summaries[4].contains("MidiPiano"));
}

#[test]
fn a_failed_step_halts_the_build_before_packaging() {
    let tmp = TempDir::new().unwrap();
    let root = utf8_path(&tmp);
    // the venv dir exists but holds no python, so the pip upgrade is the
    // first step that can fail
    LocalAsset::create_dir_all(root.join("venv")).unwrap();
    LocalAsset::write_new("mido==1.3.2\n", root.join("requirements.txt")).unwrap();
    // a leftover from some previous build
    let artifact_root = root.join("dist/MidiPiano.app");
    LocalAsset::create_dir_all(&artifact_root).unwrap();
    LocalAsset::write_new("old", artifact_root.join("stray.txt")).unwrap();

    let err = crate::do_build(&config_for(&root, Platform::Mac)).unwrap_err();
    assert!(err.to_string().contains("upgrade pip in the virtualenv"));
    // the pipeline stopped right there: the builder never cleared the
    // stale artifact, let alone wrote a new one
    assert!(artifact_root.join("stray.txt").exists());
}
