//! Tests for config loading and default resolution

use axoasset::SourceFile;
use camino::Utf8PathBuf;
use temp_dir::TempDir;

use crate::build;
use crate::config::{AppConfig, TomlLayer, CONFIG_FILE_NAME};
use crate::platform::Platform;

fn utf8_path(dir: &TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap()
}

#[test]
fn defaults_fill_every_field() {
    let tmp = TempDir::new().unwrap();
    let root = utf8_path(&tmp);

    let config = AppConfig::resolve(&root, Platform::Mac, TomlLayer::default());
    assert_eq!(config.app_name, "MidiPiano");
    assert_eq!(config.app_version, None);
    assert_eq!(config.entry_point, root.join("main.py"));
    assert_eq!(config.requirements, root.join("requirements.txt"));
    assert_eq!(config.venv_dir, root.join("venv"));
    assert_eq!(config.icon, root.join("icon.icns"));
    assert_eq!(config.pyinstaller_version, None);
}

#[test]
fn icon_follows_the_platform() {
    let tmp = TempDir::new().unwrap();
    let root = utf8_path(&tmp);

    let mac = AppConfig::resolve(&root, Platform::Mac, TomlLayer::default());
    let windows = AppConfig::resolve(&root, Platform::Windows, TomlLayer::default());
    assert_eq!(mac.icon, root.join("icon.icns"));
    assert_eq!(windows.icon, root.join("icon.ico"));
}

#[test]
fn toml_overrides_apply() {
    let toml = r#"
app-name = "Piano"
app-version = "1.3.0"
entry-point = "src/app.py"
requirements = "deps.txt"
venv-dir = ".venv"
windows-icon = "assets/piano.ico"
pyinstaller-version = "6.6.0"
"#;
    let src = SourceFile::new(CONFIG_FILE_NAME, toml.to_owned());
    let layer: TomlLayer = src.deserialize_toml().unwrap();

    let tmp = TempDir::new().unwrap();
    let root = utf8_path(&tmp);
    let config = AppConfig::resolve(&root, Platform::Windows, layer);

    assert_eq!(config.app_name, "Piano");
    assert_eq!(config.app_version.as_deref(), Some("1.3.0"));
    assert_eq!(config.entry_point, root.join("src/app.py"));
    assert_eq!(config.requirements, root.join("deps.txt"));
    assert_eq!(config.venv_dir, root.join(".venv"));
    assert_eq!(config.icon, root.join("assets/piano.ico"));
    assert_eq!(config.pyinstaller_version.as_deref(), Some("6.6.0"));
}

#[test]
fn icon_override_is_per_platform() {
    let toml = r#"
windows-icon = "assets/piano.ico"
"#;
    let src = SourceFile::new(CONFIG_FILE_NAME, toml.to_owned());
    let layer: TomlLayer = src.deserialize_toml().unwrap();

    let tmp = TempDir::new().unwrap();
    let root = utf8_path(&tmp);
    // only the windows icon was overridden; mac still gets its default
    let mac = AppConfig::resolve(&root, Platform::Mac, layer);
    assert_eq!(mac.icon, root.join("icon.icns"));
}

#[test]
fn load_missing_file_is_all_defaults() {
    let tmp = TempDir::new().unwrap();
    let root = utf8_path(&tmp);

    let layer = TomlLayer::load(&root).unwrap();
    assert_eq!(layer.app_name, None);
    assert_eq!(layer.entry_point, None);
    assert_eq!(layer.pyinstaller_version, None);
}

#[test]
fn load_reads_co_located_file() {
    let tmp = TempDir::new().unwrap();
    let root = utf8_path(&tmp);
    axoasset::LocalAsset::write_new("app-name = \"Piano\"\n", root.join(CONFIG_FILE_NAME))
        .unwrap();

    let layer = TomlLayer::load(&root).unwrap();
    assert_eq!(layer.app_name.as_deref(), Some("Piano"));
}

#[test]
fn load_rejects_malformed_toml() {
    let tmp = TempDir::new().unwrap();
    let root = utf8_path(&tmp);
    axoasset::LocalAsset::write_new("app-name = [not toml", root.join(CONFIG_FILE_NAME))
        .unwrap();

    assert!(TomlLayer::load(&root).is_err());
}

#[test]
fn backend_specs_default_to_latest() {
    let tmp = TempDir::new().unwrap();
    let root = utf8_path(&tmp);
    let config = AppConfig::resolve(&root, Platform::Mac, TomlLayer::default());
    assert_eq!(build::backend_pip_specs(&config), vec!["pyinstaller".to_owned()]);
}

#[test]
fn backend_specs_respect_the_pin() {
    let tmp = TempDir::new().unwrap();
    let root = utf8_path(&tmp);
    let layer = TomlLayer {
        pyinstaller_version: Some("6.6.0".to_owned()),
        ..TomlLayer::default()
    };
    let config = AppConfig::resolve(&root, Platform::Mac, layer);
    assert_eq!(
        build::backend_pip_specs(&config),
        vec!["pyinstaller==6.6.0".to_owned()]
    );
}
