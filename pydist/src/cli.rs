//! All the clap stuff for parsing/documenting the cli

use camino::Utf8PathBuf;
use clap::{
    builder::{PossibleValuesParser, TypedValueParser},
    Args, Parser, Subcommand, ValueEnum,
};
use pydist::platform::Platform;
use tracing::level_filters::LevelFilter;

#[derive(Parser, Clone, Debug)]
#[clap(version, about, long_about = None)]
#[clap(args_conflicts_with_subcommands = true)]
/// Package the MidiPiano app into a double-clickable artifact
///
/// When run without a subcommand, `pydist` will invoke the `build`
/// subcommand. See `pydist help build` for more details.
pub struct Cli {
    /// Subcommands ("no subcommand" defaults to `build`)
    #[clap(subcommand)]
    pub command: Option<Commands>,

    /// How verbose logging should be (log level)
    #[clap(long, short)]
    #[clap(default_value_t = LevelFilter::WARN)]
    #[clap(value_parser = PossibleValuesParser::new(["off", "error", "warn", "info", "debug", "trace"]).map(|s| s.parse::<LevelFilter>().expect("possible values are valid")))]
    #[clap(help_heading = "GLOBAL OPTIONS", global = true)]
    pub verbose: LevelFilter,

    /// The format of the output
    #[clap(long, short, value_enum)]
    #[clap(default_value_t = OutputFormat::Human)]
    #[clap(help_heading = "GLOBAL OPTIONS", global = true)]
    pub output_format: OutputFormat,

    /// The platform to package the app for
    ///
    /// If unspecified, we package for the platform pydist itself is
    /// running on.
    #[clap(long, short, value_enum)]
    #[clap(help_heading = "GLOBAL OPTIONS", global = true)]
    pub platform: Option<PlatformArg>,

    /// Use DIR as the working root instead of the directory the pydist
    /// executable lives in
    ///
    /// The app's entry point, icon, requirements manifest, and pydist.toml
    /// are all looked up under the working root, and the virtualenv and
    /// `dist/` output land there too. The caller's current directory is
    /// never consulted.
    #[clap(long, value_name = "DIR")]
    #[clap(help_heading = "GLOBAL OPTIONS", global = true)]
    pub root: Option<Utf8PathBuf>,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Provision the virtualenv, install dependencies, and package the app
    #[clap(disable_version_flag = true)]
    Build(BuildArgs),
    /// Report what a build would do, without running any of it
    #[clap(disable_version_flag = true)]
    Plan(PlanArgs),
    /// Print the JSON schema for the build-report format
    #[clap(disable_version_flag = true)]
    ManifestSchema(ManifestSchemaArgs),
}

#[derive(Args, Clone, Debug)]
pub struct BuildArgs {}

#[derive(Args, Clone, Debug)]
pub struct PlanArgs {}

#[derive(Args, Clone, Debug)]
pub struct ManifestSchemaArgs {
    /// Write the schema to this file instead of stdout
    #[clap(long, value_name = "PATH")]
    pub output: Option<Utf8PathBuf>,
}

/// A platform we can package the app for
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum PlatformArg {
    /// A Windows executable tree (dist/<name>/<name>.exe)
    Windows,
    /// A macOS .app bundle (dist/<name>.app)
    Mac,
}

impl PlatformArg {
    /// Convert the application version of this enum to the library version
    pub fn to_lib(self) -> Platform {
        match self {
            PlatformArg::Windows => Platform::Windows,
            PlatformArg::Mac => Platform::Mac,
        }
    }
}

/// Style of output we should produce
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// Machine-readable JSON output
    Json,
}
