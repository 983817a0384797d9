use std::io::Write;

// Import everything from the lib version of ourselves
use pydist::*;

use clap::Parser;
use cli::{Cli, Commands, OutputFormat};
use console::Term;
use miette::IntoDiagnostic;
use pydist_schema::BuildReport;

use crate::cli::{BuildArgs, ManifestSchemaArgs, PlanArgs};

mod cli;

fn main() {
    let config = Cli::parse();
    axocli::CliAppBuilder::new("pydist")
        .verbose(config.verbose)
        .json_errors(config.output_format == OutputFormat::Json)
        .start(config, real_main);
}

fn real_main(app: &axocli::CliApp<Cli>) -> Result<(), miette::Report> {
    let cli = &app.config;
    match &cli.command {
        Some(Commands::Build(args)) => cmd_build(cli, args),
        Some(Commands::Plan(args)) => cmd_plan(cli, args),
        Some(Commands::ManifestSchema(args)) => cmd_manifest_schema(cli, args),
        None => cmd_build(cli, &BuildArgs {}),
    }
}

fn lib_config(cli: &Cli) -> Config {
    Config {
        platform: cli.platform.map(|platform| platform.to_lib()),
        root: cli.root.clone(),
    }
}

fn cmd_build(cli: &Cli, _args: &BuildArgs) -> Result<(), miette::Report> {
    let report = do_build(&lib_config(cli))?;
    print_report(cli, &report)
}

fn cmd_plan(cli: &Cli, _args: &PlanArgs) -> Result<(), miette::Report> {
    let report = do_plan(&lib_config(cli))?;
    print_report(cli, &report)
}

fn print_report(cli: &Cli, report: &BuildReport) -> Result<(), miette::Report> {
    let mut out = Term::stdout();
    match cli.output_format {
        OutputFormat::Human => print_human(&mut out, report).into_diagnostic()?,
        OutputFormat::Json => print_json(&mut out, report).into_diagnostic()?,
    }
    Ok(())
}

fn print_human(out: &mut Term, report: &BuildReport) -> Result<(), std::io::Error> {
    let dim = console::Style::new().dim();
    match &report.app_version {
        Some(version) => writeln!(out, "{} {} ({})", report.app_name, version, report.platform)?,
        None => writeln!(out, "{} ({})", report.app_name, report.platform)?,
    }
    for tool in &report.tools {
        writeln!(out, "  {}", dim.apply_to(format!("found {} ({})", tool.cmd, tool.version)))?;
    }
    for step in &report.steps {
        writeln!(out, "  {}", dim.apply_to(&step.summary))?;
    }
    for artifact in &report.artifacts {
        if let Some(path) = &artifact.path {
            writeln!(out, "artifact: {path}")?;
        }
    }
    writeln!(out, "state: {}", report.state)?;
    Ok(())
}

fn print_json(out: &mut Term, report: &BuildReport) -> Result<(), std::io::Error> {
    let string = serde_json::to_string_pretty(report).unwrap();
    writeln!(out, "{string}")?;
    Ok(())
}

fn cmd_manifest_schema(_cli: &Cli, args: &ManifestSchemaArgs) -> Result<(), miette::Report> {
    let schema = BuildReport::json_schema();
    let json_schema = serde_json::to_string_pretty(&schema).into_diagnostic()?;
    match &args.output {
        Some(path) => {
            axoasset::LocalAsset::write_new(&json_schema, path)?;
            Ok(())
        }
        None => {
            println!("{json_schema}");
            Ok(())
        }
    }
}
