mod config;

use anyhow::Context;
use buildscope_construction::ProjectFile;
use buildscope_render::{render_project_md, render_results_md};
use buildscope_results::{collect_outcomes, load_outcomes, summarize};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use config::{ConfigMerger, MergedConfig, OutputFormat};
use serde::Serialize;
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "buildscope",
    version,
    about = "Inspect MSBuild project files and aggregate per-framework build outcomes."
)]
struct Cli {
    /// Config file (default: ./buildscope.toml when present).
    #[arg(long, global = true)]
    config: Option<Utf8PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show what a project file declares, without evaluating it.
    Inspect(InspectArgs),
    /// Print the declared target frameworks, one per line.
    Frameworks(FrameworksArgs),
    /// Aggregate outcome.json files into per-framework results.
    Results(ResultsArgs),
}

#[derive(Debug, Parser)]
struct InspectArgs {
    /// Project file to inspect (.csproj, .fsproj, .vbproj, ...).
    project: Utf8PathBuf,

    /// Output format (text, json).
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
}

#[derive(Debug, Parser)]
struct FrameworksArgs {
    /// Project file to read.
    project: Utf8PathBuf,
}

#[derive(Debug, Parser)]
struct ResultsArgs {
    /// Directory scanned for outcome.json files (default: artifacts/buildscope).
    #[arg(long)]
    dir: Option<Utf8PathBuf>,

    /// Output format (text, json).
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Exit with code 2 if any build failed or no outcome was found.
    #[arg(long, default_value_t = false)]
    fail_on_error: bool,
}

fn main() -> ExitCode {
    match real_main() {
        Ok(code) => code,
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(1)
        }
    }
}

fn real_main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cwd = current_dir()?;
    let file_config = config::load_or_default(cli.config.as_deref(), &cwd)
        .context("load buildscope.toml config")?;
    let merger = ConfigMerger::new(file_config);

    match cli.cmd {
        Command::Inspect(args) => {
            let merged = merger.merge(args.format, None, false);
            cmd_inspect(&args.project, &merged)
        }
        Command::Frameworks(args) => cmd_frameworks(&args.project),
        Command::Results(args) => {
            let merged = merger.merge(args.format, args.dir.as_deref(), args.fail_on_error);
            cmd_results(&merged)
        }
    }
}

fn cmd_inspect(path: &Utf8Path, merged: &MergedConfig) -> anyhow::Result<ExitCode> {
    let project = ProjectFile::open(path).with_context(|| format!("load project {}", path))?;
    let summary = project
        .summary()
        .with_context(|| format!("read target frameworks of {}", path))?;

    match merged.format {
        OutputFormat::Text => print!("{}", render_project_md(&summary)),
        OutputFormat::Json => print_json(&summary)?,
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_frameworks(path: &Utf8Path) -> anyhow::Result<ExitCode> {
    let project = ProjectFile::open(path).with_context(|| format!("load project {}", path))?;
    let frameworks = project
        .target_frameworks()
        .with_context(|| format!("read target frameworks of {}", path))?;

    debug!(project = %path, count = frameworks.len(), "listing target frameworks");
    for framework in frameworks {
        println!("{}", framework);
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_results(merged: &MergedConfig) -> anyhow::Result<ExitCode> {
    let dir = &merged.results_dir;
    let loaded = load_outcomes(dir).with_context(|| format!("load outcomes from {}", dir))?;
    let set = collect_outcomes(&loaded);
    let summary = summarize(&set);

    match merged.format {
        OutputFormat::Text => print!("{}", render_results_md(&summary)),
        OutputFormat::Json => print_json(&summary)?,
    }

    info!(
        frameworks = summary.count,
        overall_success = summary.overall_success,
        "aggregated outcomes from {}",
        dir
    );

    if merged.fail_on_error && !summary.overall_success {
        return Ok(ExitCode::from(2));
    }
    Ok(ExitCode::SUCCESS)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(value).context("serialize json")?;
    println!("{}", s);
    Ok(())
}

fn current_dir() -> anyhow::Result<Utf8PathBuf> {
    let cwd = std::env::current_dir().context("read current directory")?;
    Utf8PathBuf::from_path_buf(cwd)
        .map_err(|p| anyhow::anyhow!("non-utf8 current directory: {}", p.display()))
}
