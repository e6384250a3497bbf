use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use std::fs;
use std::path::{Path, PathBuf};

use srcbrowse_finalize::{finalize_website, write_solution_explorer};
use srcbrowse_pipeline::{build_assembly_universe, generate_all, GenerationOutcome};
use srcbrowse_tree::Folder;

mod args;
mod htmlgen;
mod msbuild;

use args::Cli;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default)).init();
}

fn run(cli: &Cli) -> Result<()> {
    let inputs = cli.gather_inputs();
    if inputs.is_empty() {
        Cli::command().print_help().context("printing usage")?;
        println!();
        return Ok(());
    }

    if cli.no_plugins {
        log::info!("Plugin loading disabled.");
    }
    for plugin in &cli.no_plugin {
        log::info!("Plugin blacklisted: {plugin}");
    }

    let exclusions = cli.gather_exclusions();
    let properties = cli.gather_properties();
    let federation = cli.gather_federation();
    let server_paths = cli.gather_server_paths();

    prepare_destination(&cli.out, cli.force)
        .with_context(|| format!("preparing destination folder {}", cli.out.display()))?;
    let index_dir = cli.out.join("index");
    fs::create_dir_all(&index_dir)
        .with_context(|| format!("creating index folder {}", index_dir.display()))?;

    log::info!("Generating website");

    // Pass 1: the assembly universe must be closed before any generation.
    let reader = msbuild::SlnGraphReader::new(properties);
    let universe = build_assembly_universe(&inputs, &reader, &exclusions);

    // Pass 2: one input at a time, shared accumulators threaded through.
    let factory =
        htmlgen::HtmlGeneratorFactory::new(index_dir.clone(), &reader, &exclusions, &server_paths);
    let mut merged_root = Folder::root();
    let outcome = generate_all(&inputs, &exclusions, &universe, &factory, &mut merged_root);
    log::info!(
        "Generated {} input(s), skipped {}, {} failure(s)",
        outcome.generated,
        outcome.skipped,
        outcome.failures.len()
    );

    // Finalization is fail-soft: an incomplete explorer or website never
    // aborts the run.
    if let Err(e) =
        write_solution_explorer(&index_dir, Some(&mut merged_root), &exclusions, cli.flatten)
    {
        log::error!("Failure while finalizing projects: {e}");
    }

    let web_root = cli.web_root.clone().unwrap_or_else(default_web_root);
    if let Err(e) = finalize_website(&web_root, &cli.out, cli.assembly_list, &federation) {
        log::error!("Failure while finalizing website: {e}");
    }

    if let Err(e) = write_error_log(&index_dir, &outcome) {
        log::error!("Failed to persist error log: {e}");
    }

    Ok(())
}

/// With `force`, the destination is deleted and recreated wholesale.
fn prepare_destination(out: &Path, force: bool) -> Result<()> {
    if force && out.exists() {
        log::warn!("Deleting and recreating destination folder {}", out.display());
        fs::remove_dir_all(out)?;
    }
    fs::create_dir_all(out)?;
    Ok(())
}

fn default_web_root() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("web")))
        .unwrap_or_else(|| PathBuf::from("web"))
}

/// Per-item failures also land in a persisted log next to the index; the
/// exit code stays untouched, absence of crash is the success signal.
fn write_error_log(index_dir: &Path, outcome: &GenerationOutcome) -> Result<()> {
    if outcome.failures.is_empty() {
        return Ok(());
    }
    let mut text = String::new();
    for (input, error) in &outcome.failures {
        text.push_str(&format!("{}: {error}\n", input.display()));
    }
    fs::write(index_dir.join("errors.log"), text)?;
    Ok(())
}
