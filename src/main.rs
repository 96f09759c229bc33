use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use asterisk_check::{
    bakery, discover_services, run_checks, AppConfig, DataSource, FileSource, ReaderSource,
};
use asterisk_check_types::{Levels, State};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "asterisk-check")]
#[command(about = "Check Asterisk peers, registrations and channels from agent output")]
struct Args {
    /// Agent output to read ("-" reads stdin)
    #[arg(short, long, default_value = "-")]
    file: PathBuf,

    /// Configuration file (TOML, YAML or JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Peer latency warning threshold
    #[arg(long, requires = "latency_crit")]
    latency_warn: Option<u64>,

    /// Peer latency critical threshold
    #[arg(long, requires = "latency_warn")]
    latency_crit: Option<u64>,

    /// Only list the services that would be monitored
    #[arg(short, long, conflicts_with_all = ["export", "bake"])]
    discover: bool,

    /// Export the check results to a JSON file and exit
    #[arg(short, long, conflicts_with = "bake")]
    export: Option<PathBuf>,

    /// Print the agent plugins to deploy for the configuration and exit
    #[arg(long)]
    bake: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    match run(args) {
        Ok(state) => std::process::exit(state.exit_code()),
        Err(e) => {
            // A check that cannot run is UNKNOWN, not an ordinary failure.
            println!("{} - {:#}", State::Unknown, e);
            std::process::exit(State::Unknown.exit_code())
        }
    }
}

fn run(args: Args) -> Result<State> {
    let mut config = AppConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    if let (Some(warn), Some(crit)) = (args.latency_warn, args.latency_crit) {
        config.set_latency(Levels::new(warn, crit));
    }
    tracing::debug!(?config, "Configuration loaded");

    if args.bake {
        let plugins = bakery::bake(&config.agent);
        println!("{}", serde_json::to_string_pretty(&plugins)?);
        return Ok(State::Ok);
    }

    let mut source = open_source(&args.file);
    let output = source.read()?;
    tracing::debug!(source = source.description(), sections = output.len(), "Agent output read");

    if args.discover {
        for discovery in discover_services(&output) {
            for service in discovery.services {
                println!("{}: {}", discovery.plugin, service);
            }
        }
        return Ok(State::Ok);
    }

    let report = run_checks(&output, &config);

    if let Some(export_path) = args.export {
        export_to_file(&report, &export_path)?;
        return Ok(report.state);
    }

    print!("{}", report);
    Ok(report.state)
}

fn open_source(path: &Path) -> Box<dyn DataSource> {
    if path == Path::new("-") {
        Box::new(ReaderSource::new(io::stdin(), "stdin"))
    } else {
        Box::new(FileSource::new(path))
    }
}

/// Export the run report, with a per-state summary, to a JSON file
fn export_to_file(report: &asterisk_check::RunReport, export_path: &Path) -> Result<()> {
    let (ok, warn, crit, unknown) = report.counts();
    let export = serde_json::json!({
        "summary": {
            "state": report.state,
            "total_services": report.services.len(),
            "ok": ok,
            "warn": warn,
            "crit": crit,
            "unknown": unknown,
        },
        "services": report.services,
    });

    let json = serde_json::to_string_pretty(&export)?;
    std::fs::write(export_path, json)
        .with_context(|| format!("Failed to write {}", export_path.display()))?;

    println!("Exported check results to: {}", export_path.display());
    Ok(())
}
