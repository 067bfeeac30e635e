//! Ranger CLI
//!
//! Scans a file of prompts against the classification ensemble and writes
//! an aggregated report.

#![allow(clippy::print_stdout, clippy::print_stderr)]

mod progress;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;
use application::{NormalizeOptions, ProgressSink, ScanService, aggregate, normalize_items};
use clap::Parser;
use infrastructure::{
    AppConfig, CliOverrides, EnsembleClassifierAdapter, InputFormat, ReportFormat, load_items,
    write_report,
};
use tokio_util::sync::CancellationToken;
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::progress::TerminalProgress;

/// Ranger CLI
#[derive(Parser)]
#[command(name = "ranger")]
#[command(author, version, about = "Scan prompt logs for malicious intent", long_about = None)]
struct Cli {
    /// Input file of prompts (csv, json, jsonl, or txt)
    input_file: PathBuf,

    /// Primary report output path; sibling artifacts derive from it
    #[arg(short, long)]
    output: Option<String>,

    /// Input format (inferred from the file extension when omitted)
    #[arg(short, long)]
    format: Option<InputFormat>,

    /// Column/field name bearing the prompt text
    #[arg(short = 'c', long = "col")]
    col: Option<String>,

    /// Column/field name bearing timestamps, enables time-series analysis
    #[arg(long = "time-col")]
    time_col: Option<String>,

    /// Number of parallel classification workers
    #[arg(short, long)]
    workers: Option<usize>,

    /// Path to a TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Ensemble model weight override, repeatable
    #[arg(long = "weight", value_name = "MODEL=WEIGHT", value_parser = parse_weight)]
    weight: Vec<(String, f64)>,

    /// Ensemble decision threshold override
    #[arg(long)]
    threshold: Option<f64>,

    /// Report formats to emit (html, json, csv, text)
    #[arg(short = 'e', long = "emit", value_delimiter = ',')]
    emit: Vec<ReportFormat>,

    /// Base URL of the classification ensemble service
    #[arg(long = "ensemble-url")]
    ensemble_url: Option<String>,

    /// Disable the terminal progress bar
    #[arg(long)]
    no_progress: bool,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Parse a `MODEL=WEIGHT` pair
fn parse_weight(s: &str) -> Result<(String, f64), String> {
    let (model, weight) = s
        .split_once('=')
        .ok_or_else(|| format!("expected MODEL=WEIGHT, got '{s}'"))?;
    let weight: f64 = weight
        .parse()
        .map_err(|_| format!("invalid weight '{weight}' for model '{model}'"))?;
    Ok((model.to_string(), weight))
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays clean for the summary
    let filter = log_filter_from_verbosity(cli.verbose);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AppConfig::load(cli.config.as_deref())
        .context("Failed to load configuration")?
        .with_overrides(CliOverrides {
            workers: cli.workers,
            prompt_field: cli.col,
            timestamp_field: cli.time_col,
            format: cli.format,
            output_path: cli.output,
            formats: (!cli.emit.is_empty()).then_some(cli.emit),
            ensemble_url: cli.ensemble_url,
            model_weights: cli.weight,
            threshold: cli.threshold,
        });

    let items = load_items(&cli.input_file, config.input.format)?;

    let mut options = NormalizeOptions::default().with_prompt_field(&config.input.prompt_field);
    if let Some(field) = &config.input.timestamp_field {
        options = options.with_timestamp_field(field);
    }
    let records = normalize_items(items, &options);

    if records.is_empty() {
        println!("No prompts found.");
        return Ok(());
    }

    let classifier = Arc::new(EnsembleClassifierAdapter::new(config.ensemble.clone())?);
    if !classifier.health_check().await.unwrap_or(false) {
        warn!("Ensemble health check failed, classifications may error");
    }

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                eprintln!("Interrupt received, finishing in-flight classifications");
                cancel.cancel();
            }
        });
    }

    let bar = (!cli.no_progress).then(|| Arc::new(TerminalProgress::new(records.len())));

    let mut service = ScanService::new(classifier)
        .with_concurrency(config.scan.workers)
        .with_cancellation(cancel);
    if let Some(bar) = &bar {
        service = service.with_progress(Arc::clone(bar) as Arc<dyn ProgressSink>);
    }

    let results = service.scan(records).await;
    if let Some(bar) = &bar {
        bar.finish();
    }

    let view = aggregate(results);

    let written = write_report(&view, Path::new(&config.output.path), &config.output.formats)?;

    println!("Malicious: {}/{}", view.malicious.count, view.total);
    if view.error_count() > 0 {
        println!("Scan errors: {}", view.error_count());
    }
    for path in written {
        println!("Report written to {}", path.display());
    }

    Ok(())
}
