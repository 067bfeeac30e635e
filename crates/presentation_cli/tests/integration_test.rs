//! Integration tests for CLI argument parsing
//!
//! These tests verify the argument surface without running a scan, using
//! a mirror of the parser structure in main.rs.

#![allow(clippy::panic)] // Allow panic! in tests for clear failure messages

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;
use infrastructure::{InputFormat, ReportFormat};

// Mirror of the CLI structure in main.rs
#[derive(Parser)]
#[command(name = "ranger")]
struct Cli {
    input_file: PathBuf,

    #[arg(short, long)]
    output: Option<String>,

    #[arg(short, long)]
    format: Option<InputFormat>,

    #[arg(short = 'c', long = "col")]
    col: Option<String>,

    #[arg(long = "time-col")]
    time_col: Option<String>,

    #[arg(short, long)]
    workers: Option<usize>,

    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long = "weight", value_name = "MODEL=WEIGHT", value_parser = parse_weight)]
    weight: Vec<(String, f64)>,

    #[arg(long)]
    threshold: Option<f64>,

    #[arg(short = 'e', long = "emit", value_delimiter = ',')]
    emit: Vec<ReportFormat>,

    #[arg(long = "ensemble-url")]
    ensemble_url: Option<String>,

    #[arg(long)]
    no_progress: bool,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_weight(s: &str) -> Result<(String, f64), String> {
    let (model, weight) = s
        .split_once('=')
        .ok_or_else(|| format!("expected MODEL=WEIGHT, got '{s}'"))?;
    let weight: f64 = weight
        .parse()
        .map_err(|_| format!("invalid weight '{weight}' for model '{model}'"))?;
    Ok((model.to_string(), weight))
}

fn parse_args(args: &[&str]) -> Result<Cli, clap::Error> {
    let os_args: Vec<OsString> = args.iter().map(OsString::from).collect();
    Cli::try_parse_from(os_args)
}

#[test]
fn cli_requires_an_input_file() {
    assert!(parse_args(&["ranger"]).is_err());
}

#[test]
fn cli_parses_bare_input_file() {
    let cli = parse_args(&["ranger", "prompts.csv"]).unwrap();
    assert_eq!(cli.input_file, PathBuf::from("prompts.csv"));
    assert!(cli.output.is_none());
    assert!(cli.emit.is_empty());
    assert!(!cli.no_progress);
}

#[test]
fn cli_parses_input_format() {
    let cli = parse_args(&["ranger", "dump.dat", "--format", "jsonl"]).unwrap();
    assert_eq!(cli.format, Some(InputFormat::Jsonl));
}

#[test]
fn cli_rejects_unknown_input_format() {
    assert!(parse_args(&["ranger", "dump.dat", "--format", "parquet"]).is_err());
}

#[test]
fn cli_parses_column_and_workers() {
    let cli = parse_args(&["ranger", "p.csv", "-c", "text", "-w", "12"]).unwrap();
    assert_eq!(cli.col.as_deref(), Some("text"));
    assert_eq!(cli.workers, Some(12));
}

#[test]
fn cli_parses_repeated_weights() {
    let cli = parse_args(&[
        "ranger",
        "p.csv",
        "--weight",
        "llama_guard=0.6",
        "--weight",
        "xgboost=0.5",
    ])
    .unwrap();
    assert_eq!(
        cli.weight,
        vec![
            ("llama_guard".to_string(), 0.6),
            ("xgboost".to_string(), 0.5)
        ]
    );
}

#[test]
fn cli_rejects_malformed_weight() {
    assert!(parse_args(&["ranger", "p.csv", "--weight", "llama_guard"]).is_err());
    assert!(parse_args(&["ranger", "p.csv", "--weight", "llama_guard=high"]).is_err());
}

#[test]
fn cli_parses_comma_separated_emit_list() {
    let cli = parse_args(&["ranger", "p.csv", "--emit", "html,json,csv"]).unwrap();
    assert_eq!(
        cli.emit,
        vec![ReportFormat::Html, ReportFormat::Json, ReportFormat::Csv]
    );
}

#[test]
fn cli_counts_verbosity() {
    let cli = parse_args(&["ranger", "p.csv", "-vvv"]).unwrap();
    assert_eq!(cli.verbose, 3);
}

#[test]
fn cli_parses_threshold_and_url() {
    let cli = parse_args(&[
        "ranger",
        "p.csv",
        "--threshold",
        "0.1",
        "--ensemble-url",
        "http://scanner:9000",
    ])
    .unwrap();
    assert_eq!(cli.threshold, Some(0.1));
    assert_eq!(cli.ensemble_url.as_deref(), Some("http://scanner:9000"));
}
