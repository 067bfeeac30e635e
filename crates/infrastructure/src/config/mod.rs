//! Application configuration
//!
//! Resolved exactly once before the scan starts, with a documented
//! precedence order: explicit CLI overrides beat file-provided values,
//! which beat built-in defaults. Environment variables (`RANGER_*`) sit
//! between defaults and the file's explicit siblings the way the config
//! crate layers them; nothing is consulted per record.

use std::path::Path;

use ensemble_client::EnsembleConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::ingest::InputFormat;
use crate::report::ReportFormat;

/// Scan orchestration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Number of parallel classification workers
    #[serde(default = "default_workers")]
    pub workers: usize,
}

const fn default_workers() -> usize {
    4
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
        }
    }
}

/// Input-file interpretation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputConfig {
    /// Column/field name bearing the prompt text
    #[serde(default = "default_prompt_field")]
    pub prompt_field: String,
    /// Column/field name bearing timestamps, if time-series analysis is wanted
    #[serde(default)]
    pub timestamp_field: Option<String>,
    /// Input format; sniffed from the file extension when absent
    #[serde(default)]
    pub format: Option<InputFormat>,
}

fn default_prompt_field() -> String {
    "prompt".to_string()
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            prompt_field: default_prompt_field(),
            timestamp_field: None,
            format: None,
        }
    }
}

/// Report output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Primary output path; sibling artifacts derive their paths from it
    #[serde(default = "default_output_path")]
    pub path: String,
    /// Formats to emit
    #[serde(default = "default_formats")]
    pub formats: Vec<ReportFormat>,
}

fn default_output_path() -> String {
    "ranger_report.html".to_string()
}

fn default_formats() -> Vec<ReportFormat> {
    vec![ReportFormat::Html]
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            formats: default_formats(),
        }
    }
}

/// Top-level application configuration
///
/// With no configuration file the ensemble settings start from the
/// benchmark-tuned weights; a file-provided `[ensemble]` section replaces
/// them wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default = "EnsembleConfig::benchmark")]
    pub ensemble: EnsembleConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            scan: ScanConfig::default(),
            input: InputConfig::default(),
            output: OutputConfig::default(),
            ensemble: EnsembleConfig::benchmark(),
        }
    }
}

/// Explicit overrides from the command line, applied after file and
/// environment resolution
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub workers: Option<usize>,
    pub prompt_field: Option<String>,
    pub timestamp_field: Option<String>,
    pub format: Option<InputFormat>,
    pub output_path: Option<String>,
    pub formats: Option<Vec<ReportFormat>>,
    pub ensemble_url: Option<String>,
    pub model_weights: Vec<(String, f64)>,
    pub threshold: Option<f64>,
}

impl AppConfig {
    /// Load configuration: built-in defaults, then an optional TOML file,
    /// then `RANGER_*` environment variables
    ///
    /// A file path given explicitly must exist; with no path the defaults
    /// stand on their own.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            info!(path = %path.display(), "Loading configuration file");
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let resolved = builder
            .add_source(
                config::Environment::with_prefix("RANGER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        // Missing sections fall back through the serde defaults
        resolved.try_deserialize()
    }

    /// Apply explicit CLI overrides, the highest-precedence layer
    #[must_use]
    pub fn with_overrides(mut self, overrides: CliOverrides) -> Self {
        if let Some(workers) = overrides.workers {
            self.scan.workers = workers;
        }
        if let Some(field) = overrides.prompt_field {
            self.input.prompt_field = field;
        }
        if let Some(field) = overrides.timestamp_field {
            self.input.timestamp_field = Some(field);
        }
        if let Some(format) = overrides.format {
            self.input.format = Some(format);
        }
        if let Some(path) = overrides.output_path {
            self.output.path = path;
        }
        if let Some(formats) = overrides.formats {
            self.output.formats = formats;
        }
        if let Some(url) = overrides.ensemble_url {
            self.ensemble.base_url = url;
        }
        for (model, weight) in overrides.model_weights {
            debug!(model = %model, weight, "Overriding ensemble model weight");
            self.ensemble.model_weights.insert(model, weight);
        }
        if let Some(threshold) = overrides.threshold {
            self.ensemble.threshold = Some(threshold);
        }
        self
    }
}
