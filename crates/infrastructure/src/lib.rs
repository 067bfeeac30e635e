//! Infrastructure layer - Adapters for the outer edges of the pipeline
//!
//! Implements the ports defined in the application layer and hosts the
//! plumbing the core deliberately excludes: configuration resolution,
//! input-file ingestion, and report emission.

pub mod adapters;
pub mod config;
pub mod ingest;
pub mod report;

pub use adapters::EnsembleClassifierAdapter;
pub use config::{AppConfig, CliOverrides, InputConfig, OutputConfig, ScanConfig};
pub use ingest::{IngestError, InputFormat, load_items};
pub use report::{ReportError, ReportFormat, write_report};
