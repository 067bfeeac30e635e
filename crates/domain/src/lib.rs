//! Domain layer for Ranger
//!
//! Contains the core types of the prompt audit pipeline: normalized prompt
//! records, classifier verdicts, scan results, severity classes, and the
//! aggregated report view. This layer has no I/O dependencies and defines
//! the ubiquitous language. Classification failures are data here, not
//! errors: they travel in `ScanResult::error`.

pub mod entities;

pub use entities::*;
