//! Ensemble client - HTTP access to the external classification ensemble
//!
//! The ensemble that scores prompts for malicious intent runs as a separate
//! service and is opaque to the rest of the pipeline. This crate provides
//! the typed HTTP client for its classify endpoint plus the configuration
//! that selects model weights and thresholds.

pub mod client;
pub mod config;
pub mod error;

pub use client::EnsembleHttpClient;
pub use config::EnsembleConfig;
pub use error::ClassifierError;
