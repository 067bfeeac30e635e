//! Application layer for Ranger
//!
//! Hosts the scan-and-aggregate pipeline: normalizing loosely typed input
//! items into prompt records, fanning records out to the classification
//! ensemble at bounded concurrency, and aggregating the collected results
//! into the report view. The ensemble itself stays behind the
//! [`ClassifierPort`] trait so it can be swapped for test doubles.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::{ClassifierPort, NoopProgress, ProgressSink};
pub use services::{
    NormalizeOptions, RawItem, ScanService, aggregate, normalize_items,
};
