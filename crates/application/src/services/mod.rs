//! Application services

mod normalizer;
mod report_service;
mod scan_service;

pub use normalizer::{NormalizeOptions, RawItem, normalize_items};
pub use report_service::aggregate;
pub use scan_service::{CANCELLED_ERROR, ScanService};
