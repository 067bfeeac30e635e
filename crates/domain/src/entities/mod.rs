//! Domain entities

mod record;
mod report;
mod scan_result;
mod severity;
mod verdict;

pub use record::PromptRecord;
pub use report::{ClassSummary, ReportView, TimePoint};
pub use scan_result::{INVALID_RESPONSE_ERROR, ScanResult};
pub use severity::{Severity, UNCERTAINTY_THRESHOLD};
pub use verdict::ClassifierVerdict;
