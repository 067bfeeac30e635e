//! Aggregated report view
//!
//! The queryable summary the report emitters render: totals, per-class
//! counts and percentages, the raw score sequence for histogram binning,
//! an optional time-series view, and the full index-sorted result list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ScanResult;

/// Count and percentage for one severity class
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ClassSummary {
    pub count: usize,
    /// Percentage of the total, 0.0 when the total is zero
    pub percent: f64,
}

impl ClassSummary {
    /// Compute a summary from a class count and the batch total
    #[must_use]
    pub fn of(count: usize, total: usize) -> Self {
        #[allow(clippy::cast_precision_loss)]
        let percent = if total == 0 {
            0.0
        } else {
            count as f64 / total as f64 * 100.0
        };
        Self { count, percent }
    }
}

/// One point of the time-series view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimePoint {
    /// Timestamp as carried through from the input
    #[serde(rename = "t")]
    pub timestamp: String,
    /// Malicious score of the result at that time
    #[serde(rename = "s")]
    pub score: f64,
}

/// The aggregated view of a completed scan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportView {
    /// Total number of scanned prompts
    pub total: usize,
    /// Results judged malicious
    pub malicious: ClassSummary,
    /// Results with high ensemble disagreement
    pub uncertain: ClassSummary,
    /// Everything else
    pub safe: ClassSummary,
    /// Raw malicious score sequence, for histogram binning by the emitter
    pub scores: Vec<f64>,
    /// Timestamped scores sorted ascending by timestamp; present only when
    /// at least one result carried a timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_series: Option<Vec<TimePoint>>,
    /// All results, sorted ascending by index
    pub results: Vec<ScanResult>,
    /// When this view was produced
    pub generated_at: DateTime<Utc>,
}

impl ReportView {
    /// Number of results that carry a classification error
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.results.iter().filter(|r| r.error.is_some()).count()
    }
}
