//! Result aggregator
//!
//! Buckets scan results into severity classes and derives the report view
//! consumed by the emitters: counts, percentages, the raw score sequence,
//! the optional time-series view, and the index-sorted result list.

use chrono::Utc;
use domain::{ClassSummary, ReportView, ScanResult, Severity, TimePoint};
use tracing::debug;

/// Aggregate a full result set into a report view
///
/// Input order is irrelevant: the view re-derives its own index-sorted
/// list rather than assuming the orchestrator's output order.
#[must_use]
pub fn aggregate(results: Vec<ScanResult>) -> ReportView {
    let total = results.len();

    let mut malicious = 0usize;
    let mut uncertain = 0usize;
    let mut safe = 0usize;
    for result in &results {
        match Severity::of(result) {
            Severity::Malicious => malicious += 1,
            Severity::Uncertain => uncertain += 1,
            Severity::Safe => safe += 1,
        }
    }

    let mut sorted = results;
    sorted.sort_by_key(|r| r.index);

    let scores: Vec<f64> = sorted.iter().map(|r| r.malicious_score).collect();

    let time_series = sorted.iter().any(|r| r.timestamp.is_some()).then(|| {
        let mut points: Vec<TimePoint> = sorted
            .iter()
            .filter_map(|r| {
                r.timestamp.as_ref().map(|t| TimePoint {
                    timestamp: t.clone(),
                    score: r.malicious_score,
                })
            })
            .collect();
        // Stable: equal timestamps keep their original relative order
        points.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        points
    });

    debug!(total, malicious, uncertain, safe, "Aggregated scan results");

    ReportView {
        total,
        malicious: ClassSummary::of(malicious, total),
        uncertain: ClassSummary::of(uncertain, total),
        safe: ClassSummary::of(safe, total),
        scores,
        time_series,
        results: sorted,
        generated_at: Utc::now(),
    }
}
