//! CSV report rendering
//!
//! Emits one row per scanned prompt. The column set is the fixed core
//! fields followed by the sorted union of every extra field seen across
//! all results, so heterogeneous metadata never silently drops; results
//! lacking a column leave the cell blank.

use std::collections::BTreeSet;

use domain::{ReportView, ScanResult, Severity};
use serde_json::Value;

use super::ReportError;

const CORE_COLUMNS: &[&str] = &[
    "index",
    "timestamp",
    "severity",
    "is_malicious",
    "malicious_score",
    "confidence",
    "uncertainty",
    "error",
    "prompt",
];

/// Render the report view as a CSV document
pub fn render_csv(view: &ReportView) -> Result<String, ReportError> {
    let extra_columns: BTreeSet<String> = view
        .results
        .iter()
        .flat_map(|result| {
            result
                .metadata
                .keys()
                .chain(result.details.keys())
                .cloned()
        })
        .collect();

    let mut writer = csv::Writer::from_writer(Vec::new());

    let header: Vec<&str> = CORE_COLUMNS
        .iter()
        .copied()
        .chain(extra_columns.iter().map(String::as_str))
        .collect();
    writer.write_record(&header)?;

    for result in &view.results {
        let mut row = Vec::with_capacity(header.len());
        row.push(result.index.to_string());
        row.push(result.timestamp.clone().unwrap_or_default());
        row.push(Severity::of(result).to_string());
        row.push(result.is_malicious.to_string());
        row.push(result.malicious_score.to_string());
        row.push(result.confidence.to_string());
        row.push(result.uncertainty.to_string());
        row.push(result.error.clone().unwrap_or_default());
        row.push(result.prompt.clone());
        for column in &extra_columns {
            row.push(extra_cell(result, column));
        }
        writer.write_record(&row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ReportError::Io(std::io::Error::other(e.to_string())))?;
    String::from_utf8(bytes).map_err(|e| ReportError::Io(std::io::Error::other(e.to_string())))
}

fn extra_cell(result: &ScanResult, column: &str) -> String {
    let value = result
        .metadata
        .get(column)
        .or_else(|| result.details.get(column));
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use application::aggregate;
    use domain::{ClassifierVerdict, PromptRecord, ScanResult};
    use serde_json::json;

    use super::*;

    #[test]
    fn columns_are_core_then_sorted_union() {
        let mut meta_a = std::collections::BTreeMap::new();
        meta_a.insert("source".to_string(), json!("chat"));
        let mut meta_b = std::collections::BTreeMap::new();
        meta_b.insert("channel".to_string(), json!("api"));

        let view = aggregate(vec![
            ScanResult::from_verdict(
                &PromptRecord::new(0, "a").with_metadata(meta_a),
                ClassifierVerdict::success(false, 0.1, 0.9),
            ),
            ScanResult::from_verdict(
                &PromptRecord::new(1, "b").with_metadata(meta_b),
                ClassifierVerdict::success(true, 0.9, 0.8),
            ),
        ]);

        let csv = render_csv(&view).unwrap();
        let header = csv.lines().next().unwrap();
        assert_eq!(
            header,
            "index,timestamp,severity,is_malicious,malicious_score,confidence,uncertainty,error,prompt,channel,source"
        );
    }

    #[test]
    fn missing_extra_fields_stay_blank() {
        let mut meta = std::collections::BTreeMap::new();
        meta.insert("source".to_string(), json!("chat"));

        let view = aggregate(vec![
            ScanResult::from_verdict(
                &PromptRecord::new(0, "a").with_metadata(meta),
                ClassifierVerdict::success(false, 0.1, 0.9),
            ),
            ScanResult::from_verdict(
                &PromptRecord::new(1, "b"),
                ClassifierVerdict::success(false, 0.2, 0.9),
            ),
        ]);

        let csv = render_csv(&view).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert!(lines[1].ends_with(",chat"));
        assert!(lines[2].ends_with(","));
    }

    #[test]
    fn verdict_details_become_columns() {
        let mut verdict = ClassifierVerdict::success(true, 0.9, 0.8);
        verdict
            .details
            .insert("model_votes".to_string(), json!({"llama_guard": 1}));

        let view = aggregate(vec![ScanResult::from_verdict(
            &PromptRecord::new(0, "a"),
            verdict,
        )]);

        let csv = render_csv(&view).unwrap();
        assert!(csv.lines().next().unwrap().ends_with("model_votes"));
        assert!(csv.contains("llama_guard"));
    }

    #[test]
    fn empty_view_is_header_only() {
        let view = aggregate(Vec::new());
        let csv = render_csv(&view).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }
}
