//! HTML report rendering
//!
//! Renders the report view through an embedded Tera template: summary
//! cards, a severity doughnut, a score histogram, an optional time-series
//! scatter, and a searchable results table with expandable detail rows.

use domain::{ReportView, Severity};
use serde::Serialize;
use tera::Tera;

use super::ReportError;

const TEMPLATE: &str = include_str!("../../templates/report.html");

/// One row of the results table, pre-computed for the template
#[derive(Debug, Serialize)]
struct ResultRow {
    index: usize,
    timestamp: String,
    severity: String,
    score: String,
    preview: String,
    prompt: String,
    error: String,
    raw_json: String,
}

const PREVIEW_CHARS: usize = 80;

/// Render the report view to a self-contained HTML document
pub fn render_html(view: &ReportView) -> Result<String, ReportError> {
    let mut tera = Tera::default();
    tera.add_raw_template("report.html", TEMPLATE)?;

    let rows: Vec<ResultRow> = view
        .results
        .iter()
        .map(|result| {
            let preview: String = result.prompt.chars().take(PREVIEW_CHARS).collect();
            ResultRow {
                index: result.index,
                timestamp: result.timestamp.clone().unwrap_or_default(),
                severity: Severity::of(result).to_string(),
                score: format!("{:.4}", result.malicious_score),
                preview,
                prompt: result.prompt.clone(),
                error: result.error.clone().unwrap_or_default(),
                raw_json: serde_json::to_string_pretty(result).unwrap_or_default(),
            }
        })
        .collect();

    let mut ctx = tera::Context::new();
    ctx.insert(
        "generated_at",
        &view.generated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
    );
    ctx.insert("total", &view.total);
    ctx.insert("malicious", &view.malicious);
    ctx.insert("uncertain", &view.uncertain);
    ctx.insert("safe", &view.safe);
    ctx.insert("error_count", &view.error_count());
    ctx.insert("results", &rows);
    ctx.insert("scores_json", &serde_json::to_string(&view.scores)?);
    ctx.insert("has_time_data", &view.time_series.is_some());
    ctx.insert(
        "time_series_json",
        &serde_json::to_string(view.time_series.as_deref().unwrap_or_default())?,
    );

    Ok(tera.render("report.html", &ctx)?)
}
