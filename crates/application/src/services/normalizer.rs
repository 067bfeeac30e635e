//! Record normalizer
//!
//! Turns loosely typed input items (bare strings or field mappings) into
//! canonical [`PromptRecord`]s before any concurrency is introduced. The
//! normalizer never fails per item: a malformed entry still becomes a
//! record with a best-effort stringified prompt.

use std::collections::BTreeMap;

use domain::PromptRecord;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One raw input item, prior to normalization
///
/// Inputs arrive either as bare prompt strings (plain-text files, legacy
/// JSON lists) or as field mappings with at least a prompt-bearing field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawItem {
    /// A bare prompt string
    Text(String),
    /// A mapping of input fields
    Fields(serde_json::Map<String, Value>),
}

impl From<&str> for RawItem {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// Field-selection options for normalization
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizeOptions {
    /// Name of the prompt-bearing field in mapping items
    pub prompt_field: String,
    /// Name of the timestamp field, if time-series analysis is wanted
    pub timestamp_field: Option<String>,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            prompt_field: "prompt".to_string(),
            timestamp_field: None,
        }
    }
}

impl NormalizeOptions {
    /// Select a different prompt field
    #[must_use]
    pub fn with_prompt_field(mut self, field: impl Into<String>) -> Self {
        self.prompt_field = field.into();
        self
    }

    /// Enable timestamp extraction from the named field
    #[must_use]
    pub fn with_timestamp_field(mut self, field: impl Into<String>) -> Self {
        self.timestamp_field = Some(field.into());
        self
    }
}

/// Normalize a sequence of raw items into prompt records
///
/// Indices are assigned from position and form the contiguous range
/// `[0, N)`. Mapping items take their prompt from the configured field,
/// falling back to the first value in the mapping; every other field is
/// carried into `metadata` unchanged.
#[must_use]
pub fn normalize_items(items: Vec<RawItem>, opts: &NormalizeOptions) -> Vec<PromptRecord> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| normalize_one(index, item, opts))
        .collect()
}

fn normalize_one(index: usize, item: RawItem, opts: &NormalizeOptions) -> PromptRecord {
    match item {
        RawItem::Text(prompt) => PromptRecord::new(index, prompt),
        RawItem::Fields(fields) => {
            let prompt = fields
                .get(&opts.prompt_field)
                .or_else(|| fields.values().next())
                .map(value_to_text)
                .unwrap_or_default();

            let timestamp = opts
                .timestamp_field
                .as_ref()
                .and_then(|field| fields.get(field))
                .map(value_to_text);

            let metadata: BTreeMap<String, Value> = fields
                .into_iter()
                .filter(|(key, _)| {
                    *key != opts.prompt_field
                        && opts.timestamp_field.as_deref() != Some(key.as_str())
                })
                .collect();

            let mut record = PromptRecord::new(index, prompt).with_metadata(metadata);
            if let Some(timestamp) = timestamp {
                record = record.with_timestamp(timestamp);
            }
            record
        },
    }
}

/// Best-effort text extraction from a JSON value
fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
