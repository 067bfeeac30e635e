//! Scan results
//!
//! A [`ScanResult`] is the post-classification outcome for exactly one
//! [`PromptRecord`]. Every record produces exactly one result, regardless
//! of classifier failure: results start from safe defaults and are overlaid
//! with whatever the ensemble returned, so an error never reads as
//! malicious.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ClassifierVerdict, PromptRecord};

/// Error recorded when the ensemble answered without an `is_malicious` field
/// and without an explicit error indicator
pub const INVALID_RESPONSE_ERROR: &str = "invalid response from inference engine";

/// The classified outcome for a single prompt record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    /// Stable position inherited from the source record
    pub index: usize,
    /// The classified prompt text
    pub prompt: String,
    /// Timestamp inherited from the source record, if present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    /// Input metadata inherited from the source record
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, Value>,
    /// Whether the prompt was judged malicious (safe default: false)
    pub is_malicious: bool,
    /// Maliciousness score in [0, 1] (safe default: 0.0)
    pub malicious_score: f64,
    /// Ensemble confidence in [0, 1] (safe default: 0.0)
    pub confidence: f64,
    /// Ensemble disagreement in [0, 1] (absent on the wire means 0.0)
    pub uncertainty: f64,
    /// Classification failure description, if the ensemble failed or
    /// returned a malformed answer for this record
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Extra ensemble output (per-model votes etc.), carried opaquely
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub details: BTreeMap<String, Value>,
}

impl ScanResult {
    /// Create a result with safe default classification fields, inheriting
    /// everything else from the source record
    #[must_use]
    pub fn pending(record: &PromptRecord) -> Self {
        Self {
            index: record.index,
            prompt: record.prompt.clone(),
            timestamp: record.timestamp.clone(),
            metadata: record.metadata.clone(),
            is_malicious: false,
            malicious_score: 0.0,
            confidence: 0.0,
            uncertainty: 0.0,
            error: None,
            details: BTreeMap::new(),
        }
    }

    /// Build the result for a record from the ensemble's verdict
    ///
    /// An explicit error indicator leaves the safe defaults untouched. A
    /// success answer overlays every present field; if `is_malicious` is
    /// still absent afterwards the result is tagged with
    /// [`INVALID_RESPONSE_ERROR`].
    #[must_use]
    pub fn from_verdict(record: &PromptRecord, verdict: ClassifierVerdict) -> Self {
        let mut result = Self::pending(record);

        if let Some(error) = verdict.error {
            result.error = Some(error);
            return result;
        }

        if let Some(score) = verdict.malicious_score {
            result.malicious_score = score;
        }
        if let Some(confidence) = verdict.confidence {
            result.confidence = confidence;
        }
        if let Some(uncertainty) = verdict.uncertainty {
            result.uncertainty = uncertainty;
        }
        result.details = verdict.details;

        match verdict.is_malicious {
            Some(flag) => result.is_malicious = flag,
            None => result.error = Some(INVALID_RESPONSE_ERROR.to_string()),
        }

        result
    }

    /// Build the result for a record whose classification call itself failed
    #[must_use]
    pub fn from_failure(record: &PromptRecord, error: impl Into<String>) -> Self {
        let mut result = Self::pending(record);
        result.error = Some(error.into());
        result
    }

    /// Whether classification completed without any error
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}
