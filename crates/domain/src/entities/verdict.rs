//! Classifier verdicts
//!
//! The wire-level answer of the external classification ensemble. The
//! ensemble may return a success shape, an explicit error indicator, or a
//! malformed response missing `is_malicious` entirely; the scan
//! orchestrator decides how each case maps onto a [`ScanResult`].
//!
//! [`ScanResult`]: crate::entities::ScanResult

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw classification answer from the ensemble
///
/// All success fields are optional because the ensemble is an opaque
/// external dependency: a partially filled or malformed answer must still
/// decode so it can be tagged as an error downstream rather than aborting
/// the batch.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClassifierVerdict {
    /// Explicit error indicator, mutually exclusive with the success fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Whether the prompt was judged malicious. Absent on malformed
    /// responses, which the orchestrator treats as an error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_malicious: Option<bool>,
    /// Maliciousness score in [0, 1]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub malicious_score: Option<f64>,
    /// Ensemble confidence in [0, 1]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    /// Ensemble disagreement in [0, 1]; absence is treated as 0.0
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uncertainty: Option<f64>,
    /// Any additional fields the ensemble returned (per-model votes,
    /// timings), carried opaquely into the result
    #[serde(flatten)]
    pub details: BTreeMap<String, Value>,
}

impl ClassifierVerdict {
    /// Create a verdict carrying only an explicit error indicator
    #[must_use]
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }

    /// Create a complete success verdict
    #[must_use]
    pub fn success(is_malicious: bool, malicious_score: f64, confidence: f64) -> Self {
        Self {
            is_malicious: Some(is_malicious),
            malicious_score: Some(malicious_score),
            confidence: Some(confidence),
            ..Self::default()
        }
    }

    /// Set the uncertainty score
    #[must_use]
    pub const fn with_uncertainty(mut self, uncertainty: f64) -> Self {
        self.uncertainty = Some(uncertainty);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_carries_only_error() {
        let verdict = ClassifierVerdict::failure("no models loaded");
        assert_eq!(verdict.error.as_deref(), Some("no models loaded"));
        assert!(verdict.is_malicious.is_none());
        assert!(verdict.malicious_score.is_none());
    }

    #[test]
    fn success_fills_core_fields() {
        let verdict = ClassifierVerdict::success(true, 0.95, 0.9);
        assert_eq!(verdict.is_malicious, Some(true));
        assert_eq!(verdict.malicious_score, Some(0.95));
        assert_eq!(verdict.confidence, Some(0.9));
        assert!(verdict.error.is_none());
    }

    #[test]
    fn with_uncertainty_sets_value() {
        let verdict = ClassifierVerdict::success(false, 0.1, 0.8).with_uncertainty(0.6);
        assert_eq!(verdict.uncertainty, Some(0.6));
    }

    #[test]
    fn unknown_fields_land_in_details() {
        let json = r#"{"is_malicious": false, "malicious_score": 0.1, "confidence": 0.9, "model_votes": {"vijil": 0.05}}"#;
        let verdict: ClassifierVerdict = serde_json::from_str(json).unwrap();
        assert_eq!(verdict.is_malicious, Some(false));
        assert!(verdict.details.contains_key("model_votes"));
    }

    #[test]
    fn missing_is_malicious_still_decodes() {
        let json = r#"{"malicious_score": 0.4}"#;
        let verdict: ClassifierVerdict = serde_json::from_str(json).unwrap();
        assert!(verdict.is_malicious.is_none());
        assert_eq!(verdict.malicious_score, Some(0.4));
    }
}
