//! Configuration for the ensemble client

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Configuration for the classification ensemble client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnsembleConfig {
    /// Base URL of the ensemble service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Per-model accuracy weight overrides, forwarded with each request.
    /// Empty means the service uses its own defaults.
    #[serde(default)]
    pub model_weights: BTreeMap<String, f64>,

    /// Decision threshold override for the gradient-boosted member
    #[serde(default)]
    pub threshold: Option<f64>,
}

fn default_base_url() -> String {
    "http://localhost:8910".to_string()
}

const fn default_timeout_ms() -> u64 {
    30000
}

impl Default for EnsembleConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            model_weights: BTreeMap::new(),
            threshold: None,
        }
    }
}

impl EnsembleConfig {
    /// Benchmark-tuned weights for the default three-member ensemble
    #[must_use]
    pub fn benchmark() -> Self {
        let mut weights = BTreeMap::new();
        weights.insert("llama_guard".to_string(), 0.6);
        weights.insert("vijil".to_string(), 1.0);
        weights.insert("xgboost".to_string(), 0.5);

        Self {
            model_weights: weights,
            threshold: Some(0.10),
            ..Self::default()
        }
    }

    /// Override a single model weight
    #[must_use]
    pub fn with_weight(mut self, model: impl Into<String>, weight: f64) -> Self {
        self.model_weights.insert(model.into(), weight);
        self
    }

    /// Override the decision threshold
    #[must_use]
    pub const fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_localhost() {
        let config = EnsembleConfig::default();
        assert_eq!(config.base_url, "http://localhost:8910");
        assert_eq!(config.timeout_ms, 30000);
        assert!(config.model_weights.is_empty());
        assert!(config.threshold.is_none());
    }

    #[test]
    fn benchmark_sets_three_weights_and_threshold() {
        let config = EnsembleConfig::benchmark();
        assert_eq!(config.model_weights.len(), 3);
        assert_eq!(config.model_weights.get("vijil"), Some(&1.0));
        assert_eq!(config.threshold, Some(0.10));
    }

    #[test]
    fn with_weight_overrides_existing() {
        let config = EnsembleConfig::benchmark().with_weight("llama_guard", 0.5);
        assert_eq!(config.model_weights.get("llama_guard"), Some(&0.5));
    }

    #[test]
    fn deserializes_with_defaults() {
        let config: EnsembleConfig = toml_like(r#"{"base_url": "http://scanner:9000"}"#);
        assert_eq!(config.base_url, "http://scanner:9000");
        assert_eq!(config.timeout_ms, 30000);
    }

    fn toml_like(json: &str) -> EnsembleConfig {
        serde_json::from_str(json).unwrap()
    }
}
