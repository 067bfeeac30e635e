//! Severity classes
//!
//! Every scan result falls into exactly one of three classes, evaluated in
//! precedence order: malicious, then uncertain, then safe.

use serde::{Deserialize, Serialize};

use super::ScanResult;

/// Uncertainty above this threshold classifies a non-malicious result as
/// uncertain rather than safe
pub const UNCERTAINTY_THRESHOLD: f64 = 0.5;

/// Mutually exclusive, exhaustive severity class of a scan result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// The ensemble judged the prompt malicious
    Malicious,
    /// Not judged malicious, but ensemble disagreement is high
    Uncertain,
    /// Everything else
    Safe,
}

impl Severity {
    /// Classify a result, applying the precedence rule
    #[must_use]
    pub fn of(result: &ScanResult) -> Self {
        if result.is_malicious {
            Self::Malicious
        } else if result.uncertainty > UNCERTAINTY_THRESHOLD {
            Self::Uncertain
        } else {
            Self::Safe
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Malicious => "malicious",
            Self::Uncertain => "uncertain",
            Self::Safe => "safe",
        };
        write!(f, "{s}")
    }
}
