//! Normalized prompt records
//!
//! A [`PromptRecord`] is the canonical unit of input to the scan pipeline:
//! one prompt, its stable position in the input sequence, and whatever
//! extra fields the input carried. Records are created once at
//! normalization and never mutated afterwards.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One normalized input item, ready for classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptRecord {
    /// Stable position in the original input sequence, assigned once
    pub index: usize,
    /// The text to classify
    pub prompt: String,
    /// Timestamp carried through from the input, if one was present.
    /// Never synthesized; absence is valid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    /// Additional input fields, carried through opaquely
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, Value>,
}

impl PromptRecord {
    /// Create a record with just an index and prompt text
    #[must_use]
    pub fn new(index: usize, prompt: impl Into<String>) -> Self {
        Self {
            index,
            prompt: prompt.into(),
            timestamp: None,
            metadata: BTreeMap::new(),
        }
    }

    /// Attach a timestamp
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    /// Attach opaque metadata fields
    #[must_use]
    pub fn with_metadata(mut self, metadata: BTreeMap<String, Value>) -> Self {
        self.metadata = metadata;
        self
    }
}
