//! Classifier port - Interface to the external classification ensemble

use async_trait::async_trait;
use domain::ClassifierVerdict;

use crate::error::ApplicationError;

/// Port for classifying one prompt at a time
///
/// The ensemble is an opaque external capability: the verdict may carry a
/// success shape, an explicit error indicator, or a partially filled body,
/// and the call itself may fail. The scan orchestrator converts every one
/// of these outcomes into exactly one `ScanResult` and never aborts the
/// batch on a single failure.
#[async_trait]
pub trait ClassifierPort: Send + Sync {
    /// Score a single prompt for malicious intent
    async fn classify(&self, prompt: &str) -> Result<ClassifierVerdict, ApplicationError>;
}
