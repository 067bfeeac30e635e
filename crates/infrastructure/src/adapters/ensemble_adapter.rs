//! Ensemble classifier adapter - Implements ClassifierPort over HTTP

use application::error::ApplicationError;
use application::ports::ClassifierPort;
use async_trait::async_trait;
use domain::ClassifierVerdict;
use ensemble_client::{ClassifierError, EnsembleConfig, EnsembleHttpClient};
use tracing::instrument;

/// Adapter exposing the ensemble HTTP service as a classifier port
#[derive(Debug, Clone)]
pub struct EnsembleClassifierAdapter {
    client: EnsembleHttpClient,
}

impl EnsembleClassifierAdapter {
    /// Create a new adapter with the given ensemble configuration
    pub fn new(config: EnsembleConfig) -> Result<Self, ApplicationError> {
        let client = EnsembleHttpClient::new(config)
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self { client })
    }

    /// Check whether the ensemble service answers its health endpoint
    pub async fn health_check(&self) -> Result<bool, ApplicationError> {
        self.client.health_check().await.map_err(Self::map_error)
    }

    /// Convert a transport error to an application error
    fn map_error(e: ClassifierError) -> ApplicationError {
        match e {
            ClassifierError::Timeout(ms) => {
                ApplicationError::Classifier(format!("classification timed out after {ms}ms"))
            },
            other => ApplicationError::Classifier(other.to_string()),
        }
    }
}

#[async_trait]
impl ClassifierPort for EnsembleClassifierAdapter {
    #[instrument(skip(self, prompt), fields(prompt_len = prompt.len()))]
    async fn classify(&self, prompt: &str) -> Result<ClassifierVerdict, ApplicationError> {
        self.client.classify(prompt).await.map_err(Self::map_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_errors_map_to_classifier_errors() {
        let err = EnsembleClassifierAdapter::map_error(ClassifierError::RateLimited);
        assert!(matches!(err, ApplicationError::Classifier(_)));
    }

    #[tokio::test]
    async fn adapter_builds_from_config() {
        let adapter = EnsembleClassifierAdapter::new(EnsembleConfig::default());
        assert!(adapter.is_ok());
    }
}
