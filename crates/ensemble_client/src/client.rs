//! HTTP client for the classification ensemble service

use std::time::Duration;

use domain::ClassifierVerdict;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::config::EnsembleConfig;
use crate::error::ClassifierError;

/// Client for the ensemble's classify endpoint
#[derive(Debug, Clone)]
pub struct EnsembleHttpClient {
    client: Client,
    config: EnsembleConfig,
}

/// Request body for the classify endpoint
#[derive(Debug, Serialize)]
struct ClassifyRequest<'a> {
    prompt: &'a str,
    #[serde(skip_serializing_if = "std::collections::BTreeMap::is_empty")]
    model_weights: &'a std::collections::BTreeMap<String, f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    threshold: Option<f64>,
}

impl EnsembleHttpClient {
    /// Create a new client with the given configuration
    pub fn new(config: EnsembleConfig) -> Result<Self, ClassifierError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| ClassifierError::ConnectionFailed(e.to_string()))?;

        info!(base_url = %config.base_url, "Initialized ensemble client");

        Ok(Self { client, config })
    }

    /// Build the API URL for a given endpoint
    fn api_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    /// Submit one prompt for classification
    ///
    /// The answer decodes into a [`ClassifierVerdict`] whichever shape the
    /// ensemble returned; an explicit error body is data, not a transport
    /// failure, and is surfaced through the verdict's `error` field.
    #[instrument(skip(self, prompt), fields(prompt_len = prompt.len()))]
    pub async fn classify(&self, prompt: &str) -> Result<ClassifierVerdict, ClassifierError> {
        let request = ClassifyRequest {
            prompt,
            model_weights: &self.config.model_weights,
            threshold: self.config.threshold,
        };

        debug!("Sending classify request");

        let response = self
            .client
            .post(self.api_url("v1/classify"))
            .json(&request)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ClassifierError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "Classify request failed");
            return Err(ClassifierError::ServerError(format!(
                "Status {status}: {body}"
            )));
        }

        let verdict: ClassifierVerdict = response
            .json()
            .await
            .map_err(|e| ClassifierError::InvalidResponse(e.to_string()))?;

        debug!(
            is_malicious = ?verdict.is_malicious,
            error = ?verdict.error,
            "Classification received"
        );

        Ok(verdict)
    }

    /// Check if the ensemble service is reachable and healthy
    pub async fn health_check(&self) -> Result<bool, ClassifierError> {
        let response = self.client.get(self.api_url("health")).send().await?;
        Ok(response.status().is_success())
    }

    /// The configured base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }
}
