//! Application-level errors
//!
//! Per-record classification failures are not represented here: the scan
//! orchestrator converts them into `ScanResult` data. These variants cover
//! failures of the pipeline itself.

use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Classification transport or protocol error
    #[error("Classifier error: {0}")]
    Classifier(String),

    /// Invalid or unusable configuration
    #[error("Configuration error: {0}")]
    Configuration(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifier_error_message() {
        let err = ApplicationError::Classifier("connection refused".to_string());
        assert_eq!(err.to_string(), "Classifier error: connection refused");
    }

    #[test]
    fn configuration_error_message() {
        let err = ApplicationError::Configuration("bad base URL".to_string());
        assert_eq!(err.to_string(), "Configuration error: bad base URL");
    }
}
