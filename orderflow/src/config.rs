//! Top-level configuration.
//!
//! Every section has serde defaults, so an empty JSON object is a valid
//! config file.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::OrderflowError;
use crate::observability::LoggingConfig;
use crate::orders::{OrderPipeline, OrderPipelineConfig};
use crate::retry::RetryConfig;

/// Configuration for the whole crate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderflowConfig {
    /// Order aggregation settings.
    #[serde(default)]
    pub orders: OrderPipelineConfig,
    /// Retry settings.
    #[serde(default)]
    pub retry: RetryConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl OrderflowConfig {
    /// Creates a config with every section at its defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the order pipeline section.
    #[must_use]
    pub fn with_orders(mut self, orders: OrderPipelineConfig) -> Self {
        self.orders = orders;
        self
    }

    /// Sets the retry section.
    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Sets the logging section.
    #[must_use]
    pub fn with_logging(mut self, logging: LoggingConfig) -> Self {
        self.logging = logging;
        self
    }

    /// Parses and validates a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, OrderflowError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, OrderflowError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Validates every section.
    pub fn validate(&self) -> Result<(), OrderflowError> {
        self.orders.validate()?;
        self.retry.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Builds the order pipeline described by this config.
    #[must_use]
    pub fn pipeline(&self) -> OrderPipeline {
        OrderPipeline::new(self.orders.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retry::BackoffStrategy;
    use crate::testing::{assert_total_eq, sample_orders};
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = OrderflowConfig::from_json_str("{}").unwrap();
        assert_eq!(config, OrderflowConfig::default());
        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.orders.completed_status, "completed");
    }

    #[test]
    fn test_partial_document() {
        let config = OrderflowConfig::from_json_str(
            r#"{
                "orders": {"tax_rate": 0.2},
                "retry": {"max_attempts": 5, "backoff_strategy": "exponential"},
                "logging": {"json": true}
            }"#,
        )
        .unwrap();

        assert_eq!(config.orders.tax_rate, 0.2);
        assert_eq!(config.orders.min_total_with_tax, 10.0);
        assert_eq!(config.retry.max_attempts, 5);
        assert_eq!(config.retry.backoff_strategy, BackoffStrategy::Exponential);
        assert!(config.logging.json);
    }

    #[test]
    fn test_invalid_tax_rate_rejected() {
        let err = OrderflowConfig::from_json_str(r#"{"orders": {"tax_rate": -0.5}}"#).unwrap_err();
        match err {
            OrderflowError::Config(e) => assert_eq!(e.field, "orders.tax_rate"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_status_rejected() {
        let config = OrderflowConfig::new()
            .with_orders(OrderPipelineConfig::new().with_completed_status("  "));
        assert!(matches!(config.validate(), Err(OrderflowError::Config(_))));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = OrderflowConfig::from_json_str("{orders").unwrap_err();
        assert!(matches!(err, OrderflowError::Serialization(_)));
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"retry": {{"base_delay_ms": 250}}}}"#).unwrap();

        let config = OrderflowConfig::from_path(file.path()).unwrap();
        assert_eq!(config.retry.base_delay_ms, 250);
    }

    #[test]
    fn test_from_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = OrderflowConfig::from_path(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, OrderflowError::Io(_)));
    }

    #[test]
    fn test_pipeline_uses_configured_rate() {
        let config = OrderflowConfig::new()
            .with_orders(OrderPipelineConfig::new().with_tax_rate(0.0))
            .with_retry(RetryConfig::new())
            .with_logging(LoggingConfig::new());

        assert_total_eq(config.pipeline().total(&sample_orders()), 150.0);
    }
}
