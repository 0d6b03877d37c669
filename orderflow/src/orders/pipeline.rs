//! The order aggregation pipeline.
//!
//! filter (completed, finite total) -> apply tax -> drop below threshold ->
//! sort descending -> sum. Aggregation is permissive: malformed input
//! shrinks the sum, it never produces an error.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::model::{DerivedOrder, Order};
use crate::errors::ConfigError;

/// Tax rate applied to every qualifying order.
pub const TAX_RATE: f64 = 0.10;

/// Derived totals strictly below this value are dropped.
pub const MIN_TOTAL_WITH_TAX: f64 = 10.0;

/// The only status the pipeline counts.
pub const COMPLETED_STATUS: &str = "completed";

/// Tunables for the aggregation pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderPipelineConfig {
    /// Tax rate as a fraction (0.10 = 10%).
    #[serde(default = "default_tax_rate")]
    pub tax_rate: f64,
    /// Minimum tax-inclusive total kept by the pipeline.
    #[serde(default = "default_min_total_with_tax")]
    pub min_total_with_tax: f64,
    /// Status value an order must carry to be counted.
    #[serde(default = "default_completed_status")]
    pub completed_status: String,
}

fn default_tax_rate() -> f64 {
    TAX_RATE
}

fn default_min_total_with_tax() -> f64 {
    MIN_TOTAL_WITH_TAX
}

fn default_completed_status() -> String {
    COMPLETED_STATUS.to_string()
}

impl Default for OrderPipelineConfig {
    fn default() -> Self {
        Self {
            tax_rate: default_tax_rate(),
            min_total_with_tax: default_min_total_with_tax(),
            completed_status: default_completed_status(),
        }
    }
}

impl OrderPipelineConfig {
    /// Creates a config with the default rate, threshold and status.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the tax rate.
    #[must_use]
    pub fn with_tax_rate(mut self, rate: f64) -> Self {
        self.tax_rate = rate;
        self
    }

    /// Sets the minimum tax-inclusive total.
    #[must_use]
    pub fn with_min_total_with_tax(mut self, min: f64) -> Self {
        self.min_total_with_tax = min;
        self
    }

    /// Sets the status that qualifies an order.
    #[must_use]
    pub fn with_completed_status(mut self, status: impl Into<String>) -> Self {
        self.completed_status = status.into();
        self
    }

    /// Checks that the values can drive a meaningful aggregation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.tax_rate.is_finite() || self.tax_rate < 0.0 {
            return Err(ConfigError::new(
                "orders.tax_rate",
                "must be a finite, non-negative number",
            ));
        }
        if !self.min_total_with_tax.is_finite() {
            return Err(ConfigError::new(
                "orders.min_total_with_tax",
                "must be a finite number",
            ));
        }
        if self.completed_status.trim().is_empty() {
            return Err(ConfigError::new(
                "orders.completed_status",
                "cannot be empty or whitespace-only",
            ));
        }
        Ok(())
    }
}

/// Aggregates order collections into a tax-adjusted total.
#[derive(Debug, Clone, Default)]
pub struct OrderPipeline {
    config: OrderPipelineConfig,
}

impl OrderPipeline {
    /// Creates a pipeline with the given config.
    #[must_use]
    pub fn new(config: OrderPipelineConfig) -> Self {
        Self { config }
    }

    /// Returns the pipeline's config.
    #[must_use]
    pub fn config(&self) -> &OrderPipelineConfig {
        &self.config
    }

    fn project(&self, order: &Order) -> Option<DerivedOrder> {
        if order.status != self.config.completed_status {
            return None;
        }
        let total = order.finite_total()?;
        let total_with_tax = total * (1.0 + self.config.tax_rate);

        if total_with_tax < self.config.min_total_with_tax {
            return None;
        }

        Some(DerivedOrder {
            id: order.id.clone(),
            status: order.status.clone(),
            total,
            total_with_tax,
        })
    }

    /// Returns the qualifying orders, tax applied, largest first.
    #[must_use]
    pub fn derive(&self, orders: &[Order]) -> Vec<DerivedOrder> {
        let mut derived: Vec<DerivedOrder> =
            orders.iter().filter_map(|order| self.project(order)).collect();
        derived.sort_by(|a, b| b.total_with_tax.total_cmp(&a.total_with_tax));
        derived
    }

    /// Sums the tax-inclusive totals of the qualifying orders.
    #[must_use]
    pub fn total(&self, orders: &[Order]) -> f64 {
        let derived = self.derive(orders);
        let sum = derived
            .iter()
            .fold(0.0, |sum, order| sum + order.total_with_tax);

        tracing::trace!(
            input = orders.len(),
            kept = derived.len(),
            total = sum,
            "Aggregated orders"
        );
        sum
    }

    /// Aggregates an untyped value.
    ///
    /// Anything other than an array yields `0.0`; array elements go through
    /// [`Order::from_value`].
    #[must_use]
    pub fn total_value(&self, value: &Value) -> f64 {
        let Some(items) = value.as_array() else {
            return 0.0;
        };
        let orders: Vec<Order> = items.iter().filter_map(Order::from_value).collect();
        self.total(&orders)
    }
}

/// Aggregates orders with the default tax rate and threshold.
#[must_use]
pub fn process_orders(orders: &[Order]) -> f64 {
    OrderPipeline::default().total(orders)
}

/// Aggregates an untyped value with the default tax rate and threshold.
///
/// `null`, objects and scalars all yield `0.0`.
#[must_use]
pub fn process_orders_value(value: &Value) -> f64 {
    OrderPipeline::default().total_value(value)
}
