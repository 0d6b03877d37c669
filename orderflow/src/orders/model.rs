//! Order records and their tax-adjusted projections.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Identifier of an order, numeric or textual.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrderId {
    /// A numeric id.
    Number(i64),
    /// A textual id.
    Text(String),
}

impl OrderId {
    /// Reads an id from an untyped value; only integers and strings qualify.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64().map(Self::Number),
            Value::String(s) => Some(Self::Text(s.clone())),
            _ => None,
        }
    }
}

impl From<i64> for OrderId {
    fn from(id: i64) -> Self {
        Self::Number(id)
    }
}

impl From<i32> for OrderId {
    fn from(id: i32) -> Self {
        Self::Number(i64::from(id))
    }
}

impl From<&str> for OrderId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

impl From<String> for OrderId {
    fn from(id: String) -> Self {
        Self::Text(id)
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

/// An order as supplied by the caller.
///
/// `total` is `None` when the source carried no usable number; a present
/// value may still be `NaN` or infinite and is only trusted once
/// [`Order::finite_total`] accepts it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Order identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<OrderId>,
    /// Lifecycle status, e.g. `"completed"` or `"pending"`.
    #[serde(default)]
    pub status: String,
    /// Pre-tax total.
    #[serde(default)]
    pub total: Option<f64>,
}

impl Order {
    /// Creates an order with a numeric total.
    #[must_use]
    pub fn new(status: impl Into<String>, total: f64) -> Self {
        Self {
            id: None,
            status: status.into(),
            total: Some(total),
        }
    }

    /// Creates an order whose total is missing.
    #[must_use]
    pub fn without_total(status: impl Into<String>) -> Self {
        Self {
            id: None,
            status: status.into(),
            total: None,
        }
    }

    /// Sets the order id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<OrderId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Returns the total only when it is a finite number.
    #[must_use]
    pub fn finite_total(&self) -> Option<f64> {
        self.total.filter(|t| t.is_finite())
    }

    /// Reads an order leniently from an untyped record.
    ///
    /// Returns `None` for anything that is not an object. Inside an object,
    /// a `total` that is not a JSON number (a numeric string, `null`, or a
    /// missing key) becomes `None` instead of being coerced, and a
    /// non-string `status` becomes empty.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        let record = value.as_object()?;

        Some(Self {
            id: record.get("id").and_then(OrderId::from_value),
            status: record
                .get("status")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            total: record
                .get("total")
                .filter(|v| v.is_number())
                .and_then(Value::as_f64),
        })
    }
}

/// An order extended with its tax-inclusive total.
///
/// Built fresh by the pipeline; it never borrows from the input record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedOrder {
    /// Identifier copied from the source order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<OrderId>,
    /// Status copied from the source order.
    pub status: String,
    /// Pre-tax total.
    pub total: f64,
    /// `total * (1 + tax_rate)`.
    pub total_with_tax: f64,
}
