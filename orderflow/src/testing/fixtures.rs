//! Order fixtures shared by tests and benchmarks.

use serde_json::{json, Value};

use crate::orders::Order;

/// Two completed orders and one pending order; aggregates to 165.
#[must_use]
pub fn sample_orders() -> Vec<Order> {
    vec![
        Order::new("completed", 100.0).with_id(1),
        Order::new("pending", 200.0).with_id(2),
        Order::new("completed", 50.0).with_id(3),
    ]
}

/// [`sample_orders`] as an untyped array.
#[must_use]
pub fn sample_orders_value() -> Value {
    json!([
        {"id": 1, "status": "completed", "total": 100},
        {"id": 2, "status": "pending", "total": 200},
        {"id": 3, "status": "completed", "total": 50},
    ])
}

/// A large batch cycling through statuses and totals, for benchmarks.
#[must_use]
pub fn generated_orders(count: usize) -> Vec<Order> {
    const STATUSES: [&str; 3] = ["completed", "pending", "cancelled"];

    (0..count)
        .map(|i| {
            let status = STATUSES[i % STATUSES.len()];
            #[allow(clippy::cast_precision_loss)]
            let total = (i % 500) as f64 + 0.5;
            Order::new(status, total).with_id(i64::try_from(i).unwrap_or(i64::MAX))
        })
        .collect()
}
