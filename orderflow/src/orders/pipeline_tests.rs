//! Behavioural tests for the order aggregation pipeline.

#[cfg(test)]
mod tests {
    use crate::orders::{
        process_orders, process_orders_value, DerivedOrder, Order, OrderId, OrderPipeline,
        OrderPipelineConfig,
    };
    use crate::testing::{assert_total_eq, sample_orders};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_mixed_statuses() {
        assert_total_eq(process_orders(&sample_orders()), 165.0);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(process_orders(&[]), 0.0);
    }

    #[test]
    fn test_no_completed_orders() {
        let orders = vec![Order::new("pending", 100.0), Order::new("cancelled", 50.0)];
        assert_eq!(process_orders(&orders), 0.0);
    }

    #[test]
    fn test_invalid_totals_are_excluded() {
        let orders = vec![
            Order::new("completed", 100.0),
            Order::new("completed", f64::NAN),
            Order::new("completed", f64::NEG_INFINITY),
            Order::without_total("completed"),
        ];
        assert_total_eq(process_orders(&orders), 110.0);
    }

    #[test]
    fn test_below_threshold_is_dropped() {
        let orders = vec![Order::new("completed", 5.0), Order::new("completed", 20.0)];
        assert_total_eq(process_orders(&orders), 22.0);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let pipeline = OrderPipeline::new(OrderPipelineConfig::new().with_tax_rate(0.0));
        let orders = vec![Order::new("completed", 10.0), Order::new("completed", 9.99)];
        assert_eq!(pipeline.total(&orders), 10.0);
    }

    #[test]
    fn test_status_match_is_exact() {
        let orders = vec![
            Order::new("Completed", 100.0),
            Order::new("completed ", 100.0),
            Order::new("completed", 100.0),
        ];
        assert_total_eq(process_orders(&orders), 110.0);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let orders = sample_orders();
        let snapshot = orders.clone();

        let _ = process_orders(&orders);
        let _ = OrderPipeline::default().derive(&orders);

        assert_eq!(orders, snapshot);
    }

    #[test]
    fn test_derive_sorts_descending() {
        let orders = vec![
            Order::new("completed", 50.0).with_id(1),
            Order::new("completed", 300.0).with_id(2),
            Order::new("pending", 999.0).with_id(3),
            Order::new("completed", 120.0).with_id(4),
        ];

        let ids: Vec<Option<OrderId>> = OrderPipeline::default()
            .derive(&orders)
            .into_iter()
            .map(|d| d.id)
            .collect();

        assert_eq!(
            ids,
            vec![
                Some(OrderId::Number(2)),
                Some(OrderId::Number(4)),
                Some(OrderId::Number(1)),
            ]
        );
    }

    #[test]
    fn test_derive_copies_fields() {
        let orders = vec![Order::new("completed", 100.0).with_id("a-1")];
        let derived = OrderPipeline::new(OrderPipelineConfig::new().with_tax_rate(0.5))
            .derive(&orders);

        assert_eq!(
            derived,
            vec![DerivedOrder {
                id: Some(OrderId::Text("a-1".to_string())),
                status: "completed".to_string(),
                total: 100.0,
                total_with_tax: 150.0,
            }]
        );
    }

    #[test]
    fn test_custom_status_and_threshold() {
        let config = OrderPipelineConfig::new()
            .with_completed_status("shipped")
            .with_min_total_with_tax(100.0);
        let orders = vec![
            Order::new("shipped", 100.0),
            Order::new("shipped", 50.0),
            Order::new("completed", 500.0),
        ];

        assert_total_eq(OrderPipeline::new(config).total(&orders), 110.0);
    }

    #[test]
    fn test_value_non_sequences_yield_zero() {
        assert_eq!(process_orders_value(&json!(null)), 0.0);
        assert_eq!(process_orders_value(&json!({})), 0.0);
        assert_eq!(process_orders_value(&json!("orders")), 0.0);
        assert_eq!(process_orders_value(&json!(12)), 0.0);
        assert_eq!(process_orders_value(&json!([])), 0.0);
    }

    #[test]
    fn test_value_mixed_statuses() {
        let value = json!([
            {"id": 1, "status": "completed", "total": 100},
            {"id": 2, "status": "pending", "total": 200},
            {"id": 3, "status": "completed", "total": 50},
        ]);
        assert_total_eq(process_orders_value(&value), 165.0);
    }

    #[test]
    fn test_value_numeric_strings_are_not_coerced() {
        let value = json!([
            {"status": "completed", "total": 100},
            {"status": "completed", "total": null},
            {"status": "completed", "total": "50"},
            {"status": "completed"},
        ]);
        assert_total_eq(process_orders_value(&value), 110.0);
    }

    #[test]
    fn test_value_skips_non_object_elements() {
        let value = json!([
            7,
            "completed",
            null,
            {"status": "completed", "total": 20},
        ]);
        assert_total_eq(process_orders_value(&value), 22.0);
    }

    #[test]
    fn test_value_input_is_not_mutated() {
        let value = json!([
            {"id": 1, "status": "completed", "total": 100},
            {"id": 2, "status": "completed", "total": 5},
        ]);
        let snapshot = value.clone();

        let _ = process_orders_value(&value);

        assert_eq!(value, snapshot);
    }

    fn arb_total() -> impl Strategy<Value = Option<f64>> {
        prop_oneof![
            Just(None),
            Just(Some(f64::NAN)),
            Just(Some(f64::INFINITY)),
            (-1_000.0f64..1_000.0).prop_map(Some),
        ]
    }

    proptest! {
        #[test]
        fn prop_total_matches_direct_sum(
            rows in prop::collection::vec((any::<bool>(), arb_total()), 0..40)
        ) {
            let orders: Vec<Order> = rows
                .iter()
                .map(|(completed, total)| Order {
                    id: None,
                    status: if *completed { "completed" } else { "pending" }.to_string(),
                    total: *total,
                })
                .collect();

            let expected: f64 = orders
                .iter()
                .filter(|o| o.status == "completed")
                .filter_map(|o| o.total.filter(|t| t.is_finite()))
                .map(|t| t * 1.1)
                .filter(|t| *t >= 10.0)
                .sum();

            let actual = process_orders(&orders);
            prop_assert!((actual - expected).abs() <= 1e-9 * expected.abs().max(1.0));
        }
    }
}
