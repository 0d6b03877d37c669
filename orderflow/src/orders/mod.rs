//! Order records and the tax-adjusted aggregation pipeline.

mod model;
mod pipeline;
mod pipeline_tests;

pub use model::{DerivedOrder, Order, OrderId};
pub use pipeline::{
    process_orders, process_orders_value, OrderPipeline, OrderPipelineConfig,
    COMPLETED_STATUS, MIN_TOTAL_WITH_TAX, TAX_RATE,
};
