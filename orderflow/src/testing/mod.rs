//! Testing utilities for orderflow.
//!
//! This module provides:
//! - Order fixtures
//! - Tolerant assertions for aggregated totals
//! - A scripted flaky operation for retry tests

mod assertions;
mod fixtures;
mod mocks;

pub use assertions::assert_total_eq;
pub use fixtures::{generated_orders, sample_orders, sample_orders_value};
pub use mocks::{FlakyError, FlakyOperation};
