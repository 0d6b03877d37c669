//! # Orderflow
//!
//! Two small, independent utilities:
//!
//! - **Order aggregation**: filter completed orders with a valid total,
//!   apply tax, drop the ones below a threshold and sum the rest
//!   ([`orders::process_orders`]).
//! - **Retry with backoff**: run a fallible async operation up to N times
//!   with linear 100ms, 200ms, ... waits, surfacing the last failure
//!   ([`retry::fetch_with_retry`]).
//!
//! Around them sit a simulated user directory to retry against, a page
//! streamer, JSON configuration and `tracing` setup.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use orderflow::prelude::*;
//!
//! let total = process_orders(&[
//!     Order::new("completed", 100.0),
//!     Order::new("pending", 200.0),
//! ]);
//!
//! let directory = SimulatedDirectory::new();
//! let user = fetch_with_retry(|| directory.fetch_user(42), DEFAULT_RETRIES).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod config;
pub mod errors;
pub mod observability;
pub mod orders;
pub mod pagination;
pub mod retry;
pub mod testing;
pub mod users;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::OrderflowConfig;
    pub use crate::errors::{ConfigError, OrderflowError, ValidationError};
    pub use crate::observability::{build_subscriber, init_tracing, LoggingConfig};
    pub use crate::orders::{
        process_orders, process_orders_value, DerivedOrder, Order, OrderId, OrderPipeline,
        OrderPipelineConfig,
    };
    pub use crate::pagination::{paginate, Page};
    pub use crate::retry::{
        fetch_with_retry, safe_execute, with_retry, BackoffStrategy, JitterStrategy,
        RetryConfig, RetryPhase, DEFAULT_RETRIES,
    };
    pub use crate::users::{validate_user, SimulatedDirectory, User, UserDirectory};
}
