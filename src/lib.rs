/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! # Kitchen Dispatch
//!
//! A concurrent simulator for a delivery kitchen. Orders are prepared,
//! couriers are dispatched to pick them up, and a matching engine pairs
//! ready orders with arrived couriers.
//!
//! ## Architecture
//!
//! - [`model`]: orders, couriers, the matching key and the run clock.
//! - [`policy`]: pluggable pairing strategies (FIFO, keyed exact, keyed
//!   indexed).
//! - [`engine`]: a single-owner matching engine. One task owns the
//!   [`DispatchBook`](engine::DispatchBook) and processes commands in
//!   sequence, journaling every event for deterministic replay.
//! - [`lifecycle`]: the per-order and per-courier tasks that drive entities
//!   through their states.
//! - [`stats`]: wait-time aggregation.
//! - [`driver`]: input loading and run orchestration.
//!
//! ## Example
//!
//! ```
//! use kitchen_dispatch::{DispatchConfig, Driver, PolicyKind};
//! use kitchen_dispatch::model::{Courier, Order};
//! use std::time::Duration;
//!
//! # tokio::runtime::Builder::new_current_thread()
//! #     .enable_time()
//! #     .start_paused(true)
//! #     .build()
//! #     .unwrap()
//! #     .block_on(async {
//! let config = DispatchConfig::default()
//!     .with_policy(PolicyKind::KeyedExact)
//!     .with_time_unit(Duration::from_millis(10));
//! let report = Driver::new(config)
//!     .run(vec![Order::new("a", "Ramen", 2)], vec![Courier::new("c1", 2)])
//!     .await
//!     .unwrap();
//! assert_eq!(report.stats.matches, 1);
//! # });
//! ```

pub mod config;
pub mod driver;
pub mod engine;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod policy;
pub mod stats;

pub use config::DispatchConfig;
pub use driver::{Driver, RunReport};
pub use error::{DispatchError, IngestionError, MatchError};
pub use policy::PolicyKind;
pub use stats::{StatsAggregator, StatsSnapshot};
