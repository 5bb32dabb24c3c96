/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! Matching engine: serialized dispatch and matching over shared state.
//!
//! All shared dispatch state (the free courier pool, the ready and arrived
//! collections, the statistics) lives in a [`DispatchBook`] owned by one
//! engine task. Lifecycle tasks never touch it directly; they submit
//! commands and await receipts. This single-owner discipline replaces a
//! global lock: one command at a time means every match removes one order
//! and one courier and updates the statistics as a single atomic step.
//!
//! # Architecture
//!
//! - Commands are submitted via an async channel from any number of handles
//! - A single event loop processes commands in arrival order
//! - Each command receives a monotonic sequence number and a simulation timestamp
//! - Results are returned via oneshot channels
//! - Events are emitted to registered listeners in sequence order
//! - The loop ends when the last handle is dropped, yielding the final book
//!
//! # Examples
//!
//! ```
//! use kitchen_dispatch::engine::{DispatchBook, EngineResult, MatchingEngine};
//! use kitchen_dispatch::model::{Courier, Order, SimClock};
//! use kitchen_dispatch::policy::PolicyKind;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let book = DispatchBook::new(PolicyKind::Fifo, vec![Courier::new("C1", 5)], 1);
//! let engine = MatchingEngine::new(book, SimClock::start());
//! let handle = engine.handle();
//! let task = engine.spawn();
//!
//! let order = Order::new("A", "Pad Thai", 1);
//! let receipt = handle.dispatch_courier(&order.id, order.key()).await?;
//! let EngineResult::CourierDispatched { courier } = receipt.result else {
//!     panic!("the pool had a free courier");
//! };
//!
//! handle.submit_ready_order(order).await?;
//! let receipt = handle.submit_arrived_courier(courier).await?;
//! assert!(receipt.result.match_record().is_some());
//!
//! drop(handle);
//! assert_eq!(task.wait().await?.stats().matches(), 1);
//! # Ok(())
//! # }
//! ```

pub mod book;
pub mod command;
pub mod core;
pub mod event;
pub mod journal;
pub mod receipt;
pub mod replay;
pub mod result;

#[cfg(test)]
mod tests;

// Re-export main types
pub use book::{BookSnapshot, DispatchBook, MatchRecord};
pub use command::EngineCommand;
pub use self::core::{DEFAULT_CHANNEL_CAPACITY, EngineError, EngineHandle, EngineTask, MatchingEngine};
pub use event::EngineEvent;
pub use receipt::EngineReceipt;
pub use result::EngineResult;
