/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! Per-entity lifecycle tasks.
//!
//! Each order runs as its own task: received, preparing, ready. On receipt
//! it spawns a nested dispatch task which, if the engine hands it a courier,
//! becomes that courier's travel task: dispatched, arrived. Tasks share
//! nothing but an [`EngineHandle`]; the only suspension points are the
//! simulated delays and the engine round-trips.
//!
//! Courier tasks outlive the order that spawned them, so they are reported
//! to a [`CourierTracker`] and the driver joins them through the paired
//! [`CourierTasks`] before computing final statistics.
//!
//! [`EngineHandle`]: crate::engine::EngineHandle

pub mod courier;
pub mod order;

pub use courier::CourierLifecycle;
pub use order::OrderLifecycle;

use crate::engine::{EngineHandle, MatchRecord};
use crate::error::DispatchError;
use crate::model::SimClock;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Outcome of a lifecycle task: the match it completed, if any.
pub type LifecycleResult = Result<Option<MatchRecord>, DispatchError>;

/// Outcome of a tracked dispatch attempt.
pub type DispatchResult = Result<TripOutcome, DispatchError>;

/// What became of a dispatch attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TripOutcome {
    /// No eligible courier was free, so nobody left the pool.
    NotDispatched,

    /// A courier travelled to the kitchen. Carries the match its arrival
    /// completed, if any.
    Completed(Option<MatchRecord>),
}

impl TripOutcome {
    #[must_use]
    pub fn is_trip(&self) -> bool {
        matches!(self, Self::Completed(_))
    }
}

/// What every lifecycle task needs to talk to the engine and keep time.
#[derive(Debug, Clone)]
pub struct LifecycleContext {
    pub engine: EngineHandle,
    pub clock: SimClock,
    /// Wall-clock length of one duration unit.
    pub time_unit: Duration,
}

impl LifecycleContext {
    #[must_use]
    pub fn new(engine: EngineHandle, clock: SimClock, time_unit: Duration) -> Self {
        Self {
            engine,
            clock,
            time_unit,
        }
    }
}

/// Sending half of the courier task registry.
#[derive(Debug, Clone)]
pub struct CourierTracker {
    tx: mpsc::UnboundedSender<JoinHandle<DispatchResult>>,
}

/// Receiving half of the courier task registry.
#[derive(Debug)]
pub struct CourierTasks {
    rx: mpsc::UnboundedReceiver<JoinHandle<DispatchResult>>,
}

/// Creates a linked tracker and task registry.
#[must_use]
pub fn courier_tracker() -> (CourierTracker, CourierTasks) {
    let (tx, rx) = mpsc::unbounded_channel();
    (CourierTracker { tx }, CourierTasks { rx })
}

impl CourierTracker {
    /// Registers a spawned dispatch task.
    ///
    /// If the registry has already been dropped the task keeps running
    /// untracked.
    pub fn track(&self, handle: JoinHandle<DispatchResult>) {
        let _ = self.tx.send(handle);
    }
}

impl CourierTasks {
    /// Waits for every tracked dispatch task.
    ///
    /// Completes once all [`CourierTracker`] clones are dropped and every
    /// registered task has finished. Returns the number of attempts that
    /// sent a courier on a trip.
    ///
    /// # Errors
    ///
    /// Returns the first task failure encountered.
    pub async fn join_all(mut self) -> Result<usize, DispatchError> {
        let mut trips = 0;
        while let Some(handle) = self.rx.recv().await {
            if handle.await??.is_trip() {
                trips += 1;
            }
        }
        Ok(trips)
    }
}
