/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! Core matching engine implementation.
//!
//! This module provides the [`MatchingEngine`] task that owns the
//! [`DispatchBook`] and executes every dispatch, submission and match in a
//! single, totally-ordered sequence.

use super::book::{BookSnapshot, DispatchBook};
use super::command::EngineCommand;
use super::event::EngineEvent;
use super::receipt::EngineReceipt;
use super::result::EngineResult;
use crate::error::MatchError;
use crate::model::{Courier, MatchKey, Order, SimClock};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

/// Default command channel capacity.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1024;

/// Type alias for event listener functions.
type EventListener = Arc<dyn Fn(&EngineEvent) + Send + Sync>;

/// A command paired with the channel its receipt is sent back on.
type Envelope = (EngineCommand, oneshot::Sender<EngineReceipt>);

/// Single-owner matching engine.
///
/// The engine is the only holder of the [`DispatchBook`]. Lifecycle tasks
/// talk to it through cloneable [`EngineHandle`]s; commands are processed
/// one at a time in arrival order, which makes every read-decide-remove
/// sequence atomic without a lock around the shared collections.
///
/// # Examples
///
/// ```
/// use kitchen_dispatch::engine::{DispatchBook, MatchingEngine};
/// use kitchen_dispatch::model::{Courier, SimClock};
/// use kitchen_dispatch::policy::PolicyKind;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let book = DispatchBook::new(PolicyKind::Fifo, vec![Courier::new("C1", 1)], 0);
/// let engine = MatchingEngine::new(book, SimClock::start());
/// let handle = engine.handle();
/// let task = engine.spawn();
///
/// let snapshot = handle.snapshot().await?;
/// assert_eq!(snapshot.free_couriers, vec!["C1".to_string()]);
///
/// drop(handle);
/// let book = task.wait().await?;
/// assert_eq!(book.stats().matches(), 0);
/// # Ok(())
/// # }
/// ```
pub struct MatchingEngine {
    /// The state being served.
    book: DispatchBook,

    /// Source of the timestamps stamped on each command.
    clock: SimClock,

    /// Channel for submitting commands, cloned into every handle.
    command_tx: mpsc::Sender<Envelope>,

    /// Channel drained by the event loop.
    command_rx: mpsc::Receiver<Envelope>,

    /// Event listeners called synchronously for each event.
    event_listeners: Vec<EventListener>,
}

impl MatchingEngine {
    /// Creates an engine serving `book`, stamping commands with `clock`.
    #[must_use]
    pub fn new(book: DispatchBook, clock: SimClock) -> Self {
        Self::with_capacity(book, clock, DEFAULT_CHANNEL_CAPACITY)
    }

    /// Creates an engine with a specific channel capacity.
    ///
    /// # Arguments
    ///
    /// * `book` - The state to serve
    /// * `clock` - Clock shared with the lifecycle tasks
    /// * `capacity` - Channel buffer size (backpressure when full)
    #[must_use]
    pub fn with_capacity(book: DispatchBook, clock: SimClock, capacity: usize) -> Self {
        let (command_tx, command_rx) = mpsc::channel(capacity.max(1));

        Self {
            book,
            clock,
            command_tx,
            command_rx,
            event_listeners: Vec::new(),
        }
    }

    /// Registers an event listener.
    ///
    /// Listeners are called synchronously in sequence order for each event,
    /// before the submitter receives its receipt.
    pub fn add_listener<F>(&mut self, listener: F)
    where
        F: Fn(&EngineEvent) + Send + Sync + 'static,
    {
        self.event_listeners.push(Arc::new(listener));
    }

    /// Returns a new submission handle.
    #[must_use]
    pub fn handle(&self) -> EngineHandle {
        EngineHandle {
            command_tx: self.command_tx.clone(),
        }
    }

    /// Spawns the event loop on a new task.
    ///
    /// The loop runs until every [`EngineHandle`] has been dropped, then
    /// hands the final [`DispatchBook`] back through [`EngineTask::wait`].
    #[must_use]
    pub fn spawn(self) -> EngineTask {
        let Self {
            book,
            clock,
            command_tx,
            mut command_rx,
            event_listeners,
        } = self;
        drop(command_tx);

        let mut state = EngineState {
            book,
            clock,
            next_sequence: 1,
            event_listeners,
        };

        let handle = tokio::spawn(async move {
            while let Some((command, reply)) = command_rx.recv().await {
                let receipt = state.process(command);
                let _ = reply.send(receipt);
            }
            state.book
        });

        EngineTask { handle }
    }
}

/// Loop-owned engine state.
struct EngineState {
    book: DispatchBook,
    clock: SimClock,
    next_sequence: u64,
    event_listeners: Vec<EventListener>,
}

impl EngineState {
    /// Assigns a sequence number, executes on the book, emits the event and
    /// builds the receipt.
    fn process(&mut self, command: EngineCommand) -> EngineReceipt {
        let seq = self.next_sequence;
        self.next_sequence += 1;
        let at = self.clock.now();

        let result = self.book.execute(command.clone(), at);
        log_result(&command, &result, at);

        let event = EngineEvent::new(seq, at, command, result);
        for listener in &self.event_listeners {
            listener(&event);
        }

        EngineReceipt::new(seq, event.result)
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

fn log_result(command: &EngineCommand, result: &EngineResult, at: Duration) {
    match result {
        EngineResult::OrderPicked { record } => info!(
            order_id = %record.order_id,
            courier = %record.courier_name,
            order_wait_ms = millis(record.order_wait),
            courier_wait_ms = millis(record.courier_wait),
            "order {} picked up by courier {}",
            record.order_id,
            record.courier_name
        ),
        EngineResult::Deferred {
            reason: reason @ MatchError::DispatchUnavailable { .. },
        } => warn!(%reason, "courier not found, they must be busy"),
        EngineResult::Deferred { reason } => info!(%reason, "couriers or orders still on the way"),
        EngineResult::CourierDispatched { courier } => debug!(
            courier = %courier.name,
            at_ms = millis(at),
            "courier left the free pool"
        ),
        EngineResult::Snapshot { .. } => debug!(command = command.label(), "snapshot taken"),
    }
}

/// Cloneable handle for submitting commands to a running engine.
#[derive(Debug, Clone)]
pub struct EngineHandle {
    command_tx: mpsc::Sender<Envelope>,
}

impl EngineHandle {
    /// Submits a command and waits for its receipt.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Shutdown`] if the engine task has ended.
    pub async fn submit(&self, command: EngineCommand) -> Result<EngineReceipt, EngineError> {
        let (tx, rx) = oneshot::channel();
        self.command_tx
            .send((command, tx))
            .await
            .map_err(|_| EngineError::Shutdown)?;
        rx.await.map_err(|_| EngineError::Shutdown)
    }

    /// Asks the engine for a courier to send to `order_id`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Shutdown`] if the engine task has ended.
    pub async fn dispatch_courier(
        &self,
        order_id: &str,
        key: MatchKey,
    ) -> Result<EngineReceipt, EngineError> {
        self.submit(EngineCommand::DispatchCourier {
            order_id: order_id.to_string(),
            key,
        })
        .await
    }

    /// Hands a prepared order to the engine.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Shutdown`] if the engine task has ended.
    pub async fn submit_ready_order(&self, order: Order) -> Result<EngineReceipt, EngineError> {
        self.submit(EngineCommand::SubmitReadyOrder(order)).await
    }

    /// Hands an arrived courier to the engine.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Shutdown`] if the engine task has ended.
    pub async fn submit_arrived_courier(&self, courier: Courier) -> Result<EngineReceipt, EngineError> {
        self.submit(EngineCommand::SubmitArrivedCourier(courier)).await
    }

    /// Captures a read-only view of the book.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Shutdown`] if the engine task has ended.
    pub async fn snapshot(&self) -> Result<BookSnapshot, EngineError> {
        match self.submit(EngineCommand::Snapshot).await?.result {
            EngineResult::Snapshot { snapshot } => Ok(snapshot),
            _ => Err(EngineError::UnexpectedResult("snapshot")),
        }
    }
}

/// Handle to a spawned engine task.
pub struct EngineTask {
    handle: tokio::task::JoinHandle<DispatchBook>,
}

impl EngineTask {
    /// Waits for the engine to shut down and returns its final book.
    ///
    /// The engine only shuts down once every [`EngineHandle`] is dropped.
    pub async fn wait(self) -> Result<DispatchBook, tokio::task::JoinError> {
        self.handle.await
    }
}

/// Errors that can occur when interacting with the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// The engine has been shut down.
    Shutdown,

    /// The engine answered a command with a result of the wrong kind.
    UnexpectedResult(&'static str),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Shutdown => write!(f, "matching engine has been shut down"),
            Self::UnexpectedResult(command) => {
                write!(f, "matching engine returned an unexpected result for {command}")
            }
        }
    }
}

impl std::error::Error for EngineError {}
