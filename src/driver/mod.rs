/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! Run orchestration.
//!
//! The [`Driver`] starts the matching engine, spawns one order lifecycle per
//! input order (pausing every few orders), waits for every order task and
//! every courier task, and collects the final book into a [`RunReport`].

pub mod ingest;

pub use ingest::{load_couriers, load_orders};

use crate::config::DispatchConfig;
use crate::engine::journal::{InMemoryJournal, Journal};
use crate::engine::replay::{ReplayEngine, ReplayError};
use crate::engine::{DispatchBook, EngineEvent, MatchRecord, MatchingEngine};
use crate::error::DispatchError;
use crate::lifecycle::{LifecycleContext, OrderLifecycle, courier_tracker};
use crate::model::{Courier, Order, SimClock};
use crate::policy::PolicyKind;
use crate::stats::StatsSnapshot;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Outcome of a completed run.
#[derive(Debug)]
pub struct RunReport {
    pub policy: PolicyKind,
    pub stats: StatsSnapshot,
    /// Every pickup, in match order.
    pub matches: Vec<MatchRecord>,
    /// Orders still waiting in the ready collection.
    pub unmatched_orders: Vec<String>,
    /// Couriers still waiting in the arrived collection.
    pub idle_couriers: Vec<String>,
    /// Couriers in the free pool at the end of the run.
    pub free_couriers: Vec<String>,
    /// Couriers dispatched and never reported arrived; zero once all tasks are joined.
    pub en_route: usize,
    /// Number of dispatch attempts that sent a courier on a trip.
    pub courier_trips: usize,
    /// The courier pool the run started with.
    pub initial_couriers: Vec<Courier>,
    /// Every engine event, if journaling was enabled.
    pub journal: InMemoryJournal,
}

impl RunReport {
    /// Replays the journal onto a fresh book and checks that it reproduces
    /// this run's matches.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError`] if the journal is empty or inconsistent.
    pub fn verify_replay(&self) -> Result<bool, ReplayError> {
        let fresh = DispatchBook::new(
            self.policy,
            self.initial_couriers.clone(),
            self.stats.orders_submitted,
        );
        ReplayEngine::verify(&self.journal, fresh, &self.matches)
    }
}

/// Orchestrates a dispatch run.
#[derive(Debug, Clone, Default)]
pub struct Driver {
    config: DispatchConfig,
}

impl Driver {
    #[must_use]
    pub fn new(config: DispatchConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Loads both input files named by the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Ingestion`] if either file is unreadable or
    /// malformed.
    pub fn load_inputs(&self) -> Result<(Vec<Order>, Vec<Courier>), DispatchError> {
        let orders = load_orders(&self.config.orders_path)?;
        let couriers = load_couriers(&self.config.couriers_path)?;
        Ok((orders, couriers))
    }

    /// Runs every order to completion against a pool of `couriers`.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError`] if a lifecycle task fails or the engine
    /// stops early.
    pub async fn run(&self, orders: Vec<Order>, couriers: Vec<Courier>) -> Result<RunReport, DispatchError> {
        let clock = SimClock::start();
        let initial_couriers = couriers.clone();
        let book = DispatchBook::new(self.config.policy, couriers, orders.len());
        let mut engine = MatchingEngine::with_capacity(book, clock, self.config.channel_capacity);

        let journal = Arc::new(Mutex::new(InMemoryJournal::new()));
        if self.config.record_journal {
            let sink = Arc::clone(&journal);
            engine.add_listener(move |event| record_event(&sink, event));
        }

        info!(
            policy = %self.config.policy,
            orders = orders.len(),
            couriers = initial_couriers.len(),
            "starting dispatch run"
        );

        let ctx = LifecycleContext::new(engine.handle(), clock, self.config.time_unit);
        let engine_task = engine.spawn();
        let (tracker, courier_tasks) = courier_tracker();

        let mut order_tasks = JoinSet::new();
        for (index, order) in orders.into_iter().enumerate() {
            order_tasks.spawn(OrderLifecycle::new(order, ctx.clone(), tracker.clone()).run());
            if self.config.should_throttle_after(index) {
                tokio::time::sleep(self.config.throttle_pause_duration()).await;
            }
        }
        drop(tracker);

        while let Some(joined) = order_tasks.join_next().await {
            joined??;
        }
        let courier_trips = courier_tasks.join_all().await?;
        debug!(courier_trips, "all courier tasks finished");

        drop(ctx);
        let book = engine_task.wait().await?;
        let snapshot = book.snapshot();

        let journal = take_journal(&journal);

        Ok(RunReport {
            policy: snapshot.policy,
            stats: snapshot.stats,
            matches: book.matches().to_vec(),
            unmatched_orders: snapshot.ready_orders,
            idle_couriers: snapshot.arrived_couriers,
            free_couriers: snapshot.free_couriers,
            en_route: snapshot.en_route,
            courier_trips,
            initial_couriers,
            journal,
        })
    }
}

fn lock_journal(journal: &Mutex<InMemoryJournal>) -> MutexGuard<'_, InMemoryJournal> {
    journal.lock().unwrap_or_else(|poisoned| {
        warn!("journal lock poisoned, recovering recorded events");
        poisoned.into_inner()
    })
}

fn record_event(journal: &Mutex<InMemoryJournal>, event: &EngineEvent) {
    if let Err(err) = lock_journal(journal).append(event.clone()) {
        warn!(%err, "dropping journal event");
    }
}

fn take_journal(journal: &Mutex<InMemoryJournal>) -> InMemoryJournal {
    std::mem::take(&mut *lock_journal(journal))
}
