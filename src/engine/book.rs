/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! State owned by the matching engine.
//!
//! [`DispatchBook`] holds every piece of shared dispatch state: the free
//! courier pool, the active [`MatchPolicy`] with its ready and arrived
//! collections, the en-route count, the statistics and the match log. It is
//! plain synchronous code; the engine task gives it exclusive ownership, so
//! each method call is one atomic read-decide-remove unit.

use super::command::EngineCommand;
use super::result::EngineResult;
use crate::error::MatchError;
use crate::model::{Courier, MatchKey, Order};
use crate::policy::{MatchPolicy, PolicyKind};
use crate::stats::{StatsAggregator, StatsSnapshot};
use std::collections::VecDeque;
use std::time::Duration;

/// A completed pickup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    pub order_id: String,
    pub order_name: String,
    pub courier_name: String,
    /// Simulation time of the match.
    pub matched_at: Duration,
    /// Time the order spent in the ready collection.
    pub order_wait: Duration,
    /// Time the courier spent waiting at the kitchen.
    pub courier_wait: Duration,
}

/// Read-only view of a [`DispatchBook`].
#[derive(Debug, Clone, PartialEq)]
pub struct BookSnapshot {
    pub policy: PolicyKind,
    /// Names of couriers in the free pool, front first.
    pub free_couriers: Vec<String>,
    /// Ids of orders waiting for a courier, earliest ready first.
    pub ready_orders: Vec<String>,
    /// Names of couriers waiting for an order, earliest arrived first.
    pub arrived_couriers: Vec<String>,
    /// Couriers dispatched and not yet arrived.
    pub en_route: usize,
    pub stats: StatsSnapshot,
}

impl BookSnapshot {
    /// Total couriers accounted for across pool, road and kitchen.
    #[must_use]
    pub fn couriers_accounted(&self) -> usize {
        self.free_couriers.len() + self.en_route + self.arrived_couriers.len()
    }
}

/// The matching engine's state.
///
/// # Examples
///
/// ```
/// use kitchen_dispatch::engine::DispatchBook;
/// use kitchen_dispatch::model::{Courier, Order};
/// use kitchen_dispatch::policy::PolicyKind;
/// use std::time::Duration;
///
/// let mut book = DispatchBook::new(PolicyKind::KeyedExact, vec![Courier::new("C1", 2)], 1);
/// let mut courier = book.dispatch_courier("A", Order::new("A", "a", 2).key()).unwrap();
///
/// let mut order = Order::new("A", "a", 2);
/// order.mark_ready(Duration::from_secs(2));
/// assert!(book.submit_ready_order(order, Duration::from_secs(2)).is_err());
///
/// courier.mark_arrived(Duration::from_secs(3));
/// let record = book.submit_arrived_courier(courier, Duration::from_secs(3)).unwrap();
/// assert_eq!(record.courier_name, "C1");
/// assert_eq!(record.order_wait, Duration::from_secs(1));
/// assert_eq!(book.stats().matches(), 1);
/// ```
#[derive(Debug)]
pub struct DispatchBook {
    policy: Box<dyn MatchPolicy>,
    free_pool: VecDeque<Courier>,
    en_route: usize,
    stats: StatsAggregator,
    matches: Vec<MatchRecord>,
}

impl DispatchBook {
    /// Creates a book with a fresh policy of `kind`.
    ///
    /// # Arguments
    ///
    /// * `kind` - The match policy to apply
    /// * `couriers` - Initial free pool, in dispatch order
    /// * `orders_submitted` - Denominator for the average order wait
    #[must_use]
    pub fn new(kind: PolicyKind, couriers: Vec<Courier>, orders_submitted: usize) -> Self {
        Self::with_policy(kind.build(), couriers, orders_submitted)
    }

    /// Creates a book around an existing policy instance.
    #[must_use]
    pub fn with_policy(
        policy: Box<dyn MatchPolicy>,
        couriers: Vec<Courier>,
        orders_submitted: usize,
    ) -> Self {
        let stats = StatsAggregator::new(orders_submitted, couriers.len());
        Self {
            policy,
            free_pool: couriers.into(),
            en_route: 0,
            stats,
            matches: Vec::new(),
        }
    }

    /// Executes an engine command at simulation time `at`.
    ///
    /// This is the single entry point used by both the live engine loop and
    /// journal replay, so both see identical semantics.
    pub fn execute(&mut self, command: EngineCommand, at: Duration) -> EngineResult {
        let outcome = match command {
            EngineCommand::DispatchCourier { order_id, key } => self
                .dispatch_courier(&order_id, key)
                .map(|courier| EngineResult::CourierDispatched { courier }),
            EngineCommand::SubmitReadyOrder(order) => self
                .submit_ready_order(order, at)
                .map(|record| EngineResult::OrderPicked { record }),
            EngineCommand::SubmitArrivedCourier(courier) => self
                .submit_arrived_courier(courier, at)
                .map(|record| EngineResult::OrderPicked { record }),
            EngineCommand::Snapshot => Ok(EngineResult::Snapshot {
                snapshot: self.snapshot(),
            }),
        };
        outcome.unwrap_or_else(|reason| EngineResult::Deferred { reason })
    }

    /// Pulls a courier out of the free pool for the order `order_id`.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::DispatchUnavailable`] when the policy finds no
    /// eligible free courier. The order is expected to proceed regardless.
    pub fn dispatch_courier(&mut self, order_id: &str, key: MatchKey) -> Result<Courier, MatchError> {
        let mut courier = self
            .policy
            .select_for_dispatch(&self.free_pool, key)
            .and_then(|idx| self.free_pool.remove(idx))
            .ok_or_else(|| MatchError::DispatchUnavailable {
                order_id: order_id.to_string(),
                key,
            })?;
        courier.mark_dispatched();
        self.en_route += 1;
        Ok(courier)
    }

    /// Inserts a prepared order, then attempts a match on its key.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::NotFound`] when no courier is eligible yet; the
    /// order stays in the ready collection.
    pub fn submit_ready_order(&mut self, order: Order, now: Duration) -> Result<MatchRecord, MatchError> {
        let key = order.key();
        self.policy.push_ready_order(order);
        self.attempt_match(Some(key), now)
    }

    /// Inserts an arrived courier, then attempts a match on its key.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::NotFound`] when no order is eligible yet; the
    /// courier waits in the arrived collection as idle.
    pub fn submit_arrived_courier(
        &mut self,
        mut courier: Courier,
        now: Duration,
    ) -> Result<MatchRecord, MatchError> {
        let key = courier.key();
        self.en_route = self.en_route.saturating_sub(1);
        courier.mark_idle();
        self.policy.push_arrived_courier(courier);
        self.attempt_match(Some(key), now)
    }

    /// Applies the policy once.
    ///
    /// On success both entities leave their waiting collections, the waits
    /// are recorded and the courier rejoins the back of the free pool.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::NotFound`] and leaves both collections
    /// unchanged when the policy yields no pair.
    pub fn attempt_match(&mut self, key: Option<MatchKey>, now: Duration) -> Result<MatchRecord, MatchError> {
        let (mut order, mut courier) = self
            .policy
            .take_match(key)
            .ok_or(MatchError::NotFound { key })?;

        let order_wait = order.wait_until(now);
        let courier_wait = courier.wait_until(now);
        order.mark_picked(now);
        self.stats.record(order_wait, courier_wait);

        let record = MatchRecord {
            order_id: order.id,
            order_name: order.name,
            courier_name: courier.name.clone(),
            matched_at: now,
            order_wait,
            courier_wait,
        };

        courier.release();
        self.free_pool.push_back(courier);
        self.matches.push(record.clone());
        Ok(record)
    }

    #[must_use]
    pub fn snapshot(&self) -> BookSnapshot {
        BookSnapshot {
            policy: self.policy.kind(),
            free_couriers: self.free_pool.iter().map(|c| c.name.clone()).collect(),
            ready_orders: self.policy.ready_order_ids(),
            arrived_couriers: self.policy.arrived_courier_names(),
            en_route: self.en_route,
            stats: self.stats.snapshot(),
        }
    }

    #[inline]
    #[must_use]
    pub fn policy_kind(&self) -> PolicyKind {
        self.policy.kind()
    }

    #[must_use]
    pub fn stats(&self) -> &StatsAggregator {
        &self.stats
    }

    /// Every match made so far, in match order.
    #[must_use]
    pub fn matches(&self) -> &[MatchRecord] {
        &self.matches
    }

    #[must_use]
    pub fn free_pool(&self) -> &VecDeque<Courier> {
        &self.free_pool
    }

    #[must_use]
    pub fn en_route(&self) -> usize {
        self.en_route
    }

    #[must_use]
    pub fn ready_len(&self) -> usize {
        self.policy.ready_len()
    }

    #[must_use]
    pub fn arrived_len(&self) -> usize {
        self.policy.arrived_len()
    }
}
