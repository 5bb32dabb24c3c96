/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

use super::key::MatchKey;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Lifecycle state of a courier.
///
/// Unlike orders, couriers cycle: after a match the engine puts the courier
/// back in the free pool as [`CourierState::Free`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CourierState {
    /// In the free pool.
    #[default]
    Free,
    /// Travelling to the kitchen.
    Dispatched,
    /// At the kitchen, submitting for a match.
    Arrived,
    /// At the kitchen with no order to collect yet.
    Idle,
}

/// A delivery courier.
///
/// Deserializes from `{ "name", "arrivalTime" }`. The name is the courier's
/// identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Courier {
    pub name: String,

    /// Travel time in time units. Also the courier's matching key.
    pub arrival_time: i64,

    #[serde(skip)]
    pub state: CourierState,

    /// When the courier last arrived at the kitchen.
    #[serde(skip)]
    pub arrived_at: Option<Duration>,
}

impl Courier {
    /// Creates a free courier.
    #[must_use]
    pub fn new(name: impl Into<String>, arrival_time: i64) -> Self {
        Self {
            name: name.into(),
            arrival_time,
            state: CourierState::Free,
            arrived_at: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn key(&self) -> MatchKey {
        MatchKey::new(self.arrival_time)
    }

    pub fn mark_dispatched(&mut self) {
        self.state = CourierState::Dispatched;
    }

    pub fn mark_arrived(&mut self, at: Duration) {
        self.state = CourierState::Arrived;
        self.arrived_at = Some(at);
    }

    pub fn mark_idle(&mut self) {
        self.state = CourierState::Idle;
    }

    /// Returns the courier to the free pool state after a delivery cycle.
    pub fn release(&mut self) {
        self.state = CourierState::Free;
    }

    /// Time spent waiting at the kitchen up to `now`.
    #[must_use]
    pub fn wait_until(&self, now: Duration) -> Duration {
        self.arrived_at
            .map_or(Duration::ZERO, |arrived| now.saturating_sub(arrived))
    }
}
