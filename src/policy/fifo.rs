/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

use super::{MatchPolicy, PolicyKind};
use crate::model::{Courier, MatchKey, Order};
use std::collections::VecDeque;

/// First-in-first-out pairing.
///
/// Pairs the earliest ready order with the earliest arrived courier,
/// ignoring durations entirely. Dispatch takes whichever courier has been
/// free the longest.
#[derive(Debug, Default)]
pub struct FifoPolicy {
    ready: VecDeque<Order>,
    arrived: VecDeque<Courier>,
}

impl FifoPolicy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl MatchPolicy for FifoPolicy {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Fifo
    }

    fn push_ready_order(&mut self, order: Order) {
        self.ready.push_back(order);
    }

    fn push_arrived_courier(&mut self, courier: Courier) {
        self.arrived.push_back(courier);
    }

    fn take_match(&mut self, _key: Option<MatchKey>) -> Option<(Order, Courier)> {
        if self.ready.is_empty() || self.arrived.is_empty() {
            return None;
        }
        let order = self.ready.pop_front()?;
        let courier = self.arrived.pop_front()?;
        Some((order, courier))
    }

    fn select_for_dispatch(&self, free_pool: &VecDeque<Courier>, _key: MatchKey) -> Option<usize> {
        if free_pool.is_empty() { None } else { Some(0) }
    }

    fn ready_len(&self) -> usize {
        self.ready.len()
    }

    fn arrived_len(&self) -> usize {
        self.arrived.len()
    }

    fn ready_order_ids(&self) -> Vec<String> {
        self.ready.iter().map(|o| o.id.clone()).collect()
    }

    fn arrived_courier_names(&self) -> Vec<String> {
        self.arrived.iter().map(|c| c.name.clone()).collect()
    }
}
