/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

use super::{MatchPolicy, PolicyKind, position_by_key};
use crate::model::{Courier, MatchKey, Order};
use std::collections::VecDeque;

/// Equal-key pairing with linear scans on both sides.
///
/// An attempt keyed `k` pairs the first ready order with `prep_time == k`
/// and the first arrived courier with `arrival_time == k`, and only if both
/// exist. Each attempt is O(n) in the size of the collections.
#[derive(Debug, Default)]
pub struct KeyedExactPolicy {
    ready: VecDeque<Order>,
    arrived: VecDeque<Courier>,
}

impl KeyedExactPolicy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl MatchPolicy for KeyedExactPolicy {
    fn kind(&self) -> PolicyKind {
        PolicyKind::KeyedExact
    }

    fn push_ready_order(&mut self, order: Order) {
        self.ready.push_back(order);
    }

    fn push_arrived_courier(&mut self, courier: Courier) {
        self.arrived.push_back(courier);
    }

    fn take_match(&mut self, key: Option<MatchKey>) -> Option<(Order, Courier)> {
        let key = key?;
        let courier_idx = position_by_key(&self.arrived, key)?;
        let order_idx = self.ready.iter().position(|order| order.key() == key)?;

        let order = self.ready.remove(order_idx)?;
        let courier = self.arrived.remove(courier_idx)?;
        Some((order, courier))
    }

    fn select_for_dispatch(&self, free_pool: &VecDeque<Courier>, key: MatchKey) -> Option<usize> {
        position_by_key(free_pool, key)
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
