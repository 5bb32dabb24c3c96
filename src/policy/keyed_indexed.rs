/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

use super::{MatchPolicy, PolicyKind, position_by_key};
use crate::model::{Courier, MatchKey, Order};
use std::collections::{HashMap, VecDeque};

/// Equal-key pairing with ready orders grouped by key.
///
/// Behaves exactly like [`KeyedExactPolicy`](super::KeyedExactPolicy), but
/// ready orders live in per-key queues so the order side of an attempt is an
/// O(1) average lookup. The arrived-courier side is still a linear scan:
/// couriers are few relative to orders, and the asymmetry is kept on purpose.
#[derive(Debug, Default)]
pub struct KeyedIndexedPolicy {
    /// Per-key queues of `(insertion sequence, order)`.
    ready: HashMap<MatchKey, VecDeque<(u64, Order)>>,
    ready_count: usize,
    next_seq: u64,
    arrived: VecDeque<Courier>,
}

impl KeyedIndexedPolicy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct keys with at least one ready order.
    #[must_use]
    pub fn key_groups(&self) -> usize {
        self.ready.len()
    }

    fn pop_ready(&mut self, key: MatchKey) -> Option<Order> {
        let group = self.ready.get_mut(&key)?;
        let (_, order) = group.pop_front()?;
        if group.is_empty() {
            self.ready.remove(&key);
        }
        self.ready_count -= 1;
        Some(order)
    }
}

impl MatchPolicy for KeyedIndexedPolicy {
    fn kind(&self) -> PolicyKind {
        PolicyKind::KeyedIndexed
    }

    fn push_ready_order(&mut self, order: Order) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.ready_count += 1;
        self.ready.entry(order.key()).or_default().push_back((seq, order));
    }

    fn push_arrived_courier(&mut self, courier: Courier) {
        self.arrived.push_back(courier);
    }

    fn take_match(&mut self, key: Option<MatchKey>) -> Option<(Order, Courier)> {
        let key = key?;
        if !self.ready.contains_key(&key) {
            return None;
        }
        let courier_idx = position_by_key(&self.arrived, key)?;

        let order = self.pop_ready(key)?;
        let courier = self.arrived.remove(courier_idx)?;
        Some((order, courier))
    }

    fn select_for_dispatch(&self, free_pool: &VecDeque<Courier>, key: MatchKey) -> Option<usize> {
        position_by_key(free_pool, key)
    }

    fn ready_len(&self) -> usize {
        self.ready_count
    }

    fn arrived_len(&self) -> usize {
        self.arrived.len()
    }

    fn ready_order_ids(&self) -> Vec<String> {
        let mut waiting: Vec<&(u64, Order)> = self.ready.values().flatten().collect();
        waiting.sort_by_key(|(seq, _)| *seq);
        waiting.into_iter().map(|(_, o)| o.id.clone()).collect()
    }

    fn arrived_courier_names(&self) -> Vec<String> {
        self.arrived.iter().map(|c| c.name.clone()).collect()
    }
}
