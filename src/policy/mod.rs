/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! Pluggable match policies.
//!
//! A policy owns the two waiting collections (ready orders and arrived
//! couriers) in whatever layout suits it, and answers one question: given a
//! triggering key, which order pairs with which courier right now?
//!
//! | Policy | Key | Order lookup | Courier lookup |
//! |---|---|---|---|
//! | [`FifoPolicy`] | ignored | O(1) front | O(1) front |
//! | [`KeyedExactPolicy`] | required | O(n) scan | O(n) scan |
//! | [`KeyedIndexedPolicy`] | required | O(1) avg, grouped by key | O(n) scan |
//!
//! Policies are driven exclusively by [`DispatchBook`], which runs inside the
//! single engine task, so they need no internal synchronization.
//!
//! [`DispatchBook`]: crate::engine::DispatchBook

pub mod fifo;
pub mod keyed_exact;
pub mod keyed_indexed;

pub use fifo::FifoPolicy;
pub use keyed_exact::KeyedExactPolicy;
pub use keyed_indexed::KeyedIndexedPolicy;

use crate::model::{Courier, MatchKey, Order};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Strategy selecting which waiting order pairs with which waiting courier.
pub trait MatchPolicy: Send + fmt::Debug {
    /// The variant this policy implements.
    fn kind(&self) -> PolicyKind;

    /// Inserts an order into the ready collection.
    fn push_ready_order(&mut self, order: Order);

    /// Inserts a courier into the arrived collection.
    fn push_arrived_courier(&mut self, courier: Courier);

    /// Removes and returns at most one eligible (order, courier) pair.
    ///
    /// Returns `None`, leaving both collections untouched, when no pair is
    /// eligible for `key`.
    fn take_match(&mut self, key: Option<MatchKey>) -> Option<(Order, Courier)>;

    /// Picks the free-pool position of the courier to dispatch for an order
    /// keyed `key`, or `None` if no free courier is eligible.
    fn select_for_dispatch(&self, free_pool: &VecDeque<Courier>, key: MatchKey) -> Option<usize>;

    /// Number of orders waiting for a courier.
    fn ready_len(&self) -> usize;

    /// Number of couriers waiting for an order.
    fn arrived_len(&self) -> usize;

    /// Ids of waiting orders, earliest ready first.
    fn ready_order_ids(&self) -> Vec<String>;

    /// Names of waiting couriers, earliest arrived first.
    fn arrived_courier_names(&self) -> Vec<String>;
}

/// Position of the first courier whose arrival time equals `key`.
///
/// Shared by the keyed policies for both dispatch and arrival lookups.
#[must_use]
pub fn position_by_key(couriers: &VecDeque<Courier>, key: MatchKey) -> Option<usize> {
    couriers.iter().position(|courier| courier.key() == key)
}

/// Selects one of the available [`MatchPolicy`] implementations.
///
/// # Examples
///
/// ```
/// use kitchen_dispatch::policy::PolicyKind;
///
/// let kind: PolicyKind = "keyed-indexed".parse().unwrap();
/// assert_eq!(kind, PolicyKind::KeyedIndexed);
/// assert_eq!(kind.build().kind(), PolicyKind::KeyedIndexed);
/// assert!("nearest".parse::<PolicyKind>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PolicyKind {
    /// Oldest ready order with oldest arrived courier.
    #[default]
    Fifo,
    /// Equal-key pairing with linear scans.
    KeyedExact,
    /// Equal-key pairing with ready orders grouped by key.
    KeyedIndexed,
}

impl PolicyKind {
    /// Builds an empty policy of this kind.
    #[must_use]
    pub fn build(self) -> Box<dyn MatchPolicy> {
        match self {
            Self::Fifo => Box::new(FifoPolicy::new()),
            Self::KeyedExact => Box::new(KeyedExactPolicy::new()),
            Self::KeyedIndexed => Box::new(KeyedIndexedPolicy::new()),
        }
    }

    /// Returns `true` for the policies that pair on equal keys.
    #[inline]
    #[must_use]
    pub fn is_keyed(self) -> bool {
        !matches!(self, Self::Fifo)
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Fifo => "fifo",
            Self::KeyedExact => "keyed-exact",
            Self::KeyedIndexed => "keyed-indexed",
        };
        f.write_str(name)
    }
}

/// Returned when a policy name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown match policy `{0}` (expected fifo, keyed-exact or keyed-indexed)")]
pub struct ParsePolicyError(pub String);

impl FromStr for PolicyKind {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fifo" => Ok(Self::Fifo),
            "keyed-exact" | "keyed_exact" | "exact" => Ok(Self::KeyedExact),
            "keyed-indexed" | "keyed_indexed" | "indexed" => Ok(Self::KeyedIndexed),
            _ => Err(ParsePolicyError(s.to_string())),
        }
    }
}
