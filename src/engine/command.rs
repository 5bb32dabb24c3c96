/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! Engine command types.
//!
//! This module defines the commands lifecycle tasks submit to the
//! [`MatchingEngine`](super::MatchingEngine) for serialized execution on the
//! [`DispatchBook`](super::DispatchBook).

use crate::model::{Courier, MatchKey, Order};

/// Commands that can be submitted to the matching engine.
///
/// # Examples
///
/// ```
/// use kitchen_dispatch::engine::EngineCommand;
/// use kitchen_dispatch::model::Order;
///
/// let order = Order::new("A", "Pad Thai", 3);
/// let command = EngineCommand::DispatchCourier {
///     order_id: order.id.clone(),
///     key: order.key(),
/// };
/// assert_eq!(command.label(), "dispatch_courier");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCommand {
    /// Take a courier out of the free pool for an order.
    DispatchCourier {
        /// Order the courier is dispatched for.
        order_id: String,
        /// The order's matching key.
        key: MatchKey,
    },

    /// Add a prepared order to the ready collection and try to match it.
    SubmitReadyOrder(Order),

    /// Add an arrived courier to the arrived collection and try to match it.
    SubmitArrivedCourier(Courier),

    /// Capture a read-only view of the book.
    Snapshot,
}

impl EngineCommand {
    /// Short name for logging.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::DispatchCourier { .. } => "dispatch_courier",
            Self::SubmitReadyOrder(_) => "submit_ready_order",
            Self::SubmitArrivedCourier(_) => "submit_arrived_courier",
            Self::Snapshot => "snapshot",
        }
    }

    /// Returns `true` if executing the command can change the book.
    #[inline]
    #[must_use]
    pub fn is_mutating(&self) -> bool {
        !matches!(self, Self::Snapshot)
    }
}
