/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

use super::key::MatchKey;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Lifecycle state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OrderState {
    /// Ingested, not yet in the kitchen.
    #[default]
    Received,
    /// Being prepared.
    Preparing,
    /// Prepared and waiting in the ready collection.
    Ready,
    /// Handed to a courier. Terminal.
    Picked,
}

/// A kitchen order.
///
/// Deserializes from `{ "id", "name", "prepTime" }`; the remaining fields
/// start at their defaults and are filled in as the order moves through
/// its lifecycle.
///
/// # Examples
///
/// ```
/// use kitchen_dispatch::model::{Order, OrderState};
///
/// let order: Order =
///     serde_json::from_str(r#"{"id":"A","name":"Banana Bread","prepTime":4}"#).unwrap();
/// assert_eq!(order.prep_time, 4);
/// assert_eq!(order.state, OrderState::Received);
/// assert!(order.ready_at.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Unique order identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Preparation time in time units. Also the order's matching key.
    pub prep_time: i64,

    #[serde(skip)]
    pub state: OrderState,

    /// When the order entered the ready collection.
    #[serde(skip)]
    pub ready_at: Option<Duration>,

    /// When the order was matched with a courier.
    #[serde(skip)]
    pub picked_at: Option<Duration>,
}

impl Order {
    /// Creates a freshly received order.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, prep_time: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            prep_time,
            state: OrderState::Received,
            ready_at: None,
            picked_at: None,
        }
    }

    /// The key keyed policies match this order on.
    #[inline]
    #[must_use]
    pub fn key(&self) -> MatchKey {
        MatchKey::new(self.prep_time)
    }

    pub fn mark_preparing(&mut self) {
        self.state = OrderState::Preparing;
    }

    pub fn mark_ready(&mut self, at: Duration) {
        self.state = OrderState::Ready;
        self.ready_at = Some(at);
    }

    pub fn mark_picked(&mut self, at: Duration) {
        self.state = OrderState::Picked;
        self.picked_at = Some(at);
    }

    /// Time spent in the ready collection up to `now`.
    ///
    /// Zero if the order was never marked ready.
    #[must_use]
    pub fn wait_until(&self, now: Duration) -> Duration {
        self.ready_at
            .map_or(Duration::ZERO, |ready| now.saturating_sub(ready))
    }
}
