/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! Matching key shared by orders and couriers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// The value keyed policies require to be equal on both sides of a match.
///
/// A key is an order's prep time or a courier's arrival time, expressed in
/// whole time units. Values are taken verbatim from the input: zero and
/// negative keys are legal.
///
/// # Examples
///
/// ```
/// use kitchen_dispatch::model::MatchKey;
/// use std::time::Duration;
///
/// let key = MatchKey::new(3);
/// assert_eq!(key.delay(Duration::from_millis(10)), Duration::from_millis(30));
/// assert_eq!(MatchKey::new(-2).delay(Duration::from_secs(1)), Duration::ZERO);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MatchKey(i64);

impl MatchKey {
    /// Creates a key from a raw number of time units.
    #[inline]
    #[must_use]
    pub const fn new(units: i64) -> Self {
        Self(units)
    }

    /// Returns the raw number of time units.
    #[inline]
    #[must_use]
    pub const fn units(self) -> i64 {
        self.0
    }

    /// Returns the simulated delay for this key.
    ///
    /// Negative keys clamp to an immediate transition.
    #[must_use]
    pub fn delay(self, time_unit: Duration) -> Duration {
        let units = u32::try_from(self.0.max(0)).unwrap_or(u32::MAX);
        time_unit.saturating_mul(units)
    }
}

impl fmt::Display for MatchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
