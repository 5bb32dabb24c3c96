/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! Wait-time statistics.
//!
//! [`StatsAggregator`] accumulates, across all successful matches, how long
//! orders waited for a courier and how long couriers waited for an order.
//! Averages are reported in milliseconds over the number of orders
//! submitted and the size of the initial courier pool, so entities that were
//! never matched still count in the denominator.

use std::time::Duration;

/// Accumulator for match wait times.
///
/// # Examples
///
/// ```
/// use kitchen_dispatch::stats::StatsAggregator;
/// use std::time::Duration;
///
/// let mut stats = StatsAggregator::new(2, 1);
/// stats.record(Duration::from_millis(300), Duration::from_millis(0));
/// assert_eq!(stats.average_order_wait_ms(), Some(150.0));
/// assert_eq!(stats.average_courier_wait_ms(), Some(0.0));
///
/// let empty = StatsAggregator::new(0, 0);
/// assert_eq!(empty.average_order_wait_ms(), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StatsAggregator {
    order_wait_total: Duration,
    courier_wait_total: Duration,
    matches: u64,
    orders_submitted: usize,
    courier_pool: usize,
}

impl StatsAggregator {
    /// Creates an aggregator for a run with the given denominators.
    #[must_use]
    pub fn new(orders_submitted: usize, courier_pool: usize) -> Self {
        Self {
            orders_submitted,
            courier_pool,
            ..Self::default()
        }
    }

    /// Records the waits of one successful match.
    pub fn record(&mut self, order_wait: Duration, courier_wait: Duration) {
        self.order_wait_total = self.order_wait_total.saturating_add(order_wait);
        self.courier_wait_total = self.courier_wait_total.saturating_add(courier_wait);
        self.matches += 1;
    }

    #[inline]
    #[must_use]
    pub fn matches(&self) -> u64 {
        self.matches
    }

    #[must_use]
    pub fn order_wait_total(&self) -> Duration {
        self.order_wait_total
    }

    #[must_use]
    pub fn courier_wait_total(&self) -> Duration {
        self.courier_wait_total
    }

    /// Average order wait in milliseconds, `None` when no orders were submitted.
    #[must_use]
    pub fn average_order_wait_ms(&self) -> Option<f64> {
        average_ms(self.order_wait_total, self.orders_submitted)
    }

    /// Average courier wait in milliseconds, `None` when the pool was empty.
    #[must_use]
    pub fn average_courier_wait_ms(&self) -> Option<f64> {
        average_ms(self.courier_wait_total, self.courier_pool)
    }

    /// Copyable view of the current totals and averages.
    #[must_use]
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            matches: self.matches,
            orders_submitted: self.orders_submitted,
            courier_pool: self.courier_pool,
            order_wait_total: self.order_wait_total,
            courier_wait_total: self.courier_wait_total,
            average_order_wait_ms: self.average_order_wait_ms(),
            average_courier_wait_ms: self.average_courier_wait_ms(),
        }
    }
}

/// Point-in-time view of a [`StatsAggregator`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatsSnapshot {
    pub matches: u64,
    pub orders_submitted: usize,
    pub courier_pool: usize,
    pub order_wait_total: Duration,
    pub courier_wait_total: Duration,
    pub average_order_wait_ms: Option<f64>,
    pub average_courier_wait_ms: Option<f64>,
}

fn average_ms(total: Duration, count: usize) -> Option<f64> {
    if count == 0 {
        return None;
    }
    Some(total.as_secs_f64() * 1_000.0 / count as f64)
}
