/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

use std::time::Duration;
use tokio::time::Instant;

/// Monotonic clock anchored at the start of a run.
///
/// Built on [`tokio::time::Instant`] so that tests running with a paused
/// runtime observe simulated rather than wall-clock time.
#[derive(Debug, Clone, Copy)]
pub struct SimClock {
    origin: Instant,
}

impl SimClock {
    /// Starts a clock at the current instant.
    #[must_use]
    pub fn start() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    /// Time elapsed since the clock was started.
    #[inline]
    #[must_use]
    pub fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::start()
    }
}
