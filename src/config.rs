/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! Run configuration.
//!
//! Input locations are fixed constants. The only value read from the
//! environment is the match policy, via [`POLICY_ENV_VAR`].

use crate::engine::DEFAULT_CHANNEL_CAPACITY;
use crate::error::DispatchError;
use crate::policy::PolicyKind;
use std::path::PathBuf;
use std::time::Duration;

/// Orders input file.
pub const ORDERS_PATH: &str = "./dispatch_orders.json";

/// Couriers input file.
pub const COURIERS_PATH: &str = "./couriers.json";

/// Environment variable selecting the match policy.
pub const POLICY_ENV_VAR: &str = "KITCHEN_DISPATCH_POLICY";

/// Settings for a dispatch run.
///
/// # Examples
///
/// ```
/// use kitchen_dispatch::config::DispatchConfig;
/// use kitchen_dispatch::policy::PolicyKind;
/// use std::time::Duration;
///
/// let config = DispatchConfig::default()
///     .with_policy(PolicyKind::KeyedExact)
///     .with_time_unit(Duration::from_millis(10));
/// assert_eq!(config.throttle_every, 2);
/// assert_eq!(config.throttle_pause_duration(), Duration::from_millis(10));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchConfig {
    pub policy: PolicyKind,

    /// Wall-clock length of one prep/arrival time unit.
    pub time_unit: Duration,

    /// Pause after every `throttle_every`-th order is spawned. Zero disables throttling.
    pub throttle_every: usize,

    /// Length of each throttle pause, in time units.
    pub throttle_pause: u32,

    /// Engine command channel capacity.
    pub channel_capacity: usize,

    /// Record every engine event for replay.
    pub record_journal: bool,

    pub orders_path: PathBuf,
    pub couriers_path: PathBuf,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            policy: PolicyKind::default(),
            time_unit: Duration::from_secs(1),
            throttle_every: 2,
            throttle_pause: 1,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            record_journal: true,
            orders_path: PathBuf::from(ORDERS_PATH),
            couriers_path: PathBuf::from(COURIERS_PATH),
        }
    }
}

impl DispatchConfig {
    /// Defaults, with the policy overridden from [`POLICY_ENV_VAR`] if set.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Policy`] if the variable names no known policy.
    pub fn from_env() -> Result<Self, DispatchError> {
        Self::from_policy_var(std::env::var(POLICY_ENV_VAR).ok().as_deref())
    }

    /// Defaults, with the policy parsed from `value` when present.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Policy`] if `value` names no known policy.
    pub fn from_policy_var(value: Option<&str>) -> Result<Self, DispatchError> {
        let mut config = Self::default();
        if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
            config.policy = value.parse()?;
        }
        Ok(config)
    }

    #[must_use]
    pub fn with_policy(mut self, policy: PolicyKind) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn with_time_unit(mut self, time_unit: Duration) -> Self {
        self.time_unit = time_unit;
        self
    }

    #[must_use]
    pub fn with_throttle(mut self, every: usize, pause_units: u32) -> Self {
        self.throttle_every = every;
        self.throttle_pause = pause_units;
        self
    }

    #[must_use]
    pub fn with_journal(mut self, record: bool) -> Self {
        self.record_journal = record;
        self
    }

    #[must_use]
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity;
        self
    }

    /// Wall-clock length of one throttle pause.
    #[must_use]
    pub fn throttle_pause_duration(&self) -> Duration {
        self.time_unit.saturating_mul(self.throttle_pause)
    }

    /// Returns `true` if a pause is due after spawning the order at `index`.
    #[must_use]
    pub fn should_throttle_after(&self, index: usize) -> bool {
        self.throttle_every != 0 && index != 0 && index % self.throttle_every == 0
    }
}
