/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! Order and courier entities.
//!
//! Both entities are passive records: their only behavior is recording
//! timestamps on state transitions. Timestamps are [`Duration`] offsets from
//! the run's simulation clock origin (see [`SimClock`]).
//!
//! [`Duration`]: std::time::Duration

pub mod clock;
pub mod courier;
pub mod key;
pub mod order;

pub use clock::SimClock;
pub use courier::{Courier, CourierState};
pub use key::MatchKey;
pub use order::{Order, OrderState};
