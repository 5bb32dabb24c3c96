/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! Engine event types.
//!
//! This module defines the events emitted by the matching engine after
//! executing each command.

use super::command::EngineCommand;
use super::result::EngineResult;
use std::time::Duration;

/// Event emitted after executing an engine command.
///
/// Contains the sequence number, simulation timestamp, original command and
/// result. Events are emitted in sequence order and carry everything needed
/// to replay a run deterministically.
///
/// # Examples
///
/// ```
/// use kitchen_dispatch::engine::{EngineCommand, EngineEvent, EngineResult};
/// use kitchen_dispatch::error::MatchError;
/// use std::time::Duration;
///
/// let event = EngineEvent::new(
///     1,
///     Duration::ZERO,
///     EngineCommand::Snapshot,
///     EngineResult::Deferred { reason: MatchError::NotFound { key: None } },
/// );
/// assert_eq!(event.sequence_num, 1);
/// ```
#[derive(Debug, Clone)]
pub struct EngineEvent {
    /// Monotonically increasing sequence number.
    pub sequence_num: u64,

    /// Simulation time at which the command was executed.
    pub at: Duration,

    /// The command that was executed.
    pub command: EngineCommand,

    /// The result of executing the command.
    pub result: EngineResult,
}

impl EngineEvent {
    /// Creates a new engine event.
    #[must_use]
    pub fn new(sequence_num: u64, at: Duration, command: EngineCommand, result: EngineResult) -> Self {
        Self {
            sequence_num,
            at,
            command,
            result,
        }
    }
}
