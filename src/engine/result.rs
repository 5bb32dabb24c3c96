/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! Engine result types.

use super::book::{BookSnapshot, MatchRecord};
use crate::error::MatchError;
use crate::model::Courier;

/// Result of executing an engine command.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineResult {
    /// A courier left the free pool and is now travelling.
    CourierDispatched {
        /// The dispatched courier, handed to its travel task.
        courier: Courier,
    },

    /// A submission completed a match.
    OrderPicked {
        /// Details of the pickup.
        record: MatchRecord,
    },

    /// Read-only view of the book.
    Snapshot {
        snapshot: BookSnapshot,
    },

    /// Nothing eligible yet. Non-fatal: any inserted entity keeps waiting.
    Deferred {
        /// Why the command could not complete a dispatch or match.
        reason: MatchError,
    },
}

impl EngineResult {
    /// Returns `true` unless the command was deferred.
    #[inline]
    #[must_use]
    pub fn is_success(&self) -> bool {
        !self.is_deferred()
    }

    /// Returns `true` if the command was deferred.
    #[inline]
    #[must_use]
    pub fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred { .. })
    }

    /// The match record, if this result completed a pickup.
    #[must_use]
    pub fn match_record(&self) -> Option<&MatchRecord> {
        match self {
            Self::OrderPicked { record } => Some(record),
            _ => None,
        }
    }

    /// Returns `true` if a replayed result has the same outcome as a recorded one.
    ///
    /// Snapshots always agree since they carry no decision.
    #[must_use]
    pub fn agrees_with(&self, recorded: &EngineResult) -> bool {
        match (self, recorded) {
            (Self::CourierDispatched { courier: a }, Self::CourierDispatched { courier: b }) => {
                a.name == b.name
            }
            (Self::OrderPicked { record: a }, Self::OrderPicked { record: b }) => a == b,
            (Self::Deferred { reason: a }, Self::Deferred { reason: b }) => a == b,
            (Self::Snapshot { .. }, Self::Snapshot { .. }) => true,
            _ => false,
        }
    }
}
