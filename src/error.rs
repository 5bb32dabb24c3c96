/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! Error types.
//!
//! Only [`IngestionError`] is fatal. [`MatchError`]s are carried inside
//! engine results as deferrals: the entity stays where it is and is
//! reconsidered on the next triggering event.

use crate::engine::EngineError;
use crate::model::MatchKey;
use crate::policy::ParsePolicyError;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to load order or courier definitions.
#[derive(Debug, Error)]
pub enum IngestionError {
    /// The input file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input file is not a JSON array of the expected records.
    #[error("malformed records in {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Non-fatal outcome of a match or dispatch attempt that found no counterpart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    /// No eligible (order, courier) pair is waiting yet.
    #[error("not yet matchable (key {})", display_key(.key))]
    NotFound {
        /// The key that triggered the attempt, `None` for unkeyed policies.
        key: Option<MatchKey>,
    },

    /// No free courier could be dispatched for an order.
    #[error("no free courier for order {order_id} (key {key})")]
    DispatchUnavailable {
        order_id: String,
        key: MatchKey,
    },
}

fn display_key(key: &Option<MatchKey>) -> String {
    key.map_or_else(|| "any".to_string(), |k| k.to_string())
}

/// Crate-level error.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Ingestion(#[from] IngestionError),

    #[error(transparent)]
    Policy(#[from] ParsePolicyError),

    #[error("matching engine unavailable: {0}")]
    Engine(#[from] EngineError),

    /// A lifecycle task panicked or was aborted.
    #[error("lifecycle task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
