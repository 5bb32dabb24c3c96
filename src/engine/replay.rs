/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

//! Deterministic replay engine for event journals.
//!
//! [`ReplayEngine`] reads a sequence of [`EngineEvent`]s from a [`Journal`]
//! and re-executes each command on a fresh [`DispatchBook`] at the recorded
//! simulation time. Dispatch decisions and matches depend only on command
//! order and timestamps, so the replayed book ends in the same state as the
//! original run.
//!
//! # Examples
//!
//! ```
//! use kitchen_dispatch::engine::journal::InMemoryJournal;
//! use kitchen_dispatch::engine::replay::{ReplayEngine, ReplayError};
//! use kitchen_dispatch::engine::DispatchBook;
//! use kitchen_dispatch::policy::PolicyKind;
//!
//! let journal = InMemoryJournal::new();
//! let fresh = DispatchBook::new(PolicyKind::Fifo, Vec::new(), 0);
//! assert!(matches!(
//!     ReplayEngine::replay_from(&journal, 0, fresh),
//!     Err(ReplayError::EmptyJournal)
//! ));
//! ```

use super::book::{DispatchBook, MatchRecord};
use super::event::EngineEvent;
use super::journal::Journal;
use thiserror::Error;

/// Errors that can occur during journal replay.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplayError {
    /// The journal contains no events to replay.
    #[error("journal is empty, nothing to replay")]
    EmptyJournal,

    /// The requested starting sequence number exceeds the journal's last entry.
    #[error("invalid from_sequence {from_sequence}: journal last sequence is {last_sequence}")]
    InvalidSequence {
        /// The sequence number requested.
        from_sequence: u64,
        /// The last sequence number in the journal.
        last_sequence: u64,
    },

    /// A gap was detected between expected and found sequence numbers.
    #[error("sequence gap detected: expected {expected}, found {found}")]
    SequenceGap {
        /// The expected next sequence number.
        expected: u64,
        /// The actual sequence number found.
        found: u64,
    },

    /// An event was appended behind the journal's last entry.
    #[error("event {found} appended out of order after {last_sequence}")]
    OutOfOrder {
        /// The last sequence number already stored.
        last_sequence: u64,
        /// The sequence number of the rejected event.
        found: u64,
    },

    /// Re-executing a command produced a different outcome than recorded.
    #[error("replay diverged from the recorded outcome at sequence {sequence_num}")]
    Diverged {
        /// The sequence number of the diverging event.
        sequence_num: u64,
    },
}

/// Stateless replay engine that reconstructs a [`DispatchBook`] from a [`Journal`].
///
/// All methods are associated functions; use it as a namespace.
pub struct ReplayEngine;

impl ReplayEngine {
    /// Replays all events from `from_sequence` onwards onto `book`.
    ///
    /// `book` must be in the state the recorded run was in just before
    /// `from_sequence`; for a full replay pass a freshly built book with the
    /// same policy, courier pool and order count. Snapshot events are
    /// skipped. Deferred submissions are re-applied, since they still put
    /// their entity into a waiting collection.
    ///
    /// Returns the book and the sequence number of the last applied event.
    ///
    /// # Errors
    ///
    /// - [`ReplayError::EmptyJournal`] if the journal has no events
    /// - [`ReplayError::InvalidSequence`] if `from_sequence` > last journal sequence
    /// - [`ReplayError::SequenceGap`] if the selected events are not contiguous
    /// - [`ReplayError::Diverged`] if a command's outcome differs from the recorded one
    pub fn replay_from(
        journal: &impl Journal,
        from_sequence: u64,
        book: DispatchBook,
    ) -> Result<(DispatchBook, u64), ReplayError> {
        Self::replay_from_with_progress(journal, from_sequence, book, |_, _| {})
    }

    /// Replays events with a progress callback invoked after each applied event.
    ///
    /// The callback receives `(events_applied, current_sequence)`.
    ///
    /// # Errors
    ///
    /// Same as [`replay_from`](Self::replay_from).
    pub fn replay_from_with_progress(
        journal: &impl Journal,
        from_sequence: u64,
        mut book: DispatchBook,
        progress: impl Fn(u64, u64),
    ) -> Result<(DispatchBook, u64), ReplayError> {
        Self::check_bounds(journal, from_sequence)?;

        let mut last_seq: Option<u64> = None;
        let mut count = 0u64;

        for event in journal.read_from(from_sequence) {
            if let Some(prev) = last_seq.filter(|prev| event.sequence_num != prev + 1) {
                return Err(ReplayError::SequenceGap {
                    expected: prev + 1,
                    found: event.sequence_num,
                });
            }
            Self::apply_event(&mut book, event)?;
            last_seq = Some(event.sequence_num);
            count = count.saturating_add(1);
            progress(count, event.sequence_num);
        }

        Ok((book, last_seq.unwrap_or(0)))
    }

    /// Returns the events with `from_sequence <= sequence_num <= to_sequence`.
    ///
    /// # Errors
    ///
    /// - [`ReplayError::EmptyJournal`] if the journal has no events
    /// - [`ReplayError::InvalidSequence`] if `from_sequence` > last journal sequence
    #[must_use = "returns the event slice, use it or it is wasted work"]
    pub fn replay_range(
        journal: &impl Journal,
        from_sequence: u64,
        to_sequence: u64,
    ) -> Result<Vec<&EngineEvent>, ReplayError> {
        Self::check_bounds(journal, from_sequence)?;
        Ok(journal.read_range(from_sequence, to_sequence).collect())
    }

    /// Replays the full journal onto `book` and compares the resulting match
    /// log with `expected`.
    ///
    /// Returns `Ok(true)` if every match is reproduced in order.
    ///
    /// # Errors
    ///
    /// Same as [`replay_from`](Self::replay_from).
    pub fn verify(
        journal: &impl Journal,
        book: DispatchBook,
        expected: &[MatchRecord],
    ) -> Result<bool, ReplayError> {
        let (book, _) = Self::replay_from(journal, 0, book)?;
        Ok(book.matches() == expected)
    }

    fn check_bounds(journal: &impl Journal, from_sequence: u64) -> Result<(), ReplayError> {
        if journal.is_empty() {
            return Err(ReplayError::EmptyJournal);
        }

        if let Some(last) = journal.last_sequence().filter(|last| from_sequence > *last) {
            return Err(ReplayError::InvalidSequence {
                from_sequence,
                last_sequence: last,
            });
        }
        Ok(())
    }

    /// Re-executes a single event on `book` and checks the outcome.
    fn apply_event(book: &mut DispatchBook, event: &EngineEvent) -> Result<(), ReplayError> {
        if !event.command.is_mutating() {
            return Ok(());
        }

        let replayed = book.execute(event.command.clone(), event.at);
        if !replayed.agrees_with(&event.result) {
            return Err(ReplayError::Diverged {
                sequence_num: event.sequence_num,
            });
        }
        Ok(())
    }
}
