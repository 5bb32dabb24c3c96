/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 18/10/26
******************************************************************************/

use super::result::EngineResult;

/// Receipt returned to the submitter of an engine command.
///
/// # Examples
///
/// ```
/// use kitchen_dispatch::engine::{EngineReceipt, EngineResult};
/// use kitchen_dispatch::error::MatchError;
///
/// let receipt = EngineReceipt::new(
///     42,
///     EngineResult::Deferred { reason: MatchError::NotFound { key: None } },
/// );
/// assert_eq!(receipt.sequence_num, 42);
/// assert!(!receipt.is_success());
/// ```
#[derive(Debug)]
pub struct EngineReceipt {
    /// The sequence number assigned to the command.
    pub sequence_num: u64,

    /// The result of executing the command.
    pub result: EngineResult,
}

impl EngineReceipt {
    #[must_use]
    pub fn new(sequence_num: u64, result: EngineResult) -> Self {
        Self {
            sequence_num,
            result,
        }
    }

    /// Returns `true` if the command was not deferred.
    #[inline]
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.result.is_success()
    }
}
