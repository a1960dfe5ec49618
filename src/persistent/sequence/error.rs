//! Error types for [`PersistentSequence`](super::PersistentSequence).

use thiserror::Error;

/// Errors reported by the fallible sequence operations.
///
/// Lookups never fail: an index past the end or a hole yields `None`.
/// The only rejected argument is an index that cannot become part of a
/// sequence because the resulting length would not fit in `usize`.
///
/// # Examples
///
/// ```rust
/// use rrb_sequence::persistent::{PersistentSequence, SequenceError};
///
/// let sequence: PersistentSequence<i32> = PersistentSequence::new();
/// let error = sequence.try_assign(usize::MAX, 1).unwrap_err();
/// assert_eq!(error, SequenceError::IndexOverflow { index: usize::MAX });
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceError {
    /// Assigning at `index` would need a length of `index + 1`, which overflows.
    #[error("index {index} is not addressable: a length of index + 1 overflows usize")]
    IndexOverflow {
        /// The rejected index.
        index: usize,
    },
}
