//! Persistent (immutable) data structures.
//!
//! - [`PersistentSequence`]: indexable sequence on a relaxed radix-balanced
//!   tree with logarithmic concatenation
//! - [`TransientSequence`]: single-owner builder that produces a
//!   [`PersistentSequence`] in one pass
//!
//! # Structural Sharing
//!
//! Nodes are never modified once a sequence refers to them. Updating,
//! appending, removing and concatenating allocate new nodes only along the
//! affected paths and share every other subtree with the input.
//!
//! # Examples
//!
//! ```rust
//! use rrb_sequence::persistent::PersistentSequence;
//!
//! let sequence: PersistentSequence<i32> = (0..100).collect();
//! let updated = sequence.assign(50, 999);
//!
//! assert_eq!(sequence.get(50), Some(&50));   // Original unchanged
//! assert_eq!(updated.get(50), Some(&999));   // New version
//!
//! let holed = updated.remove(10);
//! assert_eq!(holed.get(10), None);
//! assert_eq!(holed.len(), 100);              // Holes keep their position
//! ```

// =============================================================================
// Reference Counter Type Alias
// =============================================================================

/// Reference-counted smart pointer type.
///
/// When the `arc` feature is enabled, this is `std::sync::Arc`,
/// which is thread-safe but has slightly higher overhead.
///
/// When the `arc` feature is disabled (default), this is `std::rc::Rc`,
/// which is faster but not thread-safe.
#[cfg(feature = "arc")]
pub(crate) type ReferenceCounter<T> = std::sync::Arc<T>;

#[cfg(not(feature = "arc"))]
pub(crate) type ReferenceCounter<T> = std::rc::Rc<T>;

mod sequence;

pub use sequence::DEFAULT_WIDTH;
pub use sequence::PersistentSequence;
pub use sequence::PersistentSequenceIterator;
pub use sequence::PersistentSequenceSlots;
pub use sequence::SequenceError;
pub use sequence::Slot;
pub use sequence::TransientSequence;

// =============================================================================
// Tests
// =============================================================================
