//! # rrb-sequence
//!
//! A persistent (immutable, structurally shared) indexable sequence backed by
//! a relaxed radix-balanced tree.
//!
//! ## Overview
//!
//! [`PersistentSequence`](persistent::PersistentSequence) supports:
//!
//! - O(log n) random access, assign, update and append
//! - O(log n) concatenation of two independently built sequences
//! - Holes: removed slots that keep their position and count toward length
//! - Traversals that skip holes: iterate, transform, transform-to-vec, select
//!
//! Every operation returns a new sequence and shares all untouched subtrees
//! with its input.
//!
//! ## Feature Flags
//!
//! - `typeclass` (default): `Semigroup` and `Monoid` type classes
//! - `arc`: use `Arc` instead of `Rc` so sequences are `Send + Sync`
//!
//! ## Example
//!
//! ```rust
//! use rrb_sequence::prelude::*;
//!
//! let left: PersistentSequence<i32> = (0..100).collect();
//! let right: PersistentSequence<i32> = (100..200).collect();
//! let joined = left.concat(&right);
//!
//! assert_eq!(joined.len(), 200);
//! assert_eq!(joined.get(150), Some(&150));
//! assert_eq!(left.len(), 100); // operands are untouched
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use rrb_sequence::prelude::*;
/// ```
pub mod prelude {
    pub use crate::persistent::*;

    #[cfg(feature = "typeclass")]
    pub use crate::typeclass::*;
}

pub mod persistent;

#[cfg(feature = "typeclass")]
pub mod typeclass;
