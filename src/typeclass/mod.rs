//! Algebraic type classes for combining values.
//!
//! - [`Semigroup`]: an associative binary operation (`combine`)
//! - [`Monoid`]: a semigroup with an identity element (`empty`)
//!
//! [`PersistentSequence`](crate::persistent::PersistentSequence) is a monoid
//! under concatenation, with the empty sequence as its identity. `String` and
//! `Vec<T>` are provided as well so that generic code over monoids has the
//! usual collections to work with.
//!
//! # Examples
//!
//! ```rust
//! use rrb_sequence::persistent::PersistentSequence;
//! use rrb_sequence::typeclass::{Monoid, Semigroup};
//!
//! let chunks: Vec<PersistentSequence<i32>> = vec![
//!     (0..3).collect(),
//!     PersistentSequence::empty(),
//!     (3..5).collect(),
//! ];
//! let joined = PersistentSequence::combine_all(chunks);
//! assert_eq!(joined, (0..5).collect());
//!
//! let word = String::from("per").combine(String::from("sistent"));
//! assert_eq!(word, "persistent");
//! ```

mod monoid;
mod semigroup;

pub use monoid::Monoid;
pub use semigroup::Semigroup;
