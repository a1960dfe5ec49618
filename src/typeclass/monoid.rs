//! Monoid type class - semigroups with an identity element.
//!
//! # Laws
//!
//! In addition to associativity, for all `a`:
//!
//! ```text
//! T::empty().combine(a) == a   // left identity
//! a.combine(T::empty()) == a   // right identity
//! ```

use super::semigroup::Semigroup;

/// A type class for semigroups with an identity element.
///
/// # Examples
///
/// ```rust
/// use rrb_sequence::persistent::PersistentSequence;
/// use rrb_sequence::typeclass::{Monoid, Semigroup};
///
/// let sequence: PersistentSequence<i32> = (0..4).collect();
/// assert_eq!(PersistentSequence::empty().combine(sequence.clone()), sequence);
/// ```
pub trait Monoid: Semigroup {
    /// Returns the identity element.
    fn empty() -> Self;

    /// Combines all values of an iterator, starting from
    /// [`empty`](Self::empty).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rrb_sequence::typeclass::Monoid;
    ///
    /// assert_eq!(Vec::combine_all(vec![vec![1], vec![], vec![2, 3]]), vec![1, 2, 3]);
    /// assert_eq!(String::combine_all(Vec::new()), "");
    /// ```
    fn combine_all<I>(iterator: I) -> Self
    where
        I: IntoIterator<Item = Self>,
        Self: Sized,
    {
        iterator
            .into_iter()
            .fold(Self::empty(), |accumulator, element| {
                accumulator.combine(element)
            })
    }
}

impl Monoid for String {
    fn empty() -> Self {
        Self::new()
    }
}

impl<T: Clone> Monoid for Vec<T> {
    fn empty() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistent::PersistentSequence;
    use rstest::rstest;

    #[rstest]
    fn string_identity() {
        let value = String::from("seq");
        assert_eq!(String::empty().combine(value.clone()), value);
        assert_eq!(value.clone().combine(String::empty()), value);
    }

    #[rstest]
    fn sequence_identity_shares_root() {
        let sequence: PersistentSequence<i32, 4> = (0..9).collect();
        let left = PersistentSequence::empty().combine(sequence.clone());
        let right = sequence.clone().combine(PersistentSequence::empty());
        assert_eq!(left, sequence);
        assert_eq!(right, sequence);
    }

    #[rstest]
    fn sequence_combine_all_of_nothing_is_empty() {
        let parts: Vec<PersistentSequence<i32>> = Vec::new();
        assert!(PersistentSequence::combine_all(parts).is_empty());
    }
}
