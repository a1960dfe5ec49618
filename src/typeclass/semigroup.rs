//! Semigroup type class - types with an associative binary operation.
//!
//! # Laws
//!
//! For all `a`, `b`, `c` of type `T`:
//!
//! ## Associativity
//!
//! ```text
//! (a.combine(b)).combine(c) == a.combine(b.combine(c))
//! ```

/// A type class for types with an associative binary operation.
///
/// # Examples
///
/// ```rust
/// use rrb_sequence::persistent::PersistentSequence;
/// use rrb_sequence::typeclass::Semigroup;
///
/// let left: PersistentSequence<i32> = (0..3).collect();
/// let right: PersistentSequence<i32> = (3..6).collect();
/// assert_eq!(left.combine(right), (0..6).collect());
/// ```
pub trait Semigroup {
    /// Combines two values into one. Must be associative.
    #[must_use]
    fn combine(self, other: Self) -> Self;

    /// Combines two borrowed values into a new one.
    ///
    /// The default implementation clones both operands and calls
    /// [`combine`](Self::combine). Structurally shared types override it to
    /// avoid the clones.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rrb_sequence::typeclass::Semigroup;
    ///
    /// let first = vec![1, 2];
    /// let second = vec![3];
    /// assert_eq!(first.combine_ref(&second), vec![1, 2, 3]);
    /// assert_eq!(first, vec![1, 2]);
    /// ```
    #[must_use]
    fn combine_ref(&self, other: &Self) -> Self
    where
        Self: Clone,
    {
        self.clone().combine(other.clone())
    }

    /// Reduces the values of an iterator from left to right.
    ///
    /// Returns `None` if the iterator is empty. See
    /// [`Monoid::combine_all`](super::Monoid::combine_all) for a total version.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rrb_sequence::typeclass::Semigroup;
    ///
    /// let parts = vec![String::from("a"), String::from("b")];
    /// assert_eq!(String::reduce_all(parts), Some(String::from("ab")));
    /// assert_eq!(String::reduce_all(Vec::new()), None);
    /// ```
    fn reduce_all<I>(iterator: I) -> Option<Self>
    where
        I: IntoIterator<Item = Self>,
        Self: Sized,
    {
        iterator
            .into_iter()
            .reduce(|accumulator, element| accumulator.combine(element))
    }
}

impl Semigroup for String {
    fn combine(mut self, other: Self) -> Self {
        self.push_str(&other);
        self
    }

    fn combine_ref(&self, other: &Self) -> Self {
        let mut result = Self::with_capacity(self.len() + other.len());
        result.push_str(self);
        result.push_str(other);
        result
    }
}

impl<T: Clone> Semigroup for Vec<T> {
    fn combine(mut self, mut other: Self) -> Self {
        self.append(&mut other);
        self
    }

    fn combine_ref(&self, other: &Self) -> Self {
        let mut result = Self::with_capacity(self.len() + other.len());
        result.extend_from_slice(self);
        result.extend_from_slice(other);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistent::PersistentSequence;
    use rstest::rstest;

    #[rstest]
    fn string_combine_concatenates() {
        assert_eq!(String::from("ab").combine(String::from("cd")), "abcd");
    }

    #[rstest]
    fn vec_combine_ref_preserves_operands() {
        let first = vec![1];
        let second = vec![2, 3];
        assert_eq!(first.combine_ref(&second), vec![1, 2, 3]);
        assert_eq!(second, vec![2, 3]);
    }

    #[rstest]
    fn sequence_combine_ref_shares_operands() {
        let left: PersistentSequence<i32, 4> = (0..10).collect();
        let right: PersistentSequence<i32, 4> = (10..20).collect();
        let combined = left.combine_ref(&right);
        assert_eq!(combined.len(), 20);
        assert_eq!(left.len(), 10);
        assert_eq!(combined.get(15), Some(&15));
    }

    #[rstest]
    fn sequence_reduce_all() {
        let parts: Vec<PersistentSequence<i32, 4>> =
            (0..5).map(|start| (start * 3..start * 3 + 3).collect()).collect();
        let reduced = PersistentSequence::reduce_all(parts);
        assert_eq!(reduced, Some((0..15).collect()));
    }

    #[rstest]
    fn reduce_all_of_nothing_is_none() {
        let parts: Vec<PersistentSequence<i32>> = Vec::new();
        assert_eq!(PersistentSequence::reduce_all(parts), None);
    }
}
