//! The tensor capability set.

use std::fmt;

use itertools::{EitherOrBoth, Itertools};

use crate::Scalar;

/// A container mapping keys of a fixed *domain* to values of a [`Scalar`] type.
///
/// This is the capability interface every container implements to take part in the generic
/// map/join/operator machinery. A container is either *dense* (every key of the domain has an
/// explicitly stored value) or *sparse* (only some keys are stored, and all others implicitly hold
/// [`Scalar::ZERO`]).
///
/// # Key order
///
/// Both traversal primitives, [`Tensor::iter`] and [`Tensor::iter_non_zero`], must yield keys in
/// strictly ascending order. For matrices this is row-major order. The join machinery relies on
/// this to merge the explicit entries of two containers in a single pass.
///
/// # Domains
///
/// The domain is fixed when the container is constructed. Builders created by
/// [`Tensor::new_builder`] produce containers with the same domain, and assigning a key outside of
/// it is a programming error.
pub trait Tensor {
    /// The key type, eg. `usize` for vectors or `(usize, usize)` for matrices.
    type Key: Copy + Ord + fmt::Debug;
    /// The element type.
    type Value: Scalar;
    /// Describes the set of valid keys, eg. the length of a vector.
    type Domain: Copy + PartialEq + fmt::Debug;

    /// The same kind of container, holding values of type `V`.
    type Like<V: Scalar>: Tensor<Key = Self::Key, Value = V, Domain = Self::Domain>;

    /// Builder producing a [`Tensor::Like`] container.
    type Builder<V: Scalar>: TensorBuilder<Key = Self::Key, Value = V, Output = Self::Like<V>>;

    /// Iterator over every key of the domain.
    type Iter<'a>: Iterator<Item = (Self::Key, Self::Value)>
    where
        Self: 'a;

    /// Iterator over the explicitly stored entries.
    type IterNonZero<'a>: Iterator<Item = (Self::Key, Self::Value)>
    where
        Self: 'a;

    /// Returns the domain of this container.
    fn domain(&self) -> Self::Domain;

    /// Returns the number of keys in the domain.
    fn size(&self) -> usize;

    /// Returns the number of explicitly stored entries.
    ///
    /// For dense containers, this is the same as [`Tensor::size`].
    fn stored_len(&self) -> usize;

    /// Returns the value stored at `key`, or [`Scalar::ZERO`] if `key` is not stored explicitly.
    ///
    /// # Panics
    ///
    /// Panics if `key` is outside of the container's domain.
    fn get(&self, key: Self::Key) -> Self::Value;

    /// Returns an iterator visiting every key of the domain, including implicit zeros.
    fn iter(&self) -> Self::Iter<'_>;

    /// Returns an iterator visiting only the explicitly stored entries.
    fn iter_non_zero(&self) -> Self::IterNonZero<'_>;

    /// Creates an empty builder for a container of the same kind and domain as `self`.
    fn new_builder<V: Scalar>(&self) -> Self::Builder<V>;
}

/// Accumulates key-value assignments and produces a container.
///
/// A builder is created by [`Tensor::new_builder`], owned by the operation that created it, and
/// consumed by [`TensorBuilder::finish`].
pub trait TensorBuilder {
    type Key;
    type Value;
    type Output;

    /// Assigns `value` to `key`.
    ///
    /// If `key` was already assigned, the new value replaces the old one. Keys that are never
    /// assigned hold zero in the finished container.
    ///
    /// # Panics
    ///
    /// Panics if `key` lies outside of the builder's domain.
    fn set(&mut self, key: Self::Key, value: Self::Value);

    /// Finishes the builder, returning the built container.
    fn finish(self) -> Self::Output;
}

/// Compares two containers entry by entry.
///
/// Returns `true` if both have the same domain and every key maps to equal values, regardless of
/// which entries are stored explicitly.
pub fn entries_eq<A, B>(a: &A, b: &B) -> bool
where
    A: Tensor + ?Sized,
    B: Tensor<Key = A::Key, Value = A::Value, Domain = A::Domain> + ?Sized,
{
    if a.domain() != b.domain() {
        return false;
    }
    a.iter_non_zero()
        .merge_join_by(b.iter_non_zero(), |(ka, _), (kb, _)| ka.cmp(kb))
        .all(|entry| match entry {
            EitherOrBoth::Both((_, x), (_, y)) => x == y,
            EitherOrBoth::Left((_, x)) => x == <A::Value as Scalar>::ZERO,
            EitherOrBoth::Right((_, y)) => y == <A::Value as Scalar>::ZERO,
        })
}
