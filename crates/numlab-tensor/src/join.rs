//! Pairwise combination of two tensors over a shared domain.

use itertools::{EitherOrBoth, Itertools};

use crate::{Error, Scalar, Tensor, TensorBuilder};

/// Selects which keys a join visits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinStrategy {
    /// Visit every key of the domain.
    All,
    /// Visit every key that is stored explicitly in *either* operand.
    ///
    /// Where only one side stores a key, the other side contributes its implicit zero. Keys stored
    /// by neither operand are left at zero, so the combining function must satisfy
    /// `f(0, 0) == 0`.
    EitherNonZero,
    /// Visit only keys stored explicitly in *both* operands.
    ///
    /// Requires `f(x, 0) == 0` and `f(0, y) == 0` for all `x` and `y`.
    BothNonZero,
}

/// Combines `a` and `b` with `f`, visiting the keys selected by `strategy`.
///
/// The result is a container of the same kind as `a`. `f` is called at most once per key, even if
/// both operands store that key.
///
/// # Errors
///
/// Returns [`Error::DomainMismatch`] before calling `f` if the domains of `a` and `b` differ.
///
/// # Examples
///
/// ```
/// # use numlab_tensor::*;
/// let a = SparseVector::<f64>::from_entries(4, [(0, 1.0), (2, 2.0)]).unwrap();
/// let b = SparseVector::<f64>::from_entries(4, [(2, 10.0), (3, 20.0)]).unwrap();
/// let sum = join(JoinStrategy::EitherNonZero, &a, &b, |x, y| x + y).unwrap();
/// assert_eq!(sum.stored_len(), 3);
/// assert_eq!(sum.get(2), 12.0);
/// assert_eq!(sum.get(1), 0.0);
/// ```
pub fn join<A, B, V, F>(strategy: JoinStrategy, a: &A, b: &B, mut f: F) -> Result<A::Like<V>, Error>
where
    A: Tensor + ?Sized,
    B: Tensor<Key = A::Key, Domain = A::Domain> + ?Sized,
    V: Scalar,
    F: FnMut(A::Value, B::Value) -> V,
{
    try_join(strategy, a, b, |x, y| Ok(f(x, y)))
}

/// Fallible version of [`join`].
///
/// The first error returned by `f` is returned unchanged, and the partially built result is
/// discarded. A domain mismatch is reported through `E`'s [`From<Error>`] impl.
pub fn try_join<A, B, V, E, F>(
    strategy: JoinStrategy,
    a: &A,
    b: &B,
    mut f: F,
) -> Result<A::Like<V>, E>
where
    A: Tensor + ?Sized,
    B: Tensor<Key = A::Key, Domain = A::Domain> + ?Sized,
    V: Scalar,
    E: From<Error>,
    F: FnMut(A::Value, B::Value) -> Result<V, E>,
{
    if a.domain() != b.domain() {
        return Err(Error::domain_mismatch(&a.domain(), &b.domain()).into());
    }

    let mut builder = a.new_builder::<V>();
    match strategy {
        JoinStrategy::All => {
            for ((key, x), (other, y)) in a.iter().zip_eq(b.iter()) {
                debug_assert_eq!(key, other);
                builder.set(key, f(x, y)?);
            }
        }
        JoinStrategy::EitherNonZero => {
            for entry in a
                .iter_non_zero()
                .merge_join_by(b.iter_non_zero(), |(ka, _), (kb, _)| ka.cmp(kb))
            {
                let (key, value) = match entry {
                    EitherOrBoth::Both((key, x), (_, y)) => (key, f(x, y)?),
                    EitherOrBoth::Left((key, x)) => (key, f(x, b.get(key))?),
                    EitherOrBoth::Right((key, y)) => (key, f(a.get(key), y)?),
                };
                builder.set(key, value);
            }
        }
        JoinStrategy::BothNonZero => {
            for entry in a
                .iter_non_zero()
                .merge_join_by(b.iter_non_zero(), |(ka, _), (kb, _)| ka.cmp(kb))
            {
                if let EitherOrBoth::Both((key, x), (_, y)) = entry {
                    builder.set(key, f(x, y)?);
                }
            }
        }
    }
    Ok(builder.finish())
}

/// Combines every key of the domain. See [`JoinStrategy::All`].
pub fn join_all<A, B, V, F>(a: &A, b: &B, f: F) -> Result<A::Like<V>, Error>
where
    A: Tensor + ?Sized,
    B: Tensor<Key = A::Key, Domain = A::Domain> + ?Sized,
    V: Scalar,
    F: FnMut(A::Value, B::Value) -> V,
{
    join(JoinStrategy::All, a, b, f)
}

/// Combines every key stored by either operand. See [`JoinStrategy::EitherNonZero`].
pub fn join_either_non_zero<A, B, V, F>(a: &A, b: &B, f: F) -> Result<A::Like<V>, Error>
where
    A: Tensor + ?Sized,
    B: Tensor<Key = A::Key, Domain = A::Domain> + ?Sized,
    V: Scalar,
    F: FnMut(A::Value, B::Value) -> V,
{
    join(JoinStrategy::EitherNonZero, a, b, f)
}

/// Combines only the keys stored by both operands. See [`JoinStrategy::BothNonZero`].
pub fn join_both_non_zero<A, B, V, F>(a: &A, b: &B, f: F) -> Result<A::Like<V>, Error>
where
    A: Tensor + ?Sized,
    B: Tensor<Key = A::Key, Domain = A::Domain> + ?Sized,
    V: Scalar,
    F: FnMut(A::Value, B::Value) -> V,
{
    join(JoinStrategy::BothNonZero, a, b, f)
}
