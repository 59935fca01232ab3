//! Elementwise and key-value mapping.
//!
//! Every [`Tensor`] gets the methods of [`TensorMap`] via a blanket impl. Each method comes in a
//! *dense* flavor, which visits every key of the domain, and a *non-zero* flavor, which only
//! visits the explicitly stored entries and leaves all other keys at zero. The non-zero flavor is
//! only correct if the mapping function maps zero to zero.

use std::convert::Infallible;

use crate::{Scalar, Tensor, TensorBuilder};

/// Mapping operations available on every [`Tensor`].
pub trait TensorMap: Tensor {
    /// Applies `f` to every value of the domain, including implicit zeros.
    ///
    /// # Examples
    ///
    /// ```
    /// # use numlab_tensor::*;
    /// let v = SparseVector::<f64>::from_entries(3, [(0, 1.0), (2, 3.0)]).unwrap();
    /// let w = v.map_values(|x| x + 1.0);
    /// assert_eq!(w.stored_len(), 3);
    /// assert_eq!(w.get(1), 1.0);
    /// ```
    fn map_values<V, F>(&self, mut f: F) -> Self::Like<V>
    where
        V: Scalar,
        F: FnMut(Self::Value) -> V,
    {
        infallible(self.try_map_pairs(|_, value| Ok(f(value))))
    }

    /// Applies `f` to the explicitly stored values only.
    ///
    /// # Examples
    ///
    /// ```
    /// # use numlab_tensor::*;
    /// let v = SparseVector::<f64>::from_entries(3, [(0, 1.0), (2, 3.0)]).unwrap();
    /// let w = v.map_non_zero(|x| x * 2.0);
    /// assert_eq!(w.stored_len(), 2);
    /// assert_eq!(w.get(2), 6.0);
    /// ```
    fn map_non_zero<V, F>(&self, mut f: F) -> Self::Like<V>
    where
        V: Scalar,
        F: FnMut(Self::Value) -> V,
    {
        infallible(self.try_map_pairs_non_zero(|_, value| Ok(f(value))))
    }

    /// Applies `f` to every key of the domain and its value.
    fn map_pairs<V, F>(&self, mut f: F) -> Self::Like<V>
    where
        V: Scalar,
        F: FnMut(Self::Key, Self::Value) -> V,
    {
        infallible(self.try_map_pairs(|key, value| Ok(f(key, value))))
    }

    /// Applies `f` to the key and value of every explicitly stored entry.
    fn map_pairs_non_zero<V, F>(&self, mut f: F) -> Self::Like<V>
    where
        V: Scalar,
        F: FnMut(Self::Key, Self::Value) -> V,
    {
        infallible(self.try_map_pairs_non_zero(|key, value| Ok(f(key, value))))
    }

    /// Fallible version of [`TensorMap::map_values`].
    ///
    /// The first error returned by `f` is returned unchanged and no further values are visited.
    fn try_map_values<V, E, F>(&self, mut f: F) -> Result<Self::Like<V>, E>
    where
        V: Scalar,
        F: FnMut(Self::Value) -> Result<V, E>,
    {
        self.try_map_pairs(|_, value| f(value))
    }

    /// Fallible version of [`TensorMap::map_non_zero`].
    fn try_map_non_zero<V, E, F>(&self, mut f: F) -> Result<Self::Like<V>, E>
    where
        V: Scalar,
        F: FnMut(Self::Value) -> Result<V, E>,
    {
        self.try_map_pairs_non_zero(|_, value| f(value))
    }

    /// Fallible version of [`TensorMap::map_pairs`].
    fn try_map_pairs<V, E, F>(&self, f: F) -> Result<Self::Like<V>, E>
    where
        V: Scalar,
        F: FnMut(Self::Key, Self::Value) -> Result<V, E>,
    {
        collect(self.new_builder(), self.iter(), f)
    }

    /// Fallible version of [`TensorMap::map_pairs_non_zero`].
    fn try_map_pairs_non_zero<V, E, F>(&self, f: F) -> Result<Self::Like<V>, E>
    where
        V: Scalar,
        F: FnMut(Self::Key, Self::Value) -> Result<V, E>,
    {
        collect(self.new_builder(), self.iter_non_zero(), f)
    }
}

impl<T: Tensor + ?Sized> TensorMap for T {}

fn collect<B, I, K, V, E, F>(mut builder: B, entries: I, mut f: F) -> Result<B::Output, E>
where
    B: TensorBuilder<Key = K>,
    I: Iterator<Item = (K, V)>,
    K: Copy,
    F: FnMut(K, V) -> Result<B::Value, E>,
{
    for (key, value) in entries {
        builder.set(key, f(key, value)?);
    }
    Ok(builder.finish())
}

fn infallible<T>(res: Result<T, Infallible>) -> T {
    match res {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use crate::{DenseMatrix, DenseVector, SparseMatrix, SparseVector};

    use super::*;

    #[test]
    fn identity_map_preserves_entries() {
        let dense = DenseVector::<f64>::from_vec(vec![4.0, 0.0, -1.5]);
        assert_eq!(dense.map_values(|x| x), dense);

        let sparse = SparseVector::<f64>::from_entries(5, [(1, 2.0), (4, -3.0)]).unwrap();
        assert_eq!(sparse.map_values(|x| x), sparse);
        assert_eq!(sparse.map_non_zero(|x| x), sparse);
    }

    #[test]
    fn dense_traversal_visits_whole_domain() {
        let sparse = SparseMatrix::<f64>::from_triplets(3, 4, [(0, 1, 1.0), (2, 3, 2.0)]).unwrap();
        let visits = Cell::new(0);
        let out = sparse.map_values(|x| {
            visits.set(visits.get() + 1);
            x
        });
        assert_eq!(visits.get(), 12);
        assert_eq!(out.stored_len(), 12);
    }

    #[test]
    fn non_zero_traversal_visits_stored_entries() {
        let sparse = SparseMatrix::<f64>::from_triplets(3, 4, [(0, 1, 1.0), (2, 3, 2.0)]).unwrap();
        let visits = Cell::new(0);
        let out = sparse.map_non_zero(|x| {
            visits.set(visits.get() + 1);
            x * 10.0
        });
        assert_eq!(visits.get(), 2);
        assert_eq!(out.stored_len(), 2);
        assert_eq!(out.get((2, 3)), 20.0);
        assert_eq!(out.get((1, 1)), 0.0);
    }

    #[test]
    fn map_changes_value_type() {
        let v = DenseVector::<f64>::from_vec(vec![1.5, -2.0, 0.0]);
        let signs: DenseVector<i32> = v.map_values(|x| x.signum() as i32);
        assert_eq!(signs.as_slice(), &[1, -1, 1]);

        let mask: DenseVector<bool> = v.map_values(|x| x > 0.0);
        assert_eq!(mask.as_slice(), &[true, false, false]);
    }

    #[test]
    fn pairs_receive_keys() {
        let m = DenseMatrix::<f64>::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let upper = m.map_pairs(|(row, col), x| if col >= row { x } else { 0.0 });
        assert_eq!(upper, DenseMatrix::<f64>::from_row_slice(2, 2, &[1.0, 2.0, 0.0, 4.0]));

        let v = SparseVector::<f64>::from_entries(4, [(1, 1.0), (3, 1.0)]).unwrap();
        let weighted = v.map_pairs_non_zero(|i, x| x * i as f64);
        assert_eq!(weighted.get(3), 3.0);
        assert_eq!(weighted.stored_len(), 2);
    }

    #[test]
    fn errors_stop_traversal() {
        let v = DenseVector::<f64>::from_vec(vec![1.0, -1.0, 2.0]);
        let visits = Cell::new(0);
        let res: Result<DenseVector<f64>, &str> = v.try_map_values(|x| {
            visits.set(visits.get() + 1);
            if x < 0.0 {
                Err("negative")
            } else {
                Ok(x.sqrt())
            }
        });
        assert_eq!(res, Err("negative"));
        assert_eq!(visits.get(), 2);

        let ok: Result<DenseVector<f64>, &str> = v.try_map_non_zero(|x| Ok(x.abs()));
        assert_eq!(ok.unwrap().as_slice(), &[1.0, 1.0, 2.0]);
    }
}
