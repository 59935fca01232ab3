//! Sparse containers.
//!
//! Only explicitly stored entries occupy memory; every other key of the domain holds
//! [`Scalar::ZERO`]. Stored entries may themselves be zero (eg. after a dense traversal), they are
//! not pruned automatically.

use std::{
    fmt,
    iter::{Copied, Peekable, Zip},
    ops::Range,
    slice,
};

use itertools::{Itertools, Product};

use crate::{DenseMatrix, DenseVector, Error, Result, Scalar, Tensor, TensorBuilder};

/// Sorts `entries` by key. If a key occurs more than once, the last occurrence wins.
fn sort_last_wins<K: Ord + Copy, T>(mut entries: Vec<(K, T)>) -> Vec<(K, T)> {
    // stable, so that equal keys stay in insertion order
    entries.sort_by_key(|(key, _)| *key);
    let mut out: Vec<(K, T)> = Vec::with_capacity(entries.len());
    for (key, value) in entries {
        match out.last_mut() {
            Some(last) if last.0 == key => last.1 = value,
            _ => out.push((key, value)),
        }
    }
    out
}

/// Iterates over every key in `keys`, taking values from the ascending `stored` entries and
/// yielding [`Scalar::ZERO`] for all other keys.
pub struct FillZeros<Keys, I: Iterator> {
    keys: Keys,
    stored: Peekable<I>,
}

impl<K, T, Keys, I> Iterator for FillZeros<Keys, I>
where
    K: PartialEq,
    T: Scalar,
    Keys: Iterator<Item = K>,
    I: Iterator<Item = (K, T)>,
{
    type Item = (K, T);

    fn next(&mut self) -> Option<(K, T)> {
        let key = self.keys.next()?;
        match self.stored.next_if(|(stored, _)| *stored == key) {
            Some((_, value)) => Some((key, value)),
            None => Some((key, T::ZERO)),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }
}

/// Stored entries of a [`SparseVector`], in ascending index order.
pub type SparseVectorEntries<'a, T> =
    Zip<Copied<slice::Iter<'a, usize>>, Copied<slice::Iter<'a, T>>>;

/// A vector storing only some of its elements.
///
/// Entries are kept as two parallel arrays of ascending indices and values. Lookup of a single
/// element is a binary search.
///
/// # Examples
///
/// ```
/// # use numlab_tensor::*;
/// let v = SparseVector::<f64>::from_entries(1000, [(3, 1.0), (999, -1.0)]).unwrap();
/// assert_eq!(v.size(), 1000);
/// assert_eq!(v.stored_len(), 2);
/// assert_eq!(v.get(3), 1.0);
/// assert_eq!(v.get(4), 0.0);
/// ```
#[derive(Clone)]
pub struct SparseVector<T> {
    len: usize,
    indices: Vec<usize>,
    values: Vec<T>,
}

impl<T: Scalar> SparseVector<T> {
    /// Creates a vector of length `len` without any stored entries.
    pub fn zeros(len: usize) -> Self {
        Self {
            len,
            indices: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Creates a vector of length `len` from `(index, value)` pairs.
    ///
    /// The pairs may come in any order. If an index occurs more than once, the last value is kept.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if an index is `>= len`.
    pub fn from_entries<I>(len: usize, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, T)>,
    {
        let entries: Vec<_> = entries.into_iter().collect();
        if entries.iter().any(|(i, _)| *i >= len) {
            return Err(Error::InvalidArgument {
                reason: "index out of bounds for vector length",
            });
        }
        let (indices, values) = sort_last_wins(entries).into_iter().unzip();
        Ok(Self {
            len,
            indices,
            values,
        })
    }

    /// Converts a dense vector, storing only its non-zero elements.
    pub fn from_dense(dense: &DenseVector<T>) -> Self {
        let (indices, values) = dense.iter().filter(|(_, x)| !x.is_zero()).unzip();
        Self {
            len: dense.len(),
            indices,
            values,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The ascending indices of the stored entries.
    #[inline]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// The values of the stored entries, in the same order as [`SparseVector::indices`].
    #[inline]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Converts to a [`DenseVector`].
    pub fn to_dense(&self) -> DenseVector<T> {
        let mut dense = DenseVector::zeros(self.len);
        for (i, x) in self.iter_non_zero() {
            dense[i] = x;
        }
        dense
    }
}

impl<T: Scalar> Tensor for SparseVector<T> {
    type Key = usize;
    type Value = T;
    type Domain = usize;
    type Like<V: Scalar> = SparseVector<V>;
    type Builder<V: Scalar> = SparseVectorBuilder<V>;
    type Iter<'a> = FillZeros<Range<usize>, SparseVectorEntries<'a, T>>
    where
        Self: 'a;
    type IterNonZero<'a> = SparseVectorEntries<'a, T>
    where
        Self: 'a;

    #[inline]
    fn domain(&self) -> usize {
        self.len
    }

    #[inline]
    fn size(&self) -> usize {
        self.len
    }

    #[inline]
    fn stored_len(&self) -> usize {
        self.values.len()
    }

    fn get(&self, key: usize) -> T {
        assert!(
            key < self.len,
            "index {key} out of bounds for sparse vector of length {}",
            self.len
        );
        match self.indices.binary_search(&key) {
            Ok(pos) => self.values[pos],
            Err(_) => T::ZERO,
        }
    }

    fn iter(&self) -> Self::Iter<'_> {
        FillZeros {
            keys: 0..self.len,
            stored: self.iter_non_zero().peekable(),
        }
    }

    fn iter_non_zero(&self) -> SparseVectorEntries<'_, T> {
        self.indices
            .iter()
            .copied()
            .zip(self.values.iter().copied())
    }

    fn new_builder<V: Scalar>(&self) -> SparseVectorBuilder<V> {
        SparseVectorBuilder {
            len: self.len,
            entries: Vec::new(),
        }
    }
}

impl<T: Scalar> PartialEq for SparseVector<T> {
    fn eq(&self, other: &Self) -> bool {
        crate::entries_eq(self, other)
    }
}

impl<T: Scalar> fmt::Debug for SparseVector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SparseVector({}) ", self.len)?;
        f.debug_map().entries(self.iter_non_zero()).finish()
    }
}

/// [`TensorBuilder`] for [`SparseVector`]s.
#[derive(Debug)]
pub struct SparseVectorBuilder<T> {
    len: usize,
    entries: Vec<(usize, T)>,
}

impl<T: Scalar> TensorBuilder for SparseVectorBuilder<T> {
    type Key = usize;
    type Value = T;
    type Output = SparseVector<T>;

    fn set(&mut self, key: usize, value: T) {
        assert!(
            key < self.len,
            "index {key} out of bounds for sparse vector of length {}",
            self.len
        );
        self.entries.push((key, value));
    }

    fn finish(self) -> SparseVector<T> {
        // joins and maps assign in ascending order without repeats, which needs no sorting
        let (indices, values) = if is_strictly_ascending(&self.entries) {
            self.entries.into_iter().unzip()
        } else {
            sort_last_wins(self.entries).into_iter().unzip()
        };
        SparseVector {
            len: self.len,
            indices,
            values,
        }
    }
}

fn is_strictly_ascending<K: Ord, T>(entries: &[(K, T)]) -> bool {
    entries.iter().tuple_windows().all(|(a, b)| a.0 < b.0)
}

/// Stored entries of a [`SparseMatrix`], in row-major order.
#[derive(Debug, Clone)]
pub struct CsrEntries<'a, T> {
    row_ptr: &'a [usize],
    col_idx: &'a [usize],
    values: &'a [T],
    row: usize,
    pos: usize,
}

impl<'a, T: Scalar> Iterator for CsrEntries<'a, T> {
    type Item = ((usize, usize), T);

    fn next(&mut self) -> Option<Self::Item> {
        let value = *self.values.get(self.pos)?;
        while self.row_ptr[self.row + 1] <= self.pos {
            self.row += 1;
        }
        let key = (self.row, self.col_idx[self.pos]);
        self.pos += 1;
        Some((key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.values.len() - self.pos;
        (len, Some(len))
    }
}

impl<'a, T: Scalar> ExactSizeIterator for CsrEntries<'a, T> {}

/// A matrix in compressed sparse row (CSR) format.
///
/// Row `r`'s stored entries are at positions `row_ptr[r]..row_ptr[r + 1]` of the column index and
/// value arrays, with ascending column indices within each row.
///
/// # Examples
///
/// ```
/// # use numlab_tensor::*;
/// let m = SparseMatrix::<f64>::from_triplets(2, 3, [(1, 2, 5.0), (0, 1, 1.0)]).unwrap();
/// assert_eq!(m.stored_len(), 2);
/// assert_eq!(m.get((1, 2)), 5.0);
/// assert_eq!(m.row_ptr(), &[0, 1, 2]);
/// assert_eq!(m.col_indices(), &[1, 2]);
/// ```
#[derive(Clone)]
pub struct SparseMatrix<T> {
    nrows: usize,
    ncols: usize,
    row_ptr: Vec<usize>,
    col_idx: Vec<usize>,
    values: Vec<T>,
}

impl<T: Scalar> SparseMatrix<T> {
    /// Creates an `nrows` x `ncols` matrix without any stored entries.
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        Self {
            nrows,
            ncols,
            row_ptr: vec![0; nrows + 1],
            col_idx: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Creates a matrix from `(row, column, value)` triplets.
    ///
    /// The triplets may come in any order. If a position occurs more than once, the last value is
    /// kept.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if a row or column index is out of bounds.
    pub fn from_triplets<I>(nrows: usize, ncols: usize, triplets: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize, T)>,
    {
        let entries: Vec<_> = triplets
            .into_iter()
            .map(|(r, c, x)| ((r, c), x))
            .collect();
        if entries.iter().any(|((r, c), _)| *r >= nrows || *c >= ncols) {
            return Err(Error::InvalidArgument {
                reason: "index out of bounds for matrix dimensions",
            });
        }
        Ok(Self::from_sorted(nrows, ncols, sort_last_wins(entries)))
    }

    /// Converts a dense matrix, storing only its non-zero elements.
    pub fn from_dense(dense: &DenseMatrix<T>) -> Self {
        let entries = dense.iter().filter(|(_, x)| !x.is_zero()).collect();
        Self::from_sorted(dense.nrows(), dense.ncols(), entries)
    }

    /// Builds the CSR arrays from entries in strictly ascending row-major order.
    fn from_sorted(nrows: usize, ncols: usize, entries: Vec<((usize, usize), T)>) -> Self {
        let mut row_ptr = vec![0; nrows + 1];
        for ((r, _), _) in &entries {
            row_ptr[r + 1] += 1;
        }
        for i in 1..=nrows {
            row_ptr[i] += row_ptr[i - 1];
        }
        let (col_idx, values) = entries.into_iter().map(|((_, c), x)| (c, x)).unzip();
        Self {
            nrows,
            ncols,
            row_ptr,
            col_idx,
            values,
        }
    }

    #[inline]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Returns `(nrows, ncols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    /// Row pointer array of length `nrows + 1`.
    #[inline]
    pub fn row_ptr(&self) -> &[usize] {
        &self.row_ptr
    }

    /// Column indices of the stored entries.
    #[inline]
    pub fn col_indices(&self) -> &[usize] {
        &self.col_idx
    }

    /// Values of the stored entries.
    #[inline]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Converts to a [`DenseMatrix`].
    pub fn to_dense(&self) -> DenseMatrix<T> {
        let mut dense = DenseMatrix::zeros(self.nrows, self.ncols);
        for (key, x) in self.iter_non_zero() {
            dense[key] = x;
        }
        dense
    }
}

impl<T: Scalar> Tensor for SparseMatrix<T> {
    type Key = (usize, usize);
    type Value = T;
    type Domain = (usize, usize);
    type Like<V: Scalar> = SparseMatrix<V>;
    type Builder<V: Scalar> = SparseMatrixBuilder<V>;
    type Iter<'a> = FillZeros<Product<Range<usize>, Range<usize>>, CsrEntries<'a, T>>
    where
        Self: 'a;
    type IterNonZero<'a> = CsrEntries<'a, T>
    where
        Self: 'a;

    #[inline]
    fn domain(&self) -> (usize, usize) {
        self.shape()
    }

    #[inline]
    fn size(&self) -> usize {
        self.nrows * self.ncols
    }

    #[inline]
    fn stored_len(&self) -> usize {
        self.values.len()
    }

    fn get(&self, (row, col): (usize, usize)) -> T {
        assert!(
            row < self.nrows && col < self.ncols,
            "index ({row}, {col}) out of bounds for {}x{} sparse matrix",
            self.nrows,
            self.ncols
        );
        let range = self.row_ptr[row]..self.row_ptr[row + 1];
        match self.col_idx[range.clone()].binary_search(&col) {
            Ok(pos) => self.values[range.start + pos],
            Err(_) => T::ZERO,
        }
    }

    fn iter(&self) -> Self::Iter<'_> {
        FillZeros {
            keys: (0..self.nrows).cartesian_product(0..self.ncols),
            stored: self.iter_non_zero().peekable(),
        }
    }

    fn iter_non_zero(&self) -> CsrEntries<'_, T> {
        CsrEntries {
            row_ptr: &self.row_ptr,
            col_idx: &self.col_idx,
            values: &self.values,
            row: 0,
            pos: 0,
        }
    }

    fn new_builder<V: Scalar>(&self) -> SparseMatrixBuilder<V> {
        SparseMatrixBuilder {
            nrows: self.nrows,
            ncols: self.ncols,
            entries: Vec::new(),
        }
    }
}

impl<T: Scalar> PartialEq for SparseMatrix<T> {
    fn eq(&self, other: &Self) -> bool {
        crate::entries_eq(self, other)
    }
}

impl<T: Scalar> fmt::Debug for SparseMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SparseMatrix({}x{}) ", self.nrows, self.ncols)?;
        f.debug_map().entries(self.iter_non_zero()).finish()
    }
}

/// [`TensorBuilder`] for [`SparseMatrix`]es.
#[derive(Debug)]
pub struct SparseMatrixBuilder<T> {
    nrows: usize,
    ncols: usize,
    entries: Vec<((usize, usize), T)>,
}

impl<T: Scalar> TensorBuilder for SparseMatrixBuilder<T> {
    type Key = (usize, usize);
    type Value = T;
    type Output = SparseMatrix<T>;

    fn set(&mut self, (row, col): (usize, usize), value: T) {
        assert!(
            row < self.nrows && col < self.ncols,
            "index ({row}, {col}) out of bounds for {}x{} sparse matrix",
            self.nrows,
            self.ncols
        );
        self.entries.push(((row, col), value));
    }

    fn finish(self) -> SparseMatrix<T> {
        let entries = if is_strictly_ascending(&self.entries) {
            self.entries
        } else {
            sort_last_wins(self.entries)
        };
        SparseMatrix::from_sorted(self.nrows, self.ncols, entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_entries_sorts_and_replaces() {
        let v = SparseVector::<f64>::from_entries(5, [(3, 1.0), (0, 2.0), (3, 4.0)]).unwrap();
        assert_eq!(v.indices(), &[0, 3]);
        assert_eq!(v.values(), &[2.0, 4.0]);
        assert_eq!(
            SparseVector::<f64>::from_entries(2, [(2, 1.0)]),
            Err(Error::InvalidArgument {
                reason: "index out of bounds for vector length"
            })
        );
    }

    #[test]
    fn vector_iteration() {
        let v = SparseVector::<i32>::from_entries(4, [(1, 5), (3, 7)]).unwrap();
        assert_eq!(v.iter().collect::<Vec<_>>(), [(0, 0), (1, 5), (2, 0), (3, 7)]);
        assert_eq!(v.iter_non_zero().collect::<Vec<_>>(), [(1, 5), (3, 7)]);
        assert_eq!(v.to_dense().as_slice(), &[0, 5, 0, 7]);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn vector_get_out_of_domain() {
        SparseVector::<f64>::zeros(3).get(3);
    }

    #[test]
    fn builder_out_of_order() {
        let v = SparseVector::<f64>::zeros(4);
        let mut b = v.new_builder();
        b.set(2, 1.0);
        b.set(0, 3.0);
        b.set(2, 5.0);
        let w = b.finish();
        assert_eq!(w.indices(), &[0, 2]);
        assert_eq!(w.get(2), 5.0);
    }

    #[test]
    fn explicit_zeros_compare_equal() {
        let a = SparseVector::<f64>::from_entries(3, [(1, 0.0), (2, 1.0)]).unwrap();
        let b = SparseVector::<f64>::from_entries(3, [(2, 1.0)]).unwrap();
        assert_eq!(a, b);
        assert_ne!(a.stored_len(), b.stored_len());
        assert_ne!(b, SparseVector::<f64>::from_entries(4, [(2, 1.0)]).unwrap());
    }

    #[test]
    fn dense_round_trip() {
        let dense = DenseMatrix::<f64>::from_row_slice(2, 3, &[0.0, 1.0, 0.0, 2.0, 0.0, 3.0]);
        let sparse = SparseMatrix::from_dense(&dense);
        assert_eq!(sparse.stored_len(), 3);
        assert_eq!(sparse.row_ptr(), &[0, 1, 3]);
        assert_eq!(sparse.to_dense(), dense);

        let v = DenseVector::<i32>::from_vec(vec![0, 4, 0]);
        assert_eq!(SparseVector::from_dense(&v).indices(), &[1]);
    }

    #[test]
    fn csr_iteration_skips_empty_rows() {
        let m =
            SparseMatrix::<i32>::from_triplets(4, 2, [(3, 1, 1), (0, 0, 2), (3, 0, 3)]).unwrap();
        assert_eq!(m.row_ptr(), &[0, 1, 1, 1, 3]);
        assert_eq!(
            m.iter_non_zero().collect::<Vec<_>>(),
            [((0, 0), 2), ((3, 0), 3), ((3, 1), 1)]
        );
        assert_eq!(m.iter().count(), 8);
        assert_eq!(m.iter().nth(7), Some(((3, 1), 1)));
        assert_eq!(m.get((1, 1)), 0);
    }

    #[test]
    fn matrix_builder_round_trip() {
        let m = SparseMatrix::<f64>::from_triplets(3, 3, [(0, 2, 1.0), (2, 0, -1.0)]).unwrap();
        let mut b = m.new_builder();
        for (key, x) in m.iter_non_zero() {
            b.set(key, x);
        }
        let copy = b.finish();
        assert_eq!(copy, m);
        assert_eq!(copy.stored_len(), 2);
    }

    #[test]
    fn triplet_bounds() {
        assert!(SparseMatrix::<f64>::from_triplets(2, 2, [(0, 2, 1.0)]).is_err());
        assert!(SparseMatrix::<f64>::from_triplets(2, 2, [(2, 0, 1.0)]).is_err());
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn builder_rejects_keys_outside_domain() {
        let m = SparseMatrix::<f32>::zeros(2, 2);
        let mut b = m.new_builder::<f32>();
        b.set((0, 2), 1.0);
    }
}
