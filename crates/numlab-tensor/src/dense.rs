//! Dense containers backed by [`nalgebra`].

use std::{
    fmt,
    iter::{Copied, Enumerate},
    ops::{Index, IndexMut},
    slice,
};

use nalgebra::{DMatrix, DVector};

use crate::{Scalar, Tensor, TensorBuilder};

/// A dynamically-sized column vector that stores every element explicitly.
///
/// The domain of a [`DenseVector`] is its length; keys are 0-based indices.
///
/// # Examples
///
/// ```
/// # use numlab_tensor::*;
/// let mut v = DenseVector::<f64>::from_vec(vec![1.0, 2.0, 3.0]);
/// v[1] = 5.0;
/// assert_eq!(v.get(1), 5.0);
/// assert_eq!(v.stored_len(), 3);
/// ```
#[derive(Clone, PartialEq)]
pub struct DenseVector<T>(DVector<T>);

impl<T: Scalar> DenseVector<T> {
    /// Creates a vector from a [`Vec`] of elements.
    pub fn from_vec(elems: Vec<T>) -> Self {
        Self(DVector::from_vec(elems))
    }

    /// Creates a vector of length `len` with every element set to `elem`.
    pub fn from_element(len: usize, elem: T) -> Self {
        Self(DVector::from_element(len, elem))
    }

    /// Creates a vector of length `len` with every element set to [`Scalar::ZERO`].
    pub fn zeros(len: usize) -> Self {
        Self::from_element(len, T::ZERO)
    }

    /// Creates a vector by invoking `f` with the index of each element.
    pub fn from_fn<F: FnMut(usize) -> T>(len: usize, mut f: F) -> Self {
        Self(DVector::from_fn(len, |i, _| f(i)))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.0.as_slice()
    }

    /// Returns the elements as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.0.as_mut_slice()
    }

    /// Copies the elements into a [`Vec`].
    pub fn to_vec(&self) -> Vec<T> {
        self.as_slice().to_vec()
    }

    /// Returns a reference to the underlying [`nalgebra`] vector.
    #[inline]
    pub fn as_nalgebra(&self) -> &DVector<T> {
        &self.0
    }

    /// Unwraps the underlying [`nalgebra`] vector.
    #[inline]
    pub fn into_nalgebra(self) -> DVector<T> {
        self.0
    }
}

impl<T> From<DVector<T>> for DenseVector<T> {
    #[inline]
    fn from(v: DVector<T>) -> Self {
        Self(v)
    }
}

impl<T: Scalar> Index<usize> for DenseVector<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        &self.as_slice()[index]
    }
}

impl<T: Scalar> IndexMut<usize> for DenseVector<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.as_mut_slice()[index]
    }
}

impl<T: Scalar> fmt::Debug for DenseVector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<T: Scalar + fmt::Display> fmt::Display for DenseVector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, elem) in self.as_slice().iter().enumerate() {
            if i != 0 {
                f.write_str(", ")?;
            }
            fmt::Display::fmt(elem, f)?;
        }
        f.write_str("]")
    }
}

impl<T: Scalar> Tensor for DenseVector<T> {
    type Key = usize;
    type Value = T;
    type Domain = usize;
    type Like<V: Scalar> = DenseVector<V>;
    type Builder<V: Scalar> = DenseVectorBuilder<V>;
    type Iter<'a> = Enumerate<Copied<slice::Iter<'a, T>>>
    where
        Self: 'a;
    type IterNonZero<'a> = Enumerate<Copied<slice::Iter<'a, T>>>
    where
        Self: 'a;

    #[inline]
    fn domain(&self) -> usize {
        self.len()
    }

    #[inline]
    fn size(&self) -> usize {
        self.len()
    }

    #[inline]
    fn stored_len(&self) -> usize {
        self.len()
    }

    #[inline]
    fn get(&self, key: usize) -> T {
        self[key]
    }

    fn iter(&self) -> Self::Iter<'_> {
        self.as_slice().iter().copied().enumerate()
    }

    fn iter_non_zero(&self) -> Self::IterNonZero<'_> {
        self.iter()
    }

    fn new_builder<V: Scalar>(&self) -> DenseVectorBuilder<V> {
        DenseVectorBuilder {
            elems: vec![V::ZERO; self.len()],
        }
    }
}

/// [`TensorBuilder`] for [`DenseVector`]s.
#[derive(Debug)]
pub struct DenseVectorBuilder<T> {
    elems: Vec<T>,
}

impl<T: Scalar> TensorBuilder for DenseVectorBuilder<T> {
    type Key = usize;
    type Value = T;
    type Output = DenseVector<T>;

    #[inline]
    fn set(&mut self, key: usize, value: T) {
        self.elems[key] = value;
    }

    fn finish(self) -> DenseVector<T> {
        DenseVector::from_vec(self.elems)
    }
}

/// A dynamically-sized matrix that stores every element explicitly.
///
/// The domain of a [`DenseMatrix`] is its shape `(nrows, ncols)`; keys are 0-based
/// `(row, column)` pairs. Storage is column-major (as in [`nalgebra`]), but all iteration happens
/// in row-major order.
#[derive(Clone, PartialEq)]
pub struct DenseMatrix<T>(DMatrix<T>);

impl<T: Scalar> DenseMatrix<T> {
    /// Creates a matrix with every element set to `elem`.
    pub fn from_element(nrows: usize, ncols: usize, elem: T) -> Self {
        Self(DMatrix::from_element(nrows, ncols, elem))
    }

    /// Creates a matrix with every element set to [`Scalar::ZERO`].
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        Self::from_element(nrows, ncols, T::ZERO)
    }

    /// Creates a matrix from a slice of elements in row-major order.
    ///
    /// # Panics
    ///
    /// Panics if `elems` does not contain exactly `nrows * ncols` elements.
    ///
    /// # Examples
    ///
    /// ```
    /// # use numlab_tensor::*;
    /// let m = DenseMatrix::<i32>::from_row_slice(2, 3, &[
    ///     1, 2, 3,
    ///     4, 5, 6,
    /// ]);
    /// assert_eq!(m[(1, 0)], 4);
    /// assert_eq!(m.iter().map(|(_, x)| x).collect::<Vec<_>>(), [1, 2, 3, 4, 5, 6]);
    /// ```
    pub fn from_row_slice(nrows: usize, ncols: usize, elems: &[T]) -> Self {
        Self(DMatrix::from_row_slice(nrows, ncols, elems))
    }

    /// Creates a matrix by invoking `f` with the row and column of each element.
    pub fn from_fn<F: FnMut(usize, usize) -> T>(nrows: usize, ncols: usize, f: F) -> Self {
        Self(DMatrix::from_fn(nrows, ncols, f))
    }

    #[inline]
    pub fn nrows(&self) -> usize {
        self.0.nrows()
    }

    #[inline]
    pub fn ncols(&self) -> usize {
        self.0.ncols()
    }

    /// Returns `(nrows, ncols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        self.0.shape()
    }

    /// Returns the transposed matrix.
    pub fn transpose(&self) -> Self {
        Self(self.0.transpose())
    }

    /// Returns a reference to the underlying [`nalgebra`] matrix.
    #[inline]
    pub fn as_nalgebra(&self) -> &DMatrix<T> {
        &self.0
    }

    /// Unwraps the underlying [`nalgebra`] matrix.
    #[inline]
    pub fn into_nalgebra(self) -> DMatrix<T> {
        self.0
    }
}

impl<T> From<DMatrix<T>> for DenseMatrix<T> {
    #[inline]
    fn from(m: DMatrix<T>) -> Self {
        Self(m)
    }
}

impl<T: Scalar> Index<(usize, usize)> for DenseMatrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &T {
        &self.0[(row, col)]
    }
}

impl<T: Scalar> IndexMut<(usize, usize)> for DenseMatrix<T> {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        &mut self.0[(row, col)]
    }
}

impl<T: Scalar> fmt::Debug for DenseMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for row in 0..self.nrows() {
            list.entry(&self.0.row(row).iter().collect::<Vec<_>>());
        }
        list.finish()
    }
}

impl<T: Scalar + fmt::Display> fmt::Display for DenseMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.nrows() {
            if row != 0 {
                f.write_str("\n")?;
            }
            for col in 0..self.ncols() {
                if col != 0 {
                    f.write_str(" ")?;
                }
                fmt::Display::fmt(&self[(row, col)], f)?;
            }
        }
        Ok(())
    }
}

impl<T: Scalar> Tensor for DenseMatrix<T> {
    type Key = (usize, usize);
    type Value = T;
    type Domain = (usize, usize);
    type Like<V: Scalar> = DenseMatrix<V>;
    type Builder<V: Scalar> = DenseMatrixBuilder<V>;
    type Iter<'a> = RowMajorIter<'a, T>
    where
        Self: 'a;
    type IterNonZero<'a> = RowMajorIter<'a, T>
    where
        Self: 'a;

    #[inline]
    fn domain(&self) -> (usize, usize) {
        self.shape()
    }

    #[inline]
    fn size(&self) -> usize {
        self.nrows() * self.ncols()
    }

    #[inline]
    fn stored_len(&self) -> usize {
        self.size()
    }

    #[inline]
    fn get(&self, key: (usize, usize)) -> T {
        self[key]
    }

    fn iter(&self) -> RowMajorIter<'_, T> {
        RowMajorIter {
            matrix: &self.0,
            row: 0,
            col: 0,
        }
    }

    fn iter_non_zero(&self) -> RowMajorIter<'_, T> {
        self.iter()
    }

    fn new_builder<V: Scalar>(&self) -> DenseMatrixBuilder<V> {
        DenseMatrixBuilder {
            matrix: DMatrix::from_element(self.nrows(), self.ncols(), V::ZERO),
        }
    }
}

/// Row-major iterator over the elements of a [`DenseMatrix`].
#[derive(Debug, Clone)]
pub struct RowMajorIter<'a, T> {
    matrix: &'a DMatrix<T>,
    row: usize,
    col: usize,
}

impl<'a, T: Scalar> Iterator for RowMajorIter<'a, T> {
    type Item = ((usize, usize), T);

    fn next(&mut self) -> Option<Self::Item> {
        if self.row >= self.matrix.nrows() || self.matrix.ncols() == 0 {
            return None;
        }
        let key = (self.row, self.col);
        let value = self.matrix[key];
        self.col += 1;
        if self.col == self.matrix.ncols() {
            self.col = 0;
            self.row += 1;
        }
        Some((key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (nrows, ncols) = self.matrix.shape();
        let len = if self.row >= nrows {
            0
        } else {
            (nrows - self.row) * ncols - self.col
        };
        (len, Some(len))
    }
}

impl<'a, T: Scalar> ExactSizeIterator for RowMajorIter<'a, T> {}

/// [`TensorBuilder`] for [`DenseMatrix`]es.
#[derive(Debug)]
pub struct DenseMatrixBuilder<T> {
    matrix: DMatrix<T>,
}

impl<T: Scalar> TensorBuilder for DenseMatrixBuilder<T> {
    type Key = (usize, usize);
    type Value = T;
    type Output = DenseMatrix<T>;

    #[inline]
    fn set(&mut self, key: (usize, usize), value: T) {
        self.matrix[key] = value;
    }

    fn finish(self) -> DenseMatrix<T> {
        DenseMatrix(self.matrix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vector_access() {
        let mut v = DenseVector::from_fn(4, |i| i as i64 * 10);
        assert_eq!(v.as_slice(), &[0, 10, 20, 30]);
        v[0] = -1;
        assert_eq!(v.get(0), -1);
        assert_eq!(v.size(), 4);
        assert_eq!(v.domain(), 4);
        assert_eq!(v.iter().nth(2), Some((2, 20)));
    }

    #[test]
    #[should_panic]
    fn vector_get_out_of_domain() {
        DenseVector::<f32>::zeros(2).get(2);
    }

    #[test]
    fn vector_builder() {
        let v = DenseVector::<f64>::zeros(3);
        let mut b = v.new_builder::<u8>();
        b.set(2, 7);
        b.set(0, 1);
        b.set(2, 9);
        assert_eq!(b.finish().as_slice(), &[1, 0, 9]);
    }

    #[test]
    fn matrix_row_major() {
        let m = DenseMatrix::from_fn(2, 3, |r, c| (r * 3 + c) as u32);
        let keys: Vec<_> = m.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, [(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]);
        let values: Vec<_> = m.iter().map(|(_, v)| v).collect();
        assert_eq!(values, [0, 1, 2, 3, 4, 5]);
        assert_eq!(m.iter().len(), 6);
        assert_eq!(m.transpose().domain(), (3, 2));
    }

    #[test]
    fn matrix_builder_round_trip() {
        let m = DenseMatrix::<f64>::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let mut b = m.new_builder();
        for (key, value) in m.iter() {
            b.set(key, value);
        }
        assert_eq!(b.finish(), m);
    }

    #[test]
    fn empty_shapes() {
        let m = DenseMatrix::<f64>::zeros(3, 0);
        assert_eq!(m.iter().count(), 0);
        assert_eq!(m.size(), 0);
        let v = DenseVector::<f64>::zeros(0);
        assert!(v.is_empty());
        assert_eq!(v.iter().count(), 0);
    }

    #[test]
    fn fmt() {
        let v = DenseVector::<f64>::from_vec(vec![1.5, -2.0]);
        assert_eq!(format!("{v}"), "[1.5, -2]");
        assert_eq!(format!("{v:?}"), "[1.5, -2.0]");

        let m = DenseMatrix::<i32>::from_row_slice(2, 2, &[1, 2, 3, 4]);
        assert_eq!(format!("{m}"), "1 2\n3 4");
        assert_eq!(format!("{m:?}"), "[[1, 2], [3, 4]]");
    }
}
