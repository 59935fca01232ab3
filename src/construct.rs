//! Constructors for vectors and matrices.

use itertools::Itertools;
use numlab_tensor::{Error, Result, Scalar, Tensor, TensorMap};

use crate::{Matrix, SpMatrix, Vector};

/// Largest number of `f64`s a single allocation can hold.
const MAX_RANGE_LEN: usize = isize::MAX as usize / std::mem::size_of::<f64>();

/// A vector of `n` zeros.
pub fn zeros(n: usize) -> Vector {
    Vector::zeros(n)
}

/// A vector of `n` ones.
pub fn ones(n: usize) -> Vector {
    Vector::from_element(n, 1.0)
}

/// An `nrows` x `ncols` matrix of zeros.
pub fn zeros_mat(nrows: usize, ncols: usize) -> Matrix {
    Matrix::zeros(nrows, ncols)
}

/// An `nrows` x `ncols` matrix of ones.
pub fn ones_mat(nrows: usize, ncols: usize) -> Matrix {
    Matrix::from_element(nrows, ncols, 1.0)
}

/// The `n` x `n` identity matrix.
pub fn eye(n: usize) -> Matrix {
    Matrix::from_fn(n, n, |r, c| if r == c { 1.0 } else { 0.0 })
}

/// `n` evenly spaced points from `start` to `end`, both included.
///
/// For `n == 1` this is `[end]`.
///
/// # Examples
///
/// ```
/// # use numlab::construct::linspace;
/// assert_eq!(linspace(0.0, 1.0, 5).as_slice(), &[0.0, 0.25, 0.5, 0.75, 1.0]);
/// assert_eq!(linspace(0.0, 1.0, 1).as_slice(), &[1.0]);
/// ```
pub fn linspace(start: f64, end: f64, n: usize) -> Vector {
    match n {
        0 => Vector::zeros(0),
        1 => Vector::from_element(1, end),
        _ => {
            let step = (end - start) / (n - 1) as f64;
            Vector::from_fn(n, |i| if i == n - 1 { end } else { start + i as f64 * step })
        }
    }
}

/// The range `start:step:end`.
///
/// The result is empty if `step` is zero or points away from `end`. `end` is included if it is
/// reached by a whole number of steps (up to rounding).
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if any argument is infinite or NaN, or if the range has too
/// many elements to be allocated.
///
/// # Examples
///
/// ```
/// # use numlab::construct::colon;
/// assert_eq!(colon(1.0, 2.0, 8.0)?.as_slice(), &[1.0, 3.0, 5.0, 7.0]);
/// assert_eq!(colon(3.0, -1.0, 1.0)?.as_slice(), &[3.0, 2.0, 1.0]);
/// assert!(colon(0.0, 1.0, -1.0)?.is_empty());
/// # Ok::<(), numlab_tensor::Error>(())
/// ```
pub fn colon(start: f64, step: f64, end: f64) -> Result<Vector> {
    if !(start.is_finite() && step.is_finite() && end.is_finite()) {
        return Err(Error::InvalidArgument {
            reason: "range bounds and step must be finite",
        });
    }
    let steps = (end - start) / step;
    if step == 0.0 || steps < 0.0 {
        return Ok(Vector::zeros(0));
    }
    // tolerate rounding, so that eg. `0:0.1:0.3` includes 0.3
    let n = (steps + steps.abs() * f64::EPSILON * 4.0).floor() + 1.0;
    if !n.is_finite() || n >= MAX_RANGE_LEN as f64 {
        return Err(Error::InvalidArgument {
            reason: "range has too many elements",
        });
    }
    let n = n as usize;
    Ok(Vector::from_fn(n, |i| start + i as f64 * step))
}

/// Creates a matrix from a list of rows.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if the rows have different lengths.
///
/// # Examples
///
/// ```
/// # use numlab::construct::matrix;
/// # use numlab_tensor::Tensor;
/// let m = matrix(&[&[1.0, 2.0], &[3.0, 4.0]])?;
/// assert_eq!(m.get((1, 0)), 3.0);
/// assert!(matrix(&[&[1.0, 2.0], &[3.0]]).is_err());
/// # Ok::<(), numlab_tensor::Error>(())
/// ```
pub fn matrix(rows: &[&[f64]]) -> Result<Matrix> {
    let ncols = rows.first().map_or(0, |row| row.len());
    if !rows.iter().map(|row| row.len()).all_equal() {
        return Err(Error::InvalidArgument {
            reason: "all rows of a matrix must have the same length",
        });
    }
    Ok(Matrix::from_fn(rows.len(), ncols, |r, c| rows[r][c]))
}

/// Creates a sparse matrix from `(row, column, value)` triplets.
///
/// Values given for the same position are summed.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if a row or column index is out of bounds.
pub fn sparse(nrows: usize, ncols: usize, triplets: &[(usize, usize, f64)]) -> Result<SpMatrix> {
    let summed = triplets
        .iter()
        .copied()
        .sorted_by_key(|&(r, c, _)| (r, c))
        .coalesce(|a, b| {
            if (a.0, a.1) == (b.0, b.1) {
                Ok((a.0, a.1, a.2 + b.2))
            } else {
                Err((a, b))
            }
        });
    SpMatrix::from_triplets(nrows, ncols, summed)
}

/// Creates a sparse matrix from parallel arrays of row indices, column indices, and values.
///
/// Like [`sparse`], values given for the same position are summed.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if the arrays have different lengths, or if an index is out
/// of bounds.
pub fn sparse_ijv(
    rows: &[usize],
    cols: &[usize],
    values: &[f64],
    nrows: usize,
    ncols: usize,
) -> Result<SpMatrix> {
    if rows.len() != cols.len() || rows.len() != values.len() {
        return Err(Error::InvalidArgument {
            reason: "rows, cols, and values must have the same length",
        });
    }
    let triplets: Vec<_> = rows
        .iter()
        .zip(cols)
        .zip(values)
        .map(|((&r, &c), &x)| (r, c, x))
        .collect();
    sparse(nrows, ncols, &triplets)
}

/// Converts a sparse matrix to a dense one.
pub fn full(m: &SpMatrix) -> Matrix {
    m.to_dense()
}

/// Converts a dense matrix to a sparse one, dropping all zero elements.
pub fn to_sparse(m: &Matrix) -> SpMatrix {
    SpMatrix::from_dense(m)
}

/// A square matrix with `v` on its diagonal.
pub fn diag(v: &Vector) -> Matrix {
    Matrix::from_fn(v.len(), v.len(), |r, c| if r == c { v[r] } else { 0.0 })
}

/// Zeroes every element above the `k`-th diagonal.
///
/// `k == 0` is the main diagonal, `k > 0` is above it, and `k < 0` below it. Implicit zeros of
/// sparse matrices are not visited.
pub fn tril<A>(m: &A, k: isize) -> A::Like<A::Value>
where
    A: Tensor<Key = (usize, usize)>,
{
    m.map_pairs_non_zero(|(r, c), x| {
        if c as isize - r as isize <= k {
            x
        } else {
            <A::Value as Scalar>::ZERO
        }
    })
}

/// Zeroes every element below the `k`-th diagonal.
///
/// See [`tril`] for the meaning of `k`.
pub fn triu<A>(m: &A, k: isize) -> A::Like<A::Value>
where
    A: Tensor<Key = (usize, usize)>,
{
    m.map_pairs_non_zero(|(r, c), x| {
        if c as isize - r as isize >= k {
            x
        } else {
            <A::Value as Scalar>::ZERO
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity() {
        let i = eye(3);
        assert_eq!(i.get((1, 1)), 1.0);
        assert_eq!(i.get((0, 2)), 0.0);
        assert_eq!(diag(&ones(3)), i);
    }

    #[test]
    fn linspace_edges() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        let v = linspace(-1.0, 1.0, 3);
        assert_eq!(v.as_slice(), &[-1.0, 0.0, 1.0]);
        assert_eq!(linspace(1.0, 0.1, 7).get(6), 0.1);
    }

    #[test]
    fn colon_ranges() {
        assert_eq!(colon(1.0, 1.0, 4.0).unwrap().as_slice(), &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(colon(0.0, 0.1, 0.3).unwrap().len(), 4);
        assert!(colon(1.0, 0.0, 4.0).unwrap().is_empty());
        assert!(colon(4.0, 1.0, 1.0).unwrap().is_empty());
        assert_eq!(colon(2.0, 1.0, 2.0).unwrap().as_slice(), &[2.0]);
        assert!(colon(0.0, f64::NAN, 1.0).is_err());
        assert!(colon(0.0, 1.0, f64::INFINITY).is_err());
    }

    #[test]
    fn colon_rejects_huge_ranges() {
        for (start, step, end) in [
            (0.0, 1e-300, 1e300),
            (-f64::MAX, 1.0, f64::MAX),
            (0.0, 1.0, 1e19),
        ] {
            assert_eq!(
                colon(start, step, end),
                Err(Error::InvalidArgument {
                    reason: "range has too many elements"
                })
            );
        }
        assert!(colon(f64::MAX, 1.0, -f64::MAX).unwrap().is_empty());
    }

    #[test]
    fn matrix_literal() {
        let m = matrix(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]).unwrap();
        assert_eq!(m.shape(), (2, 3));
        assert_eq!(m.get((1, 2)), 6.0);
        assert_eq!(matrix(&[]).unwrap().shape(), (0, 0));
        assert!(matches!(
            matrix(&[&[1.0], &[2.0, 3.0]]),
            Err(Error::InvalidArgument { .. })
        ));
    }

    #[test]
    fn sparse_sums_duplicates() {
        let s = sparse(2, 2, &[(1, 1, 2.0), (0, 0, 1.0), (1, 1, 3.0)]).unwrap();
        assert_eq!(s.stored_len(), 2);
        assert_eq!(s.get((1, 1)), 5.0);
        assert!(sparse(2, 2, &[(2, 0, 1.0)]).is_err());

        let t = sparse_ijv(&[0, 1, 0], &[1, 0, 1], &[1.0, 2.0, 3.0], 2, 2).unwrap();
        assert_eq!(t.get((0, 1)), 4.0);
        assert!(sparse_ijv(&[0], &[0, 1], &[1.0], 2, 2).is_err());
    }

    #[test]
    fn sparse_dense_conversion() {
        let m = matrix(&[&[0.0, 1.0], &[2.0, 0.0]]).unwrap();
        let s = to_sparse(&m);
        assert_eq!(s.stored_len(), 2);
        assert_eq!(full(&s), m);
    }

    #[test]
    fn triangles() {
        let m = matrix(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0], &[7.0, 8.0, 9.0]]).unwrap();
        assert_eq!(
            tril(&m, 0),
            matrix(&[&[1.0, 0.0, 0.0], &[4.0, 5.0, 0.0], &[7.0, 8.0, 9.0]]).unwrap()
        );
        assert_eq!(
            triu(&m, 1),
            matrix(&[&[0.0, 2.0, 3.0], &[0.0, 0.0, 6.0], &[0.0, 0.0, 0.0]]).unwrap()
        );
        assert_eq!(
            tril(&m, -1),
            matrix(&[&[0.0, 0.0, 0.0], &[4.0, 0.0, 0.0], &[7.0, 8.0, 0.0]]).unwrap()
        );

        let s = sparse(3, 3, &[(0, 2, 1.0), (2, 0, 1.0)]).unwrap();
        let lower = tril(&s, 0);
        assert_eq!(lower.get((0, 2)), 0.0);
        assert_eq!(lower.get((2, 0)), 1.0);
        assert_eq!(lower.stored_len(), 2);
    }
}
