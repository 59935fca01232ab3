//! Reductions and descriptive statistics.
//!
//! Whole-container statistics accept any [`Tensor`] with `f64` elements and treat implicit zeros of
//! sparse containers like any other element.

use itertools::Itertools;
use numlab_tensor::{Error, Result, Tensor};

use crate::{Matrix, Vector};

/// Sums every element.
pub fn sum_all<A>(a: &A) -> f64
where
    A: Tensor<Value = f64> + ?Sized,
{
    a.iter_non_zero().map(|(_, x)| x).sum()
}

/// The arithmetic mean of every element.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if `a` has no elements.
pub fn mean_all<A>(a: &A) -> Result<f64>
where
    A: Tensor<Value = f64> + ?Sized,
{
    non_empty(a)?;
    Ok(sum_all(a) / a.size() as f64)
}

/// Sums a matrix along dimension `dim`.
///
/// - `dim == 1` sums each column, producing a `1 x ncols` matrix.
/// - `dim == 2` sums each row, producing an `nrows x 1` matrix.
///
/// Only the explicitly stored entries are visited.
///
/// # Errors
///
/// Returns [`Error::DimensionOutOfRange`] for any other `dim`, before looking at `a`.
///
/// # Examples
///
/// ```
/// # use numlab::{construct::matrix, stats::sum};
/// let m = matrix(&[&[1.0, 2.0], &[3.0, 4.0]])?;
/// assert_eq!(sum(&m, 1)?.as_nalgebra().as_slice(), &[4.0, 6.0]);
/// assert_eq!(sum(&m, 2)?.as_nalgebra().as_slice(), &[3.0, 7.0]);
/// assert!(sum(&m, 3).is_err());
/// # Ok::<(), numlab_tensor::Error>(())
/// ```
pub fn sum<A>(a: &A, dim: usize) -> Result<Matrix>
where
    A: Tensor<Key = (usize, usize), Domain = (usize, usize), Value = f64> + ?Sized,
{
    let (nrows, ncols) = a.domain();
    let (out_rows, out_cols) = match dim {
        1 => (1, ncols),
        2 => (nrows, 1),
        _ => return Err(Error::DimensionOutOfRange { dim }),
    };
    let mut out = Matrix::zeros(out_rows, out_cols);
    for ((row, col), x) in a.iter_non_zero() {
        let key = if dim == 1 { (0, col) } else { (row, 0) };
        out[key] += x;
    }
    Ok(out)
}

/// The mean of a matrix along dimension `dim`.
///
/// See [`sum`] for the meaning of `dim`.
///
/// # Errors
///
/// Returns [`Error::DimensionOutOfRange`] if `dim` is not 1 or 2.
pub fn mean<A>(a: &A, dim: usize) -> Result<Matrix>
where
    A: Tensor<Key = (usize, usize), Domain = (usize, usize), Value = f64> + ?Sized,
{
    let sums = sum(a, dim)?;
    let (nrows, ncols) = a.domain();
    let n = if dim == 1 { nrows } else { ncols };
    Ok(sums / n as f64)
}

/// The sample variance (normalized by `n - 1`) of every element.
///
/// The variance of a single element is 0.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if `a` has no elements.
pub fn var<A>(a: &A) -> Result<f64>
where
    A: Tensor<Value = f64> + ?Sized,
{
    let mean = mean_all(a)?;
    let n = a.size();
    if n == 1 {
        return Ok(0.0);
    }
    let squares: f64 = a.iter().map(|(_, x)| (x - mean).powi(2)).sum();
    Ok(squares / (n - 1) as f64)
}

/// The sample standard deviation of every element.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if `a` has no elements.
pub fn std<A>(a: &A) -> Result<f64>
where
    A: Tensor<Value = f64> + ?Sized,
{
    Ok(var(a)?.sqrt())
}

/// The smallest element, ignoring NaNs.
///
/// Returns NaN if every element is NaN.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if `a` has no elements.
pub fn min<A>(a: &A) -> Result<f64>
where
    A: Tensor<Value = f64> + ?Sized,
{
    non_empty(a)?;
    Ok(a.iter().map(|(_, x)| x).fold(f64::NAN, f64::min))
}

/// The largest element, ignoring NaNs.
///
/// Returns NaN if every element is NaN.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if `a` has no elements.
pub fn max<A>(a: &A) -> Result<f64>
where
    A: Tensor<Value = f64> + ?Sized,
{
    non_empty(a)?;
    Ok(a.iter().map(|(_, x)| x).fold(f64::NAN, f64::max))
}

/// The median of every element.
///
/// For an even number of elements, this is the mean of the two middle elements. NaNs sort after
/// every other value.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if `a` has no elements.
pub fn median<A>(a: &A) -> Result<f64>
where
    A: Tensor<Value = f64> + ?Sized,
{
    non_empty(a)?;
    let sorted = a.iter().map(|(_, x)| x).sorted_by(f64::total_cmp).collect_vec();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Ok((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Ok(sorted[mid])
    }
}

/// The cumulative sum of a vector.
pub fn cumsum<A>(a: &A) -> Vector
where
    A: Tensor<Key = usize, Value = f64> + ?Sized,
{
    let elems = a
        .iter()
        .scan(0.0, |acc, (_, x)| {
            *acc += x;
            Some(*acc)
        })
        .collect();
    Vector::from_vec(elems)
}

/// The Euclidean norm of every element.
pub fn norm<A>(a: &A) -> f64
where
    A: Tensor<Value = f64> + ?Sized,
{
    a.iter_non_zero().map(|(_, x)| x * x).sum::<f64>().sqrt()
}

fn non_empty<A: Tensor + ?Sized>(a: &A) -> Result<()> {
    if a.size() == 0 {
        return Err(Error::InvalidArgument {
            reason: "statistic is undefined for empty input",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use crate::construct::{linspace, matrix, sparse};

    use super::*;

    #[test]
    fn sum_along_dimensions() {
        let m = matrix(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]).unwrap();
        assert_eq!(sum(&m, 1).unwrap(), matrix(&[&[5.0, 7.0, 9.0]]).unwrap());
        assert_eq!(sum(&m, 2).unwrap(), matrix(&[&[6.0], &[15.0]]).unwrap());
        assert_eq!(mean(&m, 1).unwrap(), matrix(&[&[2.5, 3.5, 4.5]]).unwrap());
        assert_eq!(mean(&m, 2).unwrap(), matrix(&[&[2.0], &[5.0]]).unwrap());
    }

    #[test]
    fn sum_sparse() {
        let s = sparse(3, 2, &[(0, 1, 2.0), (2, 1, 3.0), (2, 0, 1.0)]).unwrap();
        assert_eq!(sum(&s, 1).unwrap(), matrix(&[&[1.0, 5.0]]).unwrap());
        assert_eq!(sum(&s, 2).unwrap(), matrix(&[&[2.0], &[0.0], &[4.0]]).unwrap());
        assert_eq!(sum_all(&s), 6.0);
        assert_eq!(mean_all(&s).unwrap(), 1.0);
    }

    #[test]
    fn invalid_dimension() {
        let m = matrix(&[&[1.0]]).unwrap();
        for dim in [0, 3, usize::MAX] {
            assert_eq!(sum(&m, dim), Err(Error::DimensionOutOfRange { dim }));
            assert_eq!(mean(&m, dim), Err(Error::DimensionOutOfRange { dim }));
        }
    }

    #[test]
    fn vector_statistics() {
        let v = Vector::from_vec(vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_eq!(mean_all(&v).unwrap(), 5.0);
        assert_relative_eq!(var(&v).unwrap(), 32.0 / 7.0);
        assert_relative_eq!(std(&v).unwrap(), (32.0f64 / 7.0).sqrt());
        assert_eq!(min(&v).unwrap(), 2.0);
        assert_eq!(max(&v).unwrap(), 9.0);
        assert_eq!(median(&v).unwrap(), 4.5);
        assert_eq!(median(&linspace(1.0, 5.0, 5)).unwrap(), 3.0);
        assert_eq!(cumsum(&linspace(1.0, 4.0, 4)).as_slice(), &[1.0, 3.0, 6.0, 10.0]);
        assert_relative_eq!(norm(&Vector::from_vec(vec![3.0, 4.0])), 5.0);
    }

    #[test]
    fn single_and_empty() {
        let one = Vector::from_vec(vec![3.0]);
        assert_eq!(var(&one).unwrap(), 0.0);
        let empty = Vector::zeros(0);
        for res in [mean_all(&empty), var(&empty), min(&empty), max(&empty), median(&empty)] {
            assert!(matches!(res, Err(Error::InvalidArgument { .. })));
        }
        assert!(cumsum(&empty).is_empty());
        assert_eq!(sum_all(&empty), 0.0);
    }

    #[test]
    fn nan_handling() {
        let v = Vector::from_vec(vec![1.0, f64::NAN, -1.0]);
        assert_eq!(min(&v).unwrap(), -1.0);
        assert_eq!(max(&v).unwrap(), 1.0);
        assert!(sum_all(&v).is_nan());
        assert!(median(&Vector::from_vec(vec![f64::NAN])).unwrap().is_nan());
    }

    #[test]
    fn implicit_zeros_count() {
        let s = numlab_tensor::SparseVector::from_entries(4, [(0, 8.0)]).unwrap();
        assert_eq!(mean_all(&s).unwrap(), 2.0);
        assert_eq!(min(&s).unwrap(), 0.0);
        assert_eq!(median(&s).unwrap(), 0.0);
        assert_eq!(cumsum(&s).as_slice(), &[8.0, 8.0, 8.0, 8.0]);
    }
}
