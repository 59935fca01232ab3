//! Random sampling.
//!
//! All functions draw from the generator of an explicit [`Session`], so results are reproducible
//! for a given seed.

use std::f64::consts::TAU;

use numlab_tensor::{Error, Result};

use crate::{session::Session, Matrix, Vector};

/// An `nrows` x `ncols` matrix of samples uniformly distributed in `[0, 1)`.
pub fn rand(session: &mut Session, nrows: usize, ncols: usize) -> Matrix {
    let rng = session.rng();
    Matrix::from_fn(nrows, ncols, |_, _| rng.f64())
}

/// A vector of `n` samples uniformly distributed in `[0, 1)`.
pub fn rand_vector(session: &mut Session, n: usize) -> Vector {
    let rng = session.rng();
    Vector::from_fn(n, |_| rng.f64())
}

/// An `nrows` x `ncols` matrix of standard normally distributed samples.
pub fn randn(session: &mut Session, nrows: usize, ncols: usize) -> Matrix {
    let rng = session.rng();
    Matrix::from_fn(nrows, ncols, |_, _| {
        // Box-Muller; `u1` is in (0, 1] so that the logarithm is finite
        let u1 = 1.0 - rng.f64();
        let u2 = rng.f64();
        (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos()
    })
}

/// An `nrows` x `ncols` matrix of integers uniformly distributed in `1..=max`.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if `max` is 0.
pub fn randi(session: &mut Session, max: u64, nrows: usize, ncols: usize) -> Result<Matrix> {
    if max == 0 {
        return Err(Error::InvalidArgument {
            reason: "upper bound of random integers must be at least 1",
        });
    }
    let rng = session.rng();
    Ok(Matrix::from_fn(nrows, ncols, |_, _| rng.u64(1..=max) as f64))
}

/// A random permutation of the integers `1..=n`.
pub fn randperm(session: &mut Session, n: usize) -> Vector {
    let mut elems: Vec<f64> = (1..=n).map(|i| i as f64).collect();
    session.rng().shuffle(&mut elems);
    Vector::from_vec(elems)
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use numlab_tensor::Tensor;

    use crate::session::SessionOptions;

    use super::*;

    fn session() -> Session {
        Session::new(SessionOptions::default().seed(0x5eed))
    }

    #[test]
    fn uniform_range() {
        let m = rand(&mut session(), 20, 30);
        assert_eq!(m.shape(), (20, 30));
        assert!(m.iter().all(|(_, x)| (0.0..1.0).contains(&x)));
        assert!(rand_vector(&mut session(), 0).is_empty());
    }

    #[test]
    fn reproducible() {
        assert_eq!(randn(&mut session(), 4, 4), randn(&mut session(), 4, 4));
        let mut s = session();
        assert_ne!(rand(&mut s, 4, 4), rand(&mut s, 4, 4));
    }

    #[test]
    fn normal_moments() {
        let m = randn(&mut session(), 100, 100);
        let xs: Vec<f64> = m.iter().map(|(_, x)| x).collect();
        let mean = xs.iter().sum::<f64>() / xs.len() as f64;
        let var = xs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / xs.len() as f64;
        approx::assert_abs_diff_eq!(mean, 0.0, epsilon = 0.05);
        approx::assert_abs_diff_eq!(var, 1.0, epsilon = 0.1);
        assert!(xs.iter().all(|x| x.is_finite()));
    }

    #[test]
    fn integers() {
        let m = randi(&mut session(), 6, 10, 10).unwrap();
        assert!(m.iter().all(|(_, x)| x.fract() == 0.0 && (1.0..=6.0).contains(&x)));
        assert!(randi(&mut session(), 1, 3, 3).unwrap().iter().all(|(_, x)| x == 1.0));
        assert_eq!(
            randi(&mut session(), 0, 1, 1),
            Err(Error::InvalidArgument {
                reason: "upper bound of random integers must be at least 1"
            })
        );
    }

    #[test]
    fn permutation() {
        let p = randperm(&mut session(), 10);
        let sorted: Vec<f64> = p
            .as_slice()
            .iter()
            .copied()
            .sorted_by(f64::total_cmp)
            .collect();
        assert_eq!(sorted, (1..=10).map(|i| i as f64).collect::<Vec<_>>());
    }
}
