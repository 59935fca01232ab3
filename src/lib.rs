//! A small MATLAB-style numerics scripting surface.
//!
//! `numlab` builds on [`numlab_tensor`], which provides dense and sparse containers with
//! sparsity-aware elementwise operators. This crate adds what a script needs around them:
//!
//! - [`construct`]: `zeros`, `eye`, `linspace`, ranges, matrix literals, sparse matrices, ...
//! - [`random`]: uniform, normal, and integer sampling, driven by an explicit [`Session`].
//! - [`stats`]: sums along a dimension, mean, variance, median, norms, ...
//!
//! Everything is re-exported from [`prelude`].
//!
//! # Environment Variables
//!
//! * `NUMLAB_SEED`: overrides the random seed of sessions created with [`Session::from_env`].
//! * `RUST_LOG`: overrides the log filter set by [`init_logger!`].
//!
//! # Examples
//!
//! ```
//! use numlab::prelude::*;
//!
//! let mut session = Session::new(SessionOptions::default().seed(1));
//! let a = rand(&mut session, 3, 3);
//! let s = &a * 2.0 + &eye(3);
//! assert_eq!(sum(&s, 1)?.shape(), (1, 3));
//! # Ok::<(), numlab_tensor::Error>(())
//! ```
//!
//! [`Session`]: session::Session
//! [`Session::from_env`]: session::Session::from_env

use log::LevelFilter;
use numlab_tensor::{DenseMatrix, DenseVector, SparseMatrix, SparseVector};

pub mod construct;
pub mod random;
pub mod session;
pub mod stats;

pub use numlab_tensor as tensor;

/// A dense vector of [`f64`]s.
pub type Vector = DenseVector<f64>;
/// A dense matrix of [`f64`]s.
pub type Matrix = DenseMatrix<f64>;
/// A sparse vector of [`f64`]s.
pub type SpVector = SparseVector<f64>;
/// A sparse matrix of [`f64`]s.
pub type SpMatrix = SparseMatrix<f64>;

/// Everything needed to write a script.
pub mod prelude {
    pub use crate::construct::*;
    pub use crate::random::*;
    pub use crate::session::{Session, SessionOptions};
    pub use crate::stats::*;
    pub use crate::{Matrix, SpMatrix, SpVector, Vector};
    pub use numlab_tensor::{
        DenseMatrix, DenseVector, SparseMatrix, SparseVector, Tensor, TensorMap, TensorOps,
    };
}

/// macro-use only, not part of public API.
#[doc(hidden)]
pub fn init_logger(calling_crate: &'static str) {
    let log_level = LevelFilter::Debug;
    env_logger::Builder::new()
        .filter(Some(calling_crate), log_level)
        .filter(Some(env!("CARGO_PKG_NAME")), log_level)
        .filter(Some("numlab_tensor"), log_level)
        .parse_default_env()
        .try_init()
        .ok();
}

/// Initializes logging to *stderr*.
///
/// The calling crate and `numlab` will log at *debug* level, unless overridden with `RUST_LOG`.
///
/// If a global logger is already registered, this macro will do nothing.
#[macro_export]
macro_rules! init_logger {
    () => {
        $crate::init_logger(env!("CARGO_CRATE_NAME"))
    };
}
