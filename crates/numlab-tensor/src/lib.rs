//! Generic dense and sparse tensors with elementwise arithmetic.
//!
//! # Overview
//!
//! Every container implements the [`Tensor`] capability trait: it maps each key of a fixed
//! *domain* to a value of a [`Scalar`] type, can be traversed over its whole domain
//! ([`Tensor::iter`]) or over its explicitly stored entries only ([`Tensor::iter_non_zero`]), and
//! can create a [`TensorBuilder`] producing a container of the same kind.
//!
//! Everything else is written once, generically, on top of that:
//!
//! - [`TensorMap`] maps values or key-value pairs, with dense and non-zero traversals.
//! - [`join`] combines two containers over the same domain with a [`JoinStrategy`].
//! - The [`ops`] module synthesizes arithmetic operators from element-level witnesses
//!   ([`ops::BinaryOp`]), choosing the cheapest traversal that is still correct for each operator.
//!
//! Four containers are provided: [`DenseVector`] and [`DenseMatrix`] (backed by [`nalgebra`]), and
//! [`SparseVector`] and [`SparseMatrix`] (sorted index arrays and CSR, respectively).
//!
//! # Goals & Non-Goals
//!
//! - Adding a container should only require implementing [`Tensor`] and [`TensorBuilder`], and
//!   invoking [`impl_tensor_ops!`].
//! - Adding an element type should only require implementing [`Scalar`] and the [`ops::BinaryOp`]
//!   witnesses it supports. Unsupported combinations fail to compile.
//! - Sparse containers must never be densified by operations that map zero to zero.
//! - Linear algebra (matrix products, decompositions) is out of scope; use the [`nalgebra`] types
//!   exposed by [`DenseMatrix::as_nalgebra`] for that.
//!
//! # Examples
//!
//! ```
//! use numlab_tensor::*;
//!
//! let a = SparseVector::<f64>::from_entries(5, [(1, 2.0), (3, 4.0)]).unwrap();
//! let b = DenseVector::<f64>::from_vec(vec![1.0, 1.0, 1.0, 1.0, 1.0]);
//!
//! // Scaling keeps the sparse representation.
//! let half = &a / 2.0;
//! assert_eq!(half.stored_len(), 2);
//!
//! // Tensor-tensor operations work across container kinds.
//! let sum = &b + &a;
//! assert_eq!(sum.as_slice(), &[1.0, 3.0, 1.0, 5.0, 1.0]);
//!
//! // Operands with different domains are rejected.
//! let c = DenseVector::<f64>::from_vec(vec![1.0, 2.0]);
//! assert!(c.try_add(&b).is_err());
//! ```

mod dense;
mod error;
mod join;
mod map;
pub mod ops;
mod scalar;
mod sparse;
mod tensor;
mod witness;

pub use dense::*;
pub use error::*;
pub use join::*;
pub use map::*;
pub use ops::TensorOps;
pub use scalar::*;
pub use sparse::*;
pub use tensor::*;

impl_tensor_ops!(
    DenseVector;
    scalars: [f32, f64, i32, i64, u8, u32, u64];
    tensors: [DenseVector, SparseVector];
);
impl_tensor_ops!(
    SparseVector;
    scalars: [f32, f64, i32, i64, u8, u32, u64];
    tensors: [SparseVector, DenseVector];
);
impl_tensor_ops!(
    DenseMatrix;
    scalars: [f32, f64, i32, i64, u8, u32, u64];
    tensors: [DenseMatrix, SparseMatrix];
);
impl_tensor_ops!(
    SparseMatrix;
    scalars: [f32, f64, i32, i64, u8, u32, u64];
    tensors: [SparseMatrix, DenseMatrix];
);
