//! Arithmetic operators for tensors.
//!
//! The operators are synthesized from an element-level witness ([`BinaryOp`]) and the generic
//! map/join machinery. The traversal is chosen per operator, and for tensor-scalar operations per
//! scalar value:
//!
//! | Operator | Tensor-scalar | Tensor-tensor |
//! |---|---|---|
//! | `+`, `-` | every key | keys stored by either side |
//! | `*` | stored entries, or every key if the scalar is NaN or infinite | keys stored by either side |
//! | `/` | stored entries, or every key if the scalar is zero or NaN | every key |
//! | [`pow`][TensorOps::pow], `%` | every key | every key |
//!
//! `std::ops` impls for the stock containers are generated by
//! [`impl_tensor_ops!`][crate::impl_tensor_ops], which can also be invoked for third-party
//! containers implementing [`Tensor`].
//!
//! A missing witness is a compile error:
//!
//! ```compile_fail
//! # use numlab_tensor::*;
//! let mask = DenseVector::from_vec(vec![true, false]);
//! let _ = &mask + 1.0; // no `OpAdd: BinaryOp<bool, f64>`
//! ```
//!
//! ```compile_fail
//! # use numlab_tensor::*;
//! let v = DenseVector::from_vec(vec![1i32, 2]);
//! let _ = v.pow(2i32); // integers cannot be raised to a power
//! ```

pub use crate::witness::{BinaryOp, OpAdd, OpDiv, OpMod, OpMul, OpPow, OpSub, Operator, Traversal};

use crate::{Error, Scalar, Tensor, TensorMap};

/// Applies `Op` to every element of `tensor` and the scalar `rhs`.
///
/// Visits only the explicitly stored entries if [`Operator::scalar_traversal`] allows it for `rhs`,
/// and every key of the domain otherwise.
pub fn scalar_op<Op, T, S>(tensor: &T, rhs: S) -> T::Like<Op::Output>
where
    T: Tensor + ?Sized,
    S: Scalar,
    Op: BinaryOp<T::Value, S>,
{
    let traversal = Op::scalar_traversal(rhs);
    log::trace!(
        "{} {:?} with scalar {:?}: {:?} traversal",
        Op::NAME,
        tensor.domain(),
        rhs,
        traversal,
    );
    match traversal {
        Traversal::Dense => tensor.map_values(|value| Op::apply(value, rhs)),
        Traversal::NonZero => tensor.map_non_zero(|value| Op::apply(value, rhs)),
    }
}

/// Applies `Op` to each pair of elements of `lhs` and `rhs`, using the operator's
/// [join strategy][Operator::JOIN].
///
/// # Errors
///
/// Returns [`Error::DomainMismatch`] if `lhs` and `rhs` have different domains. No elements are
/// combined in that case.
pub fn tensor_op<Op, A, B>(lhs: &A, rhs: &B) -> Result<A::Like<Op::Output>, Error>
where
    A: Tensor + ?Sized,
    B: Tensor<Key = A::Key, Domain = A::Domain> + ?Sized,
    Op: BinaryOp<A::Value, B::Value>,
{
    log::trace!(
        "{} {:?} with tensor: {:?} join",
        Op::NAME,
        lhs.domain(),
        Op::JOIN
    );
    crate::join::join(Op::JOIN, lhs, rhs, Op::apply)
}

/// Operator methods available on every [`Tensor`].
///
/// The `try_*` methods are the non-panicking counterparts of the `std::ops` impls and return
/// [`Error::DomainMismatch`] instead of panicking.
pub trait TensorOps: Tensor {
    /// Raises every element to the power `exponent`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use numlab_tensor::*;
    /// let v = DenseVector::<f64>::from_vec(vec![1.0, 2.0, 4.0]);
    /// assert_eq!(v.pow(2.0).as_slice(), &[1.0, 4.0, 16.0]);
    /// assert_eq!(v.pow(-1i32).as_slice(), &[1.0, 0.5, 0.25]);
    /// ```
    fn pow<S>(&self, exponent: S) -> Self::Like<<OpPow as BinaryOp<Self::Value, S>>::Output>
    where
        S: Scalar,
        OpPow: BinaryOp<Self::Value, S>,
    {
        scalar_op::<OpPow, _, _>(self, exponent)
    }

    /// Elementwise addition.
    fn try_add<B>(
        &self,
        rhs: &B,
    ) -> Result<Self::Like<<OpAdd as BinaryOp<Self::Value, B::Value>>::Output>, Error>
    where
        B: Tensor<Key = Self::Key, Domain = Self::Domain> + ?Sized,
        OpAdd: BinaryOp<Self::Value, B::Value>,
    {
        tensor_op::<OpAdd, _, _>(self, rhs)
    }

    /// Elementwise subtraction.
    fn try_sub<B>(
        &self,
        rhs: &B,
    ) -> Result<Self::Like<<OpSub as BinaryOp<Self::Value, B::Value>>::Output>, Error>
    where
        B: Tensor<Key = Self::Key, Domain = Self::Domain> + ?Sized,
        OpSub: BinaryOp<Self::Value, B::Value>,
    {
        tensor_op::<OpSub, _, _>(self, rhs)
    }

    /// Elementwise multiplication.
    fn try_mul<B>(
        &self,
        rhs: &B,
    ) -> Result<Self::Like<<OpMul as BinaryOp<Self::Value, B::Value>>::Output>, Error>
    where
        B: Tensor<Key = Self::Key, Domain = Self::Domain> + ?Sized,
        OpMul: BinaryOp<Self::Value, B::Value>,
    {
        tensor_op::<OpMul, _, _>(self, rhs)
    }

    /// Elementwise division.
    fn try_div<B>(
        &self,
        rhs: &B,
    ) -> Result<Self::Like<<OpDiv as BinaryOp<Self::Value, B::Value>>::Output>, Error>
    where
        B: Tensor<Key = Self::Key, Domain = Self::Domain> + ?Sized,
        OpDiv: BinaryOp<Self::Value, B::Value>,
    {
        tensor_op::<OpDiv, _, _>(self, rhs)
    }

    /// Elementwise exponentiation.
    fn try_pow<B>(
        &self,
        rhs: &B,
    ) -> Result<Self::Like<<OpPow as BinaryOp<Self::Value, B::Value>>::Output>, Error>
    where
        B: Tensor<Key = Self::Key, Domain = Self::Domain> + ?Sized,
        OpPow: BinaryOp<Self::Value, B::Value>,
    {
        tensor_op::<OpPow, _, _>(self, rhs)
    }

    /// Elementwise remainder.
    fn try_rem<B>(
        &self,
        rhs: &B,
    ) -> Result<Self::Like<<OpMod as BinaryOp<Self::Value, B::Value>>::Output>, Error>
    where
        B: Tensor<Key = Self::Key, Domain = Self::Domain> + ?Sized,
        OpMod: BinaryOp<Self::Value, B::Value>,
    {
        tensor_op::<OpMod, _, _>(self, rhs)
    }
}

impl<T: Tensor + ?Sized> TensorOps for T {}

#[doc(hidden)]
#[track_caller]
pub fn unwrap_domain<T>(res: Result<T, Error>) -> T {
    match res {
        Ok(value) => value,
        Err(e) => panic!("{e}"),
    }
}

/// Implements `std::ops::{Add, Sub, Mul, Div, Rem}` for a container type implementing [`Tensor`].
///
/// The container must be generic over its element type as its only type parameter, and its
/// [`Tensor::Like`] must be the same container with a different element type.
///
/// - `scalars` lists the scalar right-hand side types to implement the operators for.
/// - `tensors` lists the container types accepted as right-hand side operands. They must have the
///   same key and domain types as the container.
///
/// Every combination of owned and borrowed operands is supported. Tensor-tensor operators panic if
/// the operands have different domains; use the `try_*` methods of [`TensorOps`] to handle that
/// case.
///
/// # Examples
///
/// ```
/// # use numlab_tensor::*;
/// let a = DenseVector::<f64>::from_vec(vec![4.0, 0.0, 6.0]);
/// let b = DenseVector::<f64>::from_vec(vec![2.0, 5.0, 3.0]);
/// assert_eq!((&a + &b).as_slice(), &[6.0, 5.0, 9.0]);
/// assert_eq!((&a * 0.5).as_slice(), &[2.0, 0.0, 3.0]);
/// assert_eq!((a % 4.0).as_slice(), &[0.0, 0.0, 2.0]);
/// ```
#[macro_export]
macro_rules! impl_tensor_ops {
    (
        $container:ident;
        scalars: [$($scalar:ty),* $(,)?];
        tensors: [$($rhs:ident),* $(,)?] $(;)?
    ) => {
        $( $crate::impl_tensor_ops!(@scalar $container, $scalar); )*
        $( $crate::impl_tensor_ops!(@tensor $container, $rhs); )*
    };
    (@scalar $container:ident, $scalar:ty) => {
        $crate::impl_tensor_ops!(@scalar_op $container, $scalar, Add, add, $crate::ops::OpAdd);
        $crate::impl_tensor_ops!(@scalar_op $container, $scalar, Sub, sub, $crate::ops::OpSub);
        $crate::impl_tensor_ops!(@scalar_op $container, $scalar, Mul, mul, $crate::ops::OpMul);
        $crate::impl_tensor_ops!(@scalar_op $container, $scalar, Div, div, $crate::ops::OpDiv);
        $crate::impl_tensor_ops!(@scalar_op $container, $scalar, Rem, rem, $crate::ops::OpMod);
    };
    (@tensor $container:ident, $rhs:ident) => {
        $crate::impl_tensor_ops!(@tensor_op $container, $rhs, Add, add, $crate::ops::OpAdd);
        $crate::impl_tensor_ops!(@tensor_op $container, $rhs, Sub, sub, $crate::ops::OpSub);
        $crate::impl_tensor_ops!(@tensor_op $container, $rhs, Mul, mul, $crate::ops::OpMul);
        $crate::impl_tensor_ops!(@tensor_op $container, $rhs, Div, div, $crate::ops::OpDiv);
        $crate::impl_tensor_ops!(@tensor_op $container, $rhs, Rem, rem, $crate::ops::OpMod);
    };
    (@scalar_op $container:ident, $scalar:ty, $trait:ident, $method:ident, $op:ty) => {
        impl<V> ::core::ops::$trait<$scalar> for &$container<V>
        where
            V: $crate::Scalar,
            $op: $crate::ops::BinaryOp<V, $scalar>,
        {
            type Output = $container<<$op as $crate::ops::BinaryOp<V, $scalar>>::Output>;

            fn $method(self, rhs: $scalar) -> Self::Output {
                $crate::ops::scalar_op::<$op, _, _>(self, rhs)
            }
        }

        impl<V> ::core::ops::$trait<$scalar> for $container<V>
        where
            V: $crate::Scalar,
            $op: $crate::ops::BinaryOp<V, $scalar>,
        {
            type Output = $container<<$op as $crate::ops::BinaryOp<V, $scalar>>::Output>;

            fn $method(self, rhs: $scalar) -> Self::Output {
                $crate::ops::scalar_op::<$op, _, _>(&self, rhs)
            }
        }
    };
    (@tensor_op $container:ident, $rhs:ident, $trait:ident, $method:ident, $op:ty) => {
        impl<'a, V, W> ::core::ops::$trait<&'a $rhs<W>> for &$container<V>
        where
            V: $crate::Scalar,
            W: $crate::Scalar,
            $op: $crate::ops::BinaryOp<V, W>,
        {
            type Output = $container<<$op as $crate::ops::BinaryOp<V, W>>::Output>;

            #[track_caller]
            fn $method(self, rhs: &'a $rhs<W>) -> Self::Output {
                $crate::ops::unwrap_domain($crate::ops::tensor_op::<$op, _, _>(self, rhs))
            }
        }

        impl<'a, V, W> ::core::ops::$trait<&'a $rhs<W>> for $container<V>
        where
            V: $crate::Scalar,
            W: $crate::Scalar,
            $op: $crate::ops::BinaryOp<V, W>,
        {
            type Output = $container<<$op as $crate::ops::BinaryOp<V, W>>::Output>;

            #[track_caller]
            fn $method(self, rhs: &'a $rhs<W>) -> Self::Output {
                $crate::ops::unwrap_domain($crate::ops::tensor_op::<$op, _, _>(&self, rhs))
            }
        }

        impl<V, W> ::core::ops::$trait<$rhs<W>> for &$container<V>
        where
            V: $crate::Scalar,
            W: $crate::Scalar,
            $op: $crate::ops::BinaryOp<V, W>,
        {
            type Output = $container<<$op as $crate::ops::BinaryOp<V, W>>::Output>;

            #[track_caller]
            fn $method(self, rhs: $rhs<W>) -> Self::Output {
                $crate::ops::unwrap_domain($crate::ops::tensor_op::<$op, _, _>(self, &rhs))
            }
        }

        impl<V, W> ::core::ops::$trait<$rhs<W>> for $container<V>
        where
            V: $crate::Scalar,
            W: $crate::Scalar,
            $op: $crate::ops::BinaryOp<V, W>,
        {
            type Output = $container<<$op as $crate::ops::BinaryOp<V, W>>::Output>;

            #[track_caller]
            fn $method(self, rhs: $rhs<W>) -> Self::Output {
                $crate::ops::unwrap_domain($crate::ops::tensor_op::<$op, _, _>(&self, &rhs))
            }
        }
    };
}
