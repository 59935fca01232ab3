//! Element-level arithmetic capabilities.
//!
//! An operator is a zero-sized marker type ([`OpAdd`], [`OpSub`], ...). A *witness* that an
//! operator can combine a left operand of type `L` with a right operand of type `R` is an impl of
//! [`BinaryOp<L, R>`] for the marker, which also names the result type. Resolution happens when the
//! call site is compiled: if no impl matches the operand types, the program does not compile, so
//! no traversal can ever start on an unsupported combination.
//!
//! New element types add capabilities by implementing [`BinaryOp`] for the markers they support;
//! no central registry needs to know about them.

use crate::{join::JoinStrategy, Scalar};

/// How a tensor-scalar operation traverses the tensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Traversal {
    /// Visit every key of the domain.
    Dense,
    /// Visit only explicitly stored entries, leaving other keys at zero.
    NonZero,
}

/// An elementwise arithmetic operator and its traversal policy.
pub trait Operator {
    /// Human-readable name, used in log messages.
    const NAME: &'static str;

    /// The join strategy used when both operands are tensors.
    const JOIN: JoinStrategy;

    /// Selects the traversal for `tensor <op> rhs`.
    ///
    /// Only [`Traversal::NonZero`] if `0 <op> rhs == 0`.
    fn scalar_traversal<S: Scalar>(rhs: S) -> Traversal;
}

/// Witness that the operator `Self` can be applied to `L` and `R`.
pub trait BinaryOp<L, R>: Operator {
    /// The type of `lhs <op> rhs`.
    type Output: Scalar;

    fn apply(lhs: L, rhs: R) -> Self::Output;
}

/// Elementwise addition.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpAdd;

/// Elementwise subtraction.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpSub;

/// Elementwise multiplication.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpMul;

/// Elementwise division.
///
/// Integer witnesses use the native `/` operator, so dividing an integer container by zero panics
/// (a zero scalar divisor visits every key, including implicit zeros). Floating-point division
/// yields infinities or NaN instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpDiv;

/// Elementwise exponentiation.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpPow;

/// Elementwise remainder (`%`).
#[derive(Debug, Clone, Copy, Default)]
pub struct OpMod;

impl Operator for OpAdd {
    const NAME: &'static str = "add";
    const JOIN: JoinStrategy = JoinStrategy::EitherNonZero;

    fn scalar_traversal<S: Scalar>(_: S) -> Traversal {
        Traversal::Dense
    }
}

impl Operator for OpSub {
    const NAME: &'static str = "sub";
    const JOIN: JoinStrategy = JoinStrategy::EitherNonZero;

    fn scalar_traversal<S: Scalar>(_: S) -> Traversal {
        Traversal::Dense
    }
}

impl Operator for OpMul {
    const NAME: &'static str = "mul";
    // Every key left unvisited is zero on both sides, and 0 * 0 == 0.
    const JOIN: JoinStrategy = JoinStrategy::EitherNonZero;

    fn scalar_traversal<S: Scalar>(rhs: S) -> Traversal {
        // 0 * NaN and 0 * inf are both NaN
        if rhs.is_finite() {
            Traversal::NonZero
        } else {
            Traversal::Dense
        }
    }
}

impl Operator for OpDiv {
    const NAME: &'static str = "div";
    // 0 / 0 has to be evaluated.
    const JOIN: JoinStrategy = JoinStrategy::All;

    fn scalar_traversal<S: Scalar>(rhs: S) -> Traversal {
        if rhs.is_zero() || rhs.is_nan() {
            Traversal::Dense
        } else {
            Traversal::NonZero
        }
    }
}

impl Operator for OpPow {
    const NAME: &'static str = "pow";
    const JOIN: JoinStrategy = JoinStrategy::All;

    fn scalar_traversal<S: Scalar>(_: S) -> Traversal {
        Traversal::Dense
    }
}

impl Operator for OpMod {
    const NAME: &'static str = "mod";
    const JOIN: JoinStrategy = JoinStrategy::All;

    fn scalar_traversal<S: Scalar>(_: S) -> Traversal {
        Traversal::Dense
    }
}

macro_rules! arith_witnesses {
    (@op $lhs:ty, $rhs:ty => $out:ty, $op:ty, |$l:ident, $r:ident| $body:expr) => {
        impl BinaryOp<$lhs, $rhs> for $op {
            type Output = $out;

            #[inline]
            fn apply($l: $lhs, $r: $rhs) -> $out {
                $body
            }
        }
    };
    ($($types:ty),+) => {
        $(
            arith_witnesses!(@op $types, $types => $types, OpAdd, |l, r| l + r);
            arith_witnesses!(@op $types, $types => $types, OpSub, |l, r| l - r);
            arith_witnesses!(@op $types, $types => $types, OpMul, |l, r| l * r);
            arith_witnesses!(@op $types, $types => $types, OpDiv, |l, r| l / r);
            arith_witnesses!(@op $types, $types => $types, OpMod, |l, r| l % r);
        )+
    };
}
arith_witnesses!(f32, f64, i32, i64, u8, u32, u64);

/// Integer operands mixed with `f64` are widened to `f64`.
macro_rules! widening_witnesses {
    ($($int:ty),+) => {
        $(
            arith_witnesses!(@op $int, f64 => f64, OpAdd, |l, r| l as f64 + r);
            arith_witnesses!(@op $int, f64 => f64, OpSub, |l, r| l as f64 - r);
            arith_witnesses!(@op $int, f64 => f64, OpMul, |l, r| l as f64 * r);
            arith_witnesses!(@op $int, f64 => f64, OpDiv, |l, r| l as f64 / r);
            arith_witnesses!(@op $int, f64 => f64, OpMod, |l, r| l as f64 % r);
            arith_witnesses!(@op f64, $int => f64, OpAdd, |l, r| l + r as f64);
            arith_witnesses!(@op f64, $int => f64, OpSub, |l, r| l - r as f64);
            arith_witnesses!(@op f64, $int => f64, OpMul, |l, r| l * r as f64);
            arith_witnesses!(@op f64, $int => f64, OpDiv, |l, r| l / r as f64);
            arith_witnesses!(@op f64, $int => f64, OpMod, |l, r| l % r as f64);
        )+
    };
}
widening_witnesses!(i32, i64);

arith_witnesses!(@op f32, f32 => f32, OpPow, |l, r| l.powf(r));
arith_witnesses!(@op f64, f64 => f64, OpPow, |l, r| l.powf(r));
arith_witnesses!(@op f32, i32 => f32, OpPow, |l, r| l.powi(r));
arith_witnesses!(@op f64, i32 => f64, OpPow, |l, r| l.powi(r));

#[cfg(test)]
mod tests {
    use super::*;

    fn apply<Op: BinaryOp<L, R>, L, R>(lhs: L, rhs: R) -> Op::Output {
        Op::apply(lhs, rhs)
    }

    #[test]
    fn same_type() {
        assert_eq!(apply::<OpAdd, f64, f64>(2.0, 0.5), 2.5);
        assert_eq!(apply::<OpSub, _, _>(7u8, 3u8), 4);
        assert_eq!(apply::<OpMod, _, _>(-7i32, 3i32), -1);
        assert_eq!(apply::<OpDiv, _, _>(7i64, 2i64), 3);
        assert_eq!(apply::<OpPow, _, _>(2.0f32, 3.0f32), 8.0);
    }

    #[test]
    #[should_panic(expected = "divide by zero")]
    fn integer_division_by_zero_panics() {
        apply::<OpDiv, _, _>(0i32, 0i32);
    }

    #[test]
    fn widening() {
        assert_eq!(apply::<OpDiv, i32, f64>(7, 2.0), 3.5);
        assert_eq!(apply::<OpMul, f64, i64>(1.5, 2), 3.0);
        assert_eq!(apply::<OpPow, f64, i32>(3.0, 2), 9.0);
    }

    #[test]
    fn scalar_traversals() {
        assert_eq!(OpAdd::scalar_traversal(0.0), Traversal::Dense);
        assert_eq!(OpSub::scalar_traversal(1i64), Traversal::Dense);

        assert_eq!(OpMul::scalar_traversal(3.0), Traversal::NonZero);
        assert_eq!(OpMul::scalar_traversal(0.0), Traversal::NonZero);
        assert_eq!(OpMul::scalar_traversal(f64::NAN), Traversal::Dense);
        assert_eq!(OpMul::scalar_traversal(f32::NEG_INFINITY), Traversal::Dense);

        assert_eq!(OpDiv::scalar_traversal(2.0), Traversal::NonZero);
        assert_eq!(OpDiv::scalar_traversal(f64::INFINITY), Traversal::NonZero);
        assert_eq!(OpDiv::scalar_traversal(0.0), Traversal::Dense);
        assert_eq!(OpDiv::scalar_traversal(0i32), Traversal::Dense);
        assert_eq!(OpDiv::scalar_traversal(f64::NAN), Traversal::Dense);

        assert_eq!(OpPow::scalar_traversal(2.0), Traversal::Dense);
        assert_eq!(OpMod::scalar_traversal(2u8), Traversal::Dense);
    }

    #[test]
    fn join_strategies() {
        assert_eq!(OpAdd::JOIN, JoinStrategy::EitherNonZero);
        assert_eq!(OpSub::JOIN, JoinStrategy::EitherNonZero);
        assert_eq!(OpMul::JOIN, JoinStrategy::EitherNonZero);
        assert_eq!(OpDiv::JOIN, JoinStrategy::All);
        assert_eq!(OpPow::JOIN, JoinStrategy::All);
        assert_eq!(OpMod::JOIN, JoinStrategy::All);
    }
}
