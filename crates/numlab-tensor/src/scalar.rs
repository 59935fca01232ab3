use std::fmt;

/// Element types that can be stored in a [`Tensor`][crate::Tensor].
///
/// Every element type defines its own *zero* (the value implicitly held by keys a sparse container
/// does not store) and the predicates the operator synthesizer uses to decide whether a
/// sparsity-preserving traversal is sound.
///
/// Implementations are provided for [`f32`], [`f64`], the common integer types, and [`bool`].
pub trait Scalar: Copy + PartialEq + fmt::Debug + 'static {
    /// The *0* value of this type.
    const ZERO: Self;

    /// Returns whether `self` is a *Not-a-Number* value.
    ///
    /// Always `false` for types without a NaN representation.
    fn is_nan(self) -> bool;

    /// Returns whether `self` is neither infinite nor NaN.
    ///
    /// Always `true` for types without infinities.
    #[inline]
    fn is_finite(self) -> bool {
        !self.is_nan()
    }

    /// Returns whether `self` compares equal to [`Scalar::ZERO`].
    #[inline]
    fn is_zero(self) -> bool {
        self == Self::ZERO
    }
}

macro_rules! float_scalar {
    ($($types:ty),+) => {
        $(
            impl Scalar for $types {
                const ZERO: Self = 0.0;

                #[inline]
                fn is_nan(self) -> bool {
                    <$types>::is_nan(self)
                }

                #[inline]
                fn is_finite(self) -> bool {
                    <$types>::is_finite(self)
                }
            }
        )+
    };
}
float_scalar!(f32, f64);

macro_rules! int_scalar {
    ($($types:ty),+) => {
        $(
            impl Scalar for $types {
                const ZERO: Self = 0;

                #[inline]
                fn is_nan(self) -> bool {
                    false
                }
            }
        )+
    };
}
int_scalar!(u8, u16, u32, u64, i8, i16, i32, i64);

/// `false` is the zero of boolean masks.
impl Scalar for bool {
    const ZERO: Self = false;

    #[inline]
    fn is_nan(self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeros() {
        assert!(0.0f64.is_zero());
        assert!((-0.0f32).is_zero());
        assert!(0i64.is_zero());
        assert!(!true.is_zero());
        assert!(!f64::NAN.is_zero());
    }

    #[test]
    fn nan_and_finite() {
        assert!(f64::NAN.is_nan());
        assert!(!f64::NAN.is_finite());
        assert!(!f32::INFINITY.is_nan());
        assert!(!f32::INFINITY.is_finite());
        assert!(!7u8.is_nan());
        assert!(i32::MAX.is_finite());
    }
}
