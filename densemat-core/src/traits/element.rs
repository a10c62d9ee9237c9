//! Coefficient type constraints for dense matrices
//!
//! This module defines the trait that constrains what types can be
//! stored as matrix coefficients.

use core::fmt::{Debug, Display};
use core::ops::{AddAssign, MulAssign, SubAssign};

use num_traits::{NumCast, Signed};

/// Trait for types that can be stored as matrix coefficients
///
/// All coefficient types must be:
/// - Copy: Can be copied without allocation
/// - PartialEq/PartialOrd: Exact equality and elementwise comparisons
/// - Signed numbers: closed under the arithmetic operators and negation,
///   with `zero`, `one` and `abs` from `num_traits`
/// - NumCast: convertible from counts and other primitives
pub trait Scalar:
    Signed
    + NumCast
    + Copy
    + PartialOrd
    + Debug
    + Display
    + Send
    + Sync
    + AddAssign
    + SubAssign
    + MulAssign
    + 'static
{
}

macro_rules! impl_scalar {
    ($($t:ty),* $(,)?) => {$(
        impl Scalar for $t {}
    )*};
}

impl_scalar!(i32, i64, f32, f64);

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::{One, Zero};

    fn sum_abs<T: Scalar>(values: &[T]) -> T {
        values.iter().fold(T::zero(), |acc, x| acc + Signed::abs(x))
    }

    #[test]
    fn test_scalar_identities() {
        assert_eq!(f64::zero() + f64::one(), 1.0);
        assert_eq!(i32::one() * 7, 7);
        assert_eq!(sum_abs(&[-1i64, 2, -3]), 6);
        assert_eq!(sum_abs(&[-0.5f32, 0.25]), 0.75);
    }

    #[test]
    fn test_scalar_casts() {
        assert_eq!(<i32 as NumCast>::from(2.9f64), Some(2));
        assert_eq!(<f32 as NumCast>::from(3usize), Some(3.0));
        assert_eq!(<i32 as NumCast>::from(f64::NAN), None);
    }
}
