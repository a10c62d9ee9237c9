//! Floating point coefficient support
//!
//! Only floating point coefficients can carry the NaN/Inf sentinels used
//! for degenerate numeric results, so inverses, norms and the transcendental
//! elementwise functions are restricted to [`Real`] types.

use densemat_core::Scalar;
use num_traits::Float;

/// Floating point coefficient type
///
/// Every [`Scalar`] that is also a `num_traits::Float` qualifies, which in
/// practice means `f32` and `f64`.
pub trait Real: Scalar + Float {}

impl<T: Scalar + Float> Real for T {}
