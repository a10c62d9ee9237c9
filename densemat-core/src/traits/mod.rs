//! Abstract interfaces for dense matrices
//!
//! This module defines all trait abstractions used in the densemat
//! ecosystem. Concrete storage lives in the `densemat` crate.

pub mod element;
pub mod matrix;

pub use element::Scalar;
pub use matrix::{DenseMatrix, DenseMatrixMut};
