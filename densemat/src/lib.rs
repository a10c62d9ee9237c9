//! densemat - dense column-major matrices and affine transforms
//!
//! This library provides dense matrix and vector values stored column-major,
//! filled row-major, with checked arithmetic and homogeneous transforms for
//! graphics-style work.
//!
//! ## Architecture
//!
//! densemat follows a specification/implementation separation:
//!
//! - **densemat-core**: shapes, coefficient traits, errors and validation (no_std)
//! - **densemat**: storages, kernels, arithmetic and transforms
//!
//! ## Quick Start
//!
//! ```rust
//! use densemat::{Matrix, Matrix3, Vector3};
//!
//! fn example() -> densemat::Result<()> {
//!     // values are given row by row and stored column by column
//!     let a = Matrix::from_row_major(2, 2, &[1.0f64, 2.0, 3.0, 4.0])?;
//!     assert_eq!(a.as_slice(), &[1.0, 3.0, 2.0, 4.0]);
//!
//!     // runtime shapes are checked
//!     let b = (&a * &a.inverse()?)?;
//!     approx::assert_relative_eq!(b, Matrix::identity(2, 2)?, epsilon = 1e-12);
//!     assert!((&a + &Matrix::zeros(3, 3)?).is_err());
//!
//!     // compile-time shapes are checked by the type system
//!     let v = Matrix3::<f64>::identity() * Vector3::new(1.0, 2.0, 3.0);
//!     assert_eq!(v.dot(&v), 14.0);
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! ## Features
//!
//! - **parallel** (default): column-parallel products for large operands via rayon
//! - **serde**: serialization of `Matrix`, `Shape` and `Affine`
//!
//! `Matrix` and `SMatrix` implement the `approx` comparison traits, so
//! whole matrices can be checked with `assert_relative_eq!` and friends.

pub use densemat_core::{
    // Core traits
    DenseMatrix, DenseMatrixMut, Scalar,
    // Shapes
    Dim, Shape,
    // Error handling
    ErrorCategory, MatrixError, Result,
};

mod kernels;

pub mod comma;
pub mod config;
pub mod elementwise;
pub mod fixed;
pub mod matrix;
pub mod ops;
pub mod real;
pub mod transform;
pub mod vector;
pub mod view;

pub use comma::CommaInitializer;
pub use config::ProductConfig;
pub use fixed::{Matrix2, Matrix3, Matrix4, SMatrix, SVector, Vector2, Vector3, Vector4};
pub use matrix::Matrix;
pub use real::Real;
pub use transform::Affine;
pub use view::{MatrixView, MatrixViewMut};
