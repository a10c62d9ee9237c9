//! Affine transforms in homogeneous coordinates
//!
//! An [`Affine`] accumulates scale, rotation and translation steps in a
//! single (D+1)x(D+1) matrix. The plain methods right-multiply each step
//! onto the accumulator (M = M * E), so a point sees the most recently
//! issued step first. The `pre_*` methods left-multiply (M = E * M), so
//! a point sees the steps in the order they were issued.
//!
//! ```
//! use densemat::Affine;
//!
//! let mut t = Affine::<f64>::identity(3)?;
//! t.pre_scale(2.0).pre_translate(&[1.0, 0.0, 0.0])?;
//! assert_eq!(t.apply_point(&[1.0, 1.0, 1.0])?, vec![3.0, 2.0, 2.0]);
//! # Ok::<(), densemat::MatrixError>(())
//! ```

use std::fmt;

use densemat_core::{check_square, DenseMatrix, MatrixError, Result, Shape};
use num_traits::Float;

use crate::kernels;
use crate::matrix::Matrix;
use crate::real::Real;

/// A D-dimensional affine map stored as a homogeneous matrix
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "Matrix<T>",
        into = "Matrix<T>",
        bound(
            serialize = "T: Real + serde::Serialize",
            deserialize = "T: Real + serde::Deserialize<'de>"
        )
    )
)]
pub struct Affine<T> {
    dim: usize,
    matrix: Matrix<T>,
}

fn check_len(op: &'static str, dim: usize, len: usize) -> Result<()> {
    if len != dim {
        return Err(MatrixError::shape_mismatch(op, (dim, 1), (len, 1)));
    }
    Ok(())
}

impl<T: Real> Affine<T> {
    /// The identity transform of a `dim`-dimensional space
    ///
    /// # Errors
    ///
    /// `InvalidDimension` if `dim` is zero.
    pub fn identity(dim: usize) -> Result<Self> {
        if dim == 0 {
            return Err(MatrixError::InvalidDimension { rows: 0, cols: 0 });
        }
        Ok(Self {
            dim,
            matrix: Matrix::identity(dim + 1, dim + 1)?,
        })
    }

    /// Adopt an existing homogeneous matrix
    ///
    /// The matrix must be square and at least 2x2; its last row is not
    /// required to be `[0 .. 0 1]`.
    pub fn from_matrix(matrix: Matrix<T>) -> Result<Self> {
        let n = check_square("affine", matrix.shape())?;
        if n < 2 {
            return Err(MatrixError::InvalidDimension { rows: n, cols: n });
        }
        Ok(Self { dim: n - 1, matrix })
    }

    /// Dimension D of the space the transform acts on
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn matrix(&self) -> &Matrix<T> {
        &self.matrix
    }

    pub fn into_matrix(self) -> Matrix<T> {
        self.matrix
    }

    fn post_multiply(&mut self, step: &Matrix<T>) -> Result<&mut Self> {
        self.matrix = self.matrix.checked_mul(step)?;
        Ok(self)
    }

    fn pre_multiply(&mut self, step: &Matrix<T>) -> Result<&mut Self> {
        self.matrix = step.checked_mul(&self.matrix)?;
        Ok(self)
    }

    fn scaling(&self, factors: &[T]) -> Result<Matrix<T>> {
        check_len("scale", self.dim, factors.len())?;
        let mut diagonal = factors.to_vec();
        diagonal.push(T::one());
        Matrix::from_diagonal(&diagonal)
    }

    fn translation(&self, offset: &[T]) -> Result<Matrix<T>> {
        check_len("translate", self.dim, offset.len())?;
        let mut step = Matrix::identity(self.dim + 1, self.dim + 1)?;
        for (row, &x) in offset.iter().enumerate() {
            step.set(row, self.dim, x)?;
        }
        Ok(step)
    }

    /// Homogeneous rotation by `angle` radians about the unit `axis`
    #[rustfmt::skip]
    fn rotation(&self, angle: T, axis: &[T]) -> Result<Matrix<T>> {
        if self.dim != 3 {
            return Err(MatrixError::shape_mismatch(
                "rotate",
                (self.dim + 1, self.dim + 1),
                (4, 4),
            ));
        }
        check_len("rotate", 3, axis.len())?;
        let (x, y, z) = (axis[0], axis[1], axis[2]);
        let (s, c) = Float::sin_cos(angle);
        let t = T::one() - c;
        let zero = T::zero();
        Matrix::from_row_major(
            4,
            4,
            &[
                t * x * x + c,     t * x * y - s * z, t * x * z + s * y, zero,
                t * x * y + s * z, t * y * y + c,     t * y * z - s * x, zero,
                t * x * z - s * y, t * y * z + s * x, t * z * z + c,     zero,
                zero,              zero,              zero,              T::one(),
            ],
        )
    }

    fn rotation_2d(&self, angle: T) -> Result<Matrix<T>> {
        if self.dim != 2 {
            return Err(MatrixError::shape_mismatch(
                "rotate_2d",
                (self.dim + 1, self.dim + 1),
                (3, 3),
            ));
        }
        let (s, c) = Float::sin_cos(angle);
        let zero = T::zero();
        Matrix::from_row_major(3, 3, &[c, -s, zero, s, c, zero, zero, zero, T::one()])
    }

    /// Uniform scale of the linear part
    pub fn scale(&mut self, factor: T) -> &mut Self {
        let rows = self.dim + 1;
        for x in &mut self.matrix.as_mut_slice()[..self.dim * rows] {
            *x = *x * factor;
        }
        self
    }

    /// Per-axis scale
    pub fn scale_by(&mut self, factors: &[T]) -> Result<&mut Self> {
        let step = self.scaling(factors)?;
        self.post_multiply(&step)
    }

    /// Rotate by `angle` radians about `axis` (3D only)
    ///
    /// `axis` must have unit length; this is not checked, and any other
    /// length produces a matrix that also scales.
    pub fn rotate(&mut self, angle: T, axis: &[T]) -> Result<&mut Self> {
        let step = self.rotation(angle, axis)?;
        self.post_multiply(&step)
    }

    /// Rotate counter-clockwise by `angle` radians (2D only)
    pub fn rotate_2d(&mut self, angle: T) -> Result<&mut Self> {
        let step = self.rotation_2d(angle)?;
        self.post_multiply(&step)
    }

    pub fn translate(&mut self, offset: &[T]) -> Result<&mut Self> {
        let step = self.translation(offset)?;
        self.post_multiply(&step)
    }

    /// Uniform scale applied after the current transform
    pub fn pre_scale(&mut self, factor: T) -> &mut Self {
        let rows = self.dim + 1;
        for column in self.matrix.as_mut_slice().chunks_mut(rows) {
            for x in &mut column[..rows - 1] {
                *x = *x * factor;
            }
        }
        self
    }

    pub fn pre_scale_by(&mut self, factors: &[T]) -> Result<&mut Self> {
        let step = self.scaling(factors)?;
        self.pre_multiply(&step)
    }

    pub fn pre_rotate(&mut self, angle: T, axis: &[T]) -> Result<&mut Self> {
        let step = self.rotation(angle, axis)?;
        self.pre_multiply(&step)
    }

    pub fn pre_rotate_2d(&mut self, angle: T) -> Result<&mut Self> {
        let step = self.rotation_2d(angle)?;
        self.pre_multiply(&step)
    }

    pub fn pre_translate(&mut self, offset: &[T]) -> Result<&mut Self> {
        let step = self.translation(offset)?;
        self.pre_multiply(&step)
    }

    /// Transform that applies `self` first and `next` second
    pub fn then(&self, next: &Self) -> Result<Self> {
        Ok(Self {
            dim: self.dim,
            matrix: next.matrix.checked_mul(&self.matrix)?,
        })
    }

    /// Inverse transform; a singular transform yields NaN coefficients
    pub fn inverse(&self) -> Self {
        let n = self.dim + 1;
        let data = kernels::invert(self.matrix.as_slice(), n).unwrap_or_else(|| {
            log::debug!("Inverse of singular {}D transform, filling with NaN", self.dim);
            vec![T::nan(); n * n]
        });
        Self {
            dim: self.dim,
            matrix: Matrix::from_parts(Shape { rows: n, cols: n }, data),
        }
    }

    /// Transform the points stored as the columns of a D x N matrix
    ///
    /// Each column is lifted to homogeneous coordinates first; the result
    /// is the (D+1) x N matrix of transformed homogeneous points.
    pub fn apply_points<M: DenseMatrix<Element = T> + ?Sized>(
        &self,
        points: &M,
    ) -> Result<Matrix<T>> {
        if points.nrows() != self.dim {
            return Err(MatrixError::shape_mismatch(
                "apply_points",
                (self.dim, points.ncols()),
                points.dimensions(),
            ));
        }
        let lifted = Matrix::from_dense(points).colwise_homogeneous();
        log::trace!(
            "Applying {}D transform to {} points",
            self.dim,
            lifted.ncols()
        );
        self.matrix.checked_mul(&lifted)
    }

    /// Transform a single point and project it back to D coordinates
    pub fn apply_point(&self, point: &[T]) -> Result<Vec<T>> {
        check_len("apply_point", self.dim, point.len())?;
        let lifted = Matrix::column_vector(point)?.to_homogeneous()?;
        let moved = self.matrix.checked_mul(&lifted)?;
        Ok(moved.dehomogenize()?.into_vec())
    }
}

impl<T: Real> TryFrom<Matrix<T>> for Affine<T> {
    type Error = MatrixError;

    fn try_from(matrix: Matrix<T>) -> Result<Self> {
        Self::from_matrix(matrix)
    }
}

impl<T> From<Affine<T>> for Matrix<T> {
    fn from(affine: Affine<T>) -> Self {
        affine.matrix
    }
}

impl<T: fmt::Display> fmt::Display for Affine<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.matrix, f)
    }
}
