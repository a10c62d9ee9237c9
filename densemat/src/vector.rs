//! Vector operations on dynamically sized matrices
//!
//! A vector is a matrix with a single column (column vector) or a single
//! row (row vector). Operations that need a vector check the shape first
//! and report `ShapeMismatch` for anything else.
//!
//! Two distinct operations divide a vector by something:
//! [`Matrix::normalized`] divides by the Euclidean norm, while
//! [`Matrix::dehomogenize`] divides by the trailing homogeneous
//! coordinate and drops it.

use densemat_core::{
    check_same_shape, check_vector, check_vector_len, DenseMatrix, MatrixError, Result, Scalar,
    Shape,
};

use num_traits::Float;

use crate::matrix::Matrix;
use crate::real::Real;

impl<T: Scalar> Matrix<T> {
    /// Column vector holding `values`
    pub fn column_vector(values: &[T]) -> Result<Self> {
        Self::from_column_major(values.len(), 1, values.to_vec())
    }

    /// Row vector holding `values`
    pub fn row_vector(values: &[T]) -> Result<Self> {
        Self::from_column_major(1, values.len(), values.to_vec())
    }

    /// True for column vectors and row vectors
    pub fn is_vector(&self) -> bool {
        self.shape().is_vector()
    }

    /// Sum of coefficient-wise products of two vectors of equal length
    ///
    /// Orientation does not matter; a row vector dots with a column vector.
    pub fn dot<M: DenseMatrix<Element = T> + ?Sized>(&self, other: &M) -> Result<T> {
        let n = check_vector("dot", self.shape())?;
        let m = check_vector("dot", other.shape())?;
        if n != m {
            return Err(MatrixError::shape_mismatch(
                "dot",
                self.shape().dims(),
                other.shape().dims(),
            ));
        }
        Ok(self
            .iter()
            .zip(other.as_slice())
            .fold(T::zero(), |acc, (&a, &b)| acc + a * b))
    }

    /// Right-handed cross product of two 3-vectors
    ///
    /// The result keeps the orientation of `self`.
    pub fn cross<M: DenseMatrix<Element = T> + ?Sized>(&self, other: &M) -> Result<Self> {
        check_vector_len("cross", self.shape(), 3)?;
        check_vector_len("cross", other.shape(), 3)?;
        let a = self.as_slice();
        let b = other.as_slice();
        let data = vec![
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ];
        Ok(Self::from_parts(self.shape(), data))
    }

    /// Sum of squared coefficients of a vector
    pub fn squared_norm(&self) -> Result<T> {
        check_vector("squared_norm", self.shape())?;
        Ok(self.iter().fold(T::zero(), |acc, &x| acc + x * x))
    }

    /// Append a trailing 1, lifting a point into homogeneous coordinates
    pub fn to_homogeneous(&self) -> Result<Self> {
        let n = check_vector("to_homogeneous", self.shape())?;
        let shape = if self.nrows() == 1 && n > 1 {
            Shape::new(1, n + 1)?
        } else {
            Shape::new(n + 1, 1)?
        };
        let mut data = self.as_slice().to_vec();
        data.push(T::one());
        Ok(Self::from_parts(shape, data))
    }

    /// Append a row of ones, lifting every column to homogeneous coordinates
    pub fn colwise_homogeneous(&self) -> Self {
        let rows = self.nrows() + 1;
        let mut data = Vec::with_capacity(rows * self.ncols());
        for col in 0..self.ncols() {
            let start = col * self.nrows();
            data.extend_from_slice(&self.as_slice()[start..start + self.nrows()]);
            data.push(T::one());
        }
        Self::from_parts(
            Shape {
                rows,
                cols: self.ncols(),
            },
            data,
        )
    }
}

impl<T: Real> Matrix<T> {
    /// Euclidean norm of a vector
    ///
    /// # Errors
    ///
    /// `ShapeMismatch` unless the matrix is a row or column vector.
    pub fn norm(&self) -> Result<T> {
        Ok(Float::sqrt(self.squared_norm()?))
    }

    /// Copy scaled to unit length
    ///
    /// A zero vector produces NaN coefficients.
    pub fn normalized(&self) -> Result<Self> {
        let norm = self.unit_divisor("normalized")?;
        Ok(self.map(|x| x / norm))
    }

    /// Scale to unit length in place
    pub fn normalize(&mut self) -> Result<()> {
        let norm = self.unit_divisor("normalize")?;
        for x in self.as_mut_slice() {
            *x = *x / norm;
        }
        Ok(())
    }

    fn unit_divisor(&self, op: &'static str) -> Result<T> {
        check_vector(op, self.shape())?;
        let norm = self.norm()?;
        if norm == T::zero() {
            log::debug!("Normalizing a zero-length {} vector", self.shape());
        }
        Ok(norm)
    }

    /// Divide the leading coefficients by the trailing one and drop it
    ///
    /// A zero trailing coefficient produces infinite or NaN coefficients.
    pub fn dehomogenize(&self) -> Result<Self> {
        let n = check_vector("dehomogenize", self.shape())?;
        if n < 2 {
            return Err(MatrixError::shape_mismatch(
                "dehomogenize",
                self.shape().dims(),
                (2, 1),
            ));
        }
        let data = self.as_slice();
        let w = data[n - 1];
        if w == T::zero() {
            log::trace!("Projecting homogeneous vector with zero trailing coordinate");
        }
        let shape = if self.nrows() == 1 {
            Shape::new(1, n - 1)?
        } else {
            Shape::new(n - 1, 1)?
        };
        Ok(Self::from_parts(
            shape,
            data[..n - 1].iter().map(|&x| x / w).collect(),
        ))
    }

    /// Project every column out of homogeneous coordinates
    pub fn colwise_dehomogenize(&self) -> Result<Self> {
        let rows = self.nrows();
        if rows < 2 {
            return Err(MatrixError::shape_mismatch(
                "colwise_dehomogenize",
                self.shape().dims(),
                (2, self.ncols()),
            ));
        }
        let mut data = Vec::with_capacity((rows - 1) * self.ncols());
        for column in self.as_slice().chunks(rows) {
            let w = column[rows - 1];
            data.extend(column[..rows - 1].iter().map(|&x| x / w));
        }
        Ok(Self::from_parts(
            Shape {
                rows: rows - 1,
                cols: self.ncols(),
            },
            data,
        ))
    }

    /// Angle in radians between two vectors of equal shape
    pub fn angle<M: DenseMatrix<Element = T> + ?Sized>(&self, other: &M) -> Result<T> {
        check_same_shape("angle", self.shape(), other.shape())?;
        let dot = self.dot(other)?;
        let other_squared = other
            .as_slice()
            .iter()
            .fold(T::zero(), |acc, &x| acc + x * x);
        let cos = dot / (self.norm()? * Float::sqrt(other_squared));
        // clamp rounding noise before acos
        let cos = if cos > T::one() {
            T::one()
        } else if cos < -T::one() {
            -T::one()
        } else {
            cos
        };
        Ok(Float::acos(cos))
    }
}
