//! Dynamically sized dense matrix
//!
//! `Matrix<T>` owns a flat column-major buffer and a runtime [`Shape`].
//! Constructors validate the shape (at least one row and one column) and
//! every structural operation reports a [`MatrixError`] instead of
//! computing on mismatched operands.

use std::fmt;
use std::ops::{Index, IndexMut};

use approx::{AbsDiffEq, RelativeEq, UlpsEq};
use densemat_core::{
    check_buffer_len, check_index, DenseMatrix, DenseMatrixMut, Dim, MatrixError, Result, Scalar,
    Shape,
};
use num_traits::NumCast;
use rand::distributions::uniform::SampleUniform;
use rand::Rng;

use crate::kernels;
use crate::real::Real;

/// A dense matrix with runtime dimensions, stored column-major
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        try_from = "RawMatrix<T>",
        bound(deserialize = "T: serde::Deserialize<'de>")
    )
)]
pub struct Matrix<T> {
    shape: Shape,
    data: Vec<T>,
}

/// Unvalidated serialized form; checked on the way in
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawMatrix<T> {
    shape: Shape,
    data: Vec<T>,
}

#[cfg(feature = "serde")]
impl<T> TryFrom<RawMatrix<T>> for Matrix<T> {
    type Error = MatrixError;

    fn try_from(raw: RawMatrix<T>) -> Result<Self> {
        let shape = Shape::new(raw.shape.rows, raw.shape.cols)?;
        check_buffer_len(shape, raw.data.len())?;
        Ok(Self {
            shape,
            data: raw.data,
        })
    }
}

impl<T> Matrix<T> {
    /// Wrap a validated shape and a buffer of matching length
    pub(crate) fn from_parts(shape: Shape, data: Vec<T>) -> Self {
        debug_assert_eq!(shape.len(), data.len());
        Self { shape, data }
    }

    /// Take ownership of a column-major buffer
    ///
    /// # Errors
    ///
    /// `InvalidDimension` for a zero extent, `BufferLength` if
    /// `data.len() != rows * cols`.
    pub fn from_column_major(rows: usize, cols: usize, data: Vec<T>) -> Result<Self> {
        let shape = Shape::new(rows, cols)?;
        check_buffer_len(shape, data.len())?;
        Ok(Self { shape, data })
    }

    /// Build a matrix by evaluating `f(row, col)` for every coefficient
    pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> Result<Self>
    where
        F: FnMut(usize, usize) -> T,
    {
        let shape = Shape::new(rows, cols)?;
        let mut data = Vec::with_capacity(shape.len());
        for col in 0..cols {
            for row in 0..rows {
                data.push(f(row, col));
            }
        }
        Ok(Self { shape, data })
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn nrows(&self) -> usize {
        self.shape.rows
    }

    pub fn ncols(&self) -> usize {
        self.shape.cols
    }

    /// Number of coefficients
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false; a matrix holds at least one coefficient
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn is_square(&self) -> bool {
        self.shape.is_square()
    }

    /// Coefficients in column-major order
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the matrix, returning its column-major buffer
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Iterate over coefficients in column-major order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }
}

impl<T: Copy> Matrix<T> {
    /// Matrix with every coefficient set to `value`
    pub fn from_element(rows: usize, cols: usize, value: T) -> Result<Self> {
        let shape = Shape::new(rows, cols)?;
        Ok(Self {
            shape,
            data: vec![value; shape.len()],
        })
    }

    /// Get the coefficient at (row, col)
    ///
    /// # Errors
    ///
    /// `OutOfRange` if row >= rows or col >= cols.
    pub fn get(&self, row: usize, col: usize) -> Result<T> {
        let index = check_index(self.shape, row, col)?;
        Ok(self.data[index])
    }

    /// Overwrite the coefficient at (row, col)
    ///
    /// # Errors
    ///
    /// `OutOfRange` if row >= rows or col >= cols; the matrix is unchanged.
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        let index = check_index(self.shape, row, col)?;
        self.data[index] = value;
        Ok(())
    }

    /// Copy of one row as a 1 x cols matrix
    pub fn row(&self, row: usize) -> Result<Self> {
        check_index(self.shape, row, 0)?;
        let data = (0..self.shape.cols)
            .map(|col| self.data[self.shape.linear_index(row, col)])
            .collect();
        Ok(Self::from_parts(
            Shape {
                rows: 1,
                cols: self.shape.cols,
            },
            data,
        ))
    }

    /// Copy of one column as a rows x 1 matrix
    pub fn column(&self, col: usize) -> Result<Self> {
        let start = check_index(self.shape, 0, col)?;
        Ok(Self::from_parts(
            Shape {
                rows: self.shape.rows,
                cols: 1,
            },
            self.data[start..start + self.shape.rows].to_vec(),
        ))
    }

    /// Coefficients in row-major order
    pub fn to_row_major(&self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.len());
        for row in 0..self.shape.rows {
            for col in 0..self.shape.cols {
                out.push(self.data[self.shape.linear_index(row, col)]);
            }
        }
        out
    }
}

impl<T: Scalar> Matrix<T> {
    /// Zero matrix whose dimensions are fixed up front or left dynamic
    ///
    /// `Dim::Fixed(n)` only accepts an extent of `n`; `Dim::Dynamic` takes
    /// whatever is passed at construction.
    pub fn with_dims(row_dim: Dim, col_dim: Dim, rows: usize, cols: usize) -> Result<Self> {
        let shape = Shape::resolve(row_dim, col_dim, rows, cols)?;
        Ok(Self::from_parts(shape, vec![T::zero(); shape.len()]))
    }

    /// Copy any dense matrix (for example a mapped view) into owned storage
    pub fn from_dense<M: DenseMatrix<Element = T> + ?Sized>(source: &M) -> Self {
        Self::from_parts(source.shape(), source.as_slice().to_vec())
    }

    pub fn zeros(rows: usize, cols: usize) -> Result<Self> {
        Self::from_element(rows, cols, T::zero())
    }

    pub fn ones(rows: usize, cols: usize) -> Result<Self> {
        Self::from_element(rows, cols, T::one())
    }

    pub fn constant(rows: usize, cols: usize, value: T) -> Result<Self> {
        Self::from_element(rows, cols, value)
    }

    /// Ones along the min(rows, cols) diagonal, zeros elsewhere
    pub fn identity(rows: usize, cols: usize) -> Result<Self> {
        let shape = Shape::new(rows, cols)?;
        Ok(Self::from_parts(shape, kernels::identity(shape)))
    }

    /// Matrix with `values` on the diagonal
    pub fn from_diagonal(values: &[T]) -> Result<Self> {
        let n = values.len();
        let mut out = Self::zeros(n, n)?;
        for (i, &v) in values.iter().enumerate() {
            out.data[i * n + i] = v;
        }
        Ok(out)
    }

    /// New matrix with rows and columns swapped
    pub fn transpose(&self) -> Self {
        Self::from_parts(
            self.shape.transposed(),
            kernels::transpose(&self.data, self.shape),
        )
    }

    /// Sum of the diagonal
    pub fn trace(&self) -> T {
        (0..self.shape.rows.min(self.shape.cols))
            .fold(T::zero(), |acc, i| acc + self.data[self.shape.linear_index(i, i)])
    }

    /// Sum of all coefficients
    pub fn sum(&self) -> T {
        self.data.iter().fold(T::zero(), |acc, &x| acc + x)
    }

    /// Product of all coefficients
    pub fn product(&self) -> T {
        self.data.iter().fold(T::one(), |acc, &x| acc * x)
    }

    /// Smallest coefficient; NaN coefficients are skipped unless all are NaN
    pub fn min_coeff(&self) -> T {
        self.data
            .iter()
            .skip(1)
            .fold(self.data[0], |acc, &x| {
                if x < acc || acc.partial_cmp(&acc).is_none() {
                    x
                } else {
                    acc
                }
            })
    }

    /// Largest coefficient; NaN coefficients are skipped unless all are NaN
    pub fn max_coeff(&self) -> T {
        self.data
            .iter()
            .skip(1)
            .fold(self.data[0], |acc, &x| {
                if x > acc || acc.partial_cmp(&acc).is_none() {
                    x
                } else {
                    acc
                }
            })
    }

    /// Borrow as a mapped view
    pub fn as_view(&self) -> crate::view::MatrixView<'_, T> {
        crate::view::MatrixView::from_parts(self.shape, &self.data)
    }

    /// Borrow as a mutable mapped view
    pub fn as_view_mut(&mut self) -> crate::view::MatrixViewMut<'_, T> {
        crate::view::MatrixViewMut::from_parts(self.shape, &mut self.data)
    }
}

impl<T: Scalar + SampleUniform> Matrix<T> {
    /// Coefficients drawn independently and uniformly from [-1, 1]
    ///
    /// Integer matrices draw from the three values -1, 0 and 1.
    pub fn random(rows: usize, cols: usize) -> Result<Self> {
        Self::random_with(rows, cols, &mut rand::thread_rng())
    }

    /// [`Matrix::random`] with a caller-supplied generator
    pub fn random_with<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Result<Self> {
        Self::from_fn(rows, cols, |_, _| rng.gen_range(-T::one()..=T::one()))
    }
}

impl<T: Real> Matrix<T> {
    /// Mean of all coefficients
    pub fn mean(&self) -> T {
        self.sum() / <T as NumCast>::from(self.len()).unwrap_or_else(T::nan)
    }

    /// Inverse of a square matrix
    ///
    /// A singular or near-singular matrix yields a matrix filled with NaN
    /// rather than an error, so the poison carries through downstream
    /// arithmetic.
    ///
    /// # Errors
    ///
    /// `ShapeMismatch` if the matrix is not square.
    pub fn inverse(&self) -> Result<Self> {
        let n = densemat_core::check_square("inverse", self.shape)?;
        let data = kernels::invert(&self.data, n).unwrap_or_else(|| {
            log::debug!("Inverse of singular {n}x{n} matrix, filling with NaN");
            vec![T::nan(); n * n]
        });
        Ok(Self::from_parts(self.shape, data))
    }

    /// Determinant of a square matrix
    pub fn determinant(&self) -> Result<T> {
        let n = densemat_core::check_square("determinant", self.shape)?;
        Ok(kernels::determinant(&self.data, n))
    }

    /// True if any coefficient is NaN
    pub fn has_nan(&self) -> bool {
        self.data.iter().any(|x| x.is_nan())
    }
}

impl<T: Scalar> DenseMatrix for Matrix<T> {
    type Element = T;

    fn shape(&self) -> Shape {
        self.shape
    }

    fn as_slice(&self) -> &[T] {
        &self.data
    }
}

impl<T: Scalar> DenseMatrixMut for Matrix<T> {
    fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }
}

/// Approximate equality; shapes must match exactly
impl<T: AbsDiffEq> AbsDiffEq for Matrix<T>
where
    T::Epsilon: Copy,
{
    type Epsilon = T::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.shape == other.shape
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl<T: RelativeEq> RelativeEq for Matrix<T>
where
    T::Epsilon: Copy,
{
    fn default_max_relative() -> Self::Epsilon {
        T::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.shape == other.shape
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}

impl<T: UlpsEq> UlpsEq for Matrix<T>
where
    T::Epsilon: Copy,
{
    fn default_max_ulps() -> u32 {
        T::default_max_ulps()
    }

    fn ulps_eq(&self, other: &Self, epsilon: Self::Epsilon, max_ulps: u32) -> bool {
        self.shape == other.shape
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(a, b)| a.ulps_eq(b, epsilon, max_ulps))
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if the position is out of range.
    fn index(&self, (row, col): (usize, usize)) -> &T {
        match check_index(self.shape, row, col) {
            Ok(index) => &self.data[index],
            Err(e) => panic!("{e}"),
        }
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        match check_index(self.shape, row, col) {
            Ok(index) => &mut self.data[index],
            Err(e) => panic!("{e}"),
        }
    }
}

impl<'a, T> IntoIterator for &'a Matrix<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

/// Write a column-major buffer row by row with right-aligned columns
///
/// A precision on the formatter (`{:.3}`) applies to every coefficient.
pub(crate) fn fmt_coefficients<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    shape: Shape,
    data: &[T],
) -> fmt::Result {
    let cells: Vec<String> = data
        .iter()
        .map(|x| match f.precision() {
            Some(p) => format!("{x:.p$}"),
            None => format!("{x}"),
        })
        .collect();
    let width = cells.iter().map(String::len).max().unwrap_or(0);

    for row in 0..shape.rows {
        if row > 0 {
            writeln!(f)?;
        }
        for col in 0..shape.cols {
            if col > 0 {
                write!(f, " ")?;
            }
            write!(f, "{:>width$}", cells[shape.linear_index(row, col)])?;
        }
    }
    Ok(())
}

impl<T: fmt::Display> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_coefficients(f, self.shape, &self.data)
    }
}

impl<T> From<Matrix<T>> for Vec<T> {
    fn from(matrix: Matrix<T>) -> Self {
        matrix.data
    }
}

impl<T: Scalar> TryFrom<Vec<T>> for Matrix<T> {
    type Error = MatrixError;

    /// Column vector from a buffer
    fn try_from(data: Vec<T>) -> Result<Self> {
        let rows = data.len();
        Self::from_column_major(rows, 1, data)
    }
}
