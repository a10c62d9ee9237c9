//! Core matrix access traits
//!
//! These traits are implemented by every dense storage in the ecosystem:
//! owned dynamic matrices, fixed-size matrices and mapped views over
//! caller memory. Arithmetic in the implementation crate accepts any
//! `DenseMatrix` operand through them.

use super::element::Scalar;
use crate::{check_index, Result, Shape};

/// Read access to a dense column-major matrix
pub trait DenseMatrix {
    /// The coefficient type stored in this matrix
    type Element: Scalar;

    /// Get the matrix shape
    fn shape(&self) -> Shape;

    /// All coefficients in column-major order
    fn as_slice(&self) -> &[Self::Element];

    /// Get matrix dimensions as (rows, cols)
    fn dimensions(&self) -> (usize, usize) {
        self.shape().dims()
    }

    fn nrows(&self) -> usize {
        self.shape().rows
    }

    fn ncols(&self) -> usize {
        self.shape().cols
    }

    /// Get the coefficient at (row, col)
    ///
    /// Returns `OutOfRange` if row >= rows or col >= cols.
    fn get_element(&self, row: usize, col: usize) -> Result<Self::Element> {
        let index = check_index(self.shape(), row, col)?;
        Ok(self.as_slice()[index])
    }
}

/// Write access to a dense column-major matrix
pub trait DenseMatrixMut: DenseMatrix {
    /// All coefficients in column-major order
    fn as_mut_slice(&mut self) -> &mut [Self::Element];

    /// Overwrite the coefficient at (row, col)
    fn set_element(&mut self, row: usize, col: usize, value: Self::Element) -> Result<()> {
        let index = check_index(self.shape(), row, col)?;
        self.as_mut_slice()[index] = value;
        Ok(())
    }
}
