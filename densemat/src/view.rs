//! Matrices mapped over caller-owned storage
//!
//! A view borrows an existing column-major buffer instead of owning one.
//! Writes through a mutable view land in the underlying buffer, and views
//! take part in every operation that accepts a [`DenseMatrix`].

use std::fmt;

use bytemuck::Pod;
use densemat_core::{
    cast_coefficients, cast_coefficients_mut, check_buffer_len, check_same_shape, DenseMatrix,
    DenseMatrixMut, Result, Scalar, Shape,
};

use crate::matrix::{fmt_coefficients, Matrix};

/// Read-only matrix over a borrowed coefficient slice
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatrixView<'a, T> {
    shape: Shape,
    data: &'a [T],
}

impl<'a, T> MatrixView<'a, T> {
    pub(crate) fn from_parts(shape: Shape, data: &'a [T]) -> Self {
        debug_assert_eq!(shape.len(), data.len());
        Self { shape, data }
    }

    /// Map `data` as a rows x cols column-major matrix
    ///
    /// # Errors
    ///
    /// `InvalidDimension` for a zero extent, `BufferLength` when the slice
    /// does not hold exactly rows * cols coefficients.
    pub fn from_slice(rows: usize, cols: usize, data: &'a [T]) -> Result<Self> {
        let shape = Shape::new(rows, cols)?;
        check_buffer_len(shape, data.len())?;
        Ok(Self { shape, data })
    }
}

impl<'a, T: Scalar + Pod> MatrixView<'a, T> {
    /// Map raw bytes holding native-endian coefficients
    pub fn from_bytes(rows: usize, cols: usize, bytes: &'a [u8]) -> Result<Self> {
        let shape = Shape::new(rows, cols)?;
        let data = cast_coefficients::<T>(shape, bytes)?;
        Ok(Self { shape, data })
    }
}

impl<T: Scalar> MatrixView<'_, T> {
    pub fn get(&self, row: usize, col: usize) -> Result<T> {
        self.get_element(row, col)
    }

    /// Copy into an owned matrix
    pub fn to_matrix(&self) -> Matrix<T> {
        Matrix::from_dense(self)
    }
}

impl<T: Scalar> DenseMatrix for MatrixView<'_, T> {
    type Element = T;

    fn shape(&self) -> Shape {
        self.shape
    }

    fn as_slice(&self) -> &[T] {
        self.data
    }
}

impl<T: fmt::Display> fmt::Display for MatrixView<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_coefficients(f, self.shape, self.data)
    }
}

/// Writable matrix over a borrowed coefficient slice
#[derive(Debug, PartialEq)]
pub struct MatrixViewMut<'a, T> {
    shape: Shape,
    data: &'a mut [T],
}

impl<'a, T> MatrixViewMut<'a, T> {
    pub(crate) fn from_parts(shape: Shape, data: &'a mut [T]) -> Self {
        debug_assert_eq!(shape.len(), data.len());
        Self { shape, data }
    }

    /// Map `data` as a writable rows x cols column-major matrix
    pub fn from_slice(rows: usize, cols: usize, data: &'a mut [T]) -> Result<Self> {
        let shape = Shape::new(rows, cols)?;
        check_buffer_len(shape, data.len())?;
        Ok(Self { shape, data })
    }
}

impl<'a, T: Scalar + Pod> MatrixViewMut<'a, T> {
    /// Map raw writable bytes holding native-endian coefficients
    pub fn from_bytes_mut(rows: usize, cols: usize, bytes: &'a mut [u8]) -> Result<Self> {
        let shape = Shape::new(rows, cols)?;
        let data = cast_coefficients_mut::<T>(shape, bytes)?;
        Ok(Self { shape, data })
    }
}

impl<T: Scalar> MatrixViewMut<'_, T> {
    pub fn get(&self, row: usize, col: usize) -> Result<T> {
        self.get_element(row, col)
    }

    /// Write through to the underlying buffer
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        self.set_element(row, col, value)
    }

    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    /// Overwrite every coefficient from a matrix of the same shape
    pub fn copy_from<M: DenseMatrix<Element = T> + ?Sized>(&mut self, source: &M) -> Result<()> {
        check_same_shape("copy_from", self.shape, source.shape())?;
        self.data.copy_from_slice(source.as_slice());
        Ok(())
    }

    /// Reborrow as a read-only view
    pub fn as_view(&self) -> MatrixView<'_, T> {
        MatrixView::from_parts(self.shape, &*self.data)
    }

    pub fn to_matrix(&self) -> Matrix<T> {
        Matrix::from_dense(self)
    }
}

impl<T: Scalar> DenseMatrix for MatrixViewMut<'_, T> {
    type Element = T;

    fn shape(&self) -> Shape {
        self.shape
    }

    fn as_slice(&self) -> &[T] {
        &*self.data
    }
}

impl<T: Scalar> DenseMatrixMut for MatrixViewMut<'_, T> {
    fn as_mut_slice(&mut self) -> &mut [T] {
        &mut *self.data
    }
}

impl<T: fmt::Display> fmt::Display for MatrixViewMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_coefficients(f, self.shape, &*self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use densemat_core::MatrixError;

    #[test]
    fn test_view_reads_column_major() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let view = MatrixView::from_slice(2, 3, &data).unwrap();
        assert_eq!(view.get(1, 0), Ok(2.0));
        assert_eq!(view.get(0, 2), Ok(5.0));
        assert!(matches!(view.get(2, 0), Err(MatrixError::OutOfRange { .. })));
        assert_eq!(view.to_matrix().to_row_major(), vec![1.0, 3.0, 5.0, 2.0, 4.0, 6.0]);

        assert_eq!(
            MatrixView::from_slice(2, 2, &data),
            Err(MatrixError::BufferLength { expected: 4, actual: 6 })
        );
    }

    #[test]
    fn test_writes_alias_underlying_buffer() {
        let mut data = [0.0f32; 4];
        {
            let mut view = MatrixViewMut::from_slice(2, 2, &mut data).unwrap();
            view.set(1, 0, 7.0).unwrap();
            view.set(0, 1, 3.0).unwrap();
            assert!(view.set(0, 2, 1.0).is_err());
        }
        assert_eq!(data, [0.0, 7.0, 3.0, 0.0]);

        let mut m = Matrix::<f32>::zeros(2, 2).unwrap();
        m.as_view_mut().fill(2.5);
        assert!(m.iter().all(|&x| x == 2.5));
    }

    #[test]
    fn test_views_in_arithmetic() {
        let a_data = [1, 3, 2, 4];
        let a = MatrixView::from_slice(2, 2, &a_data).unwrap();
        let id = Matrix::<i32>::identity(2, 2).unwrap();
        let p = id.checked_mul(&a).unwrap();
        assert_eq!(p.to_row_major(), vec![1, 2, 3, 4]);
        assert_eq!(id.checked_add(&a).unwrap().to_row_major(), vec![2, 2, 3, 5]);

        let mut out_data = [0; 4];
        let mut out = MatrixViewMut::from_slice(2, 2, &mut out_data).unwrap();
        out.copy_from(&p).unwrap();
        assert_eq!(out.as_view(), a);
        assert!(out.copy_from(&Matrix::<i32>::zeros(1, 4).unwrap()).is_err());
    }

    #[test]
    fn test_from_bytes() {
        let values: [f64; 4] = [1.0, 2.0, 3.0, 4.0];
        let bytes: &[u8] = bytemuck::cast_slice(&values);
        let view = MatrixView::<f64>::from_bytes(2, 2, bytes).unwrap();
        assert_eq!(view.get(1, 1), Ok(4.0));
        assert_eq!(view.to_string(), "1 3\n2 4");

        assert_eq!(
            MatrixView::<f64>::from_bytes(2, 2, &bytes[..31]),
            Err(MatrixError::ByteLayout)
        );

        let mut raw = [0u64; 2];
        let raw_bytes: &mut [u8] = bytemuck::cast_slice_mut(&mut raw);
        let mut view = MatrixViewMut::<i32>::from_bytes_mut(2, 2, raw_bytes).unwrap();
        view.set(1, 1, -1).unwrap();
        assert_eq!(view.get(1, 1), Ok(-1));
    }
}
