//! Index and shape validation for dense matrices
//!
//! Pure checks with no allocation. Every operation runs the relevant
//! check before touching any operand, so a failed operation never leaves
//! a partially written result behind.

use crate::{MatrixError, Shape};

/// Validate that (row, col) addresses a coefficient of `shape`
pub const fn check_index(shape: Shape, row: usize, col: usize) -> Result<usize, MatrixError> {
    if row >= shape.rows || col >= shape.cols {
        return Err(MatrixError::OutOfRange {
            row,
            col,
            shape: shape.dims(),
        });
    }
    Ok(shape.linear_index(row, col))
}

/// Validate that two operands have identical shapes
pub const fn check_same_shape(
    op: &'static str,
    left: Shape,
    right: Shape,
) -> Result<(), MatrixError> {
    if left.rows != right.rows || left.cols != right.cols {
        return Err(MatrixError::shape_mismatch(op, left.dims(), right.dims()));
    }
    Ok(())
}

/// Validate that `left * right` is defined and get the product shape
pub const fn check_product(left: Shape, right: Shape) -> Result<Shape, MatrixError> {
    if left.cols != right.rows {
        return Err(MatrixError::shape_mismatch(
            "mul",
            left.dims(),
            right.dims(),
        ));
    }
    Ok(Shape {
        rows: left.rows,
        cols: right.cols,
    })
}

/// Validate that a matrix is square and get its order
pub const fn check_square(op: &'static str, shape: Shape) -> Result<usize, MatrixError> {
    if !shape.is_square() {
        return Err(MatrixError::shape_mismatch(op, shape.dims(), shape.transposed().dims()));
    }
    Ok(shape.rows)
}

/// Validate that a shape is a row or column vector and get its length
pub const fn check_vector(op: &'static str, shape: Shape) -> Result<usize, MatrixError> {
    if !shape.is_vector() {
        return Err(MatrixError::shape_mismatch(op, shape.dims(), (shape.len(), 1)));
    }
    Ok(shape.len())
}

/// Validate that a vector has exactly `len` coefficients
pub const fn check_vector_len(
    op: &'static str,
    shape: Shape,
    len: usize,
) -> Result<(), MatrixError> {
    match check_vector(op, shape) {
        Ok(n) if n == len => Ok(()),
        Ok(_) => Err(MatrixError::shape_mismatch(op, shape.dims(), (len, 1))),
        Err(e) => Err(e),
    }
}

/// Validate that a flat buffer holds exactly rows * cols coefficients
pub const fn check_buffer_len(shape: Shape, len: usize) -> Result<(), MatrixError> {
    if shape.len() != len {
        return Err(MatrixError::BufferLength {
            expected: shape.len(),
            actual: len,
        });
    }
    Ok(())
}
