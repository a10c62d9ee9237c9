//! Shape definitions
//!
//! A matrix shape is a (rows, cols) pair with both dimensions at least one.
//! Coefficients are always laid out column-major: the coefficient at
//! (row, col) lives at linear index `col * rows + row`.

use crate::error::{MatrixError, Result};

/// A single dimension, either fixed up front or left open until construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dim {
    Fixed(usize),
    Dynamic,
}

impl Dim {
    /// Resolve against a runtime extent
    ///
    /// A fixed dimension only accepts its own extent.
    pub const fn resolve(self, extent: usize) -> Option<usize> {
        match self {
            Dim::Fixed(n) if n == extent => Some(n),
            Dim::Fixed(_) => None,
            Dim::Dynamic => Some(extent),
        }
    }
}

/// Row and column counts of a matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shape {
    pub rows: usize,
    pub cols: usize,
}

impl Shape {
    /// Create a shape, rejecting zero extents and overflowing sizes
    pub const fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 || rows.checked_mul(cols).is_none() {
            return Err(MatrixError::InvalidDimension { rows, cols });
        }
        Ok(Self { rows, cols })
    }

    /// Resolve a pair of possibly dynamic dimensions against runtime extents
    pub const fn resolve(row_dim: Dim, col_dim: Dim, rows: usize, cols: usize) -> Result<Self> {
        match (row_dim.resolve(rows), col_dim.resolve(cols)) {
            (Some(r), Some(c)) => Self::new(r, c),
            _ => Err(MatrixError::InvalidDimension { rows, cols }),
        }
    }

    /// Number of coefficients
    pub const fn len(&self) -> usize {
        self.rows * self.cols
    }

    /// Always false for a validated shape
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Shape as a `(rows, cols)` tuple
    pub const fn dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub const fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// True for column vectors (C = 1) and row vectors (R = 1)
    pub const fn is_vector(&self) -> bool {
        self.rows == 1 || self.cols == 1
    }

    /// Shape with rows and columns swapped
    pub const fn transposed(&self) -> Self {
        Self {
            rows: self.cols,
            cols: self.rows,
        }
    }

    /// Column-major linear index of (row, col), unchecked
    pub const fn linear_index(&self, row: usize, col: usize) -> usize {
        col * self.rows + row
    }

    /// Inverse of [`Shape::linear_index`]
    pub const fn position(&self, index: usize) -> (usize, usize) {
        (index % self.rows, index / self.rows)
    }
}

impl core::fmt::Display for Shape {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_new() {
        assert_eq!(Shape::new(3, 4).map(|s| s.len()), Ok(12));
        assert_eq!(
            Shape::new(0, 4),
            Err(MatrixError::InvalidDimension { rows: 0, cols: 4 })
        );
        assert!(Shape::new(usize::MAX, 2).is_err());
    }

    #[test]
    fn test_resolve_dims() {
        assert_eq!(
            Shape::resolve(Dim::Fixed(3), Dim::Dynamic, 3, 7),
            Ok(Shape { rows: 3, cols: 7 })
        );
        assert!(Shape::resolve(Dim::Fixed(3), Dim::Dynamic, 4, 7).is_err());
        assert!(Shape::resolve(Dim::Dynamic, Dim::Dynamic, 2, 0).is_err());
    }

    #[test]
    fn test_column_major_index() {
        let shape = Shape { rows: 2, cols: 3 };
        // column 0 holds indices 0,1; column 1 holds 2,3
        assert_eq!(shape.linear_index(0, 0), 0);
        assert_eq!(shape.linear_index(1, 0), 1);
        assert_eq!(shape.linear_index(0, 1), 2);
        assert_eq!(shape.linear_index(1, 2), 5);
        for i in 0..shape.len() {
            let (r, c) = shape.position(i);
            assert_eq!(shape.linear_index(r, c), i);
        }
    }
}
