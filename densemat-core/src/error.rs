//! Error types for dense matrix operations

/// Broad classification of a [`MatrixError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Operand shapes do not agree, or a shape is degenerate
    Shape,
    /// Element index outside the matrix
    Index,
    /// Caller-supplied storage has the wrong length or layout
    Buffer,
}

/// Structural errors raised before any computation takes place
///
/// Numeric degeneracies (singular inverse, zero-length normalization,
/// projection by a zero homogeneous coordinate) are not errors; they
/// produce NaN or infinite coefficients instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixError {
    /// Operand shapes are incompatible for the named operation
    ShapeMismatch {
        op: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },
    /// Element position outside `shape`
    OutOfRange {
        row: usize,
        col: usize,
        shape: (usize, usize),
    },
    /// A matrix must have at least one row and one column
    InvalidDimension { rows: usize, cols: usize },
    /// Flat buffer length does not equal rows * cols
    BufferLength { expected: usize, actual: usize },
    /// Byte buffer cannot be reinterpreted as the element type
    ByteLayout,
}

impl MatrixError {
    /// Shorthand for a shape mismatch between two operands
    pub const fn shape_mismatch(
        op: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    ) -> Self {
        MatrixError::ShapeMismatch { op, left, right }
    }

    /// Get the category of this error
    pub const fn category(&self) -> ErrorCategory {
        match self {
            MatrixError::ShapeMismatch { .. } | MatrixError::InvalidDimension { .. } => {
                ErrorCategory::Shape
            }
            MatrixError::OutOfRange { .. } => ErrorCategory::Index,
            MatrixError::BufferLength { .. } | MatrixError::ByteLayout => ErrorCategory::Buffer,
        }
    }
}

impl core::fmt::Display for MatrixError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MatrixError::ShapeMismatch { op, left, right } => write!(
                f,
                "Shape mismatch in {op}: {}x{} vs {}x{}",
                left.0, left.1, right.0, right.1
            ),
            MatrixError::OutOfRange { row, col, shape } => write!(
                f,
                "Index ({row}, {col}) out of range for {}x{} matrix",
                shape.0, shape.1
            ),
            MatrixError::InvalidDimension { rows, cols } => {
                write!(f, "Invalid matrix dimensions {rows}x{cols}")
            }
            MatrixError::BufferLength { expected, actual } => {
                write!(f, "Buffer holds {actual} coefficients, expected {expected}")
            }
            MatrixError::ByteLayout => write!(f, "Byte buffer has invalid size or alignment"),
        }
    }
}

impl core::error::Error for MatrixError {}

/// Result type for matrix operations
pub type Result<T> = core::result::Result<T, MatrixError>;
