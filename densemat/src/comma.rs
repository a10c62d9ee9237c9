//! Row-major initialization of column-major matrices
//!
//! Values are written the way a matrix reads on paper, first row left to
//! right, then the second row, and land in column-major storage. The
//! number of values must match the shape exactly.

use densemat_core::{MatrixError, Result, Scalar, Shape};

use crate::matrix::Matrix;

fn check_count(shape: Shape, count: usize) -> Result<()> {
    if count != shape.len() {
        return Err(MatrixError::shape_mismatch(
            "comma initializer",
            shape.dims(),
            (1, count),
        ));
    }
    Ok(())
}

/// Scatter row-major values into a column-major buffer
fn scatter_row_major<T: Scalar>(shape: Shape, values: &[T]) -> Vec<T> {
    let mut data = vec![T::zero(); shape.len()];
    for (i, &v) in values.iter().enumerate() {
        data[shape.linear_index(i / shape.cols, i % shape.cols)] = v;
    }
    data
}

impl<T: Scalar> Matrix<T> {
    /// Build from exactly rows * cols values given in row-major order
    ///
    /// # Errors
    ///
    /// `ShapeMismatch` if the number of values differs from rows * cols.
    pub fn from_row_major(rows: usize, cols: usize, values: &[T]) -> Result<Self> {
        let shape = Shape::new(rows, cols)?;
        check_count(shape, values.len())?;
        Ok(Self::from_parts(shape, scatter_row_major(shape, values)))
    }

    /// Build from a slice of rows, all of equal length
    pub fn from_rows(rows: &[&[T]]) -> Result<Self> {
        let cols = rows.first().map_or(0, |r| r.len());
        let shape = Shape::new(rows.len(), cols)?;
        let mut values = Vec::with_capacity(shape.len());
        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(MatrixError::shape_mismatch(
                    "from_rows",
                    (i, cols),
                    (1, row.len()),
                ));
            }
            values.extend_from_slice(row);
        }
        Ok(Self::from_parts(shape, scatter_row_major(shape, &values)))
    }

    /// Start a sequential initializer for a rows x cols matrix
    ///
    /// ```
    /// use densemat::Matrix;
    ///
    /// let m = Matrix::comma(2, 2)?.push(1.0).push(2.0).push(3.0).push(4.0).finish()?;
    /// assert_eq!(m.get(0, 1)?, 2.0);
    /// assert_eq!(m.as_slice(), &[1.0, 3.0, 2.0, 4.0]);
    /// # Ok::<(), densemat::MatrixError>(())
    /// ```
    pub fn comma(rows: usize, cols: usize) -> Result<CommaInitializer<T>> {
        let shape = Shape::new(rows, cols)?;
        Ok(CommaInitializer {
            shape,
            values: Vec::new(),
        })
    }
}

/// Collects row-major values until [`CommaInitializer::finish`]
#[derive(Debug, Clone)]
pub struct CommaInitializer<T> {
    shape: Shape,
    values: Vec<T>,
}

impl<T: Scalar> CommaInitializer<T> {
    /// Append the next value
    pub fn push(mut self, value: T) -> Self {
        self.values.push(value);
        self
    }

    /// Append several values
    pub fn extend<I: IntoIterator<Item = T>>(mut self, values: I) -> Self {
        self.values.extend(values);
        self
    }

    /// Values supplied so far
    pub fn count(&self) -> usize {
        self.values.len()
    }

    /// Produce the matrix
    ///
    /// # Errors
    ///
    /// `ShapeMismatch` unless exactly rows * cols values were supplied.
    pub fn finish(self) -> Result<Matrix<T>> {
        check_count(self.shape, self.values.len())?;
        Ok(Matrix::from_parts(
            self.shape,
            scatter_row_major(self.shape, &self.values),
        ))
    }
}

/// Row-major matrix literal; rows are separated by `;`
///
/// Evaluates to `Result<Matrix<T>>`, failing if the rows differ in length.
///
/// ```
/// use densemat::dmatrix;
///
/// let m = dmatrix![1, 2, 3;
///                  4, 5, 6]?;
/// assert_eq!(m.shape().dims(), (2, 3));
/// assert_eq!(m[(1, 0)], 4);
/// # Ok::<(), densemat::MatrixError>(())
/// ```
#[macro_export]
macro_rules! dmatrix {
    ($($($x:expr),+ $(,)?);+ $(;)?) => {
        $crate::Matrix::from_rows(&[$(&[$($x),+][..]),+])
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_major_fill_3x3() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0];
        let m = Matrix::from_row_major(3, 3, &values).unwrap();
        let mut k = 0;
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(m.get(i, j), Ok(values[k]));
                k += 1;
            }
        }
        // stored column-major
        assert_eq!(
            m.as_slice(),
            &[1.0, 4.0, 7.0, 2.0, 5.0, 8.0, 3.0, 6.0, 9.0]
        );
    }

    #[test]
    fn test_comma_initializer() {
        let m = Matrix::comma(2, 3)
            .unwrap()
            .push(1)
            .push(2)
            .extend([3, 4, 5])
            .push(6)
            .finish()
            .unwrap();
        assert_eq!(m.to_row_major(), vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(m[(1, 2)], 6);
    }

    #[test]
    fn test_comma_count_mismatch() {
        let short = Matrix::comma(2, 2).unwrap().extend([1, 2, 3]);
        assert_eq!(short.count(), 3);
        assert_eq!(
            short.finish(),
            Err(MatrixError::shape_mismatch("comma initializer", (2, 2), (1, 3)))
        );

        let long = Matrix::comma(1, 2).unwrap().extend([1.0, 2.0, 3.0]).finish();
        assert!(matches!(long, Err(MatrixError::ShapeMismatch { .. })));

        assert!(Matrix::from_row_major(3, 3, &[0.0; 8]).is_err());
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_comma_huge_shape_fails_on_finish() {
        // 2^40 coefficients; nothing is reserved until the count matches
        let n = 1 << 20;
        let init = Matrix::<f64>::comma(n, n).unwrap().push(1.0).push(2.0);
        assert_eq!(init.count(), 2);
        assert_eq!(
            init.finish(),
            Err(MatrixError::shape_mismatch("comma initializer", (n, n), (1, 2)))
        );
    }

    #[test]
    fn test_from_rows_and_macro() {
        let m = dmatrix![1.0, 2.0; 3.0, 4.0; 5.0, 6.0].unwrap();
        assert_eq!(m.shape().dims(), (3, 2));
        assert_eq!(m.as_slice(), &[1.0, 3.0, 5.0, 2.0, 4.0, 6.0]);

        let ragged = Matrix::from_rows(&[&[1, 2][..], &[3][..]]);
        assert!(matches!(ragged, Err(MatrixError::ShapeMismatch { .. })));

        let empty: &[&[i32]] = &[];
        assert!(Matrix::from_rows(empty).is_err());
    }
}
