//! Dense kernels over column-major coefficient slices
//!
//! Shared by the dynamic, fixed-size and mapped storages. Callers validate
//! shapes before calling in; the kernels only index.

use densemat_core::{Scalar, Shape};
use num_traits::{Float, NumCast};

use crate::config::ProductConfig;
use crate::real::Real;

/// Compute one output column: `out = a * b_col`
///
/// Each coefficient accumulates `a[i][k] * b[k][j]` for k in ascending
/// order, starting from zero. The parallel product relies on this order
/// being the same for every caller.
#[inline]
pub(crate) fn product_column<T: Scalar>(a: &[T], a_rows: usize, b_col: &[T], out: &mut [T]) {
    out.fill(T::zero());
    for (k, &b) in b_col.iter().enumerate() {
        let a_col = &a[k * a_rows..(k + 1) * a_rows];
        for (o, &x) in out.iter_mut().zip(a_col) {
            *o += x * b;
        }
    }
}

/// Matrix product of validated operands into a fresh column-major buffer
pub(crate) fn product<T: Scalar>(
    a: &[T],
    a_shape: Shape,
    b: &[T],
    b_shape: Shape,
    config: &ProductConfig,
) -> Vec<T> {
    let rows = a_shape.rows;
    let inner = a_shape.cols;
    let cols = b_shape.cols;
    let mut out = vec![T::zero(); rows * cols];

    #[cfg(feature = "parallel")]
    {
        if config.use_parallel(rows, inner, cols) {
            use rayon::prelude::*;

            let per_task = config.columns_per_task(cols, rayon::current_num_threads());
            log::debug!(
                "Parallel product {rows}x{inner} * {inner}x{cols} ({per_task} columns per task)"
            );
            out.par_chunks_mut(rows)
                .zip(b.par_chunks(inner))
                .with_min_len(per_task)
                .for_each(|(out_col, b_col)| product_column(a, rows, b_col, out_col));
            return out;
        }
    }

    #[cfg(not(feature = "parallel"))]
    let _ = config;

    for (out_col, b_col) in out.chunks_mut(rows).zip(b.chunks(inner)) {
        product_column(a, rows, b_col, out_col);
    }
    out
}

/// Transposed copy of a column-major buffer
pub(crate) fn transpose<T: Scalar>(data: &[T], shape: Shape) -> Vec<T> {
    let out_shape = shape.transposed();
    let mut out = Vec::with_capacity(data.len());
    for col in 0..out_shape.cols {
        for row in 0..out_shape.rows {
            out.push(data[shape.linear_index(col, row)]);
        }
    }
    out
}

/// Identity coefficients: ones along the min(rows, cols) diagonal
pub(crate) fn identity<T: Scalar>(shape: Shape) -> Vec<T> {
    let mut out = vec![T::zero(); shape.len()];
    for i in 0..shape.rows.min(shape.cols) {
        out[shape.linear_index(i, i)] = T::one();
    }
    out
}

fn swap_rows<T>(data: &mut [T], n: usize, r1: usize, r2: usize) {
    for c in 0..n {
        data.swap(c * n + r1, c * n + r2);
    }
}

/// Row with the largest magnitude entry in `col`, at or below the diagonal
fn pivot_row<T: Real>(data: &[T], n: usize, col: usize) -> (usize, T) {
    let mut best = (col, Float::abs(data[col * n + col]));
    for row in col + 1..n {
        let magnitude = Float::abs(data[col * n + row]);
        if magnitude > best.1 {
            best = (row, magnitude);
        }
    }
    best
}

/// Pivots at or below this magnitude count as zero
fn singular_tolerance<T: Real>(data: &[T], n: usize) -> T {
    let scale = data
        .iter()
        .fold(T::zero(), |acc, &x| Float::max(acc, Float::abs(x)));
    let count = <T as NumCast>::from(n).unwrap_or_else(T::infinity);
    T::epsilon() * count * scale
}

/// Gauss-Jordan inverse of an n x n matrix with partial pivoting
///
/// Returns `None` when the matrix is singular or numerically close to it,
/// including when it already contains NaN.
pub(crate) fn invert<T: Real>(data: &[T], n: usize) -> Option<Vec<T>> {
    let tolerance = singular_tolerance(data, n);
    let mut work = data.to_vec();
    let mut inv = identity::<T>(Shape { rows: n, cols: n });

    for col in 0..n {
        let (pivot, magnitude) = pivot_row(&work, n, col);
        // `!(a > b)` also rejects NaN pivots
        if !(magnitude > tolerance) {
            return None;
        }
        if pivot != col {
            swap_rows(&mut work, n, pivot, col);
            swap_rows(&mut inv, n, pivot, col);
        }

        let p = work[col * n + col];
        for c in 0..n {
            work[c * n + col] = work[c * n + col] / p;
            inv[c * n + col] = inv[c * n + col] / p;
        }

        for row in 0..n {
            if row == col {
                continue;
            }
            let factor = work[col * n + row];
            if factor == T::zero() {
                continue;
            }
            for c in 0..n {
                let w = work[c * n + col];
                let v = inv[c * n + col];
                work[c * n + row] -= factor * w;
                inv[c * n + row] -= factor * v;
            }
        }
    }
    Some(inv)
}

/// Determinant by LU decomposition with partial pivoting
pub(crate) fn determinant<T: Real>(data: &[T], n: usize) -> T {
    let mut work = data.to_vec();
    let mut det = T::one();

    for col in 0..n {
        let (pivot, magnitude) = pivot_row(&work, n, col);
        if magnitude == T::zero() {
            return T::zero();
        }
        if pivot != col {
            swap_rows(&mut work, n, pivot, col);
            det = -det;
        }

        let p = work[col * n + col];
        det *= p;
        for row in col + 1..n {
            let factor = work[col * n + row] / p;
            for c in col..n {
                let w = work[c * n + col];
                work[c * n + row] -= factor * w;
            }
        }
    }
    det
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn shape(rows: usize, cols: usize) -> Shape {
        Shape { rows, cols }
    }

    #[test]
    fn test_product_column_major() {
        // a = [1 2; 3 4] column-major, b = [5; 6]
        let a = [1.0, 3.0, 2.0, 4.0];
        let b = [5.0, 6.0];
        let out = product(&a, shape(2, 2), &b, shape(2, 1), &ProductConfig::default());
        assert_eq!(out, vec![17.0, 39.0]);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let rows = 19;
        let inner = 23;
        let cols = 64;
        let a: Vec<f64> = (0..rows * inner).map(|i| (i as f64 * 0.37).sin()).collect();
        let b: Vec<f64> = (0..inner * cols).map(|i| (i as f64 * 0.11).cos()).collect();

        let parallel = ProductConfig::default()
            .with_parallel_threshold(0)
            .with_min_columns_per_task(1);
        let sequential = ProductConfig::sequential();
        let seq = product(&a, shape(rows, inner), &b, shape(inner, cols), &sequential);
        let par = product(&a, shape(rows, inner), &b, shape(inner, cols), &parallel);
        assert_eq!(seq, par);
    }

    #[test]
    fn test_transpose() {
        // [1 2 3; 4 5 6] column-major
        let data = [1, 4, 2, 5, 3, 6];
        assert_eq!(transpose(&data, shape(2, 3)), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_identity_rectangular() {
        assert_eq!(identity::<i32>(shape(2, 3)), vec![1, 0, 0, 1, 0, 0]);
        assert_eq!(identity::<i32>(shape(3, 2)), vec![1, 0, 0, 0, 1, 0]);
    }

    #[test]
    fn test_invert() {
        // [4 7; 2 6] has inverse [0.6 -0.7; -0.2 0.4]
        let data = [4.0, 2.0, 7.0, 6.0];
        let inv = invert(&data, 2).unwrap();
        let expected = [0.6, -0.2, -0.7, 0.4];
        for (x, e) in inv.iter().zip(expected) {
            assert_relative_eq!(*x, e, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_invert_requires_pivoting() {
        // zero in the leading position
        let data = [0.0, 1.0, 1.0, 0.0];
        assert_eq!(invert(&data, 2), Some(vec![0.0, 1.0, 1.0, 0.0]));
    }

    #[test]
    fn test_invert_singular() {
        let data = [1.0, 2.0, 2.0, 4.0];
        assert!(invert(&data, 2).is_none());
        assert!(invert(&[0.0f32; 9], 3).is_none());
        assert!(invert(&[f64::NAN, 0.0, 0.0, 1.0], 2).is_none());
    }

    #[test]
    fn test_determinant() {
        let data = [4.0, 2.0, 7.0, 6.0];
        assert_relative_eq!(determinant(&data, 2), 10.0, epsilon = 1e-12);
        assert_eq!(determinant(&[1.0, 2.0, 2.0, 4.0], 2), 0.0);
        // permutation matrix has determinant -1
        assert_relative_eq!(determinant(&[0.0, 1.0, 1.0, 0.0], 2), -1.0);
    }
}
