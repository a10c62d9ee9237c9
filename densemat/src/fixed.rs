//! Fixed-size dense matrices
//!
//! `SMatrix<T, R, C>` stores `C` column arrays of `R` coefficients, so its
//! flattened storage is column-major like every other matrix in the crate.
//! Shapes are part of the type: mismatched sums and non-conformant products
//! are compile errors rather than runtime failures.

use std::fmt;
use std::ops::{Add, AddAssign, Div, Index, IndexMut, Mul, Neg, Sub, SubAssign};

use approx::{AbsDiffEq, RelativeEq, UlpsEq};

use densemat_core::{
    check_buffer_len, check_index, DenseMatrix, DenseMatrixMut, MatrixError, Result, Scalar, Shape,
};
use num_traits::Float;
use rand::distributions::uniform::SampleUniform;
use rand::Rng;

use crate::kernels;
use crate::matrix::{fmt_coefficients, Matrix};
use crate::real::Real;

/// A matrix with compile-time dimensions, stored column-major
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SMatrix<T, const R: usize, const C: usize> {
    data: [[T; R]; C],
}

/// Fixed-size column vector
pub type SVector<T, const N: usize> = SMatrix<T, N, 1>;

pub type Matrix2<T> = SMatrix<T, 2, 2>;
pub type Matrix3<T> = SMatrix<T, 3, 3>;
pub type Matrix4<T> = SMatrix<T, 4, 4>;
pub type Vector2<T> = SVector<T, 2>;
pub type Vector3<T> = SVector<T, 3>;
pub type Vector4<T> = SVector<T, 4>;

impl<T, const R: usize, const C: usize> SMatrix<T, R, C> {
    const NON_EMPTY: () = assert!(R > 0 && C > 0, "matrix dimensions must be non-zero");

    /// Shape shared by every value of this type
    pub const SHAPE: Shape = Shape { rows: R, cols: C };

    /// Build from column arrays
    pub const fn from_columns(columns: [[T; R]; C]) -> Self {
        let () = Self::NON_EMPTY;
        Self { data: columns }
    }

    /// Column arrays
    pub fn columns(&self) -> &[[T; R]; C] {
        &self.data
    }

    /// Coefficients in column-major order
    pub fn as_slice(&self) -> &[T] {
        self.data.as_flattened()
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.data.as_flattened_mut()
    }
}

impl<T: Scalar, const R: usize, const C: usize> SMatrix<T, R, C> {
    /// Build by evaluating `f(row, col)` for every coefficient
    pub fn from_fn<F: FnMut(usize, usize) -> T>(mut f: F) -> Self {
        let mut data = [[T::zero(); R]; C];
        for (col, column) in data.iter_mut().enumerate() {
            for (row, x) in column.iter_mut().enumerate() {
                *x = f(row, col);
            }
        }
        Self::from_columns(data)
    }

    /// Build from row arrays, written the way the matrix reads
    ///
    /// The value count is checked by the type system.
    pub fn from_rows(rows: [[T; C]; R]) -> Self {
        Self::from_fn(|row, col| rows[row][col])
    }

    /// Build from exactly R * C values given in row-major order
    ///
    /// # Errors
    ///
    /// `ShapeMismatch` if the number of values differs from R * C.
    pub fn from_row_major(values: &[T]) -> Result<Self> {
        if values.len() != R * C {
            return Err(MatrixError::shape_mismatch(
                "comma initializer",
                (R, C),
                (1, values.len()),
            ));
        }
        Ok(Self::from_fn(|row, col| values[row * C + col]))
    }

    /// Copy from a flat column-major buffer
    pub fn from_column_slice(values: &[T]) -> Result<Self> {
        check_buffer_len(Self::SHAPE, values.len())?;
        Ok(Self::from_fn(|row, col| values[col * R + row]))
    }

    pub fn from_element(value: T) -> Self {
        Self::from_columns([[value; R]; C])
    }

    pub fn zeros() -> Self {
        Self::from_element(T::zero())
    }

    pub fn ones() -> Self {
        Self::from_element(T::one())
    }

    pub fn constant(value: T) -> Self {
        Self::from_element(value)
    }

    /// Ones along the min(R, C) diagonal, zeros elsewhere
    pub fn identity() -> Self {
        Self::from_fn(|row, col| if row == col { T::one() } else { T::zero() })
    }

    /// Get the coefficient at (row, col)
    pub fn get(&self, row: usize, col: usize) -> Result<T> {
        check_index(Self::SHAPE, row, col)?;
        Ok(self.data[col][row])
    }

    /// Overwrite the coefficient at (row, col)
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        check_index(Self::SHAPE, row, col)?;
        self.data[col][row] = value;
        Ok(())
    }

    pub fn transpose(&self) -> SMatrix<T, C, R> {
        SMatrix::from_fn(|row, col| self.data[row][col])
    }

    /// Apply `f` to every coefficient
    pub fn map<U: Scalar, F: FnMut(T) -> U>(&self, mut f: F) -> SMatrix<U, R, C> {
        SMatrix::from_fn(|row, col| f(self.data[col][row]))
    }

    fn zip_with<F: Fn(T, T) -> T>(&self, rhs: &Self, f: F) -> Self {
        Self::from_fn(|row, col| f(self.data[col][row], rhs.data[col][row]))
    }

    pub fn component_mul(&self, rhs: &Self) -> Self {
        self.zip_with(rhs, |a, b| a * b)
    }

    pub fn component_div(&self, rhs: &Self) -> Self {
        self.zip_with(rhs, |a, b| a / b)
    }

    pub fn scale(&self, factor: T) -> Self {
        self.map(|x| x * factor)
    }

    pub fn sum(&self) -> T {
        self.as_slice().iter().fold(T::zero(), |acc, &x| acc + x)
    }

    pub fn trace(&self) -> T {
        (0..R.min(C)).fold(T::zero(), |acc, i| acc + self.data[i][i])
    }

    /// Copy into a dynamically sized matrix
    pub fn to_matrix(&self) -> Matrix<T> {
        Matrix::from_parts(Self::SHAPE, self.as_slice().to_vec())
    }
}

impl<T: Scalar + SampleUniform, const R: usize, const C: usize> SMatrix<T, R, C> {
    /// Coefficients drawn independently and uniformly from [-1, 1]
    pub fn random() -> Self {
        Self::random_with(&mut rand::thread_rng())
    }

    pub fn random_with<G: Rng + ?Sized>(rng: &mut G) -> Self {
        Self::from_fn(|_, _| rng.gen_range(-T::one()..=T::one()))
    }
}

impl<T: Real, const R: usize, const C: usize> SMatrix<T, R, C> {
    pub fn has_nan(&self) -> bool {
        self.as_slice().iter().any(|x| x.is_nan())
    }
}

impl<T: Real, const N: usize> SMatrix<T, N, N> {
    /// Inverse; singular input yields a matrix filled with NaN
    pub fn inverse(&self) -> Self {
        match kernels::invert(self.as_slice(), N) {
            Some(data) => Self::from_fn(|row, col| data[col * N + row]),
            None => {
                log::debug!("Inverse of singular {N}x{N} matrix, filling with NaN");
                Self::from_element(T::nan())
            }
        }
    }

    pub fn determinant(&self) -> T {
        kernels::determinant(self.as_slice(), N)
    }
}

impl<T: Scalar, const N: usize> SVector<T, N> {
    /// Column vector from an array
    pub fn from_array(values: [T; N]) -> Self {
        Self::from_columns([values])
    }

    pub fn dot(&self, other: &Self) -> T {
        self.data[0]
            .iter()
            .zip(&other.data[0])
            .fold(T::zero(), |acc, (&a, &b)| acc + a * b)
    }

    pub fn squared_norm(&self) -> T {
        self.dot(self)
    }
}

impl<T: Real, const N: usize> SVector<T, N> {
    pub fn norm(&self) -> T {
        Float::sqrt(self.squared_norm())
    }

    /// Copy scaled to unit length; a zero vector produces NaN
    pub fn normalized(&self) -> Self {
        let norm = self.norm();
        self.map(|x| x / norm)
    }

    pub fn normalize(&mut self) {
        *self = self.normalized();
    }
}

impl<T: Scalar> Vector3<T> {
    pub fn new(x: T, y: T, z: T) -> Self {
        Self::from_array([x, y, z])
    }

    /// Right-handed cross product
    pub fn cross(&self, other: &Self) -> Self {
        let [a0, a1, a2] = self.data[0];
        let [b0, b1, b2] = other.data[0];
        Self::new(a1 * b2 - a2 * b1, a2 * b0 - a0 * b2, a0 * b1 - a1 * b0)
    }
}

macro_rules! impl_homogeneous {
    ($($n:literal => $m:literal),*) => {$(
        impl<T: Scalar> SVector<T, $n> {
            /// Append a trailing 1
            pub fn to_homogeneous(&self) -> SVector<T, $m> {
                SVector::from_fn(|row, _| if row < $n { self.data[0][row] } else { T::one() })
            }
        }

        impl<T: Real> SVector<T, $m> {
            /// Divide by the trailing coordinate and drop it
            pub fn dehomogenize(&self) -> SVector<T, $n> {
                let w = self.data[0][$n];
                SVector::from_fn(|row, _| self.data[0][row] / w)
            }
        }
    )*};
}

impl_homogeneous!(2 => 3, 3 => 4);

impl<T: Scalar, const R: usize, const C: usize> Add for SMatrix<T, R, C> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.zip_with(&rhs, |a, b| a + b)
    }
}

impl<T: Scalar, const R: usize, const C: usize> Sub for SMatrix<T, R, C> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.zip_with(&rhs, |a, b| a - b)
    }
}

impl<T: Scalar, const R: usize, const C: usize> AddAssign for SMatrix<T, R, C> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<T: Scalar, const R: usize, const C: usize> SubAssign for SMatrix<T, R, C> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<T: Scalar, const R: usize, const C: usize> Neg for SMatrix<T, R, C> {
    type Output = Self;

    fn neg(self) -> Self {
        self.map(|x| -x)
    }
}

impl<T: Scalar, const R: usize, const C: usize> Mul<T> for SMatrix<T, R, C> {
    type Output = Self;

    fn mul(self, rhs: T) -> Self {
        self.scale(rhs)
    }
}

impl<T: Scalar, const R: usize, const C: usize> Div<T> for SMatrix<T, R, C> {
    type Output = Self;

    fn div(self, rhs: T) -> Self {
        self.map(|x| x / rhs)
    }
}

impl<T: Scalar, const R: usize, const C: usize, const K: usize> Mul<SMatrix<T, C, K>>
    for SMatrix<T, R, C>
{
    type Output = SMatrix<T, R, K>;

    fn mul(self, rhs: SMatrix<T, C, K>) -> SMatrix<T, R, K> {
        let mut out = SMatrix::<T, R, K>::zeros();
        for (out_col, b_col) in out.data.iter_mut().zip(rhs.data.iter()) {
            kernels::product_column(self.as_slice(), R, b_col, out_col);
        }
        out
    }
}

macro_rules! impl_scalar_lhs_mul {
    ($($t:ty),*) => {$(
        impl<const R: usize, const C: usize> Mul<SMatrix<$t, R, C>> for $t {
            type Output = SMatrix<$t, R, C>;

            fn mul(self, rhs: SMatrix<$t, R, C>) -> SMatrix<$t, R, C> {
                rhs.scale(self)
            }
        }
    )*};
}

impl_scalar_lhs_mul!(f32, f64, i32, i64);

impl<T, const R: usize, const C: usize> Index<(usize, usize)> for SMatrix<T, R, C> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if the position is out of range.
    fn index(&self, (row, col): (usize, usize)) -> &T {
        if let Err(e) = check_index(Self::SHAPE, row, col) {
            panic!("{e}");
        }
        &self.data[col][row]
    }
}

impl<T, const R: usize, const C: usize> IndexMut<(usize, usize)> for SMatrix<T, R, C> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        if let Err(e) = check_index(Self::SHAPE, row, col) {
            panic!("{e}");
        }
        &mut self.data[col][row]
    }
}

impl<T: Scalar, const R: usize, const C: usize> DenseMatrix for SMatrix<T, R, C> {
    type Element = T;

    fn shape(&self) -> Shape {
        Self::SHAPE
    }

    fn as_slice(&self) -> &[T] {
        self.data.as_flattened()
    }
}

impl<T: Scalar, const R: usize, const C: usize> DenseMatrixMut for SMatrix<T, R, C> {
    fn as_mut_slice(&mut self) -> &mut [T] {
        self.data.as_flattened_mut()
    }
}

impl<T: AbsDiffEq, const R: usize, const C: usize> AbsDiffEq for SMatrix<T, R, C>
where
    T::Epsilon: Copy,
{
    type Epsilon = T::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.data
            .as_flattened()
            .iter()
            .zip(other.data.as_flattened())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl<T: RelativeEq, const R: usize, const C: usize> RelativeEq for SMatrix<T, R, C>
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
        self.data
            .as_flattened()
            .iter()
            .zip(other.data.as_flattened())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}

impl<T: UlpsEq, const R: usize, const C: usize> UlpsEq for SMatrix<T, R, C>
where
    T::Epsilon: Copy,
{
    fn default_max_ulps() -> u32 {
        T::default_max_ulps()
    }

    fn ulps_eq(&self, other: &Self, epsilon: Self::Epsilon, max_ulps: u32) -> bool {
        self.data
            .as_flattened()
            .iter()
            .zip(other.data.as_flattened())
            .all(|(a, b)| a.ulps_eq(b, epsilon, max_ulps))
    }
}

impl<T: fmt::Display, const R: usize, const C: usize> fmt::Display for SMatrix<T, R, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_coefficients(f, Self::SHAPE, self.as_slice())
    }
}

impl<T: Scalar, const R: usize, const C: usize> From<SMatrix<T, R, C>> for Matrix<T> {
    fn from(m: SMatrix<T, R, C>) -> Self {
        m.to_matrix()
    }
}

impl<T: Scalar, const R: usize, const C: usize> TryFrom<&Matrix<T>> for SMatrix<T, R, C> {
    type Error = MatrixError;

    fn try_from(m: &Matrix<T>) -> Result<Self> {
        densemat_core::check_same_shape("convert", Self::SHAPE, m.shape())?;
        Self::from_column_slice(m.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{abs_diff_eq, assert_relative_eq};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_identity_scenario() {
        let b = Matrix3::<f64>::identity();
        assert_eq!(b[(1, 2)], 0.0);
        assert_eq!(b[(1, 1)], 1.0);
        assert_eq!(b.get(3, 0), Err(MatrixError::OutOfRange { row: 3, col: 0, shape: (3, 3) }));
    }

    #[test]
    fn test_storage_is_column_major() {
        let m = SMatrix::<i32, 2, 3>::from_rows([[1, 2, 3], [4, 5, 6]]);
        assert_eq!(m.as_slice(), &[1, 4, 2, 5, 3, 6]);
        assert_eq!(m.columns()[1], [2, 5]);
        assert_eq!(m.transpose().as_slice(), &[1, 2, 3, 4, 5, 6]);
        assert_eq!(m.transpose().transpose(), m);
    }

    #[test]
    fn test_row_major_slice_init() {
        let m = Matrix3::from_row_major(&[1, 2, 3, 4, 5, 6, 7, 8, 9]).unwrap();
        assert_eq!(m[(0, 2)], 3);
        assert_eq!(m[(1, 0)], 4);
        assert!(matches!(
            Matrix3::<i32>::from_row_major(&[1, 2, 3]),
            Err(MatrixError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_arithmetic() {
        let a = Matrix2::from_rows([[1.0, 2.0], [3.0, 4.0]]);
        let b = Matrix2::from_rows([[0.5, 0.0], [1.0, -1.0]]);
        assert_eq!(a + b, b + a);
        assert_eq!((a + b) - b, a);
        assert_eq!(a * 2.0, 2.0 * a);
        assert_eq!(-a, a * -1.0);
        assert_eq!((a / 2.0)[(1, 1)], 2.0);

        let mut c = a;
        c += b;
        c -= a;
        assert_eq!(c, b);

        // [1 2; 3 4] * [0.5 0; 1 -1] = [2.5 -2; 5.5 -4]
        assert_eq!(a * b, Matrix2::from_rows([[2.5, -2.0], [5.5, -4.0]]));
    }

    #[test]
    fn test_conformant_product_shape() {
        let a = SMatrix::<i64, 2, 3>::from_rows([[1, 2, 3], [4, 5, 6]]);
        let b = SMatrix::<i64, 3, 1>::from_array([1, 0, -1]);
        let p: SMatrix<i64, 2, 1> = a * b;
        assert_eq!(p.as_slice(), &[-2, -2]);

        let col = Vector3::new(1, 2, 3);
        let row = SMatrix::<i32, 1, 3>::from_rows([[1, 1, 2]]);
        let outer: Matrix3<i32> = col * row;
        assert_eq!(outer[(2, 2)], 6);
        assert_eq!(Matrix3::<i32>::identity() * outer, outer);
    }

    #[test]
    fn test_matches_dynamic_product() {
        let mut rng = StdRng::seed_from_u64(8);
        let a = SMatrix::<f64, 3, 4>::random_with(&mut rng);
        let b = SMatrix::<f64, 4, 2>::random_with(&mut rng);
        let fixed = (a * b).to_matrix();
        let dynamic = a.to_matrix().checked_mul(&b.to_matrix()).unwrap();
        assert_eq!(fixed, dynamic);
    }

    #[test]
    fn test_random_integers() {
        let mut rng = StdRng::seed_from_u64(21);
        let m = SMatrix::<i32, 6, 6>::random_with(&mut rng);
        assert!(m.as_slice().iter().all(|x| [-1, 0, 1].contains(x)));
        assert!(m.as_slice().contains(&-1) && m.as_slice().contains(&1));

        let f = Matrix4::<f32>::random();
        assert!(f.as_slice().iter().all(|x| (-1.0..=1.0).contains(x)));
    }

    #[test]
    fn test_inverse() {
        let a = Matrix3::from_rows([[2.0f64, 1.0, 0.0], [0.0, 3.0, 1.0], [1.0, 0.0, 4.0]]);
        let inv = a.inverse();
        assert_relative_eq!(a * inv, Matrix3::identity(), epsilon = 1e-12);
        assert_relative_eq!(inv.inverse(), a, epsilon = 1e-12);
        assert!(!abs_diff_eq!(a, a * 2.0, epsilon = 1e-3));
        assert_relative_eq!(a.determinant(), 25.0, epsilon = 1e-12);

        let singular = Matrix2::from_rows([[1.0f64, 2.0], [2.0, 4.0]]);
        assert!(singular.inverse().as_slice().iter().all(|x| x.is_nan()));
    }

    #[test]
    fn test_vector_ops() {
        let v = Vector3::new(1.0, 2.0, 2.0);
        assert_eq!(v.dot(&v), 9.0);
        assert_eq!(v.norm(), 3.0);
        assert_eq!(v.cross(&v), Vector3::zeros());
        assert_eq!(
            Vector3::new(1, 0, 0).cross(&Vector3::new(0, 1, 0)),
            Vector3::new(0, 0, 1)
        );
        assert_relative_eq!(v.normalized().norm(), 1.0);
        assert!(Vector3::<f32>::zeros().normalized().has_nan());
    }

    #[test]
    fn test_homogeneous() {
        let p = Vector3::new(1.0, 2.0, 3.0);
        let h = p.to_homogeneous();
        assert_eq!(h, Vector4::from_array([1.0, 2.0, 3.0, 1.0]));
        assert_eq!((h * 4.0).dehomogenize(), p);
        assert_eq!(Vector2::from_array([1.0, 2.0]).to_homogeneous().as_slice(), &[1.0, 2.0, 1.0]);
    }

    #[test]
    fn test_conversions() {
        let m = Matrix2::from_rows([[1, 2], [3, 4]]);
        let dynamic: Matrix<i32> = m.into();
        assert_eq!(dynamic.to_row_major(), vec![1, 2, 3, 4]);
        assert_eq!(Matrix2::try_from(&dynamic), Ok(m));
        assert!(Matrix3::<i32>::try_from(&dynamic).is_err());
        assert_eq!(m.to_string(), "1 2\n3 4");
    }
}
