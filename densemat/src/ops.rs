//! Matrix arithmetic for dynamically sized matrices
//!
//! Shapes of dynamic operands are only known at runtime, so the binary
//! operators on `Matrix` return `Result<Matrix<T>>` and the `checked_*`
//! methods accept any [`DenseMatrix`] operand. Scalar operations cannot
//! fail and return the matrix directly.

use std::ops::{Add, Div, Mul, Neg, Sub};

use densemat_core::{check_product, check_same_shape, DenseMatrix, Result, Scalar};

use crate::config::ProductConfig;
use crate::kernels;
use crate::matrix::Matrix;

impl<T: Scalar> Matrix<T> {
    /// Coefficient-wise sum
    ///
    /// # Errors
    ///
    /// `ShapeMismatch` unless both operands have the same shape.
    pub fn checked_add<M: DenseMatrix<Element = T> + ?Sized>(&self, rhs: &M) -> Result<Self> {
        check_same_shape("add", self.shape(), rhs.shape())?;
        Ok(self.zip_with(rhs.as_slice(), |a, b| a + b))
    }

    /// Coefficient-wise difference
    ///
    /// # Errors
    ///
    /// `ShapeMismatch` unless both operands have the same shape.
    pub fn checked_sub<M: DenseMatrix<Element = T> + ?Sized>(&self, rhs: &M) -> Result<Self> {
        check_same_shape("sub", self.shape(), rhs.shape())?;
        Ok(self.zip_with(rhs.as_slice(), |a, b| a - b))
    }

    /// Matrix product with the default [`ProductConfig`]
    ///
    /// # Errors
    ///
    /// `ShapeMismatch` unless `self.ncols() == rhs.nrows()`.
    pub fn checked_mul<M: DenseMatrix<Element = T> + ?Sized>(&self, rhs: &M) -> Result<Self> {
        self.checked_mul_with(rhs, &ProductConfig::default())
    }

    /// Matrix product evaluated under an explicit configuration
    pub fn checked_mul_with<M: DenseMatrix<Element = T> + ?Sized>(
        &self,
        rhs: &M,
        config: &ProductConfig,
    ) -> Result<Self> {
        let shape = check_product(self.shape(), rhs.shape())?;
        let data = kernels::product(
            self.as_slice(),
            self.shape(),
            rhs.as_slice(),
            rhs.shape(),
            config,
        );
        Ok(Self::from_parts(shape, data))
    }

    /// Multiply every coefficient by `factor`
    pub fn scale(&self, factor: T) -> Self {
        self.map(|x| x * factor)
    }

    pub(crate) fn zip_with<F>(&self, rhs: &[T], f: F) -> Self
    where
        F: Fn(T, T) -> T,
    {
        let data = self
            .as_slice()
            .iter()
            .zip(rhs)
            .map(|(&a, &b)| f(a, b))
            .collect();
        Self::from_parts(self.shape(), data)
    }
}

macro_rules! impl_fallible_binop {
    ($trait:ident, $method:ident, $checked:ident) => {
        impl<T: Scalar> $trait<&Matrix<T>> for &Matrix<T> {
            type Output = Result<Matrix<T>>;

            fn $method(self, rhs: &Matrix<T>) -> Self::Output {
                self.$checked(rhs)
            }
        }

        impl<T: Scalar> $trait<Matrix<T>> for Matrix<T> {
            type Output = Result<Matrix<T>>;

            fn $method(self, rhs: Matrix<T>) -> Self::Output {
                self.$checked(&rhs)
            }
        }

        impl<T: Scalar> $trait<&Matrix<T>> for Matrix<T> {
            type Output = Result<Matrix<T>>;

            fn $method(self, rhs: &Matrix<T>) -> Self::Output {
                self.$checked(rhs)
            }
        }
    };
}

impl_fallible_binop!(Add, add, checked_add);
impl_fallible_binop!(Sub, sub, checked_sub);
impl_fallible_binop!(Mul, mul, checked_mul);

impl<T: Scalar> Mul<T> for &Matrix<T> {
    type Output = Matrix<T>;

    fn mul(self, rhs: T) -> Matrix<T> {
        self.scale(rhs)
    }
}

impl<T: Scalar> Mul<T> for Matrix<T> {
    type Output = Matrix<T>;

    fn mul(self, rhs: T) -> Matrix<T> {
        self.scale(rhs)
    }
}

impl<T: Scalar> Div<T> for &Matrix<T> {
    type Output = Matrix<T>;

    fn div(self, rhs: T) -> Matrix<T> {
        self.map(|x| x / rhs)
    }
}

impl<T: Scalar> Div<T> for Matrix<T> {
    type Output = Matrix<T>;

    fn div(self, rhs: T) -> Matrix<T> {
        self.map(|x| x / rhs)
    }
}

impl<T: Scalar> Neg for &Matrix<T> {
    type Output = Matrix<T>;

    fn neg(self) -> Matrix<T> {
        self.map(|x| -x)
    }
}

impl<T: Scalar> Neg for Matrix<T> {
    type Output = Matrix<T>;

    fn neg(self) -> Matrix<T> {
        self.map(|x| -x)
    }
}

// `scalar * matrix` needs a concrete left-hand type
macro_rules! impl_scalar_lhs_mul {
    ($($t:ty),*) => {$(
        impl Mul<Matrix<$t>> for $t {
            type Output = Matrix<$t>;

            fn mul(self, rhs: Matrix<$t>) -> Matrix<$t> {
                rhs.scale(self)
            }
        }

        impl Mul<&Matrix<$t>> for $t {
            type Output = Matrix<$t>;

            fn mul(self, rhs: &Matrix<$t>) -> Matrix<$t> {
                rhs.scale(self)
            }
        }
    )*};
}

impl_scalar_lhs_mul!(f32, f64, i32, i64);

#[cfg(test)]
mod tests {
    use super::*;
    use densemat_core::MatrixError;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn int_matrix(rng: &mut StdRng, rows: usize, cols: usize) -> Matrix<i64> {
        Matrix::from_fn(rows, cols, |_, _| rng.gen_range(-50..50)).unwrap()
    }

    #[test]
    fn test_add_sub() {
        let a = Matrix::from_row_major(2, 2, &[1, 2, 3, 4]).unwrap();
        let b = Matrix::from_row_major(2, 2, &[10, 20, 30, 40]).unwrap();
        let sum = (&a + &b).unwrap();
        assert_eq!(sum.to_row_major(), vec![11, 22, 33, 44]);
        let diff = (&b - &a).unwrap();
        assert_eq!(diff.to_row_major(), vec![9, 18, 27, 36]);
        // operands untouched
        assert_eq!(a.to_row_major(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_add_commutes_and_sub_undoes() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            let rows = rng.gen_range(1..6);
            let cols = rng.gen_range(1..6);
            let a = int_matrix(&mut rng, rows, cols);
            let b = int_matrix(&mut rng, rows, cols);
            assert_eq!(&a + &b, &b + &a);
            let back = ((&a + &b).unwrap() - &b).unwrap();
            assert_eq!(back, a);
        }

        // float values that are exactly representable round-trip exactly
        let a = Matrix::from_row_major(1, 3, &[0.5, -1.25, 3.0]).unwrap();
        let b = Matrix::from_row_major(1, 3, &[2.0, 0.75, -8.5]).unwrap();
        assert_eq!(((&a + &b).unwrap() - &b).unwrap(), a);
    }

    #[test]
    fn test_shape_mismatch() {
        let a = Matrix::<f64>::zeros(2, 3).unwrap();
        let b = Matrix::<f64>::zeros(3, 2).unwrap();
        assert_eq!(
            &a + &b,
            Err(MatrixError::shape_mismatch("add", (2, 3), (3, 2)))
        );
        assert!((&a - &b).is_err());
        assert!((&a * &a).is_err());
        assert_eq!((&a * &b).unwrap().shape().dims(), (2, 2));
    }

    #[test]
    fn test_product_formula() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..20 {
            let r = rng.gen_range(1..6);
            let k = rng.gen_range(1..6);
            let c = rng.gen_range(1..6);
            let a = int_matrix(&mut rng, r, k);
            let b = int_matrix(&mut rng, k, c);
            let p = (&a * &b).unwrap();
            assert_eq!(p.shape().dims(), (r, c));
            for i in 0..r {
                for j in 0..c {
                    let expected: i64 = (0..k).map(|t| a[(i, t)] * b[(t, j)]).sum();
                    assert_eq!(p.get(i, j), Ok(expected));
                }
            }
        }
    }

    #[test]
    fn test_float_product_exact_formula() {
        let mut rng = StdRng::seed_from_u64(9);
        let a = Matrix::<f64>::random_with(4, 7, &mut rng).unwrap();
        let b = Matrix::<f64>::random_with(7, 3, &mut rng).unwrap();
        let p = a.checked_mul(&b).unwrap();
        for i in 0..4 {
            for j in 0..3 {
                let mut expected = 0.0;
                for k in 0..7 {
                    expected += a[(i, k)] * b[(k, j)];
                }
                assert_eq!(p[(i, j)], expected);
            }
        }
    }

    #[test]
    fn test_identity_is_neutral() {
        let mut rng = StdRng::seed_from_u64(1);
        let m = Matrix::<f64>::random_with(4, 6, &mut rng).unwrap();
        let id = Matrix::identity(4, 4).unwrap();
        assert_eq!((&id * &m).unwrap(), m);
    }

    #[test]
    fn test_outer_product() {
        let col = Matrix::from_row_major(3, 1, &[1, 2, 3]).unwrap();
        let row = Matrix::from_row_major(1, 3, &[4, 5, 6]).unwrap();
        let outer = (&col * &row).unwrap();
        assert_eq!(outer.to_row_major(), vec![4, 5, 6, 8, 10, 12, 12, 15, 18]);
        let inner = (&row * &col).unwrap();
        assert_eq!(inner.as_slice(), &[32]);
        // two column vectors do not multiply
        assert!((&col * &col).is_err());
    }

    #[test]
    fn test_scalar_ops() {
        let a = Matrix::from_row_major(2, 2, &[1.0, -2.0, 3.0, 4.0]).unwrap();
        assert_eq!((&a * 2.0).to_row_major(), vec![2.0, -4.0, 6.0, 8.0]);
        assert_eq!(2.0 * &a, &a * 2.0);
        assert_eq!((&a / 2.0).to_row_major(), vec![0.5, -1.0, 1.5, 2.0]);
        assert_eq!((-&a).to_row_major(), vec![-1.0, 2.0, -3.0, -4.0]);
        let ints = Matrix::from_row_major(1, 2, &[1i32, 2]).unwrap();
        assert_eq!((3 * ints).to_row_major(), vec![3, 6]);
    }

    #[test]
    fn test_mul_with_sequential_config() {
        let mut rng = StdRng::seed_from_u64(2);
        let a = Matrix::<f32>::random_with(30, 30, &mut rng).unwrap();
        let b = Matrix::<f32>::random_with(30, 40, &mut rng).unwrap();
        let eager = ProductConfig::default()
            .with_parallel_threshold(1)
            .with_min_columns_per_task(1);
        assert_eq!(
            a.checked_mul_with(&b, &ProductConfig::sequential()),
            a.checked_mul_with(&b, &eager)
        );
    }
}
