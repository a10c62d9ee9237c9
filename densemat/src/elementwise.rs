//! Coefficient-wise ("array") operations
//!
//! Every operation here treats the matrix as a plain grid of numbers:
//! binary forms pair up coefficients at the same position and require
//! identical shapes. Results are always new matrices.

use densemat_core::{check_same_shape, DenseMatrix, Result, Scalar};
use num_traits::{Float, Signed};

use crate::matrix::Matrix;
use crate::real::Real;

impl<T: Copy> Matrix<T> {
    /// Apply `f` to every coefficient
    pub fn map<U, F>(&self, mut f: F) -> Matrix<U>
    where
        F: FnMut(T) -> U,
    {
        Matrix::from_parts(self.shape(), self.iter().map(|&x| f(x)).collect())
    }

    /// Combine coefficients at matching positions with `f`
    ///
    /// # Errors
    ///
    /// `ShapeMismatch` unless both operands have the same shape.
    pub fn zip_map<U: Copy, V, F>(&self, other: &Matrix<U>, mut f: F) -> Result<Matrix<V>>
    where
        F: FnMut(T, U) -> V,
    {
        check_same_shape("zip_map", self.shape(), other.shape())?;
        let data = self
            .iter()
            .zip(other.iter())
            .map(|(&a, &b)| f(a, b))
            .collect();
        Ok(Matrix::from_parts(self.shape(), data))
    }
}

impl<T: Scalar> Matrix<T> {
    fn compare<M, F>(&self, op: &'static str, other: &M, f: F) -> Result<Matrix<bool>>
    where
        M: DenseMatrix<Element = T> + ?Sized,
        F: Fn(&T, &T) -> bool,
    {
        check_same_shape(op, self.shape(), other.shape())?;
        let data = self
            .iter()
            .zip(other.as_slice())
            .map(|(a, b)| f(a, b))
            .collect();
        Ok(Matrix::from_parts(self.shape(), data))
    }

    /// Coefficient-wise product
    pub fn component_mul<M: DenseMatrix<Element = T> + ?Sized>(&self, other: &M) -> Result<Self> {
        check_same_shape("component_mul", self.shape(), other.shape())?;
        Ok(self.zip_with(other.as_slice(), |a, b| a * b))
    }

    /// Coefficient-wise quotient
    pub fn component_div<M: DenseMatrix<Element = T> + ?Sized>(&self, other: &M) -> Result<Self> {
        check_same_shape("component_div", self.shape(), other.shape())?;
        Ok(self.zip_with(other.as_slice(), |a, b| a / b))
    }

    /// Add `value` to every coefficient
    pub fn add_scalar(&self, value: T) -> Self {
        self.map(|x| x + value)
    }

    /// Subtract `value` from every coefficient
    pub fn sub_scalar(&self, value: T) -> Self {
        self.map(|x| x - value)
    }

    pub fn abs(&self) -> Self {
        self.map(|x| Signed::abs(&x))
    }

    pub fn square(&self) -> Self {
        self.map(|x| x * x)
    }

    pub fn cube(&self) -> Self {
        self.map(|x| x * x * x)
    }

    pub fn elementwise_eq<M: DenseMatrix<Element = T> + ?Sized>(
        &self,
        other: &M,
    ) -> Result<Matrix<bool>> {
        self.compare("elementwise_eq", other, T::eq)
    }

    pub fn elementwise_ne<M: DenseMatrix<Element = T> + ?Sized>(
        &self,
        other: &M,
    ) -> Result<Matrix<bool>> {
        self.compare("elementwise_ne", other, T::ne)
    }

    pub fn elementwise_lt<M: DenseMatrix<Element = T> + ?Sized>(
        &self,
        other: &M,
    ) -> Result<Matrix<bool>> {
        self.compare("elementwise_lt", other, T::lt)
    }

    pub fn elementwise_le<M: DenseMatrix<Element = T> + ?Sized>(
        &self,
        other: &M,
    ) -> Result<Matrix<bool>> {
        self.compare("elementwise_le", other, T::le)
    }

    pub fn elementwise_gt<M: DenseMatrix<Element = T> + ?Sized>(
        &self,
        other: &M,
    ) -> Result<Matrix<bool>> {
        self.compare("elementwise_gt", other, T::gt)
    }

    pub fn elementwise_ge<M: DenseMatrix<Element = T> + ?Sized>(
        &self,
        other: &M,
    ) -> Result<Matrix<bool>> {
        self.compare("elementwise_ge", other, T::ge)
    }
}

impl<T: Real> Matrix<T> {
    pub fn sqrt(&self) -> Self {
        self.map(Float::sqrt)
    }

    pub fn sin(&self) -> Self {
        self.map(Float::sin)
    }

    pub fn cos(&self) -> Self {
        self.map(Float::cos)
    }

    pub fn tan(&self) -> Self {
        self.map(Float::tan)
    }

    pub fn exp(&self) -> Self {
        self.map(Float::exp)
    }

    /// Natural logarithm
    pub fn ln(&self) -> Self {
        self.map(Float::ln)
    }

    pub fn powi(&self, n: i32) -> Self {
        self.map(|x| Float::powi(x, n))
    }
}

impl Matrix<bool> {
    /// True if every coefficient is true
    pub fn all(&self) -> bool {
        self.iter().all(|&b| b)
    }

    /// True if at least one coefficient is true
    pub fn any(&self) -> bool {
        self.iter().any(|&b| b)
    }

    /// Number of true coefficients
    pub fn count(&self) -> usize {
        self.iter().filter(|&&b| b).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use densemat_core::MatrixError;

    #[test]
    fn test_component_ops() {
        let a = Matrix::from_row_major(2, 2, &[1.0, 2.0, 3.0, 4.0]).unwrap();
        let b = Matrix::from_row_major(2, 2, &[2.0, 2.0, 0.5, 8.0]).unwrap();
        assert_eq!(
            a.component_mul(&b).unwrap().to_row_major(),
            vec![2.0, 4.0, 1.5, 32.0]
        );
        assert_eq!(
            a.component_div(&b).unwrap().to_row_major(),
            vec![0.5, 1.0, 6.0, 0.5]
        );
        assert_eq!(a.add_scalar(1.0).to_row_major(), vec![2.0, 3.0, 4.0, 5.0]);
        assert_eq!(a.sub_scalar(1.0).to_row_major(), vec![0.0, 1.0, 2.0, 3.0]);
        // operands untouched
        assert_eq!(a.to_row_major(), vec![1.0, 2.0, 3.0, 4.0]);

        let c = Matrix::<f64>::zeros(1, 4).unwrap();
        assert!(matches!(
            a.component_mul(&c),
            Err(MatrixError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_unary_functions() {
        let a = Matrix::from_row_major(1, 3, &[4.0f64, -9.0, 0.0]).unwrap();
        assert_eq!(a.square().as_slice(), &[16.0, 81.0, 0.0]);
        assert_eq!(a.cube().as_slice(), &[64.0, -729.0, 0.0]);
        assert_eq!(a.abs().sqrt().as_slice(), &[2.0, 3.0, 0.0]);
        assert!(a.sqrt()[(0, 1)].is_nan());
        assert_eq!(a.powi(2), a.square());
        assert_relative_eq!(a.exp().ln()[(0, 0)], 4.0, epsilon = 1e-12);

        let angles = Matrix::from_row_major(1, 2, &[0.0, std::f64::consts::FRAC_PI_2]).unwrap();
        assert_relative_eq!(angles.sin()[(0, 1)], 1.0);
        assert_relative_eq!(angles.cos()[(0, 0)], 1.0);
        assert_relative_eq!(angles.tan()[(0, 0)], 0.0);

        let ints = Matrix::from_row_major(1, 3, &[-3i64, 4, 0]).unwrap();
        assert_eq!(ints.abs().as_slice(), &[3, 4, 0]);
    }

    #[test]
    fn test_relational_returns_bool_matrix() {
        let a = Matrix::from_row_major(2, 2, &[1, 5, 3, 4]).unwrap();
        let b = Matrix::from_row_major(2, 2, &[2, 5, 1, 9]).unwrap();

        let lt = a.elementwise_lt(&b).unwrap();
        assert_eq!(lt.to_row_major(), vec![true, false, false, true]);
        assert_eq!(lt.count(), 2);
        assert!(lt.any());
        assert!(!lt.all());

        assert_eq!(
            a.elementwise_eq(&b).unwrap().to_row_major(),
            vec![false, true, false, false]
        );
        assert_eq!(a.elementwise_ne(&b).unwrap().count(), 3);
        assert_eq!(a.elementwise_le(&b).unwrap().count(), 3);
        assert_eq!(a.elementwise_gt(&b).unwrap().count(), 1);
        assert!(a.elementwise_ge(&a).unwrap().all());

        let wide = Matrix::from_row_major(1, 4, &[1, 5, 3, 4]).unwrap();
        assert!(a.elementwise_lt(&wide).is_err());
    }

    #[test]
    fn test_map_and_zip_map() {
        let a = Matrix::from_row_major(1, 3, &[1, 2, 3]).unwrap();
        let flags = a.map(|x| x % 2 == 1);
        assert_eq!(flags.as_slice(), &[true, false, true]);

        let picked = a
            .zip_map(&flags, |x, keep| if keep { x } else { 0 })
            .unwrap();
        assert_eq!(picked.as_slice(), &[1, 0, 3]);
    }
}
