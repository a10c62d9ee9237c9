//! Byte buffer validation for mapped matrices
//!
//! Mapped construction reinterprets caller-owned bytes as coefficients
//! without copying. The bytes must be aligned for the coefficient type and
//! hold a whole number of coefficients.

use bytemuck::Pod;

use crate::{check_buffer_len, MatrixError, Shape};

/// Validate alignment for a pointer to typed data
pub fn validate_alignment<T>(ptr: *const u8) -> Result<(), MatrixError> {
    if (ptr as usize) % core::mem::align_of::<T>() != 0 {
        return Err(MatrixError::ByteLayout);
    }
    Ok(())
}

/// Reinterpret a byte slice as a column-major coefficient slice for `shape`
///
/// Fails with `ByteLayout` when the bytes are misaligned or not a multiple
/// of the coefficient size, and with `BufferLength` when the coefficient
/// count does not match the shape.
pub fn cast_coefficients<T: Pod>(shape: Shape, bytes: &[u8]) -> Result<&[T], MatrixError> {
    validate_alignment::<T>(bytes.as_ptr())?;
    let values: &[T] = bytemuck::try_cast_slice(bytes).map_err(|_| MatrixError::ByteLayout)?;
    check_buffer_len(shape, values.len())?;
    Ok(values)
}

/// Mutable counterpart of [`cast_coefficients`]
pub fn cast_coefficients_mut<T: Pod>(
    shape: Shape,
    bytes: &mut [u8],
) -> Result<&mut [T], MatrixError> {
    validate_alignment::<T>(bytes.as_ptr())?;
    let values: &mut [T] =
        bytemuck::try_cast_slice_mut(bytes).map_err(|_| MatrixError::ByteLayout)?;
    check_buffer_len(shape, values.len())?;
    Ok(values)
}
