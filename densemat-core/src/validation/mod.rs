//! Validation utilities for dense matrices
//!
//! This module contains pure validation functions with no I/O dependencies.
//! All functions are checks on shapes, indices and buffer layout.

pub mod bounds;
pub mod layout;

pub use bounds::{
    check_buffer_len, check_index, check_product, check_same_shape, check_square, check_vector,
    check_vector_len,
};
pub use layout::{cast_coefficients, cast_coefficients_mut, validate_alignment};
