#![no_std]

//! densemat core - dense matrix definitions
//!
//! This crate provides the coefficient traits, shape definitions, error
//! type and validation functions shared by every dense matrix storage.
//! It performs no allocation.

pub mod error;
pub mod shape;
pub mod traits;
pub mod validation;

pub use error::*;
pub use shape::*;
pub use traits::*;
pub use validation::*;
