//! Quire Core - Fundamental numeric types
//!
//! This crate provides the decimal number used throughout Quire:
//! - `Number`: Arbitrary precision decimal that tracks its significance
//! - `NumberError`: Failures of numeric operations
//! - `WORK_PRECISION`: Digits used for transcendental functions

mod number;

pub use number::{Number, NumberError, MAX_EXPONENT, WORK_PRECISION, count_trailing_zeros};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Number, NumberError, WORK_PRECISION};
}
