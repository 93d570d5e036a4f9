//! Converter errors
//!
//! Construction problems surface when a converter is built, never later.
//! Domain problems surface only for scalar magnitudes; bulk arrays follow
//! the float convention and carry NaN instead.

use quire_core::NumberError;
use thiserror::Error;

/// Result alias for converter operations
pub type ConvertResult<T> = Result<T, ConvertError>;

#[derive(Debug, Clone, Error)]
pub enum ConvertError {
    /// A converter parameter is out of range
    #[error("invalid converter parameter '{param}': {reason}")]
    Construction {
        param: &'static str,
        reason: &'static str,
    },

    /// The magnitude lies outside the converter's domain
    #[error("domain error: {0}")]
    Domain(String),

    /// No converter accepts the given set of named parameters
    #[error("unsupported converter parameters: {0}")]
    Configuration(String),

    #[error(transparent)]
    Number(#[from] NumberError),
}
