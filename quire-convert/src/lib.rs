//! Quire Convert - Reference converters
//!
//! A converter translates magnitudes between a unit's native representation
//! and the reference representation shared by its dimension:
//!
//! - `Identity`: reference = value
//! - `Scale`: reference = value * scale
//! - `Offset`: reference = value * scale + offset
//! - `Logarithmic`: reference = scale * logbase^(value / logfactor)
//!
//! Magnitudes may be `f64`, exact decimal `Number`s, or `ndarray` arrays.
//! Arrays can also be converted in place through the `*_into` methods.
//!
//! ```
//! use quire_convert::{Converter, OffsetConverter};
//!
//! let celsius = Converter::from(OffsetConverter::new(1, 273.15).unwrap());
//! let kelvin = celsius.to_reference(&25.0).unwrap();
//! assert!((kelvin - 298.15).abs() < 1e-9);
//! assert!(!celsius.is_multiplicative());
//! ```

mod error;
mod param;
mod scale;
mod offset;
mod logarithmic;
mod converter;
mod magnitude;
mod factory;

pub use error::{ConvertError, ConvertResult};
pub use scale::ScaleConverter;
pub use offset::OffsetConverter;
pub use logarithmic::LogarithmicConverter;
pub use converter::Converter;
pub use magnitude::Magnitude;
pub use factory::ConverterArgs;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        ConvertError, ConvertResult, Converter, ConverterArgs, LogarithmicConverter, Magnitude,
        OffsetConverter, ScaleConverter,
    };
}
