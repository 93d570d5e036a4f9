//! Magnitudes a converter can act on
//!
//! Scalars come in two flavours: `f64` and the exact decimal `Number`.
//! Owned `ndarray` arrays of `f64` are the bulk form; their copying
//! conversion clones the buffer and reuses the in-place kernel.

use ndarray::{Array, Dimension};
use quire_core::Number;
use crate::{ConvertResult, Converter};

/// A value, or a batch of values, that a `Converter` can map between
/// its unit and the reference unit. Results are always new values; use
/// `Converter::to_reference_into` to overwrite an array instead.
pub trait Magnitude: Sized {
    /// Map from the converter's unit to the reference unit.
    /// Decimal scalars fail when the result is out of range.
    fn to_reference(&self, converter: &Converter) -> ConvertResult<Self>;

    /// Map from the reference unit back to the converter's unit.
    /// Scalars fail with `ConvertError::Domain` where a logarithm is
    /// undefined; arrays hold NaN there instead.
    fn from_reference(&self, converter: &Converter) -> ConvertResult<Self>;
}

impl Magnitude for f64 {
    fn to_reference(&self, converter: &Converter) -> ConvertResult<Self> {
        Ok(converter.to_reference_f64(*self))
    }

    fn from_reference(&self, converter: &Converter) -> ConvertResult<Self> {
        converter.from_reference_f64(*self)
    }
}

impl Magnitude for Number {
    fn to_reference(&self, converter: &Converter) -> ConvertResult<Self> {
        converter.to_reference_number(self)
    }

    fn from_reference(&self, converter: &Converter) -> ConvertResult<Self> {
        converter.from_reference_number(self)
    }
}

impl<D: Dimension> Magnitude for Array<f64, D> {
    fn to_reference(&self, converter: &Converter) -> ConvertResult<Self> {
        let mut out = self.clone();
        converter.to_reference_into(&mut out);
        Ok(out)
    }

    /// Never fails: out-of-domain elements turn into NaN
    fn from_reference(&self, converter: &Converter) -> ConvertResult<Self> {
        let mut out = self.clone();
        converter.from_reference_into(&mut out);
        Ok(out)
    }
}
