//! Affine converter: reference = value * scale + offset
//!
//! Used for temperature scales whose zero is not the reference zero.

use quire_core::Number;
use crate::param::Param;
use crate::ConvertResult;

#[derive(Debug, Clone, PartialEq)]
pub struct OffsetConverter {
    scale: Param,
    offset: Param,
}

impl OffsetConverter {
    /// Fails when `scale` is zero. A zero offset is allowed and still
    /// yields a non-multiplicative converter.
    pub fn new(scale: impl Into<Number>, offset: impl Into<Number>) -> ConvertResult<Self> {
        Ok(OffsetConverter {
            scale: Param::nonzero("scale", scale.into())?,
            offset: Param::new("offset", offset.into())?,
        })
    }

    pub fn scale(&self) -> &Number {
        &self.scale.exact
    }

    pub fn offset(&self) -> &Number {
        &self.offset.exact
    }

    pub(crate) fn to_reference_f64(&self, value: f64) -> f64 {
        value * self.scale.float + self.offset.float
    }

    pub(crate) fn from_reference_f64(&self, value: f64) -> f64 {
        (value - self.offset.float) / self.scale.float
    }

    pub(crate) fn to_reference_number(&self, value: &Number) -> Number {
        value.mul(&self.scale.exact).add(&self.offset.exact)
    }

    pub(crate) fn from_reference_number(&self, value: &Number) -> ConvertResult<Number> {
        Ok(value.sub(&self.offset.exact).checked_div(&self.scale.exact)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConvertError;

    #[test]
    fn test_zero_scale_rejected() {
        let err = OffsetConverter::new(0, 5).unwrap_err();
        assert!(matches!(err, ConvertError::Construction { param: "scale", .. }));
    }

    #[test]
    fn test_celsius_like() {
        let c = OffsetConverter::new(1, Number::from_str("273.15").unwrap()).unwrap();
        let kelvin = c.to_reference_number(&Number::from_i64(100));
        assert_eq!(kelvin.to_string(), "373.15");
        let celsius = c.from_reference_number(&kelvin).unwrap();
        assert_eq!(celsius, Number::from_i64(100));
    }

    #[test]
    fn test_float_path() {
        let c = OffsetConverter::new(20.0, 2).unwrap();
        assert_eq!(c.to_reference_f64(100.0), 2002.0);
        assert_eq!(c.from_reference_f64(2002.0), 100.0);
    }
}
