//! Multiplicative converter: reference = value * scale

use quire_core::Number;
use crate::param::Param;
use crate::ConvertResult;

/// Pure scaling. The only variant besides identity that unit algebra may
/// compose and cancel freely.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleConverter {
    scale: Param,
}

impl ScaleConverter {
    /// Fails when `scale` is zero
    pub fn new(scale: impl Into<Number>) -> ConvertResult<Self> {
        Ok(ScaleConverter { scale: Param::nonzero("scale", scale.into())? })
    }

    pub fn scale(&self) -> &Number {
        &self.scale.exact
    }

    pub(crate) fn to_reference_f64(&self, value: f64) -> f64 {
        value * self.scale.float
    }

    pub(crate) fn from_reference_f64(&self, value: f64) -> f64 {
        value / self.scale.float
    }

    pub(crate) fn to_reference_number(&self, value: &Number) -> Number {
        value.mul(&self.scale.exact)
    }

    pub(crate) fn from_reference_number(&self, value: &Number) -> ConvertResult<Number> {
        Ok(value.checked_div(&self.scale.exact)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConvertError;

    #[test]
    fn test_zero_scale_rejected() {
        let err = ScaleConverter::new(0).unwrap_err();
        assert!(matches!(err, ConvertError::Construction { param: "scale", .. }));
    }

    #[test]
    fn test_float_path() {
        let c = ScaleConverter::new(20.0).unwrap();
        assert_eq!(c.to_reference_f64(5.0), 100.0);
        assert_eq!(c.from_reference_f64(100.0), 5.0);
    }

    #[test]
    fn test_decimal_path_is_exact() {
        let c = ScaleConverter::new(Number::from_str("0.001").unwrap()).unwrap();
        let value = Number::from_i64(2);
        let reference = c.to_reference_number(&value);
        assert_eq!(reference.to_string(), "0.002");
        let back = c.from_reference_number(&reference).unwrap();
        assert_eq!(back.to_string(), "2");
    }
}
