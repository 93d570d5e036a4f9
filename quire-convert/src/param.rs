//! Converter parameters: the exact decimal plus an f64 mirror for bulk work

use quire_core::Number;
use crate::{ConvertError, ConvertResult};

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Param {
    pub(crate) exact: Number,
    pub(crate) float: f64,
}

impl Param {
    pub(crate) fn new(name: &'static str, exact: Number) -> ConvertResult<Self> {
        let float = exact.to_f64().ok_or(ConvertError::Construction {
            param: name,
            reason: "not representable as a finite f64",
        })?;
        Ok(Param { exact, float })
    }

    /// Parameter that divides something, so zero is rejected up front
    pub(crate) fn nonzero(name: &'static str, exact: Number) -> ConvertResult<Self> {
        if exact.is_zero() {
            return Err(ConvertError::Construction { param: name, reason: "must be nonzero" });
        }
        Self::new(name, exact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_mirror_of_small_scale() {
        // a yocto-scaled Planck constant sits below 1e-308
        let tiny = Number::from_str("6.62607015e-58").unwrap();
        let scale = Param::nonzero("scale", tiny.mul(&Number::pow10(-260))).unwrap();
        assert!((scale.float / 6.62607015e-318 - 1.0).abs() < 1e-3);

        let p = Param::new("scale", Number::from_str("1e-320").unwrap()).unwrap();
        assert!(p.float > 0.0);
    }

    #[test]
    fn test_float_mirror_out_of_range() {
        let err = Param::new("scale", Number::from_str("1e400").unwrap()).unwrap_err();
        assert!(matches!(err, ConvertError::Construction { param: "scale", .. }));
        assert!(Param::nonzero("logfactor", Number::from_i64(0)).is_err());
    }
}
