//! Quantity type - a decimal magnitude with an associated unit

use std::fmt;
use serde::{Serialize, Deserialize};
use quire_core::Number;
use crate::{ConversionError, Dimension, Prefix, Unit, UNITS};

/// A physical quantity: an exact decimal magnitude with a unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quantity {
    /// Magnitude in `unit`, with the digits it was written with
    pub magnitude: Number,
    pub unit: Unit,
}

impl Quantity {
    /// Pair a magnitude with a unit as given, without converting
    pub fn new(magnitude: Number, unit: Unit) -> Self {
        Quantity { magnitude, unit }
    }

    /// Parse `"2 microliter milligram/liter"`
    pub fn parse(text: &str) -> Result<Self, ConversionError> {
        crate::parse_expression(text)
    }

    /// A pure number
    pub fn dimensionless(magnitude: Number) -> Self {
        Quantity::new(magnitude, Unit::dimensionless())
    }

    pub fn dimension(&self) -> Dimension {
        self.unit.dimension
    }

    pub fn is_compatible(&self, other: &Quantity) -> bool {
        self.unit.is_compatible(&other.unit)
    }

    /// Express in another unit of the same dimension
    pub fn to(&self, target: &Unit) -> Result<Quantity, ConversionError> {
        let magnitude = self.unit.convert_to(&self.magnitude, target)?;
        Ok(Quantity::new(magnitude, target.clone()))
    }

    /// `to` with the target given as a unit expression
    pub fn to_units(&self, target: &str) -> Result<Quantity, ConversionError> {
        self.to(&crate::parse_unit(target)?)
    }

    /// Express in the coherent SI unit of its dimension
    pub fn to_reference(&self) -> Result<Quantity, ConversionError> {
        let magnitude = self.unit.to_reference(&self.magnitude)?;
        Ok(Quantity::new(magnitude, Unit::reference(self.unit.dimension)))
    }

    /// Rescale with the SI prefix that brings the magnitude into `[1, 1000)`
    ///
    /// The prefix comes from the exact decimal exponent of the magnitude,
    /// so the digits are shifted and never rounded. Zero and
    /// non-multiplicative quantities are returned as they are; dimensions
    /// without a compact unit are returned in their reference unit.
    pub fn to_compact(&self) -> Result<Quantity, ConversionError> {
        if !self.unit.is_multiplicative() || self.magnitude.is_zero() {
            return Ok(self.clone());
        }

        let Some(base) = UNITS.compact_unit(&self.unit.dimension) else {
            return self.to_reference();
        };
        let magnitude = self.unit.convert_to(&self.magnitude, base)?;

        let prefix = magnitude.adjusted_exponent().and_then(Prefix::engineering);
        match prefix {
            None => Ok(Quantity::new(magnitude, base.clone())),
            Some(prefix) => {
                let scaled = magnitude.checked_div(&prefix.factor())?;
                Ok(Quantity::new(scaled, base.with_prefix(prefix)?))
            }
        }
    }

    fn check_additive(&self, other: &Quantity) -> Result<(), ConversionError> {
        for unit in [&self.unit, &other.unit] {
            if unit.is_logarithmic() {
                return Err(ConversionError::NonMultiplicative {
                    unit: unit.symbol.clone(),
                    operation: "add",
                });
            }
        }
        Ok(())
    }

    /// Sum in `self`'s unit
    pub fn add(&self, other: &Quantity) -> Result<Quantity, ConversionError> {
        self.check_additive(other)?;
        let converted = other.to(&self.unit)?;
        Ok(Quantity::new(self.magnitude.add(&converted.magnitude), self.unit.clone()))
    }

    /// Difference in `self`'s unit
    pub fn sub(&self, other: &Quantity) -> Result<Quantity, ConversionError> {
        self.check_additive(other)?;
        let converted = other.to(&self.unit)?;
        Ok(Quantity::new(self.magnitude.sub(&converted.magnitude), self.unit.clone()))
    }

    /// Product in the composite unit `self.unit·other.unit`. Both units
    /// must be multiplicative.
    pub fn mul(&self, other: &Quantity) -> Result<Quantity, ConversionError> {
        let unit = self.unit.multiply(&other.unit)?;
        Ok(Quantity::new(self.magnitude.mul(&other.magnitude), unit))
    }

    /// Quotient in the composite unit `self.unit/other.unit`; fails on a
    /// zero divisor or a non-multiplicative unit.
    pub fn div(&self, other: &Quantity) -> Result<Quantity, ConversionError> {
        let unit = self.unit.divide(&other.unit)?;
        Ok(Quantity::new(self.magnitude.checked_div(&other.magnitude)?, unit))
    }

    /// Integer power of both magnitude and unit
    pub fn pow(&self, exp: i32) -> Result<Quantity, ConversionError> {
        let unit = self.unit.power(exp)?;
        Ok(Quantity::new(self.magnitude.pow(exp)?, unit))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unit.symbol.is_empty() {
            write!(f, "{}", self.magnitude)
        } else {
            write!(f, "{} {}", self.magnitude, self.unit)
        }
    }
}

/// Equal when both describe the same amount of the same dimension
impl PartialEq for Quantity {
    fn eq(&self, other: &Self) -> bool {
        if !self.is_compatible(other) {
            return false;
        }
        match (self.unit.to_reference(&self.magnitude), other.unit.to_reference(&other.magnitude)) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(text: &str) -> Quantity {
        Quantity::parse(text).unwrap()
    }

    fn unit(text: &str) -> Unit {
        UNITS.resolve(text).unwrap()
    }

    #[test]
    fn test_to() {
        let km = q("5 km").to(&unit("m")).unwrap();
        assert_eq!(km.to_string(), "5000 m");

        // the divisor's exponent carries into the result, as in decimal division
        let back = q("1500 m").to_units("km").unwrap();
        assert_eq!(back.to_string(), "1.500 km");

        assert!(q("5 km").to(&unit("s")).is_err());
    }

    #[test]
    fn test_to_reference() {
        let r = q("250 mL").to_reference().unwrap();
        assert_eq!(r.unit.symbol, "m^3");
        assert_eq!(r.magnitude.to_string(), "0.000250");
        assert_eq!(r, q("250 mL"));
    }

    #[test]
    fn test_to_compact() {
        assert_eq!(q("0.002 g").to_compact().unwrap().to_string(), "2 mg");
        assert_eq!(q("1500 m").to_compact().unwrap().to_string(), "1.500 km");
        assert_eq!(q("12 m").to_compact().unwrap().to_string(), "12 m");
        assert_eq!(q("3000 kg").to_compact().unwrap().to_string(), "3.000 Mg");
    }

    #[test]
    fn test_to_compact_leaves_special_cases() {
        let zero = q("0 mg");
        assert_eq!(zero.to_compact().unwrap().unit.symbol, "mg");

        let temp = q("25 degC");
        assert_eq!(temp.to_compact().unwrap().unit.symbol, "degC");

        let level = q("20 dB");
        assert_eq!(level.to_compact().unwrap().unit.symbol, "dB");
    }

    #[test]
    fn test_add_sub() {
        let total = q("1 km").add(&q("500 m")).unwrap();
        assert_eq!(total.to_string(), "1.500 km");

        let rest = q("2 L").sub(&q("250 mL")).unwrap();
        assert_eq!(rest.to_string(), "1.750 L");

        assert!(matches!(
            q("1 m").add(&q("1 s")),
            Err(ConversionError::IncompatibleDimensions { .. })
        ));
        assert!(matches!(
            q("10 dB").add(&q("10 dB")),
            Err(ConversionError::NonMultiplicative { .. })
        ));
    }

    #[test]
    fn test_mul_div_pow() {
        let area = q("3 m").mul(&q("4 m")).unwrap();
        assert_eq!(area.dimension(), Dimension::AREA);
        assert_eq!(area.magnitude, Number::from_i64(12));

        let speed = q("100 km").div(&q("2 h")).unwrap();
        assert_eq!(speed.dimension(), Dimension::VELOCITY);
        let mps = speed.to_reference().unwrap();
        assert!((mps.magnitude.to_f64().unwrap() - 13.888_888_888).abs() < 1e-6);

        let volume = q("2 m").pow(3).unwrap();
        assert_eq!(volume.to_string(), "8 m^3");

        assert!(q("2 degC").mul(&q("1 m")).is_err());
    }

    #[test]
    fn test_offset_conversion() {
        let k = q("25 degC").to(&unit("K")).unwrap();
        assert_eq!(k.to_string(), "298.15 K");
    }

    #[test]
    fn test_logarithmic_conversion() {
        let ratio = q("20 dB").to_reference().unwrap();
        assert_eq!(ratio.magnitude, Number::from_i64(100));

        let bel = q("20 dB").to(&unit("B")).unwrap();
        assert!((bel.magnitude.to_f64().unwrap() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_logarithmic_out_of_range() {
        let err = q("1e20 B").to_reference().unwrap_err();
        assert!(matches!(
            err,
            ConversionError::Convert(quire_convert::ConvertError::Number(quire_core::NumberError::Overflow))
        ));
        assert!(q("1e20 B").to(&unit("dB")).is_err());
    }
}
