//! Dimensional analysis
//!
//! A dimension is the vector of exponents over the seven SI base
//! quantities, in the order length, mass, time, current, temperature,
//! amount of substance, luminous intensity.

use std::fmt;
use serde::{Serialize, Deserialize};

/// Base quantity symbols, in exponent order
const BASE_SYMBOLS: [&str; 7] = ["L", "M", "T", "I", "Θ", "N", "J"];

/// Coherent SI unit of each base quantity, in exponent order
pub(crate) const BASE_UNITS: [&str; 7] = ["m", "kg", "s", "A", "K", "mol", "cd"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Dimension {
    pub exponents: [i32; 7],
}

impl Dimension {
    pub const DIMENSIONLESS: Dimension = Dimension::new([0, 0, 0, 0, 0, 0, 0]);
    pub const LENGTH: Dimension = Dimension::new([1, 0, 0, 0, 0, 0, 0]);
    pub const MASS: Dimension = Dimension::new([0, 1, 0, 0, 0, 0, 0]);
    pub const TIME: Dimension = Dimension::new([0, 0, 1, 0, 0, 0, 0]);
    pub const CURRENT: Dimension = Dimension::new([0, 0, 0, 1, 0, 0, 0]);
    pub const TEMPERATURE: Dimension = Dimension::new([0, 0, 0, 0, 1, 0, 0]);
    pub const AMOUNT: Dimension = Dimension::new([0, 0, 0, 0, 0, 1, 0]);
    pub const LUMINOSITY: Dimension = Dimension::new([0, 0, 0, 0, 0, 0, 1]);

    pub const AREA: Dimension = Dimension::new([2, 0, 0, 0, 0, 0, 0]);
    pub const VOLUME: Dimension = Dimension::new([3, 0, 0, 0, 0, 0, 0]);
    pub const FREQUENCY: Dimension = Dimension::new([0, 0, -1, 0, 0, 0, 0]);
    pub const VELOCITY: Dimension = Dimension::new([1, 0, -1, 0, 0, 0, 0]);
    pub const FORCE: Dimension = Dimension::new([1, 1, -2, 0, 0, 0, 0]);
    pub const ENERGY: Dimension = Dimension::new([2, 1, -2, 0, 0, 0, 0]);
    pub const POWER: Dimension = Dimension::new([2, 1, -3, 0, 0, 0, 0]);
    pub const PRESSURE: Dimension = Dimension::new([-1, 1, -2, 0, 0, 0, 0]);
    pub const CONCENTRATION: Dimension = Dimension::new([-3, 1, 0, 0, 0, 0, 0]);

    pub const fn new(exponents: [i32; 7]) -> Self {
        Dimension { exponents }
    }

    pub fn is_dimensionless(&self) -> bool {
        self.exponents.iter().all(|&e| e == 0)
    }

    /// Combine exponent-wise; `None` if any exponent overflows
    fn zip_with(&self, other: &Dimension, f: impl Fn(i32, i32) -> Option<i32>) -> Option<Dimension> {
        let mut exponents = [0; 7];
        for (i, slot) in exponents.iter_mut().enumerate() {
            *slot = f(self.exponents[i], other.exponents[i])?;
        }
        Some(Dimension::new(exponents))
    }

    /// Dimension of a product
    pub fn multiply(&self, other: &Dimension) -> Option<Dimension> {
        self.zip_with(other, i32::checked_add)
    }

    /// Dimension of a quotient
    pub fn divide(&self, other: &Dimension) -> Option<Dimension> {
        self.zip_with(other, i32::checked_sub)
    }

    pub fn power(&self, exp: i32) -> Option<Dimension> {
        self.zip_with(&Dimension::DIMENSIONLESS, |e, _| e.checked_mul(exp))
    }

    pub fn invert(&self) -> Option<Dimension> {
        self.power(-1)
    }

    /// Common name, when the dimension has one
    pub fn name(&self) -> Option<&'static str> {
        let name = match *self {
            Self::DIMENSIONLESS => "dimensionless",
            Self::LENGTH => "length",
            Self::MASS => "mass",
            Self::TIME => "time",
            Self::CURRENT => "current",
            Self::TEMPERATURE => "temperature",
            Self::AMOUNT => "substance",
            Self::LUMINOSITY => "luminosity",
            Self::AREA => "area",
            Self::VOLUME => "volume",
            Self::FREQUENCY => "frequency",
            Self::VELOCITY => "velocity",
            Self::FORCE => "force",
            Self::ENERGY => "energy",
            Self::POWER => "power",
            Self::PRESSURE => "pressure",
            Self::CONCENTRATION => "concentration",
            _ => return None,
        };
        Some(name)
    }

    /// Symbol of the coherent SI unit, e.g. `kg·m^2/s^2`
    pub fn reference_symbol(&self) -> String {
        let mut numerator = Vec::new();
        let mut denominator = Vec::new();
        for (symbol, &exp) in BASE_UNITS.iter().zip(self.exponents.iter()) {
            match exp.unsigned_abs() {
                0 => {}
                1 => (if exp > 0 { &mut numerator } else { &mut denominator }).push(symbol.to_string()),
                n => (if exp > 0 { &mut numerator } else { &mut denominator })
                    .push(format!("{}^{}", symbol, n)),
            }
        }
        match (numerator.is_empty(), denominator.is_empty()) {
            (true, true) => String::new(),
            (false, true) => numerator.join("·"),
            (true, false) => format!("1/{}", denominator.join("·")),
            (false, false) => format!("{}/{}", numerator.join("·"), denominator.join("·")),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = BASE_SYMBOLS
            .iter()
            .zip(self.exponents.iter())
            .filter(|(_, &exp)| exp != 0)
            .map(|(symbol, &exp)| match exp {
                1 => symbol.to_string(),
                _ => format!("{}^{}", symbol, exp),
            })
            .collect();

        if parts.is_empty() {
            write!(f, "1")
        } else {
            write!(f, "{}", parts.join(" "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensionless() {
        assert!(Dimension::DIMENSIONLESS.is_dimensionless());
        assert!(Dimension::default().is_dimensionless());
        assert!(!Dimension::LENGTH.is_dimensionless());
    }

    #[test]
    fn test_algebra() {
        assert_eq!(Dimension::LENGTH.divide(&Dimension::TIME), Some(Dimension::VELOCITY));
        assert_eq!(Dimension::LENGTH.power(3), Some(Dimension::VOLUME));
        assert_eq!(Dimension::TIME.invert(), Some(Dimension::FREQUENCY));

        let force = Dimension::MASS
            .multiply(&Dimension::LENGTH)
            .and_then(|d| d.divide(&Dimension::TIME.power(2)?));
        assert_eq!(force, Some(Dimension::FORCE));
    }

    #[test]
    fn test_exponent_overflow() {
        let huge = Dimension::new([i32::MAX, 0, 0, 0, 0, 0, 0]);
        assert_eq!(huge.multiply(&Dimension::LENGTH), None);
        assert_eq!(huge.power(2), None);
        assert_eq!(Dimension::new([i32::MIN, 0, 0, 0, 0, 0, 0]).invert(), None);
        assert_eq!(Dimension::FREQUENCY.divide(&Dimension::new([0, 0, i32::MAX, 0, 0, 0, 0])), None);
        assert_eq!(huge.divide(&Dimension::LENGTH), Some(Dimension::new([i32::MAX - 1, 0, 0, 0, 0, 0, 0])));
    }

    #[test]
    fn test_volume_ratio_cancels() {
        // µL·mg/L is a mass
        let d = Dimension::VOLUME
            .multiply(&Dimension::MASS)
            .and_then(|d| d.divide(&Dimension::VOLUME))
            .unwrap();
        assert_eq!(d, Dimension::MASS);
        assert_eq!(d.name(), Some("mass"));
    }

    #[test]
    fn test_display() {
        assert_eq!(Dimension::DIMENSIONLESS.to_string(), "1");
        assert_eq!(Dimension::LENGTH.to_string(), "L");
        assert_eq!(Dimension::VELOCITY.to_string(), "L T^-1");
    }

    #[test]
    fn test_reference_symbol() {
        assert_eq!(Dimension::MASS.reference_symbol(), "kg");
        assert_eq!(Dimension::ENERGY.reference_symbol(), "m^2·kg/s^2");
        assert_eq!(Dimension::FREQUENCY.reference_symbol(), "1/s");
        assert_eq!(Dimension::DIMENSIONLESS.reference_symbol(), "");
        assert_eq!(Dimension::new([i32::MIN, 0, 0, 0, 0, 0, 0]).reference_symbol(), "1/m^2147483648");
    }
}
