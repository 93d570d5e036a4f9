//! Units: a symbol and a dimension plus the converter to the coherent SI unit

use std::fmt;
use serde::{Serialize, Deserialize};
use thiserror::Error;
use quire_convert::{ConvertError, Converter, ScaleConverter};
use quire_core::{Number, NumberError};
use crate::{Dimension, Prefix};

/// Errors that can occur while resolving or converting units
#[derive(Debug, Clone, Error)]
pub enum ConversionError {
    #[error("cannot convert {from} ({from_dim}) to {to} ({to_dim}): incompatible dimensions")]
    IncompatibleDimensions {
        from: String,
        to: String,
        from_dim: Dimension,
        to_dim: Dimension,
    },

    #[error("unknown unit: {0}")]
    UnknownUnit(String),

    /// Offset and logarithmic units do not compose
    #[error("cannot {operation} non-multiplicative unit {unit}")]
    NonMultiplicative {
        unit: String,
        operation: &'static str,
    },

    #[error("parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    Convert(#[from] ConvertError),

    #[error(transparent)]
    Number(#[from] NumberError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    /// e.g. "m", "kg", "degC"
    pub symbol: String,
    pub name: String,
    pub dimension: Dimension,
    /// Maps magnitudes in this unit to the coherent SI unit of `dimension`
    #[serde(default)]
    pub converter: Converter,
    pub category: String,
}

impl Unit {
    pub fn new(
        symbol: &str,
        name: &str,
        dimension: Dimension,
        converter: Converter,
        category: &str,
    ) -> Self {
        Unit {
            symbol: symbol.to_string(),
            name: name.to_string(),
            dimension,
            converter,
            category: category.to_string(),
        }
    }

    /// The coherent SI unit of a dimension (`kg`, `m^2·kg/s^2`, ...)
    pub fn reference(dimension: Dimension) -> Self {
        let symbol = dimension.reference_symbol();
        let category = dimension.name().unwrap_or("derived");
        Unit::new(&symbol, &symbol, dimension, Converter::Identity, category)
    }

    pub fn dimensionless() -> Self {
        Unit::reference(Dimension::DIMENSIONLESS)
    }

    pub fn is_multiplicative(&self) -> bool {
        self.converter.is_multiplicative()
    }

    pub fn is_logarithmic(&self) -> bool {
        self.converter.is_logarithmic()
    }

    pub fn is_compatible(&self, other: &Unit) -> bool {
        self.dimension == other.dimension
    }

    pub fn to_reference(&self, value: &Number) -> Result<Number, ConversionError> {
        Ok(self.converter.to_reference(value)?)
    }

    pub fn from_reference(&self, value: &Number) -> Result<Number, ConversionError> {
        Ok(self.converter.from_reference(value)?)
    }

    /// Convert a magnitude in this unit into `target`, through the reference unit
    pub fn convert_to(&self, value: &Number, target: &Unit) -> Result<Number, ConversionError> {
        if !self.is_compatible(target) {
            return Err(ConversionError::IncompatibleDimensions {
                from: self.symbol.clone(),
                to: target.symbol.clone(),
                from_dim: self.dimension,
                to_dim: target.dimension,
            });
        }
        if self == target {
            return Ok(value.clone());
        }
        target.from_reference(&self.to_reference(value)?)
    }

    /// Scale factor to the reference unit; only multiplicative units have one
    fn factor(&self, operation: &'static str) -> Result<Number, ConversionError> {
        if !self.is_multiplicative() {
            return Err(ConversionError::NonMultiplicative {
                unit: self.symbol.clone(),
                operation,
            });
        }
        Ok(self.converter.scale())
    }

    fn derived(symbol: String, name: String, dimension: Dimension, factor: Number) -> Result<Unit, ConversionError> {
        let converter = if factor == Number::from_i64(1) {
            Converter::Identity
        } else {
            Converter::from(ScaleConverter::new(factor)?)
        };
        let category = dimension.name().unwrap_or("derived").to_string();
        Ok(Unit { symbol, name, dimension, converter, category })
    }

    /// `milli` + `gram` = `milligram`
    pub fn with_prefix(&self, prefix: Prefix) -> Result<Unit, ConversionError> {
        let factor = prefix.factor().mul(&self.factor("prefix")?);
        let mut unit = Unit::derived(
            format!("{}{}", prefix.symbol, self.symbol),
            format!("{}{}", prefix.name, self.name),
            self.dimension,
            factor,
        )?;
        unit.category = self.category.clone();
        Ok(unit)
    }

    pub fn multiply(&self, other: &Unit) -> Result<Unit, ConversionError> {
        let factor = self.factor("multiply")?.mul(&other.factor("multiply")?);
        let symbol = match (self.symbol.is_empty(), other.symbol.is_empty()) {
            (true, _) => other.symbol.clone(),
            (false, true) => self.symbol.clone(),
            (false, false) => format!("{}·{}", self.symbol, other.symbol),
        };
        Unit::derived(
            symbol,
            format!("{} {}", self.name, other.name),
            checked(self.dimension.multiply(&other.dimension), "multiplying", self, other)?,
            factor,
        )
    }

    pub fn divide(&self, other: &Unit) -> Result<Unit, ConversionError> {
        let factor = self.factor("divide")?.checked_div(&other.factor("divide")?)?;
        Unit::derived(
            format!("{}/{}", if self.symbol.is_empty() { "1" } else { self.symbol.as_str() }, grouped(&other.symbol)),
            format!("{} per {}", self.name, other.name),
            checked(self.dimension.divide(&other.dimension), "dividing", self, other)?,
            factor,
        )
    }

    pub fn power(&self, exp: i32) -> Result<Unit, ConversionError> {
        let factor = self.factor("raise")?.pow(exp)?;
        if exp == 1 {
            return Ok(self.clone());
        }
        Unit::derived(
            format!("{}^{}", grouped(&self.symbol), exp),
            format!("{} to the {}", self.name, exp),
            checked(self.dimension.power(exp), "raising", self, &Unit::dimensionless())?,
            factor,
        )
    }

    /// `Hz` -> `1/Hz`
    pub fn inverse(&self) -> Result<Unit, ConversionError> {
        let factor = Number::from_i64(1).checked_div(&self.factor("invert")?)?;
        Unit::derived(
            format!("1/{}", grouped(&self.symbol)),
            format!("inverse {}", self.name),
            checked(self.dimension.invert(), "inverting", self, &Unit::dimensionless())?,
            factor,
        )
    }
}

fn checked(dimension: Option<Dimension>, action: &str, unit: &Unit, other: &Unit) -> Result<Dimension, ConversionError> {
    dimension.ok_or_else(|| {
        let operands = if other.symbol.is_empty() {
            unit.symbol.clone()
        } else {
            format!("{} and {}", unit.symbol, other.symbol)
        };
        ConversionError::Parse(format!("dimension exponent overflow {} {}", action, operands))
    })
}

/// Parenthesize compound symbols before they are combined further
fn grouped(symbol: &str) -> String {
    if symbol.contains(['·', '/', '^']) {
        format!("({})", symbol)
    } else {
        symbol.to_string()
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol)
    }
}
