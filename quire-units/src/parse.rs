//! Unit and quantity parsing: "km/h", "kg*m/s^2", "2 microliter milligram/liter"

use quire_core::{Number, NumberError};
use crate::{ConversionError, Quantity, Unit, UNITS};

/// Parse a unit expression into a single composite `Unit`
///
/// Supported forms:
/// - names, symbols, plurals and prefixed units: "m", "liters", "microliter"
/// - powers: "m^2", "s^-1", "m**3"
/// - products separated by spaces, `*` or `·`: "kg*m", "microliter milligram"
/// - quotients, left to right: "m/s", "kg*m/s^2", "mg/L/h"
pub fn parse_unit(s: &str) -> Result<Unit, ConversionError> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(Unit::dimensionless());
    }

    // Whole spellings first, so "degree_Celsius" never reaches the splitter
    if let Ok(unit) = UNITS.resolve(s) {
        return Ok(unit);
    }

    let normalized = s.replace("**", "^");
    let mut parts = normalized.split('/');
    let mut result = parse_product(parts.next().unwrap_or_default())?;
    for part in parts {
        if part.trim().is_empty() {
            return Err(ConversionError::Parse(format!("missing denominator in '{}'", s)));
        }
        result = result.divide(&parse_product(part)?)?;
    }
    Ok(result)
}

/// Factors joined by whitespace, `*` or `·`
fn parse_product(s: &str) -> Result<Unit, ConversionError> {
    let mut factors = s
        .split(|c: char| c == '*' || c == '·' || c.is_whitespace())
        .filter(|f| !f.is_empty());

    let Some(first) = factors.next() else {
        return Ok(Unit::dimensionless());
    };

    let mut result = parse_power(first)?;
    for factor in factors {
        result = result.multiply(&parse_power(factor)?)?;
    }
    Ok(result)
}

/// A single unit with an optional integer exponent
fn parse_power(s: &str) -> Result<Unit, ConversionError> {
    let Some((base, exp)) = s.split_once('^') else {
        return lookup(s);
    };

    let exponent: i32 = exp
        .trim()
        .parse()
        .map_err(|_| ConversionError::Parse(format!("invalid exponent '{}' in '{}'", exp, s)))?;
    lookup(base)?.power(exponent)
}

fn lookup(s: &str) -> Result<Unit, ConversionError> {
    match s.trim() {
        "" | "1" => Ok(Unit::dimensionless()),
        symbol => UNITS.resolve(symbol),
    }
}

/// Split a leading decimal literal from the rest of the text
fn split_magnitude(s: &str) -> Result<Option<(Number, &str)>, ConversionError> {
    let end = s
        .find(|c: char| !(c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | 'e' | 'E')))
        .unwrap_or(s.len());

    // A literal too large to hold is not shortened into a smaller one
    if let Err(NumberError::Overflow) = Number::from_str(&s[..end]) {
        return Err(NumberError::Overflow.into());
    }

    // "2eV" is 2 followed by a unit, not an exponent
    Ok((1..=end)
        .rev()
        .find_map(|i| Number::from_str(&s[..i]).ok().map(|n| (n, &s[i..]))))
}

/// Parse a quantity expression: a decimal magnitude followed by a unit
/// expression. The magnitude keeps its literal digits, so `2.50 m` stays
/// `2.50`. A bare unit means a magnitude of one.
pub fn parse_expression(s: &str) -> Result<Quantity, ConversionError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ConversionError::Parse("empty quantity expression".to_string()));
    }

    let (magnitude, unit_str) = split_magnitude(s)?.unwrap_or((Number::from_i64(1), s));
    let unit = parse_unit(unit_str)?;
    Ok(Quantity::new(magnitude, unit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Dimension;

    #[test]
    fn test_parse_simple_unit() {
        let unit = parse_unit("m").unwrap();
        assert_eq!(unit.symbol, "m");
        assert_eq!(unit.dimension, Dimension::LENGTH);

        assert_eq!(parse_unit("meter").unwrap().symbol, "m");
        assert_eq!(parse_unit("kilograms").unwrap().symbol, "kg");
    }

    #[test]
    fn test_parse_unit_with_power() {
        assert_eq!(parse_unit("m^2").unwrap().dimension, Dimension::AREA);
        assert_eq!(parse_unit("m**3").unwrap().dimension, Dimension::VOLUME);
        assert_eq!(parse_unit("s^-1").unwrap().dimension, Dimension::FREQUENCY);
        assert!(matches!(parse_unit("m^x"), Err(ConversionError::Parse(_))));
    }

    #[test]
    fn test_parse_quotient_and_product() {
        assert_eq!(parse_unit("m/s").unwrap().dimension, Dimension::VELOCITY);
        assert_eq!(parse_unit("kg*m/s^2").unwrap().dimension, Dimension::FORCE);
        assert_eq!(parse_unit("kg·m^2/s^2").unwrap().dimension, Dimension::ENERGY);
        assert_eq!(parse_unit("mg/L").unwrap().dimension, Dimension::CONCENTRATION);

        let rate = parse_unit("mg/L/h").unwrap();
        assert_eq!(
            rate.dimension,
            Dimension::CONCENTRATION.divide(&Dimension::TIME).unwrap()
        );
    }

    #[test]
    fn test_parse_exponent_overflow() {
        assert!(matches!(parse_unit("m^2147483647 m"), Err(ConversionError::Parse(_))));
        assert!(matches!(parse_unit("1/s^-2147483648"), Err(ConversionError::Parse(_))));
        assert!(parse_unit("m^2147483647").is_ok());
        assert!(matches!(parse_unit("m^2147483648"), Err(ConversionError::Parse(_))));
    }

    #[test]
    fn test_parse_space_product() {
        let unit = parse_unit("microliter milligram/liter").unwrap();
        assert_eq!(unit.dimension, Dimension::MASS);
        assert_eq!(unit.symbol, "µL·mg/L");
        assert_eq!(unit.converter.scale().to_string(), "0.000000000001");
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse_unit("unknown_xyz"), Err(ConversionError::UnknownUnit(_))));
        assert!(matches!(parse_unit("m/"), Err(ConversionError::Parse(_))));
        assert!(parse_unit("degC*m").is_err());
        assert!(parse_unit("1/s").is_ok());
    }

    #[test]
    fn test_parse_expression() {
        let q = parse_expression("5 m").unwrap();
        assert_eq!(q.magnitude, Number::from_i64(5));
        assert_eq!(q.unit.symbol, "m");

        let q = parse_expression("100kg").unwrap();
        assert_eq!(q.magnitude, Number::from_i64(100));
        assert_eq!(q.unit.symbol, "kg");

        let q = parse_expression("-2.50 s").unwrap();
        assert_eq!(q.magnitude.to_string(), "-2.50");

        let q = parse_expression("15e2 Pa").unwrap();
        assert_eq!(q.magnitude, Number::from_i64(1500));

        let q = parse_expression("liter").unwrap();
        assert_eq!(q.magnitude, Number::from_i64(1));

        assert!(parse_expression("  ").is_err());
    }

    #[test]
    fn test_parse_expression_magnitude_bound() {
        assert!(matches!(
            parse_expression("1e50000000 m"),
            Err(ConversionError::Number(NumberError::Overflow))
        ));
        let q = parse_expression("1e300 m").unwrap();
        assert_eq!(q.magnitude.adjusted_exponent(), Some(300));
    }

    #[test]
    fn test_parse_dimensionless() {
        let q = parse_expression("42").unwrap();
        assert!(q.unit.dimension.is_dimensionless());
        assert_eq!(q.to_string(), "42");
    }
}
