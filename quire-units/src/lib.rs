//! Quire Units - Quantities and units on top of Quire converters
//!
//! Every unit owns a converter to the coherent SI unit of its dimension,
//! so conversion between two units is `to_reference` on one followed by
//! `from_reference` on the other. Magnitudes are exact decimals and keep
//! their significance through conversion:
//!
//! ```
//! use quire_units::Quantity;
//!
//! let q = Quantity::parse("2 microliter milligram/liter").unwrap();
//! assert_eq!(q.to_compact().unwrap().to_string(), "2 ng");
//! assert_eq!(q.to_units("ng").unwrap().magnitude.to_string(), "2");
//! ```
//!
//! Units:
//! - SI base units and common derived units, all SI-prefixable
//! - Temperature scales with an offset (degC, degF)
//! - Logarithmic ratios (B, dB, Np, oct)
//! - Composites from expressions like `kg*m/s^2`

mod dimension;
mod prefix;
mod unit;
mod registry;
mod parse;
mod quantity;

pub use dimension::Dimension;
pub use prefix::{Prefix, PREFIXES};
pub use unit::{ConversionError, Unit};
pub use registry::{UnitRegistry, UNITS};
pub use parse::{parse_expression, parse_unit};
pub use quantity::Quantity;
