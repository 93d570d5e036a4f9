//! Unit registry
//!
//! Built-in units are declared as named converter parameters (`scale`,
//! `offset`, `logbase`, `logfactor`) and turned into converters by the
//! same factory that serves user definitions. Scales are decimal strings
//! so that `0.001` is exactly one thousandth.
//!
//! Lookup order: symbol, alias or name, plural name, then SI prefix in
//! front of a prefixable unit (`microliter`, `ng`, `kPa`).

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;
use tracing::{debug, trace, warn};
use quire_convert::Converter;
use quire_core::{Number, WORK_PRECISION};
use crate::{ConversionError, Dimension, Prefix, Unit};

/// Global unit registry
pub static UNITS: LazyLock<UnitRegistry> = LazyLock::new(UnitRegistry::new);

/// A unit declaration: converter parameters are kept as text
struct Definition {
    symbol: &'static str,
    name: &'static str,
    dimension: Dimension,
    args: &'static [(&'static str, &'static str)],
    prefixable: bool,
    aliases: &'static [&'static str],
}

impl Definition {
    fn new(
        symbol: &'static str,
        name: &'static str,
        dimension: Dimension,
        args: &'static [(&'static str, &'static str)],
    ) -> Self {
        Definition { symbol, name, dimension, args, prefixable: false, aliases: &[] }
    }

    fn prefixed(mut self) -> Self {
        self.prefixable = true;
        self
    }

    fn aka(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    fn converter(&self) -> Result<Converter, ConversionError> {
        let args = self
            .args
            .iter()
            .map(|(param, text)| Ok((*param, constant(text)?)))
            .collect::<Result<Vec<_>, ConversionError>>()?;
        Ok(Converter::from_arguments(args)?)
    }
}

/// Decimal literal or fraction; `e` is Euler's number
fn constant(text: &str) -> Result<Number, ConversionError> {
    match text {
        "e" => Ok(Number::e(WORK_PRECISION)),
        _ => Ok(Number::from_str(text)?),
    }
}

fn builtin() -> Vec<Definition> {
    use Dimension as D;
    vec![
        // length
        Definition::new("m", "meter", D::LENGTH, &[]).prefixed().aka(&["metre"]),
        Definition::new("in", "inch", D::LENGTH, &[("scale", "0.0254")]).aka(&["inches"]),
        Definition::new("ft", "foot", D::LENGTH, &[("scale", "0.3048")]).aka(&["feet"]),
        Definition::new("mi", "mile", D::LENGTH, &[("scale", "1609.344")]),
        // mass
        Definition::new("g", "gram", D::MASS, &[("scale", "0.001")]).prefixed().aka(&["gramme"]),
        Definition::new("t", "tonne", D::MASS, &[("scale", "1000")]).aka(&["metric_ton"]),
        Definition::new("lb", "pound", D::MASS, &[("scale", "0.45359237")]).aka(&["lbs"]),
        // time
        Definition::new("s", "second", D::TIME, &[]).prefixed().aka(&["sec"]),
        Definition::new("min", "minute", D::TIME, &[("scale", "60")]),
        Definition::new("h", "hour", D::TIME, &[("scale", "3600")]).aka(&["hr"]),
        Definition::new("d", "day", D::TIME, &[("scale", "86400")]),
        // remaining base quantities
        Definition::new("A", "ampere", D::CURRENT, &[]).prefixed().aka(&["amp"]),
        Definition::new("K", "kelvin", D::TEMPERATURE, &[]).prefixed(),
        Definition::new("mol", "mole", D::AMOUNT, &[]).prefixed(),
        Definition::new("cd", "candela", D::LUMINOSITY, &[]).prefixed(),
        // temperature scales with an offset
        Definition::new("degC", "degree_Celsius", D::TEMPERATURE, &[("offset", "273.15")])
            .aka(&["celsius", "°C"]),
        Definition::new("degF", "degree_Fahrenheit", D::TEMPERATURE, &[("scale", "5/9"), ("offset", "45967/180")])
            .aka(&["fahrenheit", "°F"]),
        // volume
        Definition::new("L", "liter", D::VOLUME, &[("scale", "0.001")]).prefixed().aka(&["l", "litre"]),
        // derived
        Definition::new("Hz", "hertz", D::FREQUENCY, &[]).prefixed(),
        Definition::new("N", "newton", D::FORCE, &[]).prefixed(),
        Definition::new("J", "joule", D::ENERGY, &[]).prefixed(),
        Definition::new("cal", "calorie", D::ENERGY, &[("scale", "4.184")]).prefixed(),
        Definition::new("W", "watt", D::POWER, &[]).prefixed(),
        Definition::new("Pa", "pascal", D::PRESSURE, &[]).prefixed(),
        Definition::new("bar", "bar", D::PRESSURE, &[("scale", "100000")]).prefixed(),
        Definition::new("atm", "atmosphere", D::PRESSURE, &[("scale", "101325")]),
        // logarithmic ratios
        Definition::new("B", "bel", D::DIMENSIONLESS, &[("logbase", "10"), ("logfactor", "1")]),
        Definition::new("dB", "decibel", D::DIMENSIONLESS, &[("logbase", "10"), ("logfactor", "10")]),
        Definition::new("Np", "neper", D::DIMENSIONLESS, &[("logbase", "e"), ("logfactor", "0.5")]),
        Definition::new("oct", "octave", D::DIMENSIONLESS, &[("logbase", "2"), ("logfactor", "1")]),
    ]
}

/// Units used by `Quantity::to_compact`, one per dimension
const COMPACT: [(Dimension, &str); 13] = [
    (Dimension::LENGTH, "m"),
    (Dimension::MASS, "g"),
    (Dimension::TIME, "s"),
    (Dimension::CURRENT, "A"),
    (Dimension::TEMPERATURE, "K"),
    (Dimension::AMOUNT, "mol"),
    (Dimension::LUMINOSITY, "cd"),
    (Dimension::VOLUME, "L"),
    (Dimension::FREQUENCY, "Hz"),
    (Dimension::FORCE, "N"),
    (Dimension::ENERGY, "J"),
    (Dimension::POWER, "W"),
    (Dimension::PRESSURE, "Pa"),
];

/// Registry of all known units
pub struct UnitRegistry {
    units: HashMap<String, Unit>,
    /// Alternative spellings, long names included
    aliases: HashMap<String, String>,
    /// Long names only; these are the spellings that take a plural
    names: HashMap<String, String>,
    prefixable: HashSet<String>,
}

impl UnitRegistry {
    /// Registry with every built-in unit. A definition that fails to build
    /// is logged and left out.
    pub fn new() -> Self {
        let mut registry = UnitRegistry::empty();
        for def in builtin() {
            if let Err(e) = registry.define(&def) {
                warn!(symbol = def.symbol, error = %e, "skipping unit definition");
            }
        }
        debug!(units = registry.units.len(), aliases = registry.aliases.len(), "unit registry built");
        registry
    }

    pub fn empty() -> Self {
        UnitRegistry {
            units: HashMap::new(),
            aliases: HashMap::new(),
            names: HashMap::new(),
            prefixable: HashSet::new(),
        }
    }

    fn define(&mut self, def: &Definition) -> Result<(), ConversionError> {
        let category = match def.dimension.name() {
            _ if def.args.iter().any(|(param, _)| *param == "logbase") => "logarithmic",
            Some(name) => name,
            None => "derived",
        };
        let unit = Unit::new(def.symbol, def.name, def.dimension, def.converter()?, category);
        self.register(unit, def.prefixable);
        for alias in def.aliases {
            self.alias(alias, def.symbol);
        }
        Ok(())
    }

    /// Add a unit; its long name becomes an alias
    pub fn register(&mut self, unit: Unit, prefixable: bool) {
        if prefixable {
            self.prefixable.insert(unit.symbol.clone());
        }
        self.names.insert(unit.name.clone(), unit.symbol.clone());
        self.aliases.insert(unit.name.clone(), unit.symbol.clone());
        self.units.insert(unit.symbol.clone(), unit);
    }

    pub fn alias(&mut self, alias: &str, symbol: &str) {
        self.aliases.insert(alias.to_string(), symbol.to_string());
    }

    /// Get a registered unit by symbol or alias
    pub fn get(&self, symbol: &str) -> Option<&Unit> {
        if let Some(unit) = self.units.get(symbol) {
            return Some(unit);
        }
        self.aliases.get(symbol).and_then(|canonical| self.units.get(canonical))
    }

    /// Registered unit by symbol, alias, or plural long name
    fn get_unprefixed(&self, text: &str) -> Option<&Unit> {
        if let Some(unit) = self.get(text) {
            return Some(unit);
        }
        let singular = text.strip_suffix('s')?;
        let unit = self.names.get(singular).and_then(|symbol| self.units.get(symbol))?;
        trace!(text, unit = %unit, "resolved plural");
        Some(unit)
    }

    /// Resolve any spelling, building prefixed units on demand
    pub fn resolve(&self, text: &str) -> Result<Unit, ConversionError> {
        if let Some(unit) = self.get_unprefixed(text) {
            return Ok(unit.clone());
        }

        for (prefix, rest) in Prefix::split(text) {
            let Some(base) = self.get_unprefixed(rest) else {
                continue;
            };
            if !self.prefixable.contains(&base.symbol) {
                continue;
            }
            let unit = base.with_prefix(prefix)?;
            trace!(text, prefix = prefix.name, base = %base, "resolved prefixed unit");
            return Ok(unit);
        }

        Err(ConversionError::UnknownUnit(text.to_string()))
    }

    /// Unit that `to_compact` prefixes for a dimension
    pub fn compact_unit(&self, dimension: &Dimension) -> Option<&Unit> {
        COMPACT
            .iter()
            .find(|(d, _)| d == dimension)
            .and_then(|(_, symbol)| self.units.get(*symbol))
    }

    /// Get all units in a category
    pub fn by_category(&self, category: &str) -> Vec<&Unit> {
        self.units.values().filter(|u| u.category == category).collect()
    }

    /// Get all unit symbols
    pub fn symbols(&self) -> Vec<&str> {
        self.units.keys().map(|s| s.as_str()).collect()
    }
}

impl Default for UnitRegistry {
    fn default() -> Self {
        Self::new()
    }
}
