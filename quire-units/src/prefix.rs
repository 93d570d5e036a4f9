//! SI prefixes

use quire_core::Number;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prefix {
    pub symbol: &'static str,
    pub name: &'static str,
    /// Power of ten the prefix stands for
    pub exponent: i32,
}

const fn prefix(symbol: &'static str, name: &'static str, exponent: i32) -> Prefix {
    Prefix { symbol, name, exponent }
}

pub const PREFIXES: [Prefix; 20] = [
    prefix("y", "yocto", -24),
    prefix("z", "zepto", -21),
    prefix("a", "atto", -18),
    prefix("f", "femto", -15),
    prefix("p", "pico", -12),
    prefix("n", "nano", -9),
    prefix("µ", "micro", -6),
    prefix("m", "milli", -3),
    prefix("c", "centi", -2),
    prefix("d", "deci", -1),
    prefix("da", "deca", 1),
    prefix("h", "hecto", 2),
    prefix("k", "kilo", 3),
    prefix("M", "mega", 6),
    prefix("G", "giga", 9),
    prefix("T", "tera", 12),
    prefix("P", "peta", 15),
    prefix("E", "exa", 18),
    prefix("Z", "zetta", 21),
    prefix("Y", "yotta", 24),
];

/// Other spellings of micro: ASCII `u` and the Greek letter mu
const MICRO_SPELLINGS: [&str; 2] = ["u", "μ"];

impl Prefix {
    /// Exact `10^exponent`
    pub fn factor(&self) -> Number {
        Number::pow10(self.exponent as isize)
    }

    pub fn by_symbol(symbol: &str) -> Option<Prefix> {
        if MICRO_SPELLINGS.contains(&symbol) {
            return Self::by_exponent(-6);
        }
        PREFIXES.iter().copied().find(|p| p.symbol == symbol)
    }

    pub fn by_name(name: &str) -> Option<Prefix> {
        PREFIXES.iter().copied().find(|p| p.name == name)
    }

    pub fn by_exponent(exponent: i32) -> Option<Prefix> {
        PREFIXES.iter().copied().find(|p| p.exponent == exponent)
    }

    /// Engineering prefix (a multiple of three) for a decimal exponent,
    /// clamped to the yocto..yotta range. `None` means no prefix.
    pub fn engineering(exponent: isize) -> Option<Prefix> {
        let step = exponent.div_euclid(3).clamp(-8, 8) as i32 * 3;
        match step {
            0 => None,
            _ => Self::by_exponent(step),
        }
    }

    /// Every way of reading `text` as a prefix followed by a non-empty rest.
    /// Long names come first, then symbols, longest first.
    pub fn split(text: &str) -> Vec<(Prefix, &str)> {
        let mut found = Vec::new();
        for p in PREFIXES {
            if let Some(rest) = text.strip_prefix(p.name).filter(|r| !r.is_empty()) {
                found.push((p, rest));
            }
        }

        let mut symbols: Vec<(&str, Prefix)> = PREFIXES.iter().map(|p| (p.symbol, *p)).collect();
        symbols.extend(MICRO_SPELLINGS.iter().filter_map(|s| Some((*s, Self::by_exponent(-6)?))));
        symbols.sort_by_key(|(s, _)| std::cmp::Reverse(s.len()));

        for (symbol, p) in symbols {
            if let Some(rest) = text.strip_prefix(symbol).filter(|r| !r.is_empty()) {
                found.push((p, rest));
            }
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert_eq!(Prefix::by_name("micro").unwrap().exponent, -6);
        assert_eq!(Prefix::by_symbol("u").unwrap().name, "micro");
        assert_eq!(Prefix::by_symbol("μ").unwrap().name, "micro");
        assert_eq!(Prefix::by_symbol("da").unwrap().exponent, 1);
        assert!(Prefix::by_symbol("q").is_none());
    }

    #[test]
    fn test_factor_is_exact() {
        let nano = Prefix::by_name("nano").unwrap().factor();
        assert_eq!(nano.to_string(), "0.000000001");
        assert_eq!(Prefix::by_name("kilo").unwrap().factor(), Number::from_i64(1000));
    }

    #[test]
    fn test_engineering() {
        assert_eq!(Prefix::engineering(-9).unwrap().name, "nano");
        assert_eq!(Prefix::engineering(-7).unwrap().name, "nano");
        assert_eq!(Prefix::engineering(4).unwrap().name, "kilo");
        assert!(Prefix::engineering(2).is_none());
        assert_eq!(Prefix::engineering(-40).unwrap().name, "yocto");
        assert_eq!(Prefix::engineering(99).unwrap().name, "yotta");
    }

    #[test]
    fn test_split() {
        let splits = Prefix::split("microliter");
        assert_eq!(splits[0].0.name, "micro");
        assert_eq!(splits[0].1, "liter");

        let splits = Prefix::split("dam");
        assert_eq!(splits[0].0.name, "deca");
        assert_eq!(splits[0].1, "m");
        assert!(splits.iter().any(|(p, rest)| p.name == "deci" && *rest == "am"));

        assert!(Prefix::split("m").is_empty());
    }
}
