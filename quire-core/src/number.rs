//! Arbitrary precision numbers using dashu
//!
//! Uses dashu-float (DBig) for arbitrary precision decimal arithmetic.
//! Native support for transcendentals (ln, exp) without the denominator
//! explosion issues of rational arithmetic.
//!
//! On top of the value, every `Number` carries a decimal *quantum*: the
//! exponent of the last digit it actually knows. `10.00` has quantum -2,
//! `2e3` has quantum 3. Arithmetic combines quanta the way decimal
//! arithmetic does, so rendering never invents or drops significance:
//!
//! - add/sub: the finer of the two quanta
//! - mul: the sum of both quanta
//! - div: the ideal quantum (dividend minus divisor), unless the exact
//!   quotient needs more digits
//! - transcendentals: every working digit of the result

use dashu_float::DBig;
use dashu_int::IBig;
use serde::{Deserialize, Serialize, Serializer, Deserializer};
use thiserror::Error;

/// Error type for number operations
#[derive(Debug, Clone, Error)]
pub enum NumberError {
    #[error("Invalid number format: {0}")]
    ParseError(String),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Domain error: {0}")]
    DomainError(String),

    #[error("Overflow: result too large")]
    Overflow,
}

/// Working precision for calculations (decimal digits)
pub const WORK_PRECISION: u32 = 50;

/// Largest decimal exponent a parsed or computed value may reach, in
/// either direction. Plain rendering stays within this many digits.
pub const MAX_EXPONENT: isize = 100_000;

/// Arbitrary precision decimal number
///
/// Built on dashu-float's DBig for efficient transcendental operations.
/// All operations return Results or new Numbers - never panic.
#[derive(Debug, Clone)]
pub struct Number {
    inner: DBig,
    /// Exponent of the least significant digit this value carries.
    /// Never greater than the exponent of its last nonzero digit.
    quantum: isize,
}

impl Number {
    // ========== Construction ==========

    /// Ensure a DBig has adequate precision for calculations
    fn with_work_precision(val: DBig) -> DBig {
        val.with_precision(WORK_PRECISION as usize).value()
    }

    /// Attach a quantum, clamped so no known digit is hidden
    fn settle(inner: DBig, ideal: isize) -> Self {
        let quantum = if inner == DBig::ZERO {
            ideal.min(0)
        } else {
            let (_, exponent) = normalize(&inner);
            ideal.min(exponent)
        };
        Self { inner, quantum }
    }

    /// A result that keeps every digit it has (transcendentals, rounding)
    fn full(inner: DBig) -> Self {
        Self::settle(inner, isize::MAX)
    }

    /// Create from string representation
    /// Supports: "123", "3.14", "1/3", "1.5e10", "-42", "10.00"
    pub fn from_str(s: &str) -> Result<Self, NumberError> {
        let s = s.trim();

        // Handle rational format "a/b"
        if s.contains('/') && !s.contains('.') && !s.contains('e') && !s.contains('E') {
            let parts: Vec<&str> = s.split('/').collect();
            if parts.len() == 2 {
                let num = Self::from_str(parts[0])?;
                let den = Self::from_str(parts[1])?;
                return num.checked_div(&den);
            }
        }

        // Handle scientific notation with integer mantissa: "602214076e15"
        if (s.contains('e') || s.contains('E')) && !s.contains('.') {
            let s_lower = s.to_lowercase();
            let parts: Vec<&str> = s_lower.split('e').collect();
            if parts.len() == 2 {
                let mantissa: IBig = parts[0].parse()
                    .map_err(|_| NumberError::ParseError(s.to_string()))?;
                let exp: isize = parts[1].parse()
                    .map_err(|_| NumberError::ParseError(s.to_string()))?;

                // significand * 10^exponent, exact
                let result = DBig::from_parts(mantissa, exp);
                return Self::settle(Self::with_work_precision(result), exp).bounded();
            }
        }

        // Standard decimal parsing
        let inner: DBig = s.parse()
            .map_err(|_| NumberError::ParseError(s.to_string()))?;

        Self::settle(Self::with_work_precision(inner), literal_quantum(s)).bounded()
    }

    /// Reject values whose magnitude or last digit lies beyond `MAX_EXPONENT`
    fn bounded(self) -> Result<Self, NumberError> {
        let magnitude = self.adjusted_exponent().unwrap_or(0);
        if magnitude.abs() > MAX_EXPONENT || self.quantum.abs() > MAX_EXPONENT {
            return Err(NumberError::Overflow);
        }
        Ok(self)
    }

    /// Create from i64 with working precision
    pub fn from_i64(n: i64) -> Self {
        Self { inner: Self::with_work_precision(DBig::from(n)), quantum: 0 }
    }

    /// Create from f64 through its shortest round-trip decimal form, so
    /// `0.001` becomes exactly `0.001` rather than its binary expansion.
    /// NaN and infinities become zero.
    pub fn from_f64(f: f64) -> Self {
        if !f.is_finite() {
            return Self::from_i64(0);
        }
        Self::from_str(&format!("{}", f)).unwrap_or_else(|_| Self::from_i64(0))
    }

    /// Exact power of ten, `10^exponent`, with matching quantum
    pub fn pow10(exponent: isize) -> Self {
        let inner = DBig::from_parts(IBig::from(1u8), exponent);
        Self { inner: Self::with_work_precision(inner), quantum: exponent }
    }

    // ========== Predicates ==========

    /// Check if zero
    pub fn is_zero(&self) -> bool {
        self.inner == DBig::ZERO
    }

    /// Check if negative
    pub fn is_negative(&self) -> bool {
        self.inner < DBig::ZERO
    }

    /// Check if strictly positive
    pub fn is_positive(&self) -> bool {
        self.inner > DBig::ZERO
    }

    /// Check if value is an integer
    pub fn is_integer(&self) -> bool {
        let floor_val = self.inner.clone().floor();
        self.inner == floor_val
    }

    // ========== Significance ==========

    /// Exponent of the last digit carried by this number
    pub fn quantum(&self) -> isize {
        self.quantum
    }

    /// Exponent of the most significant digit (`floor(log10(|x|))`),
    /// computed exactly. `None` for zero.
    pub fn adjusted_exponent(&self) -> Option<isize> {
        if self.is_zero() {
            return None;
        }
        let (significand, exponent) = normalize(&self.inner);
        let digits = significand.to_string().trim_start_matches('-').len() as isize;
        Some(exponent + digits - 1)
    }

    /// Number of trailing zeros after the decimal point in the rendering
    pub fn trailing_zeros(&self) -> usize {
        count_trailing_zeros(&self.to_string())
    }

    // ========== Basic Arithmetic ==========

    /// Addition
    pub fn add(&self, other: &Self) -> Self {
        Self::settle(&self.inner + &other.inner, self.quantum.min(other.quantum))
    }

    /// Subtraction
    pub fn sub(&self, other: &Self) -> Self {
        Self::settle(&self.inner - &other.inner, self.quantum.min(other.quantum))
    }

    /// Multiplication
    pub fn mul(&self, other: &Self) -> Self {
        Self::settle(&self.inner * &other.inner, self.quantum.saturating_add(other.quantum))
    }

    /// Safe division (returns Result, never panics)
    pub fn checked_div(&self, other: &Self) -> Result<Self, NumberError> {
        if other.is_zero() {
            Err(NumberError::DivisionByZero)
        } else {
            let ideal = self.quantum.saturating_sub(other.quantum);
            Ok(Self::settle(&self.inner / &other.inner, ideal))
        }
    }

    /// Integer power (exact), by repeated squaring
    pub fn pow(&self, exp: i32) -> Result<Self, NumberError> {
        if exp == 0 {
            return Ok(Self::from_i64(1));
        }

        let mut remaining = exp.unsigned_abs();
        let mut base = self.clone();
        let mut result = Self::from_i64(1);
        while remaining > 0 {
            if remaining & 1 == 1 {
                result = result.mul(&base);
            }
            remaining >>= 1;
            if remaining > 0 {
                base = base.mul(&base);
            }
        }

        let result = if exp < 0 {
            Self::from_i64(1).checked_div(&result)?
        } else {
            result
        };
        match result.adjusted_exponent() {
            Some(e) if e.abs() > MAX_EXPONENT => Err(NumberError::Overflow),
            _ => Ok(result),
        }
    }

    /// Real-valued power: x^y = exp(y * ln(x))
    pub fn pow_real(&self, exp: &Self, precision: u32) -> Result<Self, NumberError> {
        if exp.is_zero() {
            return Ok(Self::from_i64(1));
        }
        if self.is_zero() {
            if exp.is_negative() {
                return Err(NumberError::DivisionByZero);
            }
            return Ok(Self::from_i64(0));
        }

        // If exponent is a small integer, use exact power
        if exp.is_integer() {
            if let Some(e) = exp.to_i64() {
                if let Ok(e) = i32::try_from(e) {
                    return self.pow(e);
                }
            }
        }

        if self.is_negative() {
            return Err(NumberError::DomainError(
                "non-integer power of negative number".to_string()
            ));
        }

        let ln_x = self.inner.clone().with_precision(precision as usize).value().ln();
        let product = &ln_x * &exp.inner;
        Ok(Self::full(checked_exp(product)?))
    }

    // ========== Transcendental Functions ==========

    /// Natural logarithm
    pub fn ln(&self, precision: u32) -> Result<Self, NumberError> {
        if self.inner <= DBig::ZERO {
            return Err(NumberError::DomainError(
                "logarithm of non-positive number".to_string()
            ));
        }

        let val = self.inner.clone().with_precision(precision as usize).value();
        Ok(Self::full(val.ln()))
    }

    /// Logarithm in an arbitrary base: ln(x) / ln(base)
    pub fn log(&self, base: &Self, precision: u32) -> Result<Self, NumberError> {
        if *base == Self::from_i64(1) {
            return Err(NumberError::DomainError("logarithm base of one".to_string()));
        }
        let ln_x = self.ln(precision)?;
        let ln_base = base.ln(precision)?;
        if ln_base.is_zero() {
            return Err(NumberError::DomainError("logarithm base of one".to_string()));
        }
        Ok(Self::full(&ln_x.inner / &ln_base.inner))
    }

    /// Exponential function (e^x). Fails with `Overflow` once the result
    /// would leave the `MAX_EXPONENT` range.
    pub fn exp(&self, precision: u32) -> Result<Self, NumberError> {
        let val = self.inner.clone().with_precision(precision as usize).value();
        Ok(Self::full(checked_exp(val)?))
    }

    /// Euler's number e
    pub fn e(precision: u32) -> Self {
        let one = DBig::from(1u8).with_precision(precision as usize).value();
        Self::full(one.exp())
    }

    // ========== Other Operations ==========

    /// Try to convert to i64
    pub fn to_i64(&self) -> Option<i64> {
        if !self.is_integer() {
            return None;
        }

        // DBig stores as significand * 10^exponent
        let (significand, exponent) = self.inner.clone().into_repr().into_parts();

        let sig_i64: i64 = significand.try_into().ok()?;

        if exponent == 0 {
            Some(sig_i64)
        } else if exponent > 0 && exponent <= 18 {
            sig_i64.checked_mul(10_i64.checked_pow(exponent as u32)?)
        } else if exponent < 0 && exponent >= -18 {
            let divisor = 10_i64.checked_pow((-exponent) as u32)?;
            if sig_i64 % divisor == 0 {
                Some(sig_i64 / divisor)
            } else {
                None
            }
        } else {
            self.to_f64().and_then(|f| {
                if f >= i64::MIN as f64 && f <= i64::MAX as f64 {
                    Some(f as i64)
                } else {
                    None
                }
            })
        }
    }

    // ========== Display ==========

    /// Plain decimal rendering at the number's quantum. Values too wide to
    /// write out within `MAX_EXPONENT` digits fall back to scientific form.
    fn render(&self) -> String {
        let (significand, exponent) = normalize(&self.inner);
        let negative = significand < IBig::ZERO;
        let magnitude = if negative { -significand } else { significand };

        let (exponent, quantum) = if magnitude == IBig::ZERO {
            let q = self.quantum.min(0);
            (q, q)
        } else {
            (exponent, self.quantum.min(exponent))
        };

        if exponent.abs() > MAX_EXPONENT
            || quantum.abs() > MAX_EXPONENT
            || exponent.saturating_sub(quantum) > MAX_EXPONENT
        {
            return scientific(negative, &magnitude.to_string(), exponent);
        }

        let mut digits = magnitude.to_string();
        digits.push_str(&"0".repeat((exponent - quantum) as usize));

        let body = if quantum >= 0 {
            digits.push_str(&"0".repeat(quantum as usize));
            digits
        } else {
            let frac = quantum.unsigned_abs();
            if digits.len() > frac {
                let (int_part, frac_part) = digits.split_at(digits.len() - frac);
                format!("{}.{}", int_part, frac_part)
            } else {
                format!("0.{}{}", "0".repeat(frac - digits.len()), digits)
            }
        };

        if negative {
            format!("-{}", body)
        } else {
            body
        }
    }

    /// Convert to f64 (may lose precision)
    pub fn to_f64(&self) -> Option<f64> {
        dbig_to_f64(&self.inner)
    }
}

/// Count trailing zeros after the decimal point of a rendered number.
/// Text without a decimal point has none.
pub fn count_trailing_zeros(text: &str) -> usize {
    match text.split_once('.') {
        None => 0,
        Some((_, frac)) => frac.len() - frac.trim_end_matches('0').len(),
    }
}

/// Nearest f64, through the decimal text so tiny and huge exponents
/// round like any literal would. `None` when it overflows f64.
fn dbig_to_f64(value: &DBig) -> Option<f64> {
    let (significand, exponent) = value.clone().into_repr().into_parts();
    format!("{}e{}", significand, exponent)
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// e^x, refusing arguments whose result lies outside `MAX_EXPONENT`
fn checked_exp(x: DBig) -> Result<DBig, NumberError> {
    let limit = MAX_EXPONENT as f64 * std::f64::consts::LN_10;
    match dbig_to_f64(&x) {
        Some(v) if v.abs() <= limit => Ok(x.exp()),
        _ => Err(NumberError::Overflow),
    }
}

/// `d.ddd...e<exp>` for a significand whose last digit sits at `exponent`
fn scientific(negative: bool, digits: &str, exponent: isize) -> String {
    let adjusted = exponent + digits.len() as isize - 1;
    let (lead, rest) = digits.split_at(1);
    let sign = if negative { "-" } else { "" };
    if rest.is_empty() {
        format!("{}{}e{}", sign, lead, adjusted)
    } else {
        format!("{}{}.{}e{}", sign, lead, rest, adjusted)
    }
}

/// Significand stripped of trailing zeros, with its exponent
fn normalize(value: &DBig) -> (IBig, isize) {
    let (mut significand, mut exponent) = value.clone().into_repr().into_parts();
    if significand == IBig::ZERO {
        return (significand, 0);
    }
    let ten = IBig::from(10u8);
    while &significand % &ten == IBig::ZERO {
        significand = &significand / &ten;
        exponent += 1;
    }
    (significand, exponent)
}

/// Exponent of the last written digit of a decimal literal ("10.00" -> -2)
fn literal_quantum(s: &str) -> isize {
    let lower = s.to_ascii_lowercase();
    let (mantissa, exp) = match lower.split_once('e') {
        Some((m, e)) => (m, e.trim_start_matches('+').parse::<isize>().unwrap_or(0)),
        None => (lower.as_str(), 0),
    };
    let frac = mantissa.split_once('.').map(|(_, f)| f.len()).unwrap_or(0);
    exp - frac as isize
}

// ========== Trait Implementations ==========

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render())
    }
}

impl std::str::FromStr for Number {
    type Err = NumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Number::from_str(s)
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Number::from_i64(n)
    }
}

impl From<i32> for Number {
    fn from(n: i32) -> Self {
        Number::from_i64(i64::from(n))
    }
}

impl From<f64> for Number {
    fn from(f: f64) -> Self {
        Number::from_f64(f)
    }
}

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Number {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

// Equality and ordering look at the value only, never the quantum.
impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl Eq for Number {}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Number {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.inner.partial_cmp(&other.inner).unwrap_or(std::cmp::Ordering::Equal)
    }
}
