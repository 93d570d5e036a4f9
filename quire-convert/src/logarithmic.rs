//! Logarithmic converter
//!
//! `reference = scale * logbase^(value / logfactor)` and
//! `value = logfactor * log_logbase(reference / scale)`.
//!
//! Decibels are `logbase = 10, logfactor = 10`, bels `logfactor = 1`,
//! nepers `logbase = e, logfactor = 0.5`.

use quire_core::{Number, WORK_PRECISION};
use crate::param::Param;
use crate::{ConvertError, ConvertResult};

#[derive(Debug, Clone, PartialEq)]
pub struct LogarithmicConverter {
    scale: Param,
    logbase: Param,
    logfactor: Param,
}

impl LogarithmicConverter {
    /// Fails when `scale` or `logfactor` is zero, or `logbase` is not a
    /// positive number other than one.
    pub fn new(
        scale: impl Into<Number>,
        logbase: impl Into<Number>,
        logfactor: impl Into<Number>,
    ) -> ConvertResult<Self> {
        let logbase = logbase.into();
        if !logbase.is_positive() {
            return Err(ConvertError::Construction { param: "logbase", reason: "must be positive" });
        }
        if logbase == Number::from_i64(1) {
            return Err(ConvertError::Construction { param: "logbase", reason: "must not be one" });
        }

        Ok(LogarithmicConverter {
            scale: Param::nonzero("scale", scale.into())?,
            logbase: Param::new("logbase", logbase)?,
            logfactor: Param::nonzero("logfactor", logfactor.into())?,
        })
    }

    pub fn scale(&self) -> &Number {
        &self.scale.exact
    }

    pub fn logbase(&self) -> &Number {
        &self.logbase.exact
    }

    pub fn logfactor(&self) -> &Number {
        &self.logfactor.exact
    }

    pub(crate) fn to_reference_f64(&self, value: f64) -> f64 {
        self.scale.float * self.logbase.float.powf(value / self.logfactor.float)
    }

    /// NaN below zero, -inf at zero
    pub(crate) fn from_reference_f64(&self, value: f64) -> f64 {
        self.logfactor.float * (value / self.scale.float).log(self.logbase.float)
    }

    pub(crate) fn check_reference_f64(&self, value: f64) -> ConvertResult<()> {
        let ratio = value / self.scale.float;
        if ratio > 0.0 {
            Ok(())
        } else {
            Err(ConvertError::Domain(format!(
                "logarithm undefined for {} / {}", value, self.scale.float
            )))
        }
    }

    pub(crate) fn to_reference_number(&self, value: &Number) -> ConvertResult<Number> {
        let exponent = value.checked_div(&self.logfactor.exact)?;
        let power = self.logbase.exact.pow_real(&exponent, WORK_PRECISION)?;
        Ok(self.scale.exact.mul(&power))
    }

    pub(crate) fn from_reference_number(&self, value: &Number) -> ConvertResult<Number> {
        let ratio = value.checked_div(&self.scale.exact)?;
        if !ratio.is_positive() {
            return Err(ConvertError::Domain(format!(
                "logarithm undefined for {} / {}", value, self.scale.exact
            )));
        }
        let log = ratio.log(&self.logbase.exact, WORK_PRECISION)?;
        Ok(self.logfactor.exact.mul(&log))
    }
}
