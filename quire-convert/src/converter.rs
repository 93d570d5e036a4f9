//! The converter family as one tagged enum
//!
//! A converter moves a magnitude between a unit's own representation and
//! the reference representation shared by every unit of its dimension.
//! Copying entry points (`to_reference`, `from_reference`) work on any
//! [`Magnitude`]; the `*_into` entry points rewrite a caller-owned array in
//! place and hand the same buffer back.

use std::fmt;
use ndarray::{ArrayBase, DataMut, Dimension};
use serde::{Deserialize, Serialize};
use quire_core::Number;
use crate::{
    ConvertResult, ConverterArgs, LogarithmicConverter, Magnitude, OffsetConverter,
    ScaleConverter,
};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "ConverterArgs", into = "ConverterArgs")]
pub enum Converter {
    /// Reference and native representations coincide
    #[default]
    Identity,
    Scale(ScaleConverter),
    Offset(OffsetConverter),
    Logarithmic(LogarithmicConverter),
}

impl Converter {
    /// True when `to_reference` is a pure multiplication
    pub fn is_multiplicative(&self) -> bool {
        matches!(self, Converter::Identity | Converter::Scale(_))
    }

    /// True when the transform goes through a logarithm
    pub fn is_logarithmic(&self) -> bool {
        matches!(self, Converter::Logarithmic(_))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Converter::Identity => "identity",
            Converter::Scale(_) => "scale",
            Converter::Offset(_) => "offset",
            Converter::Logarithmic(_) => "logarithmic",
        }
    }

    /// Multiplicative factor of the transform (1 for identity)
    pub fn scale(&self) -> Number {
        match self {
            Converter::Identity => Number::from_i64(1),
            Converter::Scale(c) => c.scale().clone(),
            Converter::Offset(c) => c.scale().clone(),
            Converter::Logarithmic(c) => c.scale().clone(),
        }
    }

    /// Convert a magnitude into the reference representation.
    /// The input is left untouched.
    pub fn to_reference<M: Magnitude>(&self, value: &M) -> ConvertResult<M> {
        value.to_reference(self)
    }

    /// Convert a reference magnitude back into this converter's units.
    /// Scalars outside the domain of a logarithmic converter fail.
    pub fn from_reference<M: Magnitude>(&self, value: &M) -> ConvertResult<M> {
        value.from_reference(self)
    }

    /// In-place `to_reference` over an array; returns the same buffer
    pub fn to_reference_into<'a, S, D>(
        &self,
        values: &'a mut ArrayBase<S, D>,
    ) -> &'a mut ArrayBase<S, D>
    where
        S: DataMut<Elem = f64>,
        D: Dimension,
    {
        match self {
            Converter::Identity => {}
            Converter::Scale(c) => values.mapv_inplace(|v| c.to_reference_f64(v)),
            Converter::Offset(c) => values.mapv_inplace(|v| c.to_reference_f64(v)),
            Converter::Logarithmic(c) => values.mapv_inplace(|v| c.to_reference_f64(v)),
        }
        values
    }

    /// In-place `from_reference` over an array; returns the same buffer.
    /// Out-of-domain elements become NaN instead of failing the batch.
    pub fn from_reference_into<'a, S, D>(
        &self,
        values: &'a mut ArrayBase<S, D>,
    ) -> &'a mut ArrayBase<S, D>
    where
        S: DataMut<Elem = f64>,
        D: Dimension,
    {
        match self {
            Converter::Identity => {}
            Converter::Scale(c) => values.mapv_inplace(|v| c.from_reference_f64(v)),
            Converter::Offset(c) => values.mapv_inplace(|v| c.from_reference_f64(v)),
            Converter::Logarithmic(c) => values.mapv_inplace(|v| c.from_reference_f64(v)),
        }
        values
    }

    pub(crate) fn to_reference_f64(&self, value: f64) -> f64 {
        match self {
            Converter::Identity => value,
            Converter::Scale(c) => c.to_reference_f64(value),
            Converter::Offset(c) => c.to_reference_f64(value),
            Converter::Logarithmic(c) => c.to_reference_f64(value),
        }
    }

    /// Scalar path: domain is checked before transforming
    pub(crate) fn from_reference_f64(&self, value: f64) -> ConvertResult<f64> {
        Ok(match self {
            Converter::Identity => value,
            Converter::Scale(c) => c.from_reference_f64(value),
            Converter::Offset(c) => c.from_reference_f64(value),
            Converter::Logarithmic(c) => {
                c.check_reference_f64(value)?;
                c.from_reference_f64(value)
            }
        })
    }

    pub(crate) fn to_reference_number(&self, value: &Number) -> ConvertResult<Number> {
        match self {
            Converter::Identity => Ok(value.clone()),
            Converter::Scale(c) => Ok(c.to_reference_number(value)),
            Converter::Offset(c) => Ok(c.to_reference_number(value)),
            Converter::Logarithmic(c) => c.to_reference_number(value),
        }
    }

    pub(crate) fn from_reference_number(&self, value: &Number) -> ConvertResult<Number> {
        match self {
            Converter::Identity => Ok(value.clone()),
            Converter::Scale(c) => c.from_reference_number(value),
            Converter::Offset(c) => c.from_reference_number(value),
            Converter::Logarithmic(c) => c.from_reference_number(value),
        }
    }
}

impl fmt::Display for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Converter::Identity => write!(f, "identity"),
            Converter::Scale(c) => write!(f, "scale({})", c.scale()),
            Converter::Offset(c) => write!(f, "offset(scale={}, offset={})", c.scale(), c.offset()),
            Converter::Logarithmic(c) => write!(
                f,
                "logarithmic(scale={}, logbase={}, logfactor={})",
                c.scale(),
                c.logbase(),
                c.logfactor()
            ),
        }
    }
}

impl From<ScaleConverter> for Converter {
    fn from(c: ScaleConverter) -> Self {
        Converter::Scale(c)
    }
}

impl From<OffsetConverter> for Converter {
    fn from(c: OffsetConverter) -> Self {
        Converter::Offset(c)
    }
}

impl From<LogarithmicConverter> for Converter {
    fn from(c: LogarithmicConverter) -> Self {
        Converter::Logarithmic(c)
    }
}
