//! Building converters from named parameters
//!
//! The parameter set decides the variant, in order of precedence:
//!
//! | parameters                     | converter     |
//! |--------------------------------|---------------|
//! | `logbase`, `logfactor`, scale? | logarithmic   |
//! | `offset`, scale?               | offset        |
//! | `scale`                        | scale         |
//! | none                           | identity      |
//!
//! A missing `scale` defaults to 1. Anything else is a configuration error.

use serde::{Deserialize, Serialize};
use tracing::debug;
use quire_core::Number;
use crate::{
    ConvertError, ConvertResult, Converter, LogarithmicConverter, OffsetConverter,
    ScaleConverter,
};

/// Named converter parameters, as found in unit definitions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConverterArgs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logbase: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logfactor: Option<Number>,
}

impl ConverterArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scale(mut self, value: impl Into<Number>) -> Self {
        self.scale = Some(value.into());
        self
    }

    pub fn offset(mut self, value: impl Into<Number>) -> Self {
        self.offset = Some(value.into());
        self
    }

    pub fn logbase(mut self, value: impl Into<Number>) -> Self {
        self.logbase = Some(value.into());
        self
    }

    pub fn logfactor(mut self, value: impl Into<Number>) -> Self {
        self.logfactor = Some(value.into());
        self
    }

    /// Set a parameter by name. Unknown or repeated names are rejected.
    pub fn set(&mut self, name: &str, value: Number) -> ConvertResult<()> {
        let slot = match name {
            "scale" => &mut self.scale,
            "offset" => &mut self.offset,
            "logbase" => &mut self.logbase,
            "logfactor" => &mut self.logfactor,
            other => {
                return Err(ConvertError::Configuration(format!("unknown parameter '{}'", other)))
            }
        };
        if slot.is_some() {
            return Err(ConvertError::Configuration(format!("parameter '{}' given twice", name)));
        }
        *slot = Some(value);
        Ok(())
    }

    /// Select and construct the converter these parameters describe
    pub fn build(&self) -> ConvertResult<Converter> {
        let scale = self.scale.clone().unwrap_or_else(|| Number::from_i64(1));

        let converter = match (&self.offset, &self.logbase, &self.logfactor) {
            (None, Some(logbase), Some(logfactor)) => Converter::Logarithmic(
                LogarithmicConverter::new(scale, logbase.clone(), logfactor.clone())?,
            ),
            (Some(_), Some(_), _) | (Some(_), _, Some(_)) => {
                return Err(ConvertError::Configuration(
                    "offset cannot be combined with logbase/logfactor".to_string(),
                ))
            }
            (_, Some(_), None) | (_, None, Some(_)) => {
                return Err(ConvertError::Configuration(
                    "logbase and logfactor must be given together".to_string(),
                ))
            }
            (Some(offset), None, None) => {
                Converter::Offset(OffsetConverter::new(scale, offset.clone())?)
            }
            (None, None, None) if self.scale.is_some() => {
                Converter::Scale(ScaleConverter::new(scale)?)
            }
            (None, None, None) => Converter::Identity,
        };

        debug!(kind = converter.kind(), %converter, "selected converter");
        Ok(converter)
    }
}

impl Converter {
    /// Build the minimal converter for a set of named parameters
    ///
    /// ```
    /// use quire_convert::{Converter, ScaleConverter};
    /// use quire_core::Number;
    ///
    /// let c = Converter::from_arguments([("scale", Number::from_i64(1))]).unwrap();
    /// assert_eq!(c, Converter::from(ScaleConverter::new(1).unwrap()));
    /// ```
    pub fn from_arguments<I, K>(args: I) -> ConvertResult<Converter>
    where
        I: IntoIterator<Item = (K, Number)>,
        K: AsRef<str>,
    {
        let mut collected = ConverterArgs::new();
        for (name, value) in args {
            collected.set(name.as_ref(), value)?;
        }
        collected.build()
    }

    /// The named parameters that rebuild this converter
    pub fn args(&self) -> ConverterArgs {
        match self {
            Converter::Identity => ConverterArgs::new(),
            Converter::Scale(c) => ConverterArgs::new().scale(c.scale().clone()),
            Converter::Offset(c) => ConverterArgs::new()
                .scale(c.scale().clone())
                .offset(c.offset().clone()),
            Converter::Logarithmic(c) => ConverterArgs::new()
                .scale(c.scale().clone())
                .logbase(c.logbase().clone())
                .logfactor(c.logfactor().clone()),
        }
    }
}

impl TryFrom<ConverterArgs> for Converter {
    type Error = ConvertError;

    fn try_from(args: ConverterArgs) -> Result<Self, Self::Error> {
        args.build()
    }
}

impl From<Converter> for ConverterArgs {
    fn from(converter: Converter) -> Self {
        converter.args()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(v: i64) -> Number {
        Number::from_i64(v)
    }

    #[test]
    fn test_from_arguments() {
        assert_eq!(
            Converter::from_arguments([("scale", n(1))]).unwrap(),
            Converter::from(ScaleConverter::new(1).unwrap())
        );
        assert_eq!(
            Converter::from_arguments([("scale", n(2)), ("offset", n(3))]).unwrap(),
            Converter::from(OffsetConverter::new(2, 3).unwrap())
        );
        assert_eq!(
            Converter::from_arguments([("scale", n(4)), ("logbase", n(5)), ("logfactor", n(6))])
                .unwrap(),
            Converter::from(LogarithmicConverter::new(4, 5, 6).unwrap())
        );
    }

    #[test]
    fn test_no_arguments_is_identity() {
        let none: [(&str, Number); 0] = [];
        assert_eq!(Converter::from_arguments(none).unwrap(), Converter::Identity);
    }

    #[test]
    fn test_scale_defaults_to_one() {
        assert_eq!(
            Converter::from_arguments([("offset", n(5))]).unwrap(),
            Converter::from(OffsetConverter::new(1, 5).unwrap())
        );
        assert_eq!(
            Converter::from_arguments([("logbase", n(10)), ("logfactor", n(10))]).unwrap(),
            Converter::from(LogarithmicConverter::new(1, 10, 10).unwrap())
        );
    }

    #[test]
    fn test_explicit_zero_offset_selects_offset() {
        let c = Converter::from_arguments([("scale", n(2)), ("offset", n(0))]).unwrap();
        assert_eq!(c.kind(), "offset");
    }

    #[test]
    fn test_configuration_errors() {
        let cases: Vec<Vec<(&str, Number)>> = vec![
            vec![("speed", n(1))],
            vec![("scale", n(1)), ("scale", n(2))],
            vec![("logbase", n(10))],
            vec![("logfactor", n(10))],
            vec![("offset", n(1)), ("logbase", n(10)), ("logfactor", n(1))],
        ];
        for args in cases {
            let result = Converter::from_arguments(args.clone());
            assert!(
                matches!(result, Err(ConvertError::Configuration(_))),
                "{:?} should be rejected, got {:?}", args, result
            );
        }
    }

    #[test]
    fn test_construction_errors_pass_through() {
        let result = Converter::from_arguments([("scale", n(0))]);
        assert!(matches!(result, Err(ConvertError::Construction { param: "scale", .. })));

        let result = Converter::from_arguments([("logbase", n(1)), ("logfactor", n(1))]);
        assert!(matches!(result, Err(ConvertError::Construction { param: "logbase", .. })));
    }

    #[test]
    fn test_args_rebuild_same_converter() {
        let converters: Vec<Converter> = vec![
            Converter::Identity,
            ScaleConverter::new(20.0).unwrap().into(),
            OffsetConverter::new(20.0, 2).unwrap().into(),
            LogarithmicConverter::new(1, 10, 10).unwrap().into(),
        ];
        for c in converters {
            assert_eq!(c.args().build().unwrap(), c);
        }
    }

    #[test]
    fn test_definition_from_json() {
        let c: Converter = serde_json::from_str(r#"{"scale": "0.001"}"#).unwrap();
        assert_eq!(c, Converter::from(ScaleConverter::new(Number::from_str("0.001").unwrap()).unwrap()));

        let c: Converter = serde_json::from_str(r#"{"logbase": "10", "logfactor": "10"}"#).unwrap();
        assert!(c.is_logarithmic());

        let json = serde_json::to_string(&Converter::from(OffsetConverter::new(1, 2).unwrap())).unwrap();
        assert_eq!(json, r#"{"scale":"1","offset":"2"}"#);
    }

    #[test]
    fn test_invalid_definitions_rejected() {
        assert!(serde_json::from_str::<Converter>(r#"{"scale": "0"}"#).is_err());
        assert!(serde_json::from_str::<Converter>(r#"{"logbase": "10"}"#).is_err());
        assert!(serde_json::from_str::<Converter>(r#"{"factor": "2"}"#).is_err());
    }
}
