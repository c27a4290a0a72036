//! Arbitrary-precision integer converter.
//!
//! # Responsibility
//! - Convert user-entered text to `num_bigint::BigInt` and back.
//!
//! # Contract
//! - Blank input means "no value"; see the trait docs in
//!   [`crate::convert::converter`].
//! - Failure diagnostics use [`INVALID_TEMPLATE`] with placeholders
//!   `[unconverted text, example, component label]`.

use crate::convert::converter::{
    require_args, ConversionContext, ConvertError, ConvertedValue, Converter, UiComponent,
    STRING_TEMPLATE,
};
use crate::convert::registry::TypeDescriptor;
use num_bigint::BigInt;
use std::any::Any;

/// Standard registry id for this converter.
pub const CONVERTER_ID: &str = "viewkit.convert.big_integer";

/// Template id for text that is not a valid whole number.
///
/// Placeholders: `{0}` the unconverted text, `{1}` an example value,
/// `{2}` the component label.
pub const INVALID_TEMPLATE: &str = "viewkit.convert.big_integer.invalid";

const EXAMPLE: &str = "9876";

/// Converter for whole numbers of unbounded magnitude.
#[derive(Debug, Default, Clone, Copy)]
pub struct BigIntConverter;

impl Converter for BigIntConverter {
    fn converter_id(&self) -> &'static str {
        CONVERTER_ID
    }

    fn value_type(&self) -> TypeDescriptor {
        TypeDescriptor::of::<BigInt>()
    }

    fn parse(
        &self,
        context: Option<&dyn ConversionContext>,
        component: Option<&dyn UiComponent>,
        text: Option<&str>,
    ) -> Result<Option<ConvertedValue>, ConvertError> {
        let (context, component) = require_args("parse", context, component)?;

        let trimmed = match text {
            Some(text) => text.trim(),
            None => return Ok(None),
        };
        if trimmed.is_empty() {
            return Ok(None);
        }

        match trimmed.parse::<BigInt>() {
            Ok(value) => Ok(Some(Box::new(value))),
            Err(err) => Err(ConvertError::conversion(
                INVALID_TEMPLATE,
                vec![
                    trimmed.to_string(),
                    EXAMPLE.to_string(),
                    context.resolver().label(component),
                ],
                err,
            )),
        }
    }

    fn format(
        &self,
        context: Option<&dyn ConversionContext>,
        component: Option<&dyn UiComponent>,
        value: Option<&(dyn Any + Send + Sync)>,
    ) -> Result<String, ConvertError> {
        let (context, component) = require_args("format", context, component)?;

        let value = match value {
            Some(value) => value,
            None => return Ok(String::new()),
        };

        // Already-textual values pass through unchanged.
        if let Some(text) = value.downcast_ref::<String>() {
            return Ok(text.clone());
        }
        if let Some(text) = value.downcast_ref::<&str>() {
            return Ok((*text).to_string());
        }

        if let Some(int) = value.downcast_ref::<BigInt>() {
            return Ok(int.to_string());
        }
        if let Some(int) = value.downcast_ref::<i64>() {
            return Ok(int.to_string());
        }
        if let Some(int) = value.downcast_ref::<i32>() {
            return Ok(int.to_string());
        }
        if let Some(int) = value.downcast_ref::<u64>() {
            return Ok(int.to_string());
        }

        Err(ConvertError::conversion_plain(
            STRING_TEMPLATE,
            vec![
                format!("{:?}", value.type_id()),
                context.resolver().label(component),
            ],
        ))
    }
}
