//! Boolean converter.
//!
//! Accepts `true`/`false` in any ASCII case after trimming; anything else is
//! a conversion failure reported through [`INVALID_TEMPLATE`].

use crate::convert::converter::{
    require_args, ConversionContext, ConvertError, ConvertedValue, Converter, UiComponent,
    STRING_TEMPLATE,
};
use crate::convert::registry::TypeDescriptor;
use std::any::Any;

/// Standard registry id for this converter.
pub const CONVERTER_ID: &str = "viewkit.convert.boolean";

/// Template id for text that is not a valid boolean.
///
/// Placeholders: `{0}` the unconverted text, `{1}` an example value,
/// `{2}` the component label.
pub const INVALID_TEMPLATE: &str = "viewkit.convert.boolean.invalid";

const EXAMPLE: &str = "true";

/// Converter for `true`/`false` toggle values.
#[derive(Debug, Default, Clone, Copy)]
pub struct BoolConverter;

impl Converter for BoolConverter {
    fn converter_id(&self) -> &'static str {
        CONVERTER_ID
    }

    fn value_type(&self) -> TypeDescriptor {
        TypeDescriptor::of::<bool>()
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

        match trimmed.to_ascii_lowercase().parse::<bool>() {
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

        if let Some(text) = value.downcast_ref::<String>() {
            return Ok(text.clone());
        }
        if let Some(text) = value.downcast_ref::<&str>() {
            return Ok((*text).to_string());
        }
        if let Some(flag) = value.downcast_ref::<bool>() {
            return Ok(flag.to_string());
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

#[cfg(test)]
mod tests {
    use super::{BoolConverter, INVALID_TEMPLATE};
    use crate::convert::converter::{ConversionContext, Converter, UiComponent};
    use crate::message::bundle::default_templates;
    use crate::message::resolver::MessageResolver;

    struct TestContext {
        resolver: MessageResolver,
    }

    impl ConversionContext for TestContext {
        fn locale(&self) -> &str {
            "en"
        }

        fn resolver(&self) -> &MessageResolver {
            &self.resolver
        }
    }

    struct ToggleField;

    impl UiComponent for ToggleField {
        fn structural_id(&self) -> &str {
            "prefs:newsletter"
        }
    }

    fn context() -> TestContext {
        TestContext {
            resolver: MessageResolver::new(default_templates()),
        }
    }

    #[test]
    fn accepts_mixed_case_after_trimming() {
        let context = context();
        let converter = BoolConverter;

        for (text, expected) in [(" TRUE ", true), ("False", false), ("true", true)] {
            let parsed = converter
                .parse(Some(&context), Some(&ToggleField), Some(text))
                .expect("valid boolean text")
                .expect("non-blank input");
            assert_eq!(parsed.downcast_ref::<bool>(), Some(&expected));
        }
    }

    #[test]
    fn rejects_non_boolean_text_with_raw_input() {
        let context = context();
        let converter = BoolConverter;

        let err = converter
            .parse(Some(&context), Some(&ToggleField), Some("yes"))
            .err()
            .expect("`yes` is not accepted");
        assert_eq!(err.template_id(), Some(INVALID_TEMPLATE));
        assert_eq!(err.placeholders()[0], "yes");
        // No explicit label configured, so the structural id stands in.
        assert_eq!(err.placeholders()[2], "prefs:newsletter");
    }

    #[test]
    fn formats_flag_and_passes_text_through() {
        let context = context();
        let converter = BoolConverter;

        let rendered = converter
            .format(Some(&context), Some(&ToggleField), Some(&true))
            .expect("bool formats");
        assert_eq!(rendered, "true");

        let text = "false".to_string();
        let unchanged = converter
            .format(Some(&context), Some(&ToggleField), Some(&text))
            .expect("string passes through");
        assert_eq!(unchanged, "false");
    }
}
