//! Conversion strategy contract.
//!
//! # Responsibility
//! - Define the two-way `parse`/`format` contract between textual input and
//!   typed values.
//! - Define the context/component collaborators a converter may consult.
//! - Define the conversion error shape carried back to the host for
//!   localized rendering.
//!
//! # Invariants
//! - Converters are stateless: one shared instance serves arbitrarily many
//!   concurrent calls without coordination.
//! - Blank input is "no value entered", never a conversion error.
//! - Conversion failures always keep their underlying cause reachable via
//!   `Error::source`.

use crate::convert::registry::TypeDescriptor;
use crate::message::resolver::MessageResolver;
use std::any::Any;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Template id for failures while rendering a value back to text.
///
/// Placeholders: `{0}` the value, `{1}` the component label.
pub const STRING_TEMPLATE: &str = "viewkit.convert.string";

/// Type-erased converted value handed back to component code.
pub type ConvertedValue = Box<dyn Any + Send + Sync>;

/// Component taking part in a conversion, seen only through its
/// diagnostic surface.
pub trait UiComponent {
    /// Stable structural identifier (e.g. a client id path).
    fn structural_id(&self) -> &str;

    /// Explicit human-readable label, when one was configured.
    fn label(&self) -> Option<&str> {
        None
    }
}

/// Per-invocation handle supplied by the hosting framework.
///
/// Owned by the caller; a converter never holds it beyond one call.
pub trait ConversionContext {
    /// Active locale tag for diagnostic rendering (e.g. `en-US`).
    fn locale(&self) -> &str;

    /// Message resolution service for this request.
    fn resolver(&self) -> &MessageResolver;
}

/// Bidirectional text/value conversion strategy.
///
/// `parse` and `format` are symmetric but not always inverse: `format`
/// produces the canonical rendering, which may differ from the exact text
/// `parse` accepted (e.g. leading zeros).
pub trait Converter: Send + Sync {
    /// Registration id this converter is installed under by default.
    fn converter_id(&self) -> &'static str;

    /// Value type this converter produces, for type-keyed registry lookup.
    fn value_type(&self) -> TypeDescriptor;

    /// Converts user-entered text into a typed value.
    ///
    /// # Contract
    /// - Absent `context` or `component` fails with `ConvertError::Invocation`
    ///   (programmer error, never user-facing).
    /// - `None` text, or text that is empty after trimming, returns
    ///   `Ok(None)`: the field was left blank, which is a required-field
    ///   concern outside this contract.
    /// - A parse failure yields `ConvertError::Conversion` carrying the
    ///   converter's template id and the placeholders
    ///   `[unconverted text, example input, component label]`.
    fn parse(
        &self,
        context: Option<&dyn ConversionContext>,
        component: Option<&dyn UiComponent>,
        text: Option<&str>,
    ) -> Result<Option<ConvertedValue>, ConvertError>;

    /// Renders a typed value back into text.
    ///
    /// # Contract
    /// - Absent `context` or `component` fails with `ConvertError::Invocation`.
    /// - `None` renders as the empty string.
    /// - A value that is already a `String`/`&str` is passed through
    ///   unchanged, so upstream-stringified values are never re-encoded.
    /// - A value that cannot be rendered fails with the generic
    ///   [`STRING_TEMPLATE`] and placeholders `[value, component label]`.
    fn format(
        &self,
        context: Option<&dyn ConversionContext>,
        component: Option<&dyn UiComponent>,
        value: Option<&(dyn Any + Send + Sync)>,
    ) -> Result<String, ConvertError>;
}

/// Checks the mandatory `context`/`component` pair of one invocation.
///
/// Converter implementations call this first in both operations; an absent
/// argument is a defect in the calling code and is reported as
/// `ConvertError::Invocation`.
pub fn require_args<'a>(
    operation: &'static str,
    context: Option<&'a dyn ConversionContext>,
    component: Option<&'a dyn UiComponent>,
) -> Result<(&'a dyn ConversionContext, &'a dyn UiComponent), ConvertError> {
    match (context, component) {
        (Some(context), Some(component)) => Ok((context, component)),
        (None, _) => Err(ConvertError::Invocation {
            operation,
            argument: "context",
        }),
        (_, None) => Err(ConvertError::Invocation {
            operation,
            argument: "component",
        }),
    }
}

/// Conversion-layer error for contract misuse and failed conversions.
#[derive(Debug)]
pub enum ConvertError {
    /// A required argument was absent. Programmer error; propagate, never
    /// surface to the user.
    Invocation {
        operation: &'static str,
        argument: &'static str,
    },
    /// User-supplied text or value could not be converted. Recoverable by
    /// the host, which renders `template_id` with `placeholders` as a
    /// validation message on the originating component.
    Conversion {
        /// Template naming the target type; `None` for wrapped unexpected
        /// failures that carry no typed template.
        template_id: Option<&'static str>,
        /// Positional placeholder values, already label-resolved.
        placeholders: Vec<String>,
        /// Underlying failure, kept for logging/observability layers.
        cause: Option<Box<dyn Error + Send + Sync>>,
    },
}

impl ConvertError {
    /// Builds a typed conversion failure with its cause preserved.
    pub fn conversion(
        template_id: &'static str,
        placeholders: Vec<String>,
        cause: impl Error + Send + Sync + 'static,
    ) -> Self {
        Self::Conversion {
            template_id: Some(template_id),
            placeholders,
            cause: Some(Box::new(cause)),
        }
    }

    /// Builds a typed conversion failure with no underlying cause.
    pub fn conversion_plain(template_id: &'static str, placeholders: Vec<String>) -> Self {
        Self::Conversion {
            template_id: Some(template_id),
            placeholders,
            cause: None,
        }
    }

    /// Wraps an unexpected failure without a typed template.
    pub fn wrapped(cause: impl Error + Send + Sync + 'static) -> Self {
        Self::Conversion {
            template_id: None,
            placeholders: Vec::new(),
            cause: Some(Box::new(cause)),
        }
    }

    /// Template id for localized rendering, when the failure carries one.
    pub fn template_id(&self) -> Option<&'static str> {
        match self {
            Self::Conversion { template_id, .. } => *template_id,
            Self::Invocation { .. } => None,
        }
    }

    /// Positional placeholders for localized rendering.
    pub fn placeholders(&self) -> &[String] {
        match self {
            Self::Conversion { placeholders, .. } => placeholders,
            Self::Invocation { .. } => &[],
        }
    }
}

impl Display for ConvertError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invocation {
                operation,
                argument,
            } => {
                write!(f, "`{operation}` invoked without required {argument}")
            }
            Self::Conversion {
                template_id: Some(template_id),
                placeholders,
                ..
            } => {
                write!(
                    f,
                    "conversion failed ({template_id}): input `{}`",
                    placeholders.first().map(String::as_str).unwrap_or("")
                )
            }
            Self::Conversion {
                template_id: None,
                cause,
                ..
            } => match cause {
                Some(cause) => write!(f, "conversion failed: {cause}"),
                None => write!(f, "conversion failed"),
            },
        }
    }
}

impl Error for ConvertError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Conversion { cause, .. } => {
                cause.as_deref().map(|cause| cause as &(dyn Error + 'static))
            }
            Self::Invocation { .. } => None,
        }
    }
}
