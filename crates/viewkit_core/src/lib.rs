//! Extension core for the viewkit component toolkit.
//! This crate owns the text/value conversion contract, diagnostic message
//! resolution, and the startup-time renderer registration pipeline.

pub mod convert;
pub mod error;
pub mod logging;
pub mod message;
pub mod render;
pub mod runtime;

pub use convert::big_integer::BigIntConverter;
pub use convert::boolean::BoolConverter;
pub use convert::converter::{
    ConversionContext, ConvertError, ConvertedValue, Converter, UiComponent,
};
pub use convert::registry::{AncestorPolicy, ConverterRegistry, TypeDescriptor};
pub use error::{CoreError, ErrorKind, RegistrationError};
pub use logging::{default_log_level, init_logging, logging_status};
pub use message::bundle::default_templates;
pub use message::resolver::{
    DiagnosticMessage, MessageError, MessageResolver, MessageTemplate, Severity, TemplateTable,
};
pub use render::kit::{RenderKit, Renderer};
pub use render::registrar::{
    register_renderers, zero_arg, RegistrationDescriptor, RegistrationReport, RendererManifest,
};
pub use render::registry::{RenderKitRegistry, BASE_RENDER_KIT_ID};
pub use runtime::{bootstrap, UiRuntime};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
