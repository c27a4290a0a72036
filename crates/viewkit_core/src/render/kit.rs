//! Render kit: a named renderer table.
//!
//! # Invariants
//! - Renderer-type keys are unique within one kit; installing over an
//!   existing key replaces it silently (last-registrar-wins, mirroring the
//!   converter registry policy).
//! - Kits are mutated only during the startup registration pass and are
//!   read-only afterwards.

use log::warn;
use std::any::Any;
use std::collections::BTreeMap;

/// Rendering or client-behavior strategy installed into a kit.
///
/// Rendering itself happens in the hosting framework; this core only
/// stores and hands out the strategy objects, so the contract is limited
/// to identification and downcasting.
pub trait Renderer: Send + Sync {
    /// The renderer-type key this strategy serves.
    fn renderer_type(&self) -> &'static str;

    /// Access to the concrete type for host-side downcasting.
    fn as_any(&self) -> &dyn Any;
}

/// Named collection of renderer singletons keyed by renderer-type.
pub struct RenderKit {
    id: String,
    renderers: BTreeMap<String, Box<dyn Renderer>>,
}

impl RenderKit {
    /// Creates an empty kit with the given identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            renderers: BTreeMap::new(),
        }
    }

    /// This kit's identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Installs a renderer under a renderer-type key.
    ///
    /// An existing renderer under the same key is replaced without error.
    pub fn install(&mut self, renderer_type: impl Into<String>, renderer: Box<dyn Renderer>) {
        let renderer_type = renderer_type.into();
        if self
            .renderers
            .insert(renderer_type.clone(), renderer)
            .is_some()
        {
            warn!(
                "event=renderer_replaced module=render kit={} renderer_type={renderer_type}",
                self.id
            );
        }
    }

    /// Looks up the renderer installed for a renderer-type.
    pub fn renderer(&self, renderer_type: &str) -> Option<&dyn Renderer> {
        self.renderers.get(renderer_type).map(Box::as_ref)
    }

    /// Installed renderer-type keys, in deterministic order.
    pub fn renderer_types(&self) -> impl Iterator<Item = &str> {
        self.renderers.keys().map(String::as_str)
    }

    /// Number of installed renderers.
    pub fn len(&self) -> usize {
        self.renderers.len()
    }

    /// Whether no renderer has been installed yet.
    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{RenderKit, Renderer};
    use std::any::Any;

    #[derive(Default)]
    struct TextWidget;

    impl Renderer for TextWidget {
        fn renderer_type(&self) -> &'static str {
            "widget.text"
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[derive(Default)]
    struct RichTextWidget;

    impl Renderer for RichTextWidget {
        fn renderer_type(&self) -> &'static str {
            "widget.text"
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[test]
    fn install_and_lookup_by_renderer_type() {
        let mut kit = RenderKit::new("viewkit.kit.base");
        kit.install("widget.text", Box::new(TextWidget));

        assert_eq!(kit.len(), 1);
        let renderer = kit.renderer("widget.text").expect("installed renderer");
        assert!(renderer.as_any().downcast_ref::<TextWidget>().is_some());
        assert!(kit.renderer("widget.unknown").is_none());
    }

    #[test]
    fn reinstall_replaces_silently() {
        let mut kit = RenderKit::new("viewkit.kit.base");
        kit.install("widget.text", Box::new(TextWidget));
        kit.install("widget.text", Box::new(RichTextWidget));

        assert_eq!(kit.len(), 1);
        let renderer = kit.renderer("widget.text").expect("installed renderer");
        assert!(renderer.as_any().downcast_ref::<RichTextWidget>().is_some());
    }
}
