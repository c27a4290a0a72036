//! Startup renderer registration pipeline.
//!
//! # Responsibility
//! - Collect renderer registration descriptors into an ordered manifest
//!   (the explicit replacement for annotation scanning).
//! - Validate, instantiate and install every declared renderer into its
//!   target kit, in one run-to-completion pass before any request is
//!   served.
//!
//! # Invariants
//! - Descriptors are processed in declaration order, so startup
//!   diagnostics are reproducible across runs.
//! - Every descriptor is validated before anything is instantiated: a
//!   fatal error installs nothing into any kit.
//! - Each constructor runs exactly once; renderer instances are
//!   process-wide singletons.
//! - Duplicate renderer-type declarations targeting the same kit are not
//!   an error; the later declaration wins.

use crate::error::RegistrationError;
use crate::render::kit::Renderer;
use crate::render::registry::{RenderKitRegistry, BASE_RENDER_KIT_ID};
use log::{error, info};
use serde::Serialize;
use std::any::type_name;

/// Zero-argument construction path for one renderer singleton.
pub type RendererConstructor = fn() -> Box<dyn Renderer>;

/// Constructs a defaultable renderer; use as the descriptor constructor:
/// `zero_arg::<MyRenderer>`.
pub fn zero_arg<R: Renderer + Default + 'static>() -> Box<dyn Renderer> {
    Box::new(R::default())
}

/// One declared renderer registration, derived once and immutable.
#[derive(Debug, Clone)]
pub struct RegistrationDescriptor {
    /// Target kit; `None` means the baseline kit
    /// [`BASE_RENDER_KIT_ID`].
    pub render_kit_id: Option<String>,
    /// Renderer-type key to install under.
    pub renderer_type: String,
    /// Implementing type name, for startup diagnostics.
    pub implementor: &'static str,
    /// Zero-argument construction path; `None` models a declaration whose
    /// implementor exposes no such path, which is fatal at validation.
    pub constructor: Option<RendererConstructor>,
}

impl RegistrationDescriptor {
    /// Descriptor for a defaultable renderer targeting the baseline kit.
    pub fn of<R: Renderer + Default + 'static>(renderer_type: impl Into<String>) -> Self {
        Self {
            render_kit_id: None,
            renderer_type: renderer_type.into(),
            implementor: type_name::<R>(),
            constructor: Some(zero_arg::<R>),
        }
    }

    /// Retargets this descriptor at a named kit.
    pub fn for_kit(mut self, render_kit_id: impl Into<String>) -> Self {
        self.render_kit_id = Some(render_kit_id.into());
        self
    }

    /// Drops the construction path, modeling a broken declaration.
    pub fn without_constructor(mut self) -> Self {
        self.constructor = None;
        self
    }

    fn target_kit(&self) -> &str {
        self.render_kit_id.as_deref().unwrap_or(BASE_RENDER_KIT_ID)
    }
}

/// Ordered, deterministic set of renderer declarations.
#[derive(Debug, Default)]
pub struct RendererManifest {
    entries: Vec<RegistrationDescriptor>,
}

impl RendererManifest {
    /// Creates an empty manifest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one declaration; processing order is declaration order.
    pub fn declare(&mut self, descriptor: RegistrationDescriptor) -> &mut Self {
        self.entries.push(descriptor);
        self
    }

    /// Declared descriptors in declaration order.
    pub fn entries(&self) -> &[RegistrationDescriptor] {
        &self.entries
    }

    /// Number of declarations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been declared.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One successfully installed renderer, for startup diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstalledRenderer {
    pub render_kit_id: String,
    pub renderer_type: String,
    pub implementor: &'static str,
}

/// Outcome of one registration pass, in installation order.
#[derive(Debug, Default, Serialize)]
pub struct RegistrationReport {
    pub installed: Vec<InstalledRenderer>,
}

/// Runs the registration pass: validate every descriptor, then
/// instantiate and install each renderer into its resolved kit.
///
/// # Errors
/// Any `RegistrationError` is fatal for startup. Validation runs for the
/// whole manifest before the first instantiation, so a failure leaves
/// every kit untouched.
pub fn register_renderers(
    manifest: &RendererManifest,
    registry: &mut RenderKitRegistry,
) -> Result<RegistrationReport, RegistrationError> {
    if registry.is_sealed() {
        return Err(RegistrationError::RegistrySealed {
            registry: "render kit",
        });
    }

    for descriptor in manifest.entries() {
        validate(descriptor, registry)?;
        info!(
            "event=renderer_validated module=render kit={} renderer_type={} implementor={}",
            descriptor.target_kit(),
            descriptor.renderer_type,
            descriptor.implementor
        );
    }

    let mut report = RegistrationReport::default();
    for descriptor in manifest.entries() {
        let constructor = descriptor
            .constructor
            .ok_or_else(|| missing_constructor(descriptor))?;
        let renderer = constructor();
        let kit_id = descriptor.target_kit().to_string();
        let kit = registry
            .get_mut(&kit_id)?
            .ok_or_else(|| unknown_kit(descriptor))?;
        kit.install(descriptor.renderer_type.clone(), renderer);
        info!(
            "event=renderer_installed module=render kit={kit_id} renderer_type={} implementor={}",
            descriptor.renderer_type, descriptor.implementor
        );
        report.installed.push(InstalledRenderer {
            render_kit_id: kit_id,
            renderer_type: descriptor.renderer_type.clone(),
            implementor: descriptor.implementor,
        });
    }
    Ok(report)
}

fn validate(
    descriptor: &RegistrationDescriptor,
    registry: &RenderKitRegistry,
) -> Result<(), RegistrationError> {
    if descriptor.constructor.is_none() {
        let err = missing_constructor(descriptor);
        error!("event=renderer_rejected module=render reason=missing_constructor detail={err}");
        return Err(err);
    }
    if !registry.contains(descriptor.target_kit()) {
        let err = unknown_kit(descriptor);
        error!("event=renderer_rejected module=render reason=unknown_render_kit detail={err}");
        return Err(err);
    }
    Ok(())
}

fn missing_constructor(descriptor: &RegistrationDescriptor) -> RegistrationError {
    RegistrationError::MissingConstructor {
        renderer_type: descriptor.renderer_type.clone(),
        implementor: descriptor.implementor,
    }
}

fn unknown_kit(descriptor: &RegistrationDescriptor) -> RegistrationError {
    RegistrationError::UnknownRenderKit {
        render_kit_id: descriptor.target_kit().to_string(),
        renderer_type: descriptor.renderer_type.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::{register_renderers, RegistrationDescriptor, RendererManifest};
    use crate::error::RegistrationError;
    use crate::render::kit::Renderer;
    use crate::render::registry::{RenderKitRegistry, BASE_RENDER_KIT_ID};
    use std::any::Any;

    #[derive(Default)]
    struct WidgetA;

    impl Renderer for WidgetA {
        fn renderer_type(&self) -> &'static str {
            "widgetA"
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[derive(Default)]
    struct WidgetB;

    impl Renderer for WidgetB {
        fn renderer_type(&self) -> &'static str {
            "widgetA"
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[test]
    fn omitted_kit_id_installs_into_the_baseline_kit() {
        let mut registry = RenderKitRegistry::with_base_kit();
        let mut manifest = RendererManifest::new();
        manifest.declare(RegistrationDescriptor::of::<WidgetA>("widgetA"));

        let report = register_renderers(&manifest, &mut registry).expect("baseline install");
        assert_eq!(report.installed.len(), 1);
        assert_eq!(report.installed[0].render_kit_id, BASE_RENDER_KIT_ID);

        let kit = registry.get(BASE_RENDER_KIT_ID).expect("base kit");
        assert!(kit
            .renderer("widgetA")
            .expect("installed renderer")
            .as_any()
            .downcast_ref::<WidgetA>()
            .is_some());
    }

    #[test]
    fn missing_constructor_is_fatal_and_installs_nothing() {
        let mut registry = RenderKitRegistry::with_base_kit();
        let mut manifest = RendererManifest::new();
        manifest
            .declare(RegistrationDescriptor::of::<WidgetA>("widgetA"))
            .declare(RegistrationDescriptor::of::<WidgetB>("widgetB").without_constructor());

        let err = register_renderers(&manifest, &mut registry)
            .expect_err("broken declaration must refuse startup");
        assert!(matches!(err, RegistrationError::MissingConstructor { .. }));

        // Validation precedes instantiation, so even the valid first
        // descriptor must not have been installed.
        assert!(registry.get(BASE_RENDER_KIT_ID).expect("base kit").is_empty());
    }

    #[test]
    fn report_serializes_for_startup_diagnostics() {
        let mut registry = RenderKitRegistry::with_base_kit();
        let mut manifest = RendererManifest::new();
        manifest.declare(RegistrationDescriptor::of::<WidgetA>("widgetA"));

        let report = register_renderers(&manifest, &mut registry).expect("install");
        let json = serde_json::to_value(&report).expect("report serializes");
        assert_eq!(json["installed"][0]["renderer_type"], "widgetA");
        assert_eq!(json["installed"][0]["render_kit_id"], BASE_RENDER_KIT_ID);
    }
}
