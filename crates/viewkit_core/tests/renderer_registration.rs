use std::any::Any;
use viewkit_core::{
    register_renderers, RegistrationDescriptor, RegistrationError, RenderKit, RenderKitRegistry,
    Renderer, RendererManifest,
};

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
struct WidgetAOverride;

impl Renderer for WidgetAOverride {
    fn renderer_type(&self) -> &'static str {
        "widgetA"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[test]
fn declared_renderer_is_installed_into_the_named_kit() {
    let mut registry = RenderKitRegistry::new();
    registry
        .add_kit(RenderKit::new("custom"))
        .expect("kit registration during startup");

    let mut manifest = RendererManifest::new();
    manifest.declare(RegistrationDescriptor::of::<WidgetA>("widgetA").for_kit("custom"));

    let report = register_renderers(&manifest, &mut registry).expect("registration pass");
    assert_eq!(report.installed.len(), 1);

    let kit = registry.get("custom").expect("custom kit");
    assert_eq!(kit.len(), 1);
    let renderer = kit.renderer("widgetA").expect("installed under widgetA");
    assert!(renderer.as_any().downcast_ref::<WidgetA>().is_some());
}

#[test]
fn missing_target_kit_fails_fatally_and_installs_nothing() {
    let mut registry = RenderKitRegistry::new();
    registry
        .add_kit(RenderKit::new("present"))
        .expect("kit registration during startup");

    let mut manifest = RendererManifest::new();
    manifest
        .declare(RegistrationDescriptor::of::<WidgetA>("widgetA").for_kit("present"))
        .declare(RegistrationDescriptor::of::<WidgetAOverride>("widgetA").for_kit("custom"));

    let err = register_renderers(&manifest, &mut registry)
        .expect_err("unknown kit must refuse startup");
    assert_eq!(
        err,
        RegistrationError::UnknownRenderKit {
            render_kit_id: "custom".to_string(),
            renderer_type: "widgetA".to_string(),
        }
    );

    // Nothing was installed into any kit, including the valid target.
    assert!(registry.get("present").expect("present kit").is_empty());
}

#[test]
fn later_declaration_wins_for_duplicate_renderer_type() {
    let mut registry = RenderKitRegistry::new();
    registry
        .add_kit(RenderKit::new("custom"))
        .expect("kit registration during startup");

    let mut manifest = RendererManifest::new();
    manifest
        .declare(RegistrationDescriptor::of::<WidgetA>("widgetA").for_kit("custom"))
        .declare(RegistrationDescriptor::of::<WidgetAOverride>("widgetA").for_kit("custom"));

    let report =
        register_renderers(&manifest, &mut registry).expect("overwrite must not be an error");
    // Both descriptors were processed; the kit keeps one renderer.
    assert_eq!(report.installed.len(), 2);

    let kit = registry.get("custom").expect("custom kit");
    assert_eq!(kit.len(), 1);
    let renderer = kit.renderer("widgetA").expect("installed under widgetA");
    assert!(renderer.as_any().downcast_ref::<WidgetAOverride>().is_some());
}

#[test]
fn registration_order_is_declaration_order() {
    let mut registry = RenderKitRegistry::new();
    registry
        .add_kit(RenderKit::new("custom"))
        .expect("kit registration during startup");

    let mut manifest = RendererManifest::new();
    manifest
        .declare(RegistrationDescriptor::of::<WidgetA>("zeta").for_kit("custom"))
        .declare(RegistrationDescriptor::of::<WidgetAOverride>("alpha").for_kit("custom"));

    let report = register_renderers(&manifest, &mut registry).expect("registration pass");
    let order: Vec<&str> = report
        .installed
        .iter()
        .map(|entry| entry.renderer_type.as_str())
        .collect();
    assert_eq!(order, vec!["zeta", "alpha"]);
}
