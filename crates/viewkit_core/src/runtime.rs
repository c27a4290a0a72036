//! Process-wide sealed runtime.
//!
//! # Responsibility
//! - Hold the converter and render-kit registries for the serving phase.
//! - Enforce the build-then-freeze lifecycle: registries are sealed when
//!   the runtime is installed, and the runtime installs at most once per
//!   process.
//!
//! # Invariants
//! - After `install`, both registries are sealed and safe for
//!   unsynchronized concurrent reads.
//! - There is no un-registration path; shutdown discards the process.

use crate::convert::registry::ConverterRegistry;
use crate::error::{CoreError, RegistrationError};
use crate::render::registrar::{register_renderers, RegistrationReport, RendererManifest};
use crate::render::registry::RenderKitRegistry;
use log::info;
use once_cell::sync::OnceCell;

static RUNTIME: OnceCell<UiRuntime> = OnceCell::new();

/// Frozen registries serving the remainder of the process lifetime.
pub struct UiRuntime {
    converters: ConverterRegistry,
    render_kits: RenderKitRegistry,
}

impl UiRuntime {
    /// Builds a runtime from populated registries. Sealing happens in
    /// [`UiRuntime::install`].
    pub fn new(converters: ConverterRegistry, render_kits: RenderKitRegistry) -> Self {
        Self {
            converters,
            render_kits,
        }
    }

    /// Seals both registries and publishes this runtime process-wide.
    ///
    /// # Errors
    /// `RuntimeAlreadyInstalled` when a runtime was installed before; the
    /// previously installed runtime stays in effect.
    pub fn install(mut self) -> Result<&'static UiRuntime, RegistrationError> {
        self.converters.seal();
        self.render_kits.seal();
        let runtime = RUNTIME
            .try_insert(self)
            .map_err(|_| RegistrationError::RuntimeAlreadyInstalled)?;
        info!(
            "event=runtime_installed module=runtime kits={}",
            runtime.render_kits.kit_ids().collect::<Vec<_>>().join(",")
        );
        Ok(runtime)
    }

    /// The installed runtime, when startup has completed.
    pub fn current() -> Option<&'static UiRuntime> {
        RUNTIME.get()
    }

    /// Sealed converter registry.
    pub fn converters(&self) -> &ConverterRegistry {
        &self.converters
    }

    /// Sealed render-kit registry.
    pub fn render_kits(&self) -> &RenderKitRegistry {
        &self.render_kits
    }
}

/// One-call startup pass: run the renderer registration pipeline over the
/// manifest, then seal and install the runtime.
///
/// # Errors
/// Registration failures are fatal: nothing is installed and the process
/// must not be placed in service.
pub fn bootstrap(
    converters: ConverterRegistry,
    mut render_kits: RenderKitRegistry,
    manifest: &RendererManifest,
) -> Result<(&'static UiRuntime, RegistrationReport), CoreError> {
    let report = register_renderers(manifest, &mut render_kits)?;
    let runtime = UiRuntime::new(converters, render_kits).install()?;
    Ok((runtime, report))
}
