//! Render kit registry.
//!
//! # Responsibility
//! - Map render-kit identifiers to kit instances.
//! - Enforce the two-phase lifecycle: mutable while the startup pass runs,
//!   frozen (`seal`) for the remainder of the process.
//!
//! # Invariants
//! - A missing kit is always the caller's fatal error; the registry never
//!   creates kits implicitly.
//! - After `seal`, every mutation path reports `RegistrySealed`.

use crate::error::RegistrationError;
use crate::render::kit::RenderKit;
use log::warn;
use std::collections::BTreeMap;

/// Identifier of the baseline kit, used when a registration names no kit.
pub const BASE_RENDER_KIT_ID: &str = "viewkit.kit.base";

/// Process-wide render kit lookup table.
pub struct RenderKitRegistry {
    kits: BTreeMap<String, RenderKit>,
    sealed: bool,
}

impl RenderKitRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            kits: BTreeMap::new(),
            sealed: false,
        }
    }

    /// Creates a registry already holding an empty baseline kit.
    pub fn with_base_kit() -> Self {
        let mut registry = Self::new();
        let _ = registry.add_kit(RenderKit::new(BASE_RENDER_KIT_ID));
        registry
    }

    /// Adds a kit under its own identifier, replacing any previous kit
    /// with the same id (last-write-wins, warn-logged).
    pub fn add_kit(&mut self, kit: RenderKit) -> Result<(), RegistrationError> {
        self.check_open()?;
        let id = kit.id().to_string();
        if self.kits.insert(id.clone(), kit).is_some() {
            warn!("event=render_kit_replaced module=render kit={id}");
        }
        Ok(())
    }

    /// Looks up a kit by identifier.
    pub fn get(&self, kit_id: &str) -> Option<&RenderKit> {
        self.kits.get(kit_id)
    }

    /// Mutable kit access for the startup registration pass.
    ///
    /// # Errors
    /// `RegistrySealed` once the serving-phase freeze has happened.
    pub fn get_mut(&mut self, kit_id: &str) -> Result<Option<&mut RenderKit>, RegistrationError> {
        self.check_open()?;
        Ok(self.kits.get_mut(kit_id))
    }

    /// Whether a kit is registered under the identifier.
    pub fn contains(&self, kit_id: &str) -> bool {
        self.kits.contains_key(kit_id)
    }

    /// Registered kit identifiers, in deterministic order.
    pub fn kit_ids(&self) -> impl Iterator<Item = &str> {
        self.kits.keys().map(String::as_str)
    }

    /// Freezes the registry for the serving phase.
    pub fn seal(&mut self) {
        self.sealed = true;
    }

    /// Whether the serving-phase freeze has happened.
    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    fn check_open(&self) -> Result<(), RegistrationError> {
        if self.sealed {
            return Err(RegistrationError::RegistrySealed {
                registry: "render kit",
            });
        }
        Ok(())
    }
}

impl Default for RenderKitRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{RenderKitRegistry, BASE_RENDER_KIT_ID};
    use crate::error::RegistrationError;
    use crate::render::kit::RenderKit;

    #[test]
    fn with_base_kit_registers_the_documented_default() {
        let registry = RenderKitRegistry::with_base_kit();
        assert!(registry.contains(BASE_RENDER_KIT_ID));
        assert!(registry
            .get(BASE_RENDER_KIT_ID)
            .expect("base kit")
            .is_empty());
    }

    #[test]
    fn missing_kit_is_not_found_never_created() {
        let mut registry = RenderKitRegistry::new();
        assert!(registry.get("custom").is_none());
        assert!(registry
            .get_mut("custom")
            .expect("registry still open")
            .is_none());
    }

    #[test]
    fn sealed_registry_rejects_every_mutation_path() {
        let mut registry = RenderKitRegistry::with_base_kit();
        registry.seal();

        let add_err = registry
            .add_kit(RenderKit::new("late"))
            .expect_err("sealed add must fail");
        assert_eq!(
            add_err,
            RegistrationError::RegistrySealed {
                registry: "render kit"
            }
        );

        let mut_err = registry
            .get_mut(BASE_RENDER_KIT_ID)
            .err()
            .expect("sealed get_mut must fail");
        assert!(matches!(mut_err, RegistrationError::RegistrySealed { .. }));

        // Read paths stay open.
        assert!(registry.get(BASE_RENDER_KIT_ID).is_some());
    }
}
