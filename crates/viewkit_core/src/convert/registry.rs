//! Converter registry.
//!
//! # Responsibility
//! - Hand out converter instances by explicit id or by value type.
//! - Provide the built-in defaults for common value categories.
//!
//! # Invariants
//! - Registration is last-write-wins, never an error: applications may
//!   replace built-in converters.
//! - After `seal`, the registry is read-only; concurrent lookups need no
//!   coordination.
//!
//! # Type-keyed lookup
//! Rust offers no runtime subtype walk, so a [`TypeDescriptor`] carries an
//! explicit ancestor chain, nearest ancestor first. Lookup resolves:
//! 1. An exact match on the descriptor's own type name always wins.
//! 2. Otherwise the registered ancestors are consulted under the registry's
//!    [`AncestorPolicy`]:
//!    - [`AncestorPolicy::Nearest`] (default): walk the chain nearest-first
//!      and return the first registered ancestor.
//!    - [`AncestorPolicy::FirstRegistered`]: among all registered ancestors,
//!      return the one registered earliest.
//! The policy is configurable because the tie-break between several
//! registered ancestors decides which converter a caller gets.

use crate::convert::big_integer::{self, BigIntConverter};
use crate::convert::boolean::{self, BoolConverter};
use crate::convert::converter::Converter;
use crate::error::RegistrationError;
use log::warn;
use num_bigint::BigInt;
use std::any::{type_name, Any};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Value-type key with an explicit covariance chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    name: &'static str,
    ancestors: Vec<&'static str>,
}

impl TypeDescriptor {
    /// Descriptor for a named type with no declared ancestors.
    pub fn named(name: &'static str) -> Self {
        Self {
            name,
            ancestors: Vec::new(),
        }
    }

    /// Descriptor keyed by a Rust type's name.
    pub fn of<T: Any>() -> Self {
        Self::named(type_name::<T>())
    }

    /// Appends an ancestor; call order is nearest ancestor first.
    pub fn extends(mut self, ancestor: &'static str) -> Self {
        self.ancestors.push(ancestor);
        self
    }

    /// The described type's own name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Declared ancestors, nearest first.
    pub fn ancestors(&self) -> &[&'static str] {
        &self.ancestors
    }
}

/// Tie-break rule when several ancestors of a looked-up type are registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AncestorPolicy {
    /// Nearest registered ancestor wins.
    #[default]
    Nearest,
    /// Earliest-registered ancestor wins, regardless of distance.
    FirstRegistered,
}

struct TypeEntry {
    converter: Arc<dyn Converter>,
    seq: u64,
}

/// Process-wide converter lookup table.
///
/// Mutable during startup, sealed before the process serves requests.
pub struct ConverterRegistry {
    policy: AncestorPolicy,
    by_id: BTreeMap<String, Arc<dyn Converter>>,
    by_type: BTreeMap<&'static str, TypeEntry>,
    next_seq: u64,
    sealed: bool,
}

impl ConverterRegistry {
    /// Creates an empty registry with the default ancestor policy.
    pub fn new() -> Self {
        Self::with_policy(AncestorPolicy::default())
    }

    /// Creates an empty registry with an explicit ancestor policy.
    pub fn with_policy(policy: AncestorPolicy) -> Self {
        Self {
            policy,
            by_id: BTreeMap::new(),
            by_type: BTreeMap::new(),
            next_seq: 0,
            sealed: false,
        }
    }

    /// Creates a registry pre-loaded with the built-in converters, keyed
    /// both by id and by value type.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        let big_int: Arc<dyn Converter> = Arc::new(BigIntConverter);
        let boolean: Arc<dyn Converter> = Arc::new(BoolConverter);

        // Seal cannot have happened yet, so these registrations are
        // infallible in practice.
        let _ = registry.register_by_id(big_integer::CONVERTER_ID, Arc::clone(&big_int));
        let _ = registry.register_by_type(type_name::<BigInt>(), big_int);
        let _ = registry.register_by_id(boolean::CONVERTER_ID, Arc::clone(&boolean));
        let _ = registry.register_by_type(type_name::<bool>(), boolean);
        registry
    }

    /// Installs or replaces the converter for an explicit id.
    pub fn register_by_id(
        &mut self,
        converter_id: impl Into<String>,
        converter: Arc<dyn Converter>,
    ) -> Result<(), RegistrationError> {
        self.check_open()?;
        let converter_id = converter_id.into();
        if self.by_id.insert(converter_id.clone(), converter).is_some() {
            warn!("event=converter_replaced module=convert key_kind=id key={converter_id}");
        }
        Ok(())
    }

    /// Installs or replaces the converter for a value-type name.
    pub fn register_by_type(
        &mut self,
        type_name: &'static str,
        converter: Arc<dyn Converter>,
    ) -> Result<(), RegistrationError> {
        self.check_open()?;
        let seq = self.next_seq;
        self.next_seq += 1;
        if self
            .by_type
            .insert(type_name, TypeEntry { converter, seq })
            .is_some()
        {
            warn!("event=converter_replaced module=convert key_kind=type key={type_name}");
        }
        Ok(())
    }

    /// Looks up a converter by explicit id.
    pub fn lookup_by_id(&self, converter_id: &str) -> Option<Arc<dyn Converter>> {
        self.by_id.get(converter_id).map(Arc::clone)
    }

    /// Looks up a converter by value type, walking the descriptor's
    /// ancestor chain as documented at module level.
    pub fn lookup_by_type(&self, descriptor: &TypeDescriptor) -> Option<Arc<dyn Converter>> {
        if let Some(entry) = self.by_type.get(descriptor.name()) {
            return Some(Arc::clone(&entry.converter));
        }

        match self.policy {
            AncestorPolicy::Nearest => descriptor
                .ancestors()
                .iter()
                .find_map(|ancestor| self.by_type.get(ancestor))
                .map(|entry| Arc::clone(&entry.converter)),
            AncestorPolicy::FirstRegistered => descriptor
                .ancestors()
                .iter()
                .filter_map(|ancestor| self.by_type.get(ancestor))
                .min_by_key(|entry| entry.seq)
                .map(|entry| Arc::clone(&entry.converter)),
        }
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
                registry: "converter",
            });
        }
        Ok(())
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::new()
    }
}
