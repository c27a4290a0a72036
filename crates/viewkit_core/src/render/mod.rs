//! Rendering kits and the startup registration pipeline.
//!
//! A render kit is a named bundle of renderer strategies keyed by
//! renderer-type. Kits are populated exactly once, by the registration
//! pipeline, before the process serves requests.

pub mod kit;
pub mod registrar;
pub mod registry;
