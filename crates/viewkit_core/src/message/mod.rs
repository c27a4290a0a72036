//! Diagnostic message resolution.
//!
//! Template lookup with locale fallback, positional placeholder
//! substitution, and component labeling for conversion diagnostics.

pub mod bundle;
pub mod resolver;
