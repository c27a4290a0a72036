//! Text/value conversion contracts.
//!
//! This module defines the bidirectional conversion strategy used to bind
//! user-entered text to typed application data, the concrete converters
//! shipped with the core, and the registry that hands converters out by
//! id or by value type.

pub mod big_integer;
pub mod boolean;
pub mod converter;
pub mod registry;
