//! Register model: bit fields, register definitions, and register maps.
//!
//! - [`BitField`] - Mask/shift arithmetic over a single bit or a bit range.
//! - [`RegisterDefinition`] - A named register, optionally replicated per port.
//! - [`RegisterMap`] - An ordered set of definitions with name and offset lookup.

mod field;
mod map;

pub use field::BitField;
pub use map::{RegisterDefinition, RegisterMap};
