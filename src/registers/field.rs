//! Bit field arithmetic within a 32-bit register.

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Span {
    Bit(u8),
    Range(u8, u8),
}

/// A field within a 32-bit register: either a single bit or an inclusive
/// `(low, high)` bit range.
///
/// Immutable once constructed. Field values wider than the field are
/// silently truncated by [`insert`](Self::insert).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitField {
    span: Span,
}

impl BitField {
    /// Build a field from the `bit` / `bits` pair of a device definition.
    ///
    /// Exactly one must be given. `name` is only used in the error.
    pub fn new(name: &str, bit: Option<u8>, bits: Option<(u8, u8)>) -> Result<Self> {
        match (bit, bits) {
            (Some(b), None) => Self::single(b),
            (None, Some((low, high))) => Self::range(low, high),
            _ => Err(Error::AmbiguousFieldSpec {
                field: name.to_owned(),
            }),
        }
    }

    /// A single-bit field.
    pub fn single(bit: u8) -> Result<Self> {
        if bit > 31 {
            return Err(Error::InvalidBitRange {
                low: bit,
                high: bit,
            });
        }
        Ok(Self {
            span: Span::Bit(bit),
        })
    }

    /// An inclusive bit range `low..=high`.
    pub fn range(low: u8, high: u8) -> Result<Self> {
        if low > high || high > 31 {
            return Err(Error::InvalidBitRange { low, high });
        }
        Ok(Self {
            span: Span::Range(low, high),
        })
    }

    /// The single bit index, if this is a one-bit field.
    pub fn bit(&self) -> Option<u8> {
        match self.span {
            Span::Bit(b) => Some(b),
            Span::Range(..) => None,
        }
    }

    /// The `(low, high)` range, if this field was declared as a range.
    pub fn bits(&self) -> Option<(u8, u8)> {
        match self.span {
            Span::Bit(_) => None,
            Span::Range(low, high) => Some((low, high)),
        }
    }

    /// Number of bits covered.
    pub fn width(&self) -> u32 {
        match self.span {
            Span::Bit(_) => 1,
            Span::Range(low, high) => (high - low) as u32 + 1,
        }
    }

    /// Bitmask of the field within the register.
    pub fn mask(&self) -> u32 {
        match self.span {
            Span::Bit(b) => 1 << b,
            // u64 so a full 0..=31 range does not overflow
            Span::Range(low, high) => {
                let width = u32::from(high - low) + 1;
                (((1u64 << width) - 1) << low) as u32
            }
        }
    }

    /// Bit position of the field's least significant bit.
    pub fn shift(&self) -> u32 {
        match self.span {
            Span::Bit(b) => b as u32,
            Span::Range(low, _) => low as u32,
        }
    }

    /// Extract this field's value from a register value.
    #[inline]
    pub fn extract(&self, register_value: u32) -> u32 {
        (register_value & self.mask()) >> self.shift()
    }

    /// Insert a field value into a register value, leaving other bits alone.
    #[inline]
    pub fn insert(&self, register_value: u32, field_value: u32) -> u32 {
        (register_value & !self.mask()) | ((field_value << self.shift()) & self.mask())
    }
}
