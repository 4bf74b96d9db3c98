//! Register access seam between the EEPROM logic and hardware transports.
//!
//! PCIe config space, BAR0 mmap, I2C and USB-serial transports all reduce
//! to [`RegisterAccess`]: 32-bit reads and writes at 4-byte aligned offsets.
//! Offset alignment is checked by the transport, not by its callers.
//!
//! [`mock`] provides in-memory implementations for tests and demos.

pub mod mock;

use crate::error::Result;

/// 32-bit register access to a switch.
pub trait RegisterAccess {
    /// Read the 32-bit register at `offset`.
    fn read32(&mut self, offset: u32) -> Result<u32>;

    /// Write `value` to the 32-bit register at `offset`.
    fn write32(&mut self, offset: u32, value: u32) -> Result<()>;
}

impl<T: RegisterAccess + ?Sized> RegisterAccess for &mut T {
    #[inline]
    fn read32(&mut self, offset: u32) -> Result<u32> {
        (**self).read32(offset)
    }

    #[inline]
    fn write32(&mut self, offset: u32, value: u32) -> Result<()> {
        (**self).write32(offset, value)
    }
}

impl<T: RegisterAccess + ?Sized> RegisterAccess for Box<T> {
    #[inline]
    fn read32(&mut self, offset: u32) -> Result<u32> {
        (**self).read32(offset)
    }

    #[inline]
    fn write32(&mut self, offset: u32, value: u32) -> Result<()> {
        (**self).write32(offset, value)
    }
}
